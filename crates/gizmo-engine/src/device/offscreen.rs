use anyhow::{ensure, Context, Result};

use crate::paint::Color;
use crate::render::RenderTarget;

use super::Gpu;

/// Color texture plus optional depth texture, rendered to without a window.
///
/// The color texture can be copied back to the CPU with
/// [`read_rgba8`](Self::read_rgba8).
pub struct OffscreenTarget {
    size: (u32, u32),
    format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,

    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: Option<wgpu::TextureView>,
}

impl OffscreenTarget {
    /// `format` must be a 4-byte RGBA/BGRA 8-bit format for read-back.
    pub fn new(
        gpu: &Gpu,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Result<Self> {
        ensure!(width > 0 && height > 0, "offscreen target has zero size ({width}x{height})");
        let max = gpu.device().limits().max_texture_dimension_2d;
        ensure!(
            width <= max && height <= max,
            "offscreen target {width}x{height} exceeds device limit {max}"
        );

        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen color"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_view = depth_format.map(|depth_format| {
            gpu.device()
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("offscreen depth"),
                    size: extent,
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: depth_format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        log::debug!("offscreen target created: {width}x{height} {format:?} depth={depth_format:?}");

        Ok(Self {
            size: (width, height),
            format,
            depth_format,
            color,
            color_view,
            depth_view,
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth_format
    }

    #[inline]
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    #[inline]
    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_view.as_ref()
    }

    /// Borrows the target for one renderer call.
    pub fn render_target<'a>(&'a self, encoder: &'a mut wgpu::CommandEncoder) -> RenderTarget<'a> {
        RenderTarget::new(encoder, &self.color_view).with_depth(self.depth_view.as_ref())
    }

    /// Records a pass clearing color to `color` and depth to 1.0.
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder, color: Color) {
        let depth_stencil_attachment =
            self.depth_view.as_ref().map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("offscreen clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: color.r as f64,
                        g: color.g as f64,
                        b: color.b as f64,
                        a: color.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    /// Copies the color texture to the CPU as tightly packed RGBA8 rows.
    ///
    /// Blocks until the GPU has finished all submitted work. BGRA targets are
    /// swizzled to RGBA.
    pub fn read_rgba8(&self, gpu: &Gpu) -> Result<Vec<u8>> {
        let swizzle = match self.format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
            other => anyhow::bail!("read-back of {other:?} is not supported"),
        };

        let (width, height) = self.size;
        let unpadded = width * BYTES_PER_PIXEL;
        let padded = padded_bytes_per_row(width);

        let staging = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen read-back"),
            size: padded as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = gpu.create_encoder("offscreen read-back encoder");
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.color,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        gpu.submit(encoder);

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gpu.device()
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed to wait for read-back copy")?;
        rx.recv()
            .context("read-back map callback was dropped")?
            .context("failed to map read-back buffer")?;

        let mut pixels = {
            let mapped = slice.get_mapped_range();
            strip_row_padding(&mapped, unpadded as usize, padded as usize, height as usize)
        };
        staging.unmap();

        if swizzle {
            bgra_to_rgba(&mut pixels);
        }
        Ok(pixels)
    }
}

const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch of a texture-to-buffer copy.
fn padded_bytes_per_row(width: u32) -> u32 {
    (width * BYTES_PER_PIXEL).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
}

fn strip_row_padding(data: &[u8], row_bytes: usize, padded_row_bytes: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_bytes * rows);
    for row in data.chunks(padded_row_bytes).take(rows) {
        out.extend_from_slice(&row[..row_bytes]);
    }
    out
}

fn bgra_to_rgba(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn padding_is_stripped() {
        // 2 rows of 3 payload bytes, each padded to 8.
        let data = [1, 2, 3, 0, 0, 0, 0, 0, 4, 5, 6, 0, 0, 0, 0, 0];
        assert_eq!(strip_row_padding(&data, 3, 8, 2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn swizzle_swaps_red_and_blue() {
        let mut px = [10, 20, 30, 40, 1, 2, 3, 4];
        bgra_to_rgba(&mut px);
        assert_eq!(px, [30, 20, 10, 40, 3, 2, 1, 4]);
    }
}
