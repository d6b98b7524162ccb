//! Built-in gizmo shader and WGSL validation.

use anyhow::{Context, Result};

/// Vertex + fragment source for all gizmo pipelines.
///
/// Entry points: `vs_main`, `fs_main`. Bind group 0, binding 0 holds the
/// camera block (`view`, `projection`).
pub const GIZMO_WGSL: &str = include_str!("shaders/gizmo.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Parses and validates WGSL with naga.
///
/// wgpu reports shader errors asynchronously through the device error
/// callback; validating up front turns a broken shader into an ordinary
/// startup error carrying the full diagnostic.
pub fn validate_wgsl(label: &str, source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|err| anyhow::anyhow!(err.emit_to_string(source)))
        .with_context(|| format!("failed to parse shader `{label}`"))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|err| anyhow::anyhow!(err.emit_to_string(source)))
    .with_context(|| format!("failed to validate shader `{label}`"))?;

    Ok(())
}

/// Validates and creates the gizmo shader module.
///
/// Failure is fatal for renderer construction and is logged before being
/// returned.
pub(crate) fn create_gizmo_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    if let Err(err) = validate_wgsl("gizmo", GIZMO_WGSL) {
        log::error!("gizmo shader rejected: {err:#}");
        return Err(err);
    }

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("gizmo shader"),
        source: wgpu::ShaderSource::Wgsl(GIZMO_WGSL.into()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shader_is_valid() {
        validate_wgsl("gizmo", GIZMO_WGSL).unwrap();
    }

    #[test]
    fn builtin_shader_declares_entry_points() {
        assert!(GIZMO_WGSL.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(GIZMO_WGSL.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = validate_wgsl("broken", "fn main( {").unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }

    #[test]
    fn type_error_is_reported() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        assert!(validate_wgsl("mistyped", src).is_err());
    }
}
