use std::fmt;

use naga::ShaderStage;
use naga::valid::{Capabilities, ValidationFlags, Validator};

/// WGSL for the distance-field pass.
pub const SDF_WGSL: &str = include_str!("shaders/sdf.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Why a shader could not be turned into a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The source did not parse.
    Compile { label: String, log: String },
    /// The module parsed but its stages or interface are unusable.
    Link { label: String, log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { label, log } => write!(f, "shader {label:?} failed to compile:\n{log}"),
            ShaderError::Link { label, log } => write!(f, "shader {label:?} failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Parses and validates `source` on the CPU and checks that it provides the
/// vertex and fragment entry points the pipeline uses.
///
/// This catches errors inside the module. Mismatches against the pipeline's
/// bind group and vertex layouts surface in [`link_checked`].
pub fn validate_wgsl(label: &str, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        label: label.to_string(),
        log: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderError::Link { label: label.to_string(), log: e.emit_to_string(source) })?;

    for (name, stage) in [(VERTEX_ENTRY, ShaderStage::Vertex), (FRAGMENT_ENTRY, ShaderStage::Fragment)] {
        if !module.entry_points.iter().any(|ep| ep.name == name && ep.stage == stage) {
            return Err(ShaderError::Link {
                label: label.to_string(),
                log: format!("missing {stage:?} entry point `{name}`"),
            });
        }
    }

    Ok(module)
}

/// Runs `build` inside a validation error scope on `device`.
///
/// Whatever wgpu flags while creating the module, layouts and pipeline is
/// returned as a link error instead of reaching the uncaptured-error handler,
/// which panics by default.
pub fn link_checked<T>(device: &wgpu::Device, label: &str, build: impl FnOnce() -> T) -> Result<T, ShaderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let built = build();
    match pollster::block_on(scope.pop()) {
        None => Ok(built),
        Some(err) => Err(ShaderError::Link { label: label.to_string(), log: err.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shader_is_valid() {
        let module = validate_wgsl("sdf", SDF_WGSL);
        assert!(module.is_ok(), "{}", module.err().map(|e| e.to_string()).unwrap_or_default());
    }

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = validate_wgsl("broken", "fn vs_main( {").err();
        assert!(matches!(err, Some(ShaderError::Compile { .. })), "{err:?}");
    }

    #[test]
    fn type_error_is_rejected() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { let x: f32 = true; return vec4<f32>(x); }";
        let err = validate_wgsl("typed", src).err();
        assert!(matches!(err, Some(ShaderError::Compile { .. } | ShaderError::Link { .. })), "{err:?}");
    }

    #[test]
    fn missing_entry_point_is_a_link_error() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        match validate_wgsl("half", src) {
            Err(ShaderError::Link { log, .. }) => assert!(log.contains("vs_main"), "{log}"),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn display_names_the_shader() {
        let e = ShaderError::Compile { label: "sdf".into(), log: "bad".into() };
        assert_eq!(e.to_string(), "shader \"sdf\" failed to compile:\nbad");
    }
}
