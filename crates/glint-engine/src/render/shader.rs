use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

/// Pipeline stage a WGSL module is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point every module of this stage must export.
    pub const fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => "vs_main",
            Self::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Reads a WGSL source file.
pub fn load_shader_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader source `{}`", path.display()))?;
    anyhow::ensure!(
        !src.trim().is_empty(),
        "shader source `{}` is empty",
        path.display()
    );
    Ok(src)
}

/// Runs `f` inside a validation error scope and turns a captured wgpu error
/// into an `anyhow::Error`.
///
/// Without the scope wgpu hands validation failures to the device's
/// uncaptured-error handler, which panics.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    what: impl FnOnce() -> String,
    f: impl FnOnce() -> T,
) -> Result<T> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match pollster::block_on(scope.pop()) {
        None => Ok(value),
        Some(err) => Err(anyhow::anyhow!("{err}").context(what())),
    }
}

/// Compiles one WGSL stage.
///
/// Validation errors fail the compile; warnings are logged.
pub fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let module = validated(
        device,
        || format!("{stage} shader `{label}` failed to compile"),
        || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        },
    )?;

    let info = pollster::block_on(module.get_compilation_info());
    for msg in &info.messages {
        let at = msg
            .location
            .as_ref()
            .map(|l| format!("{}:{}", l.line_number, l.line_position))
            .unwrap_or_else(|| "?".to_string());
        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                log::error!("{stage} shader `{label}` {at}: {}", msg.message);
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("{stage} shader `{label}` {at}: {}", msg.message);
            }
            wgpu::CompilationMessageType::Info => {
                log::debug!("{stage} shader `{label}` {at}: {}", msg.message);
            }
        }
    }

    log::debug!("compiled {stage} shader `{label}`");
    Ok(module)
}
