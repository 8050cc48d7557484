use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::GlyphfallError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import glyphfall::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/ease.wgsl"),
    file_path: "modules/ease.wgsl",
}];

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError::Shader`] with the composer's diagnostic if a
    /// shared module fails to parse.
    pub fn new() -> Result<Self, GlyphfallError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let registered = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map(|_| ());
            if let Err(e) = registered {
                return Err(GlyphfallError::Shader(format!(
                    "module '{}': {}",
                    m.file_path,
                    e.emit_to_string(&composer)
                )));
            }
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError::Shader`] with the rendered diagnostic when
    /// composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, GlyphfallError> {
        let naga_module = self.compose_naga(source, file_path)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module. Useful for testing shader composition without a
    /// GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphfallError::Shader`] with the rendered diagnostic.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GlyphfallError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                GlyphfallError::Shader(format!(
                    "'{file_path}': {}",
                    e.emit_to_string(&self.composer)
                ))
            })
    }
}
