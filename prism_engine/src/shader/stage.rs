/// Compiled shader stage
///
/// A successfully compiled stage owns its shader object until it is dropped,
/// which happens right after linking whatever the link outcome. A stage that
/// fails to compile never escapes `compile_stage`: its object is deleted and
/// the caller receives `StageCompile` instead.

use crate::device_call;
use crate::engine_error;
use crate::error::{Error, Result};
use crate::render::{DeviceRef, ShaderHandle};
use crate::shader::ShaderStage;

pub struct CompiledStage {
    device: DeviceRef,
    handle: ShaderHandle,
    stage: ShaderStage,
}

impl CompiledStage {
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for CompiledStage {
    fn drop(&mut self) {
        let dev = &*self.device;
        device_call!(dev, dev.delete_shader(self.handle));
    }
}

/// Compile one stage from source text
///
/// # Errors
///
/// - `StageCompile` with the device info log when compilation fails; one
///   Error diagnostic naming the stage is emitted and the shader object is
///   deleted before returning
/// - `BackendError` if the device cannot create a shader object
pub fn compile_stage(device: &DeviceRef, stage: ShaderStage, source: &str) -> Result<CompiledStage> {
    let dev = &**device;
    let handle = device_call!(dev, dev.create_shader(stage))?;

    // Owned from here on: any early return releases the object
    let compiled = CompiledStage { device: device.clone(), handle, stage };

    device_call!(dev, dev.shader_source(handle, source));
    device_call!(dev, dev.compile_shader(handle));

    if !device_call!(dev, dev.shader_compile_status(handle)) {
        let log = device_call!(dev, dev.shader_info_log(handle));
        engine_error!("prism::shader", "Failed to compile {} shader!\n{}", stage.name(), log.trim_end());
        drop(compiled);
        return Err(Error::StageCompile { stage, log });
    }

    Ok(compiled)
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
