/// Linked shader program with a named-uniform cache

use std::cell::RefCell;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::device_call;
use crate::{engine_debug, engine_error, engine_info, engine_warn};
use crate::error::{Error, Result};
use crate::render::{DeviceRef, ProgramHandle, UniformLocation};
use crate::shader::{compile_stage, parse_shader_file, CompiledStage, ShaderProgramSource, ShaderStage};

/// Linked, bindable program
///
/// Uniform names are compile-time contracts: a name that does not resolve is
/// an error, never a silently ignored location. Resolved locations are cached
/// for the lifetime of the program.
pub struct ShaderProgram {
    device: DeviceRef,
    handle: ProgramHandle,
    uniform_cache: RefCell<FxHashMap<String, UniformLocation>>,
}

/// Link two compiled stages into a program
///
/// Both stages are attached, the program is linked and validated, then both
/// stage objects are released regardless of the outcome.
///
/// # Errors
///
/// - `ProgramLink` with the device info log if linking fails (the program
///   object is deleted)
/// - `BackendError` if the device cannot create a program object
pub fn link_program(device: &DeviceRef, vertex: CompiledStage, fragment: CompiledStage) -> Result<ShaderProgram> {
    let dev = &**device;
    let handle = device_call!(dev, dev.create_program())?;
    let program = ShaderProgram {
        device: device.clone(),
        handle,
        uniform_cache: RefCell::new(FxHashMap::default()),
    };

    device_call!(dev, dev.attach_shader(handle, vertex.handle()));
    device_call!(dev, dev.attach_shader(handle, fragment.handle()));
    device_call!(dev, dev.link_program(handle));
    device_call!(dev, dev.validate_program(handle));

    // Stage objects are no longer needed once the program is linked
    drop(vertex);
    drop(fragment);

    if !device_call!(dev, dev.program_link_status(handle)) {
        let log = device_call!(dev, dev.program_info_log(handle));
        engine_error!("prism::shader", "Failed to link shader program!\n{}", log.trim_end());
        return Err(Error::ProgramLink(log));
    }

    if !device_call!(dev, dev.program_validate_status(handle)) {
        let log = device_call!(dev, dev.program_info_log(handle));
        engine_warn!("prism::shader", "Shader program {} failed validation: {}", handle.0, log.trim_end());
    }

    engine_info!("prism::shader", "Shader program {} linked", handle.0);
    Ok(program)
}

impl ShaderProgram {
    /// Compile both stages of `source` and link them
    ///
    /// If either stage fails to compile no program object is created and the
    /// other stage is released.
    pub fn from_source(device: &DeviceRef, source: &ShaderProgramSource) -> Result<Self> {
        let vertex = compile_stage(device, ShaderStage::Vertex, &source.vertex)?;
        let fragment = compile_stage(device, ShaderStage::Fragment, &source.fragment)?;
        link_program(device, vertex, fragment)
    }

    /// Parse a dual-stage asset from disk, compile and link it
    pub fn from_file(device: &DeviceRef, path: impl AsRef<Path>) -> Result<Self> {
        let source = parse_shader_file(path)?;
        Self::from_source(device, &source)
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Make this program current
    pub fn bind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.use_program(self.handle));
    }

    pub fn unbind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.use_program(ProgramHandle::INVALID));
    }

    /// Resolve a uniform location, once per name
    ///
    /// # Errors
    ///
    /// `UniformResolution` if the linked program has no active uniform with
    /// this name. Failed lookups are not cached.
    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation> {
        if let Some(location) = self.uniform_cache.borrow().get(name) {
            return Ok(*location);
        }

        let dev = &*self.device;
        let location = device_call!(dev, dev.uniform_location(self.handle, name));
        if !location.is_resolved() {
            engine_error!("prism::shader", "Uniform '{}' does not exist in program {}", name, self.handle.0);
            return Err(Error::UniformResolution(name.to_string()));
        }

        engine_debug!("prism::shader", "Uniform '{}' resolved to location {}", name, location.0);
        self.uniform_cache.borrow_mut().insert(name.to_string(), location);
        Ok(location)
    }

    // Setters act on the current program: call `bind` first.

    pub fn set_uniform_1i(&self, name: &str, value: i32) -> Result<()> {
        let location = self.uniform_location(name)?;
        let dev = &*self.device;
        device_call!(dev, dev.set_uniform_1i(location, value));
        Ok(())
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) -> Result<()> {
        let location = self.uniform_location(name)?;
        let dev = &*self.device;
        device_call!(dev, dev.set_uniform_1f(location, value));
        Ok(())
    }

    pub fn set_uniform_4f(&self, name: &str, value: [f32; 4]) -> Result<()> {
        let location = self.uniform_location(name)?;
        let dev = &*self.device;
        device_call!(dev, dev.set_uniform_4f(location, value));
        Ok(())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        let dev = &*self.device;
        device_call!(dev, dev.delete_program(self.handle));
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
