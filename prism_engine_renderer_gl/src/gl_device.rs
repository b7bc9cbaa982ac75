//! GlDevice - OpenGL implementation of the Device trait over glow
//!
//! Every method assumes the context is current on the calling thread, which
//! GlWindow guarantees for the device it hands out.

use std::num::NonZeroU32;

use glow::HasContext;
use prism_engine::engine_err;
use prism_engine::prism::Result;
use prism_engine::prism::render::{
    BufferHandle, BufferTarget, ComponentType, Device, DeviceErrorCode, IndexType,
    PrimitiveTopology, ProgramHandle, ShaderHandle, UniformLocation, VertexArrayHandle,
};
use prism_engine::prism::shader::ShaderStage;

/// OpenGL device
pub struct GlDevice {
    gl: glow::Context,
}

impl GlDevice {
    /// Wrap a loaded glow context
    ///
    /// # Safety
    ///
    /// `gl` must belong to a context that stays current on this thread for
    /// the lifetime of the device.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

// ============================================================================
// Handle and enum conversions
// ============================================================================

fn native_shader(handle: ShaderHandle) -> Option<glow::NativeShader> {
    NonZeroU32::new(handle.0).map(glow::NativeShader)
}

fn native_program(handle: ProgramHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(handle.0).map(glow::NativeProgram)
}

fn native_buffer(handle: BufferHandle) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(handle.0).map(glow::NativeBuffer)
}

fn native_vertex_array(handle: VertexArrayHandle) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(handle.0).map(glow::NativeVertexArray)
}

fn native_uniform(location: UniformLocation) -> Option<glow::NativeUniformLocation> {
    location
        .is_resolved()
        .then(|| glow::NativeUniformLocation(location.0 as u32))
}

fn gl_shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn gl_buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn gl_component_type(component_type: ComponentType) -> u32 {
    match component_type {
        ComponentType::Float => glow::FLOAT,
        ComponentType::UnsignedInt => glow::UNSIGNED_INT,
        ComponentType::UnsignedByte => glow::UNSIGNED_BYTE,
    }
}

fn gl_topology(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::Triangles => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::Lines => glow::LINES,
        PrimitiveTopology::Points => glow::POINTS,
    }
}

fn gl_index_type(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

// ============================================================================
// Device implementation
// ============================================================================

impl Device for GlDevice {
    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(gl_shader_type(stage)) }
            .map_err(|e| engine_err!("prism::gl", "Failed to create {} shader: {}", stage.name(), e))?;
        Ok(ShaderHandle(shader.0.get()))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.shader_source(shader, source) };
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.compile_shader(shader) };
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        native_shader(shader).is_some_and(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        native_shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!("prism::gl", "Failed to create program: {}", e))?;
        Ok(ProgramHandle(program.0.get()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        if let (Some(program), Some(shader)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        if let Some(program) = native_program(program) {
            unsafe { self.gl.link_program(program) };
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        native_program(program).is_some_and(|program| unsafe { self.gl.get_program_link_status(program) })
    }

    // glow exposes no glValidateProgram; a linked program is reported valid
    fn validate_program(&self, _program: ProgramHandle) {}

    fn program_validate_status(&self, program: ProgramHandle) -> bool {
        self.program_link_status(program)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        native_program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn use_program(&self, program: ProgramHandle) {
        unsafe { self.gl.use_program(native_program(program)) };
    }

    fn delete_program(&self, program: ProgramHandle) {
        if let Some(program) = native_program(program) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    // ===== UNIFORMS =====

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> UniformLocation {
        native_program(program)
            .and_then(|program| unsafe { self.gl.get_uniform_location(program, name) })
            .map_or(UniformLocation::UNRESOLVED, |location| UniformLocation(location.0 as i32))
    }

    fn set_uniform_1i(&self, location: UniformLocation, value: i32) {
        unsafe { self.gl.uniform_1_i32(native_uniform(location).as_ref(), value) };
    }

    fn set_uniform_1f(&self, location: UniformLocation, value: f32) {
        unsafe { self.gl.uniform_1_f32(native_uniform(location).as_ref(), value) };
    }

    fn set_uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        let [x, y, z, w] = value;
        unsafe { self.gl.uniform_4_f32(native_uniform(location).as_ref(), x, y, z, w) };
    }

    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferHandle> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| engine_err!("prism::gl", "Failed to create buffer: {}", e))?;
        Ok(BufferHandle(buffer.0.get()))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: BufferHandle) {
        unsafe { self.gl.bind_buffer(gl_buffer_target(target), native_buffer(buffer)) };
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.gl.buffer_data_u8_slice(gl_buffer_target(target), data, glow::STATIC_DRAW) };
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        if let Some(buffer) = native_buffer(buffer) {
            unsafe { self.gl.delete_buffer(buffer) };
        }
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| engine_err!("prism::gl", "Failed to create vertex array: {}", e))?;
        Ok(VertexArrayHandle(vertex_array.0.get()))
    }

    fn bind_vertex_array(&self, vertex_array: VertexArrayHandle) {
        unsafe { self.gl.bind_vertex_array(native_vertex_array(vertex_array)) };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: ComponentType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        // Integer components are converted to float in the shader, as glVertexAttribPointer does
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                count,
                gl_component_type(component_type),
                normalized,
                stride,
                offset,
            )
        };
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        if let Some(vertex_array) = native_vertex_array(vertex_array) {
            unsafe { self.gl.delete_vertex_array(vertex_array) };
        }
    }

    // ===== FRAME =====

    fn clear_color(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe { self.gl.clear_color(r, g, b, a) };
    }

    fn clear(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    fn draw_elements(&self, topology: PrimitiveTopology, count: i32, index_type: IndexType, offset: i32) {
        unsafe {
            self.gl.draw_elements(gl_topology(topology), count, gl_index_type(index_type), offset)
        };
    }

    // ===== DIAGNOSTICS =====

    fn get_error(&self) -> Option<DeviceErrorCode> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(DeviceErrorCode(code)),
        }
    }

    fn version_string(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }
}

#[cfg(test)]
#[path = "gl_device_tests.rs"]
mod tests;
