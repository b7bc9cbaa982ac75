/// Mock Device for unit tests (no GPU required)
///
/// Records every call in order, hands out sequential non-zero handles and
/// tracks live objects per kind so tests can check create/delete parity.
/// Compile, link, validation and uniform behavior are scriptable.

#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(test)]
use crate::render::{
    Device, BufferHandle, VertexArrayHandle, ShaderHandle, ProgramHandle,
    UniformLocation, DeviceErrorCode, BufferTarget, ComponentType,
    PrimitiveTopology, IndexType,
};
#[cfg(test)]
use crate::shader::ShaderStage;
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;

// ============================================================================
// Recorded calls
// ============================================================================

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateShader(ShaderStage, ShaderHandle),
    ShaderSource(ShaderHandle, String),
    CompileShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    CreateProgram(ProgramHandle),
    AttachShader(ProgramHandle, ShaderHandle),
    LinkProgram(ProgramHandle),
    ValidateProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UniformLocation(ProgramHandle, String),
    SetUniform1i(UniformLocation, i32),
    SetUniform1f(UniformLocation, f32),
    SetUniform4f(UniformLocation, [f32; 4]),
    CreateBuffer(BufferHandle),
    BindBuffer(BufferTarget, BufferHandle),
    BufferData(BufferTarget, Vec<u8>),
    DeleteBuffer(BufferHandle),
    CreateVertexArray(VertexArrayHandle),
    BindVertexArray(VertexArrayHandle),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        count: i32,
        component_type: ComponentType,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    DeleteVertexArray(VertexArrayHandle),
    ClearColor([f32; 4]),
    Clear,
    Viewport(i32, i32, i32, i32),
    DrawElements {
        topology: PrimitiveTopology,
        count: i32,
        index_type: IndexType,
        offset: i32,
        vertex_array: VertexArrayHandle,
        element_buffer: BufferHandle,
        program: ProgramHandle,
    },
}

/// Resource kinds tracked for create/delete parity
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Shader,
    Program,
    Buffer,
    VertexArray,
}

// ============================================================================
// Mock Device
// ============================================================================

#[cfg(test)]
pub struct MockDevice {
    calls: RefCell<Vec<DeviceCall>>,
    next_handle: Cell<u32>,
    live: RefCell<FxHashMap<ResourceKind, FxHashSet<u32>>>,
    created: RefCell<FxHashMap<ResourceKind, usize>>,
    deleted: RefCell<FxHashMap<ResourceKind, usize>>,

    // Scripted behavior
    compile_failure_marker: RefCell<Option<String>>,
    fail_link: Cell<bool>,
    fail_validate: Cell<bool>,
    refuse_creation: Cell<bool>,
    uniforms: RefCell<Vec<String>>,
    pending_errors: RefCell<VecDeque<DeviceErrorCode>>,
    draw_error: Cell<Option<u32>>,

    // Per-object state
    shader_sources: RefCell<FxHashMap<u32, String>>,
    compiled_ok: RefCell<FxHashMap<u32, bool>>,
    linked_ok: RefCell<FxHashMap<u32, bool>>,

    // Current bindings
    bound_array_buffer: Cell<BufferHandle>,
    bound_element_buffer: Cell<BufferHandle>,
    bound_vertex_array: Cell<VertexArrayHandle>,
    current_program: Cell<ProgramHandle>,
}

#[cfg(test)]
impl MockDevice {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            live: RefCell::new(FxHashMap::default()),
            created: RefCell::new(FxHashMap::default()),
            deleted: RefCell::new(FxHashMap::default()),
            compile_failure_marker: RefCell::new(None),
            fail_link: Cell::new(false),
            fail_validate: Cell::new(false),
            refuse_creation: Cell::new(false),
            uniforms: RefCell::new(Vec::new()),
            pending_errors: RefCell::new(VecDeque::new()),
            draw_error: Cell::new(None),
            shader_sources: RefCell::new(FxHashMap::default()),
            compiled_ok: RefCell::new(FxHashMap::default()),
            linked_ok: RefCell::new(FxHashMap::default()),
            bound_array_buffer: Cell::new(BufferHandle::INVALID),
            bound_element_buffer: Cell::new(BufferHandle::INVALID),
            bound_vertex_array: Cell::new(VertexArrayHandle::INVALID),
            current_program: Cell::new(ProgramHandle::INVALID),
        }
    }

    // ===== SCRIPTING =====

    /// Any shader source containing `marker` fails to compile
    pub fn fail_compile_when_source_contains(&self, marker: &str) {
        *self.compile_failure_marker.borrow_mut() = Some(marker.to_string());
    }

    pub fn fail_link(&self, fail: bool) {
        self.fail_link.set(fail);
    }

    pub fn fail_validate(&self, fail: bool) {
        self.fail_validate.set(fail);
    }

    /// Every create_* call returns an error
    pub fn refuse_creation(&self, refuse: bool) {
        self.refuse_creation.set(refuse);
    }

    /// Uniform names every linked program resolves, in location order
    pub fn define_uniforms(&self, names: &[&str]) {
        *self.uniforms.borrow_mut() = names.iter().map(|n| n.to_string()).collect();
    }

    /// Queue an error flag for the next get_error
    pub fn push_error(&self, code: u32) {
        self.pending_errors.borrow_mut().push_back(DeviceErrorCode(code));
    }

    /// Every draw_elements call raises `code`
    pub fn raise_error_on_draw(&self, code: Option<u32>) {
        self.draw_error.set(code);
    }

    // ===== INSPECTION =====

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn created_count(&self, kind: ResourceKind) -> usize {
        self.created.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn deleted_count(&self, kind: ResourceKind) -> usize {
        self.deleted.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn live_count(&self, kind: ResourceKind) -> usize {
        self.live.borrow().get(&kind).map_or(0, |set| set.len())
    }

    /// Number of recorded calls matching a predicate
    pub fn count_calls(&self, predicate: impl Fn(&DeviceCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn pending_error_count(&self) -> usize {
        self.pending_errors.borrow().len()
    }

    // ===== INTERNALS =====

    fn record(&self, call: DeviceCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, kind: ResourceKind) -> Result<u32> {
        if self.refuse_creation.get() {
            engine_bail!("prism::mock", "Mock device refused to create {:?}", kind);
        }
        let id = self.next_handle.get();
        self.next_handle.set(id + 1);
        self.live.borrow_mut().entry(kind).or_default().insert(id);
        *self.created.borrow_mut().entry(kind).or_insert(0) += 1;
        Ok(id)
    }

    fn release(&self, kind: ResourceKind, id: u32) {
        let was_live = self.live.borrow_mut().entry(kind).or_default().remove(&id);
        assert!(was_live, "{:?} {} deleted while not live (double delete or bad handle)", kind, id);
        *self.deleted.borrow_mut().entry(kind).or_insert(0) += 1;
    }
}

#[cfg(test)]
impl Device for MockDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let handle = ShaderHandle(self.allocate(ResourceKind::Shader)?);
        self.record(DeviceCall::CreateShader(stage, handle));
        Ok(handle)
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.shader_sources.borrow_mut().insert(shader.0, source.to_string());
        self.record(DeviceCall::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        let source = self.shader_sources.borrow().get(&shader.0).cloned().unwrap_or_default();
        let failed = match self.compile_failure_marker.borrow().as_deref() {
            Some(marker) => source.contains(marker),
            None => false,
        };
        self.compiled_ok.borrow_mut().insert(shader.0, !failed && !source.is_empty());
        self.record(DeviceCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.compiled_ok.borrow().get(&shader.0).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            format!("0:1(1): error: mock compile failure in shader {}", shader.0)
        }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.release(ResourceKind::Shader, shader.0);
        self.record(DeviceCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        let handle = ProgramHandle(self.allocate(ResourceKind::Program)?);
        self.record(DeviceCall::CreateProgram(handle));
        Ok(handle)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(DeviceCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: ProgramHandle) {
        self.linked_ok.borrow_mut().insert(program.0, !self.fail_link.get());
        self.record(DeviceCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.linked_ok.borrow().get(&program.0).copied().unwrap_or(false)
    }

    fn validate_program(&self, program: ProgramHandle) {
        self.record(DeviceCall::ValidateProgram(program));
    }

    fn program_validate_status(&self, program: ProgramHandle) -> bool {
        self.program_link_status(program) && !self.fail_validate.get()
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: mock link failure".to_string()
        }
    }

    fn use_program(&self, program: ProgramHandle) {
        self.current_program.set(program);
        self.record(DeviceCall::UseProgram(program));
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.release(ResourceKind::Program, program.0);
        self.record(DeviceCall::DeleteProgram(program));
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> UniformLocation {
        self.record(DeviceCall::UniformLocation(program, name.to_string()));
        if !self.program_link_status(program) {
            return UniformLocation::UNRESOLVED;
        }
        self.uniforms
            .borrow()
            .iter()
            .position(|uniform| uniform == name)
            .map_or(UniformLocation::UNRESOLVED, |index| UniformLocation(index as i32))
    }

    fn set_uniform_1i(&self, location: UniformLocation, value: i32) {
        self.record(DeviceCall::SetUniform1i(location, value));
    }

    fn set_uniform_1f(&self, location: UniformLocation, value: f32) {
        self.record(DeviceCall::SetUniform1f(location, value));
    }

    fn set_uniform_4f(&self, location: UniformLocation, value: [f32; 4]) {
        self.record(DeviceCall::SetUniform4f(location, value));
    }

    fn create_buffer(&self) -> Result<BufferHandle> {
        let handle = BufferHandle(self.allocate(ResourceKind::Buffer)?);
        self.record(DeviceCall::CreateBuffer(handle));
        Ok(handle)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: BufferHandle) {
        match target {
            BufferTarget::Array => self.bound_array_buffer.set(buffer),
            BufferTarget::ElementArray => self.bound_element_buffer.set(buffer),
        }
        self.record(DeviceCall::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(DeviceCall::BufferData(target, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.release(ResourceKind::Buffer, buffer.0);
        self.record(DeviceCall::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        let handle = VertexArrayHandle(self.allocate(ResourceKind::VertexArray)?);
        self.record(DeviceCall::CreateVertexArray(handle));
        Ok(handle)
    }

    fn bind_vertex_array(&self, vertex_array: VertexArrayHandle) {
        self.bound_vertex_array.set(vertex_array);
        self.record(DeviceCall::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(DeviceCall::EnableVertexAttribArray(index));
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
        self.record(DeviceCall::VertexAttribPointer {
            index,
            count,
            component_type,
            normalized,
            stride,
            offset,
        });
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        self.release(ResourceKind::VertexArray, vertex_array.0);
        self.record(DeviceCall::DeleteVertexArray(vertex_array));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record(DeviceCall::ClearColor(color));
    }

    fn clear(&self) {
        self.record(DeviceCall::Clear);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(DeviceCall::Viewport(x, y, width, height));
    }

    fn draw_elements(&self, topology: PrimitiveTopology, count: i32, index_type: IndexType, offset: i32) {
        self.record(DeviceCall::DrawElements {
            topology,
            count,
            index_type,
            offset,
            vertex_array: self.bound_vertex_array.get(),
            element_buffer: self.bound_element_buffer.get(),
            program: self.current_program.get(),
        });
        if let Some(code) = self.draw_error.get() {
            self.push_error(code);
        }
    }

    fn get_error(&self) -> Option<DeviceErrorCode> {
        self.pending_errors.borrow_mut().pop_front()
    }

    fn version_string(&self) -> String {
        "Mock 3.3 Core".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
