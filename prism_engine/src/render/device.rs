/// Device trait - the graphics-device collaborator
///
/// Every GPU-owning component receives a [`DeviceRef`] at construction and
/// keeps it for its own release call. The device models the classic
/// object-based pipeline: create/delete for shaders, programs, buffers and
/// vertex arrays, compile/link status queries with info logs, uniforms by
/// resolved location, and an indexed draw call.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::shader::ShaderStage;

/// Shared handle to the device owning the current graphics context
///
/// `Rc` keeps the context on the thread that created it.
pub type DeviceRef = Rc<dyn Device>;

// ============================================================================
// Handles
// ============================================================================

macro_rules! device_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// Reserved "no object" value
            pub const INVALID: Self = Self(0);

            /// True for any handle the device actually handed out
            pub fn is_valid(&self) -> bool {
                self.0 != 0
            }
        }
    };
}

device_handle!(
    /// Device buffer object (vertex or index storage)
    BufferHandle
);
device_handle!(
    /// Device vertex-array object
    VertexArrayHandle
);
device_handle!(
    /// Device shader object (one stage)
    ShaderHandle
);
device_handle!(
    /// Device program object (linked stages)
    ProgramHandle
);

/// Resolved uniform location inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    /// Location reported for names the program does not define
    pub const UNRESOLVED: Self = Self(-1);

    pub fn is_resolved(&self) -> bool {
        self.0 >= 0
    }
}

/// Error flag drained from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceErrorCode(pub u32);

impl fmt::Display for DeviceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.0, self.0)
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Binding point a buffer is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Vertex attribute storage
    Array,
    /// Index storage
    ElementArray,
}

/// Scalar type of one vertex attribute component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// 32-bit float
    Float,
    /// 32-bit unsigned integer
    UnsignedInt,
    /// 8-bit unsigned integer
    UnsignedByte,
}

impl ComponentType {
    /// Returns size in bytes of one component
    pub fn size_bytes(&self) -> u32 {
        match self {
            ComponentType::Float | ComponentType::UnsignedInt => 4,
            ComponentType::UnsignedByte => 1,
        }
    }
}

/// Primitive assembly mode for draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    Triangles,
    TriangleStrip,
    Lines,
    Points,
}

/// Index element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit unsigned indices
    U16,
    /// 32-bit unsigned indices
    U32,
}

impl IndexType {
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

// ============================================================================
// Device trait
// ============================================================================

/// Graphics device
///
/// Implemented by backends (e.g., GlDevice) and by the test MockDevice.
/// All calls execute synchronously, in program order, on the thread that
/// owns the context.
pub trait Device {
    // ===== SHADERS =====

    /// Create an empty shader object for a stage
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    /// True when the last compile succeeded
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn validate_program(&self, program: ProgramHandle);
    fn program_validate_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    /// Make a program current (`ProgramHandle::INVALID` unbinds)
    fn use_program(&self, program: ProgramHandle);
    fn delete_program(&self, program: ProgramHandle);

    // ===== UNIFORMS =====

    /// Resolve a uniform name; `UniformLocation::UNRESOLVED` if absent
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> UniformLocation;
    fn set_uniform_1i(&self, location: UniformLocation, value: i32);
    fn set_uniform_1f(&self, location: UniformLocation, value: f32);
    fn set_uniform_4f(&self, location: UniformLocation, value: [f32; 4]);

    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferHandle>;
    /// Attach a buffer to a target (`BufferHandle::INVALID` detaches)
    fn bind_buffer(&self, target: BufferTarget, buffer: BufferHandle);
    /// Upload an immutable store to the buffer bound at `target`
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferHandle);

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle>;
    /// Make a vertex array current (`VertexArrayHandle::INVALID` unbinds)
    fn bind_vertex_array(&self, vertex_array: VertexArrayHandle);
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Describe attribute `index` inside the bound array buffer
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: ComponentType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);

    // ===== FRAME =====

    fn clear_color(&self, color: [f32; 4]);
    /// Clear the color target
    fn clear(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Indexed draw using the bound vertex array and element buffer
    fn draw_elements(&self, topology: PrimitiveTopology, count: i32, index_type: IndexType, offset: i32);

    // ===== DIAGNOSTICS =====

    /// Pop the next pending error flag, if any
    fn get_error(&self) -> Option<DeviceErrorCode>;
    /// Human-readable device/driver version
    fn version_string(&self) -> String;
}
