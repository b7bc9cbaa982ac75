/*!
# Prism Engine

Core traits and types for the Prism rendering harness.

This crate owns the GPU resource abstraction and the shader-pipeline assembly
layer. Every component talks to the graphics device through the [`Device`]
trait, passed explicitly as a [`DeviceRef`]; backends (OpenGL via glow, or the
recording mock used by the unit tests) provide the concrete device.

## Architecture

- **Device**: the graphics-device collaborator (objects, uniforms, draw calls)
- **Error channel**: drains and reports pending device errors around calls
- **VertexBuffer / IndexBuffer**: immutable GPU buffers, released on drop
- **VertexBufferLayout**: attribute description and stride
- **VertexArray**: input-assembly configuration binding buffers to layouts
- **ShaderProgram**: parsed, compiled and linked program with a uniform cache
- **FrameDriver**: the per-frame clear/bind/draw/swap/poll cycle

[`Device`]: render::Device
[`DeviceRef`]: render::DeviceRef
*/

// Internal modules
mod error;
mod engine;
pub mod config;
pub mod log;
pub mod render;
pub mod shader;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging entry point)
    pub use crate::engine::Engine;

    // Harness configuration
    pub use crate::config::HarnessConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with device, buffers, layouts and the frame driver
    pub mod render {
        pub use crate::render::*;
    }

    // Shader pipeline sub-module
    pub mod shader {
        pub use crate::shader::*;
    }
}

#[cfg(test)]
pub(crate) mod test_logger;
