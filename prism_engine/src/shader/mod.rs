//! Shader module - asset parsing, stage compilation, program linking

pub mod source;
pub mod stage;
pub mod program;

pub use source::*;
pub use stage::*;
pub use program::*;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name, as written after `#shader` in assets
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}
