//! Harness configuration
//!
//! There are no command-line flags: the process runs with these defaults.

/// Window, context and asset settings
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Window title
    pub window_title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Requested OpenGL core profile version (major, minor)
    pub gl_version: (u8, u8),
    /// Vertical-sync interval (0 = off, 1 = every vblank)
    pub swap_interval: u32,
    /// Dual-stage shader asset loaded at startup
    pub shader_path: String,
    /// Color the frame is cleared to
    pub clear_color: [f32; 4],
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            window_title: "Hello World".to_string(),
            width: 640,
            height: 480,
            gl_version: (3, 3),
            swap_interval: 1,
            shader_path: "res/shaders/Basic.shader".to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
