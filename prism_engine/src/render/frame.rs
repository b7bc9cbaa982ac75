/// Frame driver - the per-frame clear/bind/draw/swap/poll cycle
///
/// The loop stops when the windowing collaborator reports that the window
/// should close; there are no other states.

use crate::device_call;
use crate::engine_info;
use crate::error::Result;
use crate::render::{DeviceRef, IndexBuffer, PrimitiveTopology, VertexArray};
use crate::shader::ShaderProgram;

// ============================================================================
// Windowing collaborator
// ============================================================================

/// Window/context services the frame loop needs
///
/// Implemented by backends (e.g., GlWindow over winit + glutin).
pub trait FrameHost {
    /// True once the user asked to close the window
    fn should_close(&self) -> bool;
    /// Present the back buffer
    fn swap_buffers(&mut self) -> Result<()>;
    /// Process pending window/input events without blocking
    fn poll_events(&mut self);
    /// Vertical-sync interval (0 = off)
    fn set_swap_interval(&mut self, interval: u32) -> Result<()>;
    /// Current drawable size in physical pixels
    fn framebuffer_size(&self) -> (u32, u32);
}

// ============================================================================
// Per-frame uniforms
// ============================================================================

/// Uniform values refreshed every frame, after the program is bound
pub trait FrameUniforms {
    fn apply(&mut self, program: &ShaderProgram) -> Result<()>;
}

/// Red-channel ping-pong animation of a vec4 color uniform
///
/// Each frame emits `[red, 0.3, 0.8, 1.0]`, then moves `red` by 0.05,
/// turning around once it leaves [0, 1].
#[derive(Debug, Clone)]
pub struct ColorPulse {
    uniform: String,
    red: f32,
    increment: f32,
}

impl ColorPulse {
    pub const STEP: f32 = 0.05;

    pub fn new(uniform: &str) -> Self {
        Self {
            uniform: uniform.to_string(),
            red: 0.0,
            increment: Self::STEP,
        }
    }

    /// Color for the current frame
    pub fn color(&self) -> [f32; 4] {
        [self.red, 0.3, 0.8, 1.0]
    }

    /// Advance one frame
    pub fn advance(&mut self) {
        if self.red > 1.0 {
            self.increment = -Self::STEP;
        } else if self.red < 0.0 {
            self.increment = Self::STEP;
        }
        self.red += self.increment;
    }
}

impl FrameUniforms for ColorPulse {
    fn apply(&mut self, program: &ShaderProgram) -> Result<()> {
        program.set_uniform_4f(&self.uniform, self.color())?;
        self.advance();
        Ok(())
    }
}

// ============================================================================
// Frame driver
// ============================================================================

/// Draws one indexed mesh with one program, frame after frame
pub struct FrameDriver<'a> {
    device: DeviceRef,
    program: &'a ShaderProgram,
    vertex_array: &'a VertexArray,
    index_buffer: &'a IndexBuffer,
    uniforms: Option<Box<dyn FrameUniforms + 'a>>,
    clear_color: [f32; 4],
    viewport: (u32, u32),
    frames_rendered: u64,
}

impl<'a> FrameDriver<'a> {
    pub fn new(
        device: DeviceRef,
        program: &'a ShaderProgram,
        vertex_array: &'a VertexArray,
        index_buffer: &'a IndexBuffer,
    ) -> Self {
        Self {
            device,
            program,
            vertex_array,
            index_buffer,
            uniforms: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            viewport: (0, 0),
            frames_rendered: 0,
        }
    }

    /// Refresh these uniforms every frame
    pub fn with_uniforms(mut self, uniforms: impl FrameUniforms + 'a) -> Self {
        self.uniforms = Some(Box::new(uniforms));
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Record one frame: clear, bind, set uniforms, draw
    pub fn render_frame(&mut self) -> Result<()> {
        let dev = &*self.device;
        device_call!(dev, dev.clear_color(self.clear_color));
        device_call!(dev, dev.clear());

        self.program.bind();
        if let Some(uniforms) = self.uniforms.as_mut() {
            uniforms.apply(self.program)?;
        }

        self.vertex_array.bind();
        self.index_buffer.bind();

        let count = self.index_buffer.count() as i32;
        let index_type = self.index_buffer.index_type();
        device_call!(dev, dev.draw_elements(PrimitiveTopology::Triangles, count, index_type, 0));

        self.frames_rendered += 1;
        Ok(())
    }

    /// Run until the host asks to close
    pub fn run(&mut self, host: &mut dyn FrameHost) -> Result<()> {
        while !host.should_close() {
            self.sync_viewport(host.framebuffer_size());
            self.render_frame()?;
            host.swap_buffers()?;
            host.poll_events();
        }
        engine_info!("prism::frame", "Frame loop finished after {} frames", self.frames_rendered);
        Ok(())
    }

    fn sync_viewport(&mut self, size: (u32, u32)) {
        if size != self.viewport {
            let dev = &*self.device;
            device_call!(dev, dev.viewport(0, 0, size.0 as i32, size.1 as i32));
            self.viewport = size;
        }
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
