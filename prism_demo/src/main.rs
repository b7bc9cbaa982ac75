//! Prism demo - draws an animated quad with the OpenGL backend
//!
//! Opens the configured window, uploads a two-triangle quad, loads
//! `res/shaders/Basic.shader` and pulses the red channel of `u_Color`
//! until the window is closed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use prism_engine::prism::render::{
    ColorPulse, Device, DeviceRef, FrameDriver, IndexBuffer, VertexArray, VertexBuffer,
    VertexBufferLayout,
};
use prism_engine::prism::shader::ShaderProgram;
use prism_engine::prism::{HarnessConfig, Result};
use prism_engine::{engine_error, engine_info};
use prism_engine_renderer_gl::prism::GlWindow;

const POSITIONS: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

const INDICES: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

/// Relative asset paths are tried from the working directory first, then
/// from this crate's directory
fn resolve_asset(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_relative() && !path.exists() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
        if bundled.exists() {
            return bundled;
        }
    }
    path.to_path_buf()
}

fn run(config: &HarnessConfig) -> Result<()> {
    let (mut window, device) = GlWindow::new(config)?;
    let device: DeviceRef = Rc::new(device);
    engine_info!("prism::demo", "{}", device.version_string());

    let vertex_array = VertexArray::new(device.clone())?;
    let vertex_buffer = VertexBuffer::from_slice(device.clone(), &POSITIONS)?;
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2);
    vertex_array.add_buffer(&vertex_buffer, &layout);

    let index_buffer = IndexBuffer::new(device.clone(), &INDICES)?;

    let program = ShaderProgram::from_file(&device, resolve_asset(&config.shader_path))?;
    program.bind();
    program.set_uniform_4f("u_Color", ColorPulse::new("u_Color").color())?;

    // Nothing stays bound between setup and the first frame
    vertex_array.unbind();
    vertex_buffer.unbind();
    index_buffer.unbind();
    program.unbind();

    let mut driver = FrameDriver::new(device.clone(), &program, &vertex_array, &index_buffer)
        .with_clear_color(config.clear_color)
        .with_uniforms(ColorPulse::new("u_Color"));
    driver.run(&mut window)
}

fn main() -> ExitCode {
    let config = HarnessConfig::default();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            engine_error!("prism::demo", "{}", e);
            ExitCode::FAILURE
        }
    }
}
