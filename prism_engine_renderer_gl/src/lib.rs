/*!
# Prism Engine - OpenGL Backend

OpenGL implementation of the Prism rendering harness.

This crate provides `GlDevice`, which implements the prism_engine `Device`
trait using glow for the GL bindings, and `GlWindow`, which owns a winit
window with a current glutin context and implements `FrameHost` for the
frame driver.

# Example

```no_run
use std::rc::Rc;
use prism_engine::prism::HarnessConfig;
use prism_engine::prism::render::{Device, DeviceRef};
use prism_engine_renderer_gl::prism::GlWindow;

let (_window, device) = GlWindow::new(&HarnessConfig::default())?;
let device: DeviceRef = Rc::new(device);
println!("{}", device.version_string());
# Ok::<(), prism_engine::prism::Error>(())
```
*/

// OpenGL implementation modules
mod gl_device;
mod gl_window;

pub mod prism {
    pub use crate::gl_device::GlDevice;
    pub use crate::gl_window::GlWindow;
}
