//! GlWindow - winit window with a current glutin OpenGL context
//!
//! Implements FrameHost for the frame driver. Events are pumped without
//! blocking once per frame, so the caller keeps control of the loop.

use std::fmt::Display;
use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use prism_engine::prism::render::FrameHost;
use prism_engine::prism::{Error, HarnessConfig, Result};
use prism_engine::{engine_debug, engine_error, engine_info};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::gl_device::GlDevice;

fn init_failed(what: &str, err: impl Display) -> Error {
    engine_error!("prism::gl", "{}: {}", what, err);
    Error::InitializationFailed(format!("{}: {}", what, err))
}

// ============================================================================
// Event state
// ============================================================================

/// State updated by pumped window events
#[derive(Default)]
struct WindowEvents {
    close_requested: bool,
    resized: Option<PhysicalSize<u32>>,
}

impl ApplicationHandler for WindowEvents {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resized = Some(size),
            _ => {}
        }
    }
}

// ============================================================================
// GlWindow
// ============================================================================

/// Window, surface and current context
///
/// Field order is drop order: the surface and context go before the window,
/// the event loop last.
pub struct GlWindow {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    events: WindowEvents,
    event_loop: EventLoop<()>,
}

impl GlWindow {
    /// Open the window, create a core-profile context of the configured
    /// version, make it current and load the GL entry points
    ///
    /// The configured swap interval is applied before returning.
    pub fn new(config: &HarnessConfig) -> Result<(Self, GlDevice)> {
        let event_loop = EventLoop::new()
            .map_err(|e| init_failed("Failed to create event loop", e))?;

        let window_attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
        let (window, gl_config) = display_builder
            .build(&event_loop, ConfigTemplateBuilder::new(), |configs| {
                configs
                    .reduce(|best, candidate| {
                        if candidate.num_samples() > best.num_samples() { candidate } else { best }
                    })
                    .expect("glutin offers at least one config that matches the template")
            })
            .map_err(|e| init_failed("Failed to create window", e))?;
        let window = window
            .ok_or_else(|| init_failed("Failed to create window", "display builder returned no window"))?;

        let raw_window_handle = window
            .window_handle()
            .map_err(|e| init_failed("Failed to get window handle", e))?
            .as_raw();

        let gl_display = gl_config.display();
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| init_failed("Failed to create OpenGL context", e))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| init_failed("Failed to describe window surface", e))?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| init_failed("Failed to create window surface", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| init_failed("Failed to make OpenGL context current", e))?;

        let gl = unsafe { glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol)) };
        // The context stays current on this thread for as long as the window lives
        let device = unsafe { GlDevice::new(gl) };

        engine_info!("prism::gl",
            "OpenGL {}.{} core context created for '{}' ({}x{})",
            major, minor, config.window_title, config.width, config.height);

        let mut gl_window = Self {
            surface,
            context,
            window,
            events: WindowEvents::default(),
            event_loop,
        };
        gl_window.set_swap_interval(config.swap_interval)?;

        Ok((gl_window, device))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl FrameHost for GlWindow {
    fn should_close(&self) -> bool {
        self.events.close_requested
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.surface.swap_buffers(&self.context).map_err(|e| {
            engine_error!("prism::gl", "Failed to swap buffers: {}", e);
            Error::BackendError(format!("Failed to swap buffers: {}", e))
        })
    }

    fn poll_events(&mut self) {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.events);
        if let PumpStatus::Exit(code) = status {
            engine_debug!("prism::gl", "Event loop exited with code {}", code);
            self.events.close_requested = true;
        }

        if let Some(size) = self.events.resized.take() {
            if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                self.surface.resize(&self.context, width, height);
            }
        }
    }

    fn set_swap_interval(&mut self, interval: u32) -> Result<()> {
        let swap_interval = match NonZeroU32::new(interval) {
            Some(interval) => SwapInterval::Wait(interval),
            None => SwapInterval::DontWait,
        };
        self.surface
            .set_swap_interval(&self.context, swap_interval)
            .map_err(|e| {
                engine_error!("prism::gl", "Failed to set swap interval {}: {}", interval, e);
                Error::BackendError(format!("Failed to set swap interval {}: {}", interval, e))
            })
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}
