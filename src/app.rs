//! Window/GL-context bootstrap and the event loop driver.
//!
//! winit 0.30 hands out the window lazily via [`ApplicationHandler::resumed`],
//! so all GL state (context, surface, renderer) is created there and carried
//! in an [`Option`] until then.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::animation::ColorPulse;
use crate::renderer::QuadRenderer;
use crate::shaders;
use crate::source::ShaderSource;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Initial window size in logical pixels.
    pub initial_size: LogicalSize<f64>,
    /// Path of the combined shader file to load.
    pub shader_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "pulse-quad".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            shader_path: PathBuf::from("res/shaders/basic.shader"),
        }
    }
}

/// Run the demo until the window is closed.
///
/// # Errors
///
/// Fails if the event loop cannot be created or terminates with an error.
pub fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit event loop")?;
    let mut app = App {
        config,
        pulse: ColorPulse::new(),
        state: None,
    };

    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    Ok(())
}

/// Window, GL context, and renderer — everything that only exists once the
/// event loop has resumed.
struct GlState {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    renderer: QuadRenderer,
}

/// The demo application driven by the winit event loop.
struct App {
    config: AppConfig,
    pulse: ColorPulse,
    state: Option<GlState>,
}

impl App {
    /// Create the window, GL context, surface, and renderer.
    fn init_gl(&self, event_loop: &ActiveEventLoop) -> Result<GlState> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| pick_gl_config(configs))
            .map_err(|e| anyhow!("failed to pick a GL config: {e}"))?;
        let window = window.context("display builder did not produce a window")?;

        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new().build(raw_window_handle);
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| anyhow!("failed to create GL context: {e}"))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to build surface attributes")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| anyhow!("failed to create GL surface: {e}"))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| anyhow!("failed to make GL context current: {e}"))?;

        // One frame per display refresh.
        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::warn!("failed to enable vsync: {e}");
        }

        let gl = Arc::new(unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        });

        let source = load_shader_source(&self.config.shader_path);
        let renderer = match unsafe { QuadRenderer::new(Arc::clone(&gl), &source) } {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("shader program rejected: {err}; falling back to the built-in shader");
                unsafe { QuadRenderer::new(Arc::clone(&gl), &shaders::builtin_source()) }
                    .map_err(|e| anyhow!("built-in shader failed to compile: {e}"))?
            }
        };

        let size = window.inner_size();
        unsafe { renderer.resize(size.width, size.height) };

        Ok(GlState {
            window,
            context,
            surface,
            renderer,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init_gl(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("failed to initialize GL: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                if let Some(state) = self.state.take() {
                    unsafe { state.renderer.destroy() };
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let Some(state) = &self.state else { return };
                // Zero-sized surfaces are rejected by the GL backends
                // (happens transiently during minimize).
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    state.surface.resize(&state.context, width, height);
                    unsafe { state.renderer.resize(size.width, size.height) };
                }
            }

            WindowEvent::RedrawRequested => {
                self.pulse.tick();
                let color = self.pulse.color();

                let Some(state) = &self.state else { return };
                unsafe { state.renderer.render(color) };
                if let Err(e) = state.surface.swap_buffers(&state.context) {
                    log::error!("swap_buffers failed: {e}");
                }

                // Continuous animation: keep the redraws coming.
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}

/// Prefer the config with the most MSAA samples.
fn pick_gl_config<'a>(configs: Box<dyn Iterator<Item = Config> + 'a>) -> Config {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() > best.num_samples() {
                candidate
            } else {
                best
            }
        })
        .expect("no GL configs offered")
}

/// Load and split the shader file, falling back to the built-in sources.
fn load_shader_source(path: &Path) -> ShaderSource {
    match ShaderSource::load(path) {
        Ok(source) => {
            log::info!("loaded shader source from {}", path.display());
            source
        }
        Err(err) => {
            log::error!("{err}; falling back to the built-in shader");
            shaders::builtin_source()
        }
    }
}
