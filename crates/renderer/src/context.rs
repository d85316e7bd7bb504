use std::ffi::CString;
use std::num::NonZeroU32;

use anyhow::{anyhow, Context as AnyhowContext, Result};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::types::ViewerConfig;

/// Owns the window, the GL context/surface pair, and the loaded function
/// table.
///
/// Acquisition happens once at start-up; failures here are wiring errors from
/// the platform layer, reported with context rather than through the
/// renderer's own error taxonomy. Presentation is synchronized to the display
/// refresh via a swap interval of one, which is what paces the frame loop.
pub(crate) struct GlContext {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: glow::Context,
    size: PhysicalSize<u32>,
}

impl GlContext {
    pub(crate) fn new(event_loop: &EventLoop<()>, config: &ViewerConfig) -> Result<Self> {
        let (width, height) = config.surface_size;
        let window_builder = WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(0)
            .with_stencil_size(0);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(event_loop, template, |mut configs| {
                configs
                    .next()
                    .expect("glutin offered no GL configurations")
            })
            .map_err(|err| anyhow!("failed to create window and GL config: {err}"))?;
        let window = window.ok_or_else(|| anyhow!("display builder returned no window"))?;
        let gl_display = gl_config.display();

        let raw_window_handle = window.raw_window_handle();
        let context_attributes = ContextAttributesBuilder::new().build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?;

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(size.width.max(1)).expect("non-zero surface width"),
            NonZeroU32::new(size.height.max(1)).expect("non-zero surface height"),
        );
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create rendering surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if let Err(err) = surface.set_swap_interval(
            &context,
            SwapInterval::Wait(NonZeroU32::new(1).expect("non-zero swap interval")),
        ) {
            tracing::warn!("vsync unavailable, frames will pace freely: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                let symbol = CString::new(symbol).expect("GL symbol name");
                gl_display.get_proc_address(symbol.as_c_str()).cast()
            })
        };
        unsafe { gl.viewport(0, 0, size.width.max(1) as i32, size.height.max(1) as i32) };

        tracing::debug!(
            width = size.width,
            height = size.height,
            "GL context acquired"
        );

        Ok(Self {
            window,
            surface,
            context,
            gl,
            size,
        })
    }

    pub(crate) fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface's backing pixel buffer and the GL viewport to the
    /// new dimensions.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.surface.resize(
            &self.context,
            NonZeroU32::new(new_size.width).expect("non-zero width"),
            NonZeroU32::new(new_size.height).expect("non-zero height"),
        );
        unsafe {
            self.gl
                .viewport(0, 0, new_size.width as i32, new_size.height as i32)
        };
    }

    /// Presents the frame, blocking on the display refresh per the swap
    /// interval.
    pub(crate) fn swap(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to present frame")
    }
}
