use anyhow::{anyhow, Context as AnyhowContext, Result};
use tracing::{debug, error, info};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::context::GlContext;
use crate::geometry::QuadGeometry;
use crate::program::ShaderProgram;
use crate::state::PipelineState;
use crate::types::ViewerConfig;
use crate::uniforms::UniformRegistry;

/// Aggregates everything the frame loop touches: the GL context, the linked
/// program, the quad, the resolved uniform handles, and the mutable pipeline
/// state.
struct ViewerState {
    context: GlContext,
    program: ShaderProgram,
    quad: QuadGeometry,
    uniforms: UniformRegistry,
    pipeline: PipelineState,
    /// Last cursor position in physical pixels; winit reports motion and
    /// button presses separately, so the click handler reads this.
    cursor: Option<PhysicalPosition<f64>>,
}

impl ViewerState {
    /// Runs the fixed start-up sequence: compile and link the program, upload
    /// the quad, resolve the uniform handles, then seed the viewport and
    /// pointer uniforms. Any failure is fatal.
    fn new(context: GlContext, config: &ViewerConfig) -> Result<Self> {
        let gl = context.gl();
        let program = ShaderProgram::link(gl, &config.shader.vertex, &config.shader.fragment)?;
        let quad = QuadGeometry::upload(gl, &program)?;
        let uniforms = UniformRegistry::resolve(gl, &program)?;
        program.bind(gl);

        let pipeline = PipelineState::new(config.time_seed, config.time_step);
        let size = context.size();
        uniforms.set_width(gl, size.width as f32);
        uniforms.set_height(gl, size.height as f32);
        uniforms.set_pointer(gl, pipeline.pointer.position());

        info!(
            width = size.width,
            height = size.height,
            time_seed = config.time_seed,
            time_step = config.time_step,
            "pipeline configured"
        );

        Ok(Self {
            context,
            program,
            quad,
            uniforms,
            pipeline,
            cursor: None,
        })
    }

    /// One frame-loop iteration: advance the synthetic clock, push the new
    /// time, draw the strip, present.
    fn frame(&mut self) -> Result<()> {
        let gl = self.context.gl();
        let time = self.pipeline.clock.advance();
        self.program.bind(gl);
        self.uniforms.set_time(gl, time);
        self.quad.draw(gl);
        self.context.swap()
    }

    /// Window-resize half of the interaction bridge: resize the surface's
    /// pixel buffer, then push the new viewport dimensions.
    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        let gl = self.context.gl();
        self.uniforms.set_width(gl, new_size.width as f32);
        self.uniforms.set_height(gl, new_size.height as f32);
        debug!(width = new_size.width, height = new_size.height, "resized");
    }

    /// Pointer-click half of the interaction bridge: convert the last cursor
    /// position to clip space and push it immediately. Each click overwrites
    /// the previous pointer value.
    fn handle_click(&mut self) {
        let Some(position) = self.cursor else {
            return;
        };
        let size = self.context.size();
        // winit reports cursor and surface sizes in the same physical-pixel
        // space, so the displayed and backing dimensions coincide here.
        let backing = (size.width.max(1) as f32, size.height.max(1) as f32);
        let clip = self.pipeline.pointer.update_from_click(
            position.x as f32,
            position.y as f32,
            backing,
            backing,
        );
        self.uniforms.set_pointer(self.context.gl(), clip);
        debug!(x = clip[0], y = clip[1], "pointer updated");
    }
}

/// Builds the window, GL context, and pipeline, then runs the frame loop
/// until the window closes.
///
/// Every iteration yields back to winit and is resumed on the next display
/// refresh; resize and click events are applied on the same control thread
/// between frames.
pub fn run(config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let context = GlContext::new(&event_loop, &config)?;
    let mut state =
        ViewerState::new(context, &config).context("failed to configure render pipeline")?;

    state.context.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.handle_resize(new_size);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        state.cursor = Some(position);
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        state.handle_click();
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = state.frame() {
                            error!("failed to present frame: {err:#}");
                            elwt.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    // Reschedule indefinitely; the swap interval ties the
                    // cadence to the display refresh.
                    state.context.window().request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
