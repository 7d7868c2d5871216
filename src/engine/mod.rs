//! The windowed viewer engine: GPU context, renderer, session and input in
//! one place.

pub mod command;

use crate::chem::Molecule;
use crate::engine::command::ViewCommand;
use crate::error::MolstudioError;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::{PrimitiveInstances, SceneRenderer};
use crate::session::{RenderSession, SearchTicket, SearchTracker};
use crate::util::frame_timing::FrameTiming;

/// Frame cap. Rotation speeds are per frame, so this also fixes how fast
/// the molecule turns.
const TARGET_FPS: u32 = 60;

/// Owns everything one viewer window needs to draw a molecule.
pub struct ViewerEngine {
    context: RenderContext,
    renderer: SceneRenderer,
    session: RenderSession<PrimitiveInstances>,
    input: InputProcessor,
    frame_timing: FrameTiming,
    options: Options,
}

impl ViewerEngine {
    /// Initialize the GPU, build the renderer and start the frame loop.
    ///
    /// # Errors
    ///
    /// [`MolstudioError::Gpu`] if no device or surface is available,
    /// [`MolstudioError::Shader`] if a shader fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, MolstudioError> {
        let context = RenderContext::new(window, size).await?;
        let mut session = RenderSession::new(
            PrimitiveInstances::new(),
            &options,
            context.aspect(),
        );
        let renderer =
            SceneRenderer::new(&context, &options, session.starfield())?;
        session.start();

        Ok(Self {
            context,
            renderer,
            session,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            frame_timing: FrameTiming::new(TARGET_FPS),
            options,
        })
    }

    /// Feed a pointer event. View commands are applied immediately; the
    /// command is returned so the caller can act on the ones the engine
    /// does not own.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<ViewCommand> {
        let command = self.input.handle_event(event)?;
        self.session.execute(command);
        Some(command)
    }

    /// Feed a key press by its key code name (e.g. `"KeyR"`).
    pub fn handle_key(&mut self, key: &str) -> Option<ViewCommand> {
        let command = self.input.handle_key_press(key)?;
        self.session.execute(command);
        Some(command)
    }

    /// Display `molecule`, releasing the previous one.
    pub fn set_molecule(&mut self, molecule: &Molecule) {
        self.session.set_molecule(molecule);
    }

    /// Display nothing.
    pub fn clear_molecule(&mut self) {
        self.session.clear_molecule();
    }

    /// Drop the displayed molecule and issue a ticket for a new search.
    pub fn begin_search(&mut self, searches: &mut SearchTracker) -> SearchTicket {
        self.session.begin_search(searches)
    }

    /// Name of the displayed molecule.
    pub fn molecule_name(&self) -> Option<&str> {
        self.session.scene().molecule_name()
    }

    /// Window resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context.device, width, height);
        self.session.resize(width, height);
    }

    /// Advance and draw one frame if the frame cap allows it.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] when the surface could not
    /// provide a frame; callers reconfigure on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() || !self.session.tick() {
            return Ok(());
        }
        self.renderer.render(&self.context, &mut self.session)?;
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Reconfigure the surface at its current size after it was lost.
    pub fn recover_surface(&self) {
        self.context.reconfigure();
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Options the engine was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The render session.
    pub fn session(&self) -> &RenderSession<PrimitiveInstances> {
        &self.session
    }

    /// Stop the frame loop and release all primitives.
    pub fn shutdown(&mut self) {
        self.session.stop();
    }
}
