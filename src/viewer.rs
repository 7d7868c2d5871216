//! Standalone viewer window backed by winit.
//!
//! Each query is looked up on a worker thread; results come back over a
//! channel and only the newest search is applied. Tab (by default) cycles
//! through the queries given on the command line.
//!
//! ```no_run
//! # use molstudio::Viewer;
//! Viewer::builder()
//!     .with_queries(["caffeine", "aspirin"])
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::chem::Molecule;
use crate::engine::command::ViewCommand;
use crate::engine::ViewerEngine;
use crate::error::MolstudioError;
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::pubchem::{LookupError, MoleculeLookup, PubChemService};
use crate::session::{SearchTicket, SearchTracker};

/// Query shown when none was given.
const DEFAULT_QUERY: &str = "caffeine";

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    queries: Vec<String>,
    options: Option<Options>,
    lookup: Option<Arc<dyn MoleculeLookup>>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            queries: Vec::new(),
            options: None,
            lookup: None,
            title: "Molstudio".into(),
        }
    }

    /// Molecules to cycle through; the first is searched on startup.
    #[must_use]
    pub fn with_queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queries = queries.into_iter().map(Into::into).collect();
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Use `lookup` instead of a PubChem service built from the options.
    #[must_use]
    pub fn with_lookup(mut self, lookup: Arc<dyn MoleculeLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Set the base window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let lookup = self.lookup.unwrap_or_else(|| {
            Arc::new(PubChemService::from_options(&options.service))
        });
        let queries = if self.queries.is_empty() {
            vec![DEFAULT_QUERY.to_owned()]
        } else {
            self.queries
        };
        Viewer {
            queries,
            options,
            lookup,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that looks up molecules and displays them.
pub struct Viewer {
    queries: Vec<String>,
    options: Options,
    lookup: Arc<dyn MoleculeLookup>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`MolstudioError::Viewer`] if the event loop cannot be created or
    /// fails.
    pub fn run(self) -> Result<(), MolstudioError> {
        let event_loop = EventLoop::new()
            .map_err(|e| MolstudioError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let (results_tx, results_rx) = mpsc::channel();
        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            lookup: self.lookup,
            title: self.title,
            queries: self.queries,
            current_query: 0,
            searches: SearchTracker::new(),
            results_tx,
            results_rx,
            status: Status::Idle,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MolstudioError::Viewer(e.to_string()))
    }
}

// ── Status ───────────────────────────────────────────────────────────────

/// What the window title reports.
#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Loading(String),
    Showing(String),
    Failed(String),
}

impl Status {
    fn title(&self, base: &str) -> String {
        match self {
            Self::Idle => base.to_owned(),
            Self::Loading(query) => format!("{base} | loading {query}..."),
            Self::Showing(name) => format!("{base} | {name}"),
            Self::Failed(message) => format!("{base} | error: {message}"),
        }
    }
}

/// A finished lookup on its way back to the UI thread.
struct SearchResult {
    ticket: SearchTicket,
    outcome: Result<Molecule, LookupError>,
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    options: Options,
    lookup: Arc<dyn MoleculeLookup>,
    title: String,
    queries: Vec<String>,
    current_query: usize,
    searches: SearchTracker,
    results_tx: Sender<SearchResult>,
    results_rx: Receiver<SearchResult>,
    status: Status,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn set_status(&mut self, status: Status) {
        self.status = status;
        if let Some(window) = &self.window {
            window.set_title(&self.status.title(&self.title));
        }
    }

    /// Start a lookup for the current query on a worker thread.
    fn search_current(&mut self) {
        let Some(query) = self.queries.get(self.current_query).cloned() else {
            return;
        };
        let ticket = match &mut self.engine {
            Some(engine) => engine.begin_search(&mut self.searches),
            None => self.searches.issue(),
        };
        let lookup = Arc::clone(&self.lookup);
        let tx = self.results_tx.clone();
        let worker_query = query.clone();

        let spawned = std::thread::Builder::new()
            .name("molecule-search".into())
            .spawn(move || {
                let outcome = lookup.lookup(&worker_query);
                // The receiver is gone once the window closed.
                let _ = tx.send(SearchResult { ticket, outcome });
            });

        match spawned {
            Ok(_) => self.set_status(Status::Loading(query)),
            Err(e) => {
                let e = MolstudioError::ThreadSpawn(e);
                log::error!("{e}");
                let _ = self.searches.complete(ticket);
                self.apply_failure(e.to_string());
            }
        }
    }

    fn next_query(&mut self) {
        if self.queries.is_empty() {
            return;
        }
        self.current_query = (self.current_query + 1) % self.queries.len();
        self.search_current();
    }

    fn apply_failure(&mut self, message: String) {
        if let Some(engine) = &mut self.engine {
            engine.clear_molecule();
        }
        self.set_status(Status::Failed(message));
    }

    /// Apply finished searches; stale ones are dropped.
    fn drain_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            if !self.searches.complete(result.ticket) {
                continue;
            }
            match result.outcome {
                Ok(molecule) => {
                    if let Some(engine) = &mut self.engine {
                        engine.set_molecule(&molecule);
                    }
                    self.set_status(Status::Showing(molecule.name));
                }
                Err(e) => self.apply_failure(e.to_string()),
            }
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        let command = self
            .engine
            .as_mut()
            .and_then(|engine| engine.handle_input(event));
        self.after_command(command);
    }

    fn after_command(&mut self, command: Option<ViewCommand>) {
        if command == Some(ViewCommand::NextQuery) {
            self.next_query();
        }
    }

    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                if let Some(w) = &self.window {
                    let (vp_w, vp_h) = viewport_size(w.inner_size());
                    engine.resize(vp_w, vp_h);
                }
                engine.recover_surface();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            size,
            self.options.clone(),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.search_current();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.dispatch(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.dispatch(InputEvent::CursorLeft);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(InputEvent::scroll(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                let command = self
                    .engine
                    .as_mut()
                    .and_then(|engine| engine.handle_key(&key_str));
                self.after_command(command);
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.drain_results();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &mut self.engine {
            engine.shutdown();
        }
    }
}
