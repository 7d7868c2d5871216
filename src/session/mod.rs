//! Interaction and render-loop state for one viewer window.
//!
//! [`RenderSession`] owns everything that changes from frame to frame but
//! is not GPU state: the displayed scene, the model's orientation, the drag
//! gesture, the camera, the starfield and the loop lifecycle. The GPU
//! renderer reads from it; input commands write to it. None of it is ever
//! persisted.

pub mod frame_loop;
pub mod interaction;
pub mod search;

use glam::Mat4;

pub use frame_loop::{FrameLoop, LoopState};
pub use interaction::{DragState, ModelTransform};
pub use search::{SearchTicket, SearchTracker};

use crate::camera::controller::CameraController;
use crate::chem::Molecule;
use crate::engine::command::ViewCommand;
use crate::options::Options;
use crate::scene::{MoleculeScene, PrimitiveBackend, Starfield};

/// Per-window view state over a primitive backend.
pub struct RenderSession<B: PrimitiveBackend> {
    scene: MoleculeScene<B>,
    transform: ModelTransform,
    camera: CameraController,
    starfield: Option<Starfield>,
    frame_loop: FrameLoop,
}

impl<B: PrimitiveBackend> RenderSession<B> {
    /// New session with no molecule; the loop is not yet started.
    pub fn new(backend: B, options: &Options, aspect: f32) -> Self {
        let starfield = options
            .starfield
            .enabled
            .then(|| Starfield::generate(&options.starfield));
        Self {
            scene: MoleculeScene::new(backend, options.scene.clone()),
            transform: ModelTransform::new(&options.interaction),
            camera: CameraController::new(&options.camera, aspect),
            starfield,
            frame_loop: FrameLoop::new(),
        }
    }

    /// Start the frame loop.
    pub fn start(&mut self) {
        self.frame_loop.start();
        log::info!("render loop started");
    }

    /// Cancel the frame loop and release every primitive.
    pub fn stop(&mut self) {
        self.frame_loop.cancel();
        self.scene.clear();
        log::info!("render loop stopped after {} frames", self.frame_loop.frames());
    }

    /// Show `molecule`, replacing whatever was displayed.
    pub fn set_molecule(&mut self, molecule: &Molecule) {
        self.scene.replace(molecule);
    }

    /// Display nothing.
    pub fn clear_molecule(&mut self) {
        self.scene.clear();
    }

    /// A new search supersedes the displayed molecule: release it and issue
    /// the search a ticket from `searches`.
    pub fn begin_search(&mut self, searches: &mut SearchTracker) -> SearchTicket {
        self.scene.clear();
        searches.issue()
    }

    /// Apply a view command. [`ViewCommand::NextQuery`] is not a view
    /// operation and is ignored here.
    pub fn execute(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::BeginDrag { at } => self.transform.begin_drag(at),
            ViewCommand::Drag { to } => self.transform.drag_to(to),
            ViewCommand::EndDrag => self.transform.end_drag(),
            ViewCommand::ToggleAutoRotate => {
                self.transform.auto_rotate = !self.transform.auto_rotate;
            }
            ViewCommand::Zoom { delta } => self.camera.zoom(delta),
            ViewCommand::ResetView => {
                self.camera.reset();
                self.transform.reset();
            }
            ViewCommand::NextQuery => {}
        }
    }

    /// Advance one frame. Returns whether the caller should render; always
    /// `false` before [`start`](Self::start) and after [`stop`](Self::stop).
    pub fn tick(&mut self) -> bool {
        if !self.frame_loop.begin_frame() {
            return false;
        }
        self.transform.tick();
        if let Some(stars) = &mut self.starfield {
            stars.tick();
        }
        true
    }

    /// Viewport changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Current model matrix for the molecule.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// Current model matrix for the starfield.
    pub fn star_matrix(&self) -> Mat4 {
        self.starfield
            .as_ref()
            .map_or(Mat4::IDENTITY, Starfield::matrix)
    }

    /// The displayed scene.
    pub fn scene(&self) -> &MoleculeScene<B> {
        &self.scene
    }

    /// Mutable scene access, e.g. to flush backend uploads.
    pub fn scene_mut(&mut self) -> &mut MoleculeScene<B> {
        &mut self.scene
    }

    /// Model orientation and drag state.
    pub fn transform(&self) -> &ModelTransform {
        &self.transform
    }

    /// The camera.
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Mutable camera access.
    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// The starfield, when enabled.
    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    /// Loop lifecycle state.
    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::chem::{Atom, Bond, MoleculeMetadata};
    use crate::scene::backend::testing::CountingBackend;

    fn water() -> Molecule {
        let atom = |id, element: &str, x, y| Atom {
            id,
            element: element.to_owned(),
            x,
            y,
            z: 0.0,
        };
        Molecule {
            name: "Water".to_owned(),
            formula: "H2O".to_owned(),
            atoms: vec![
                atom(0, "O", 0.0, 0.0),
                atom(1, "H", 0.96, 0.0),
                atom(2, "H", -0.24, 0.93),
            ],
            bonds: vec![
                Bond {
                    atom1: 0,
                    atom2: 1,
                    order: 1,
                },
                Bond {
                    atom1: 0,
                    atom2: 2,
                    order: 1,
                },
            ],
            metadata: MoleculeMetadata::default(),
        }
    }

    fn session() -> RenderSession<CountingBackend> {
        let mut options = Options::default();
        options.starfield.seed = Some(3);
        options.starfield.count = 10;
        RenderSession::new(CountingBackend::default(), &options, 1.0)
    }

    #[test]
    fn ticks_only_while_running() {
        let mut s = session();
        assert!(!s.tick());
        assert_eq!(s.transform().yaw, 0.0);

        s.start();
        assert!(s.tick());
        assert!(s.transform().yaw > 0.0);
        assert!(s.starfield().unwrap().yaw() > 0.0);

        s.stop();
        let yaw = s.transform().yaw;
        assert!(!s.tick());
        assert_eq!(s.transform().yaw, yaw);
        assert_eq!(s.loop_state(), LoopState::Cancelled);
    }

    #[test]
    fn stop_releases_primitives() {
        let mut s = session();
        s.start();
        s.set_molecule(&water());
        assert_eq!(s.scene().backend().live_count(), 5);
        s.set_molecule(&water());
        assert_eq!(s.scene().backend().live_count(), 5);
        s.stop();
        assert_eq!(s.scene().backend().live_count(), 0);
    }

    #[test]
    fn clear_molecule_empties_scene() {
        let mut s = session();
        s.set_molecule(&water());
        s.clear_molecule();
        assert!(s.scene().is_empty());
        assert_eq!(s.scene().backend().live_count(), 0);
    }

    #[test]
    fn new_search_discards_displayed_molecule() {
        let mut s = session();
        let mut searches = SearchTracker::new();
        s.start();
        s.set_molecule(&water());
        assert_eq!(s.scene().backend().live_count(), 5);

        let ticket = s.begin_search(&mut searches);
        assert_eq!(s.scene().backend().live_count(), 0);
        assert!(s.scene().is_empty());
        assert!(searches.is_current(ticket));
        assert!(searches.is_pending());

        // Result arrives and is shown.
        assert!(searches.complete(ticket));
        s.set_molecule(&water());
        assert_eq!(s.scene().backend().live_count(), 5);
    }

    #[test]
    fn commands_drive_transform_and_camera() {
        let mut s = session();
        s.start();
        s.execute(ViewCommand::BeginDrag {
            at: Vec2::new(0.0, 0.0),
        });
        s.execute(ViewCommand::Drag {
            to: Vec2::new(10.0, 20.0),
        });
        assert!((s.transform().yaw - 0.1).abs() < 1e-6);
        assert!((s.transform().pitch - 0.2).abs() < 1e-6);
        let _ = s.tick();
        assert!((s.transform().yaw - 0.1).abs() < 1e-6);
        s.execute(ViewCommand::EndDrag);

        s.execute(ViewCommand::Zoom { delta: 2.0 });
        assert_eq!(s.camera().distance(), 7.0);

        s.execute(ViewCommand::ToggleAutoRotate);
        let _ = s.tick();
        assert!((s.transform().yaw - 0.1).abs() < 1e-6);

        s.execute(ViewCommand::ResetView);
        assert_eq!(s.camera().distance(), 8.0);
        assert_eq!(s.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn disabled_starfield_is_identity() {
        let mut options = Options::default();
        options.starfield.enabled = false;
        let s = RenderSession::new(CountingBackend::default(), &options, 1.0);
        assert!(s.starfield().is_none());
        assert_eq!(s.star_matrix(), Mat4::IDENTITY);
    }
}
