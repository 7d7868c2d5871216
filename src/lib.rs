// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]
#![warn(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! 3D molecule viewer and lookup service backed by PubChem.
//!
//! A free-text query is resolved to a PubChem compound, its structure and
//! property records are fetched and normalized into a strict [`Molecule`],
//! and the molecule is drawn as a ball-and-stick model: one sphere per atom,
//! one to three cylinders per bond.
//!
//! # Key entry points
//!
//! - [`pubchem::PubChemService`] - query to [`Molecule`] over PUG-REST
//! - [`scene::synthesize`] - molecule to sphere/cylinder primitives
//! - [`session::RenderSession`] - per-window interaction and loop state
//! - [`engine::ViewerEngine`] - wgpu renderer around a session
//! - [`options::Options`] - runtime configuration (camera, interaction,
//!   scene, starfield, service, keybindings)
//!
//! # Architecture
//!
//! Lookups are blocking and run off the render thread (worker threads in
//! the viewer, the tokio blocking pool in the server). The render thread
//! owns a [`session::RenderSession`] whose scene pushes primitives through
//! the [`scene::PrimitiveBackend`] seam into a GPU instance store; the
//! renderer draws a starfield plus two instanced meshes per frame.

pub mod camera;
pub mod chem;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod pubchem;
pub mod renderer;
pub mod scene;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use chem::Molecule;
pub use error::MolstudioError;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
