//! Centralized runtime options with TOML file support.
//!
//! Every tweakable setting (camera, model interaction, ball-and-stick
//! geometry, starfield, upstream service, keybindings) lives here. Options
//! serialize to and from TOML so a single file can configure both the viewer
//! and the HTTP service.

mod camera;
mod interaction;
mod scene;
mod service;
mod starfield;

use std::path::Path;

pub use camera::CameraOptions;
pub use interaction::InteractionOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};
pub use service::ServiceOptions;
pub use starfield::StarfieldOptions;

use crate::error::MolstudioError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[scene]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and zoom parameters.
    pub camera: CameraOptions,
    /// Model rotation behaviour.
    pub interaction: InteractionOptions,
    /// Ball-and-stick geometry and material parameters.
    pub scene: SceneOptions,
    /// Background star shell.
    pub starfield: StarfieldOptions,
    /// Upstream PubChem access and local HTTP endpoint.
    pub service: ServiceOptions,
    /// Keyboard binding options.
    pub keybindings: KeyBindings,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MolstudioError::Io`] if the file cannot be read,
    /// [`MolstudioError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MolstudioError> {
        let content =
            std::fs::read_to_string(path).map_err(MolstudioError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolstudioError::OptionsParse(e.to_string()))
    }

    /// Load from `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// See [`Options::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MolstudioError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`MolstudioError::OptionsParse`] if serialization fails,
    /// [`MolstudioError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MolstudioError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolstudioError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolstudioError::Io)?;
        }
        std::fs::write(path, content).map_err(MolstudioError::Io)
    }
}
