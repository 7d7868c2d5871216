//! Camera system for the molecule view.
//!
//! A perspective camera parked on a fixed diagonal ray, with wheel zoom
//! along that ray.

/// Dolly camera controller: zoom, resize and reset.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
