//! Shared utilities.

/// Frame limiting and FPS measurement.
pub mod frame_timing;
