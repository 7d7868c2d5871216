//! Render-loop lifecycle.

/// Lifecycle of the per-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Not yet started.
    #[default]
    Idle,
    /// Ticking every frame.
    Running,
    /// Stopped for good.
    Cancelled,
}

/// Explicit start/cancel handle for the render loop.
///
/// Once cancelled the loop never ticks again, so code running after
/// teardown cannot touch released resources.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    /// A loop that has not started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking. Has no effect on a cancelled loop.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    /// Stop for good.
    pub fn cancel(&mut self) {
        self.state = LoopState::Cancelled;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are being produced.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Count a frame if running; returns whether the caller should render.
    pub fn begin_frame(&mut self) -> bool {
        if self.is_running() {
            self.frames += 1;
        }
        self.is_running()
    }

    /// Frames produced so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
