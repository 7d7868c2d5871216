use web_time::{Duration, Instant};

/// Smoothing factor for the FPS average: 5% new value, 95% old value.
const SMOOTHING: f32 = 0.05;

/// Frame limiter with a smoothed FPS readout.
pub struct FrameTiming {
    /// Minimum frame duration; zero means unlimited.
    min_frame_duration: Duration,
    last_frame: Instant,
    smoothed_fps: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
        }
    }

    /// Whether enough time has passed since the last frame to render.
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed.as_secs_f32());
    }

    fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - SMOOTHING)
                + SMOOTHING / frame_time;
        }
    }

    /// Current smoothed FPS.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
