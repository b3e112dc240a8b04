//=========================================================================
// Frame Loop
//=========================================================================
//
// Fixed-interval step scheduler driven by host frame timestamps.
//
// The host calls `advance(now)` once per display frame. A step runs when
// at least one interval has elapsed since the last step; the remainder
// is carried so the cadence does not drift:
// ```text
//   elapsed = now - last
//   elapsed ≥ interval → step(delta = elapsed / 1000)
//                        last = now - (elapsed mod interval)
// ```
// At most one step runs per call, so a stalled host never triggers a
// burst of catch-up steps.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== FrameLoop ===========================================================

#[derive(Debug, Clone)]
pub struct FrameLoop {
    fps: u32,
    interval_ms: f64,
    last_ms: Option<f64>,
    last_delta: f64,
    total_time: f64,
    steps: u64,
}

impl FrameLoop {
    pub const DEFAULT_FPS: u32 = 30;

    /// Creates a loop targeting `fps` steps per second.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    pub fn new(fps: u32) -> Self {
        assert!(fps > 0, "FPS must be greater than 0");
        Self {
            fps,
            interval_ms: 1000.0 / f64::from(fps),
            last_ms: None,
            last_delta: 0.016,
            total_time: 0.0,
            steps: 0,
        }
    }

    /// Anchors the schedule at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        debug!("Frame loop started at {:.1} ms ({} fps)", now_ms, self.fps);
        self.last_ms = Some(now_ms);
    }

    /// Returns the step delta in seconds if a step is due at `now_ms`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chapel_engine::prelude::*;
    /// let mut frames = FrameLoop::new(30);
    /// let steps: Vec<_> = [0.0, 10.0, 40.0, 41.0]
    ///     .into_iter()
    ///     .filter_map(|now| frames.advance(now))
    ///     .collect();
    /// assert_eq!(steps.len(), 1);
    /// ```
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let Some(last) = self.last_ms else {
            self.start(now_ms);
            return None;
        };

        let elapsed = now_ms - last;
        if elapsed < self.interval_ms {
            return None;
        }

        let delta = elapsed / 1000.0;
        self.last_ms = Some(now_ms - elapsed % self.interval_ms);
        self.last_delta = delta;
        self.total_time += delta;
        self.steps += 1;
        trace!("Step {} with delta {:.4} s", self.steps, delta);
        Some(delta)
    }

    //--- Queries ----------------------------------------------------------

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Duration of the most recent step in seconds.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Simulated seconds since the first step.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_started(&self) -> bool {
        self.last_ms.is_some()
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FPS)
    }
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_once_when_interval_elapsed() {
        let mut frames = FrameLoop::new(30);
        let mut deltas = Vec::new();
        for now in [0.0, 10.0, 40.0, 41.0] {
            if let Some(delta) = frames.advance(now) {
                deltas.push((now, delta));
            }
        }
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].0, 40.0);
        assert!((deltas[0].1 - 0.040).abs() < 1e-9);
    }

    #[test]
    fn remainder_carries_into_next_step() {
        let mut frames = FrameLoop::new(10);
        frames.start(0.0);
        assert!(frames.advance(150.0).is_some());
        // last = 150 - 50 = 100, so 200 is exactly one interval later.
        assert!(frames.advance(199.0).is_none());
        let delta = frames.advance(200.0);
        assert!(delta.is_some_and(|d| (d - 0.1).abs() < 1e-9));
    }

    #[test]
    fn stall_yields_a_single_long_step() {
        let mut frames = FrameLoop::new(10);
        frames.start(0.0);
        assert!(frames.advance(1000.0).is_some_and(|d| (d - 1.0).abs() < 1e-9));
        assert_eq!(frames.steps(), 1);
        assert!(frames.advance(1001.0).is_none());
    }

    #[test]
    fn totals_accumulate() {
        let mut frames = FrameLoop::new(10);
        frames.start(0.0);
        frames.advance(100.0);
        frames.advance(250.0);
        assert!((frames.total_time() - 0.250).abs() < 1e-9);
        assert!((frames.last_delta() - 0.150).abs() < 1e-9);
    }

    #[test]
    fn default_last_delta_before_first_step() {
        let frames = FrameLoop::default();
        assert_eq!(frames.fps(), 30);
        assert_eq!(frames.last_delta(), 0.016);
        assert!(!frames.is_started());
    }

    #[test]
    #[should_panic(expected = "FPS must be greater than 0")]
    fn zero_fps_panics() {
        FrameLoop::new(0);
    }
}
