//=========================================================================
// Sound Board
//=========================================================================
//
// Wraps the host's `AudioTrigger` with muting and per-sample rate limits.
//
// `play_at` keeps one timer per sample name. The first request always
// plays; later requests play only once `min_interval_ms` has elapsed
// since the last accepted one. Timers advance even while muted, so an
// unfocused window does not build up a burst of sounds.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::AudioTrigger;

//=== SoundBoard ==========================================================

pub struct SoundBoard {
    trigger: Box<dyn AudioTrigger>,
    last_played: HashMap<String, f64>,
    muted: bool,
}

impl SoundBoard {
    pub fn new<T>(trigger: T) -> Self
    where
        T: AudioTrigger + 'static,
    {
        Self {
            trigger: Box::new(trigger),
            last_played: HashMap::new(),
            muted: false,
        }
    }

    /// A board that never makes a sound.
    pub fn silent() -> Self {
        Self::new(Silence)
    }

    /// Plays `sample` unless muted.
    pub fn play(&mut self, sample: &str) {
        if self.muted {
            trace!("Muted, dropping sample `{}`", sample);
            return;
        }
        self.trigger.play(sample);
    }

    /// Plays `sample` at most once per `min_interval_ms`.
    ///
    /// `now_ms` is the engine clock. Returns `true` if the request was
    /// accepted (it may still be silent when muted).
    pub fn play_at(&mut self, sample: &str, min_interval_ms: f64, now_ms: f64) -> bool {
        if let Some(&last) = self.last_played.get(sample) {
            if now_ms - last < min_interval_ms {
                return false;
            }
        }
        self.last_played.insert(sample.to_string(), now_ms);
        self.play(sample);
        true
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

//--- Silence -------------------------------------------------------------

struct Silence;

impl AudioTrigger for Silence {
    fn play(&mut self, _sample: &str) {}
}

//=== Unit Tests ==========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl AudioTrigger for Recorder {
        fn play(&mut self, sample: &str) {
            self.0.borrow_mut().push(sample.to_string());
        }
    }

    #[test]
    fn first_rate_limited_request_always_plays() {
        let played = Recorder::default();
        let mut board = SoundBoard::new(played.clone());
        assert!(board.play_at("drum", 115.0, 5_000.0));
        assert_eq!(played.0.borrow().as_slice(), ["drum"]);
    }

    #[test]
    fn requests_inside_interval_are_dropped() {
        let played = Recorder::default();
        let mut board = SoundBoard::new(played.clone());

        assert!(board.play_at("drum", 115.0, 0.0));
        assert!(!board.play_at("drum", 115.0, 50.0));
        assert!(!board.play_at("drum", 115.0, 114.9));
        assert!(board.play_at("drum", 115.0, 115.0));
        assert_eq!(played.0.borrow().len(), 2);
    }

    #[test]
    fn samples_have_independent_timers() {
        let played = Recorder::default();
        let mut board = SoundBoard::new(played.clone());

        assert!(board.play_at("drum", 100.0, 0.0));
        assert!(board.play_at("steps", 100.0, 10.0));
        assert_eq!(played.0.borrow().as_slice(), ["drum", "steps"]);
    }

    #[test]
    fn muted_board_still_advances_timers() {
        let played = Recorder::default();
        let mut board = SoundBoard::new(played.clone());
        board.set_muted(true);

        assert!(board.play_at("drum", 100.0, 0.0));
        board.set_muted(false);
        assert!(!board.play_at("drum", 100.0, 50.0));
        assert!(played.0.borrow().is_empty());
    }
}
