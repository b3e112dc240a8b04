//=========================================================================
// Event Collector
//=========================================================================
//
// Drains host events from a crossbeam channel with a per-frame bound.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → inputs / focus → TickControl
//
// The bound keeps a flooded channel (e.g. a burst of mouse motion) from
// stalling a frame; the remainder is picked up on the next call.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events between frames.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    inputs: Vec<InputEvent>,
    focus: Option<bool>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 256;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            inputs: Vec::with_capacity(16),
            focus: None,
        }
    }

    /// Collects pending host events.
    ///
    /// Returns [`TickControl::Exit`] when the host closed the window or
    /// dropped its sender.
    pub fn collect_frame(&mut self) -> TickControl {
        self.inputs.clear();
        self.focus = None;

        let mut drained = 0;
        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Input(event)) => self.inputs.push(event),
                Ok(PlatformEvent::FocusChanged(focused)) => self.focus = Some(focused),
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
            drained += 1;
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Takes the inputs collected by the last call, in arrival order.
    pub fn take_inputs(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.inputs)
    }

    /// Latest focus change seen by the last call, if any.
    pub fn focus_change(&self) -> Option<bool> {
        self.focus
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
