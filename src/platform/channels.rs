//=========================================================================
// Channel Adapters
//=========================================================================
//
// Host-service adapters that forward overlay text and sound triggers over
// crossbeam channels, for hosts that render the overlay or mix audio on
// another thread.
//
// A disconnected receiver never stops the game: sends that fail are
// logged once per adapter and dropped afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{AudioTrigger, DialogOutput};

//=== OverlayEvent ========================================================

/// Overlay update sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    ShowText(String),
    Clear,
}

//=== ChannelOverlay ======================================================

/// [`DialogOutput`] that sends every change as an [`OverlayEvent`].
pub struct ChannelOverlay {
    sender: Sender<OverlayEvent>,
    disconnected: bool,
}

impl ChannelOverlay {
    pub fn new(sender: Sender<OverlayEvent>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }

    fn send(&mut self, event: OverlayEvent) {
        if self.sender.send(event).is_err() && !self.disconnected {
            warn!(target: "platform", "Overlay channel disconnected, dropping text");
            self.disconnected = true;
        }
    }
}

impl DialogOutput for ChannelOverlay {
    fn show(&mut self, text: &str) {
        self.send(OverlayEvent::ShowText(text.to_owned()));
    }

    fn clear(&mut self) {
        self.send(OverlayEvent::Clear);
    }
}

//=== ChannelAudio ========================================================

/// [`AudioTrigger`] that sends sample names.
pub struct ChannelAudio {
    sender: Sender<String>,
    disconnected: bool,
}

impl ChannelAudio {
    pub fn new(sender: Sender<String>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }
}

impl AudioTrigger for ChannelAudio {
    fn play(&mut self, sample: &str) {
        if self.sender.send(sample.to_owned()).is_err() && !self.disconnected {
            warn!(target: "platform", "Audio channel disconnected, dropping '{}'", sample);
            self.disconnected = true;
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
