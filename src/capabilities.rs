//! Device feedback: haptics, sounds, speech. All calls are fire-and-forget;
//! a failing device never interrupts practice.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Haptic {
    Light,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Sound {
    Tap,
    Success,
    Error,
    LevelUp,
    Achievement,
}

pub trait Capabilities {
    fn haptic(&mut self, kind: Haptic);
    fn play_sound(&mut self, kind: Sound);
    fn speak(&mut self, text: &str);
}

/// Terminal stand-ins: the bell for success/error sounds, log lines for the rest.
/// Whether to speak at all is the caller's decision (the voice setting).
#[derive(Debug)]
pub struct TerminalCapabilities {
    sound_enabled: bool,
}

impl TerminalCapabilities {
    pub fn new(sound_enabled: bool) -> Self {
        Self { sound_enabled }
    }

    fn ring_bell(&self) -> std::io::Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl Capabilities for TerminalCapabilities {
    fn haptic(&mut self, kind: Haptic) {
        debug!("haptic: {kind}");
    }

    fn play_sound(&mut self, kind: Sound) {
        if !self.sound_enabled {
            return;
        }
        debug!("sound: {kind}");
        if matches!(kind, Sound::Success | Sound::Error | Sound::LevelUp) {
            if let Err(e) = self.ring_bell() {
                debug!("bell failed: {e}");
            }
        }
    }

    fn speak(&mut self, text: &str) {
        info!("voice feedback requested for {text:?} (speech output not available)");
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CapabilityLog {
    pub haptics: Vec<Haptic>,
    pub sounds: Vec<Sound>,
    pub spoken: Vec<String>,
}

/// Remembers every request; used by headless tests. Clones share one log, so a
/// test can keep a handle after boxing a clone into the app.
#[derive(Debug, Default, Clone)]
pub struct RecordingCapabilities {
    log: Rc<RefCell<CapabilityLog>>,
}

impl RecordingCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CapabilityLog {
        self.log.borrow().clone()
    }
}

impl Capabilities for RecordingCapabilities {
    fn haptic(&mut self, kind: Haptic) {
        self.log.borrow_mut().haptics.push(kind);
    }

    fn play_sound(&mut self, kind: Sound) {
        self.log.borrow_mut().sounds.push(kind);
    }

    fn speak(&mut self, text: &str) {
        self.log.borrow_mut().spoken.push(text.to_string());
    }
}
