use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{config::CubicBezier, win::WinKind};

/// How the next offset change is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Jump straight to the new offset.
    None,
    Ease {
        duration: Duration,
        curve: CubicBezier,
    },
}

impl Transition {
    /// CSS `transition` value for a background strip.
    pub fn css(&self) -> String {
        match self {
            Transition::None => "none".to_string(),
            Transition::Ease { duration, curve } => format!(
                "background-position-y {}ms {}",
                duration.as_millis(),
                curve
            ),
        }
    }
}

/// One reel column of the display.
///
/// The offset is cumulative: it keeps growing during a roll and is only
/// folded back into one strip length once the roll has stopped.
pub trait ReelSurface {
    fn offset(&self) -> f64;
    fn set_offset(&self, offset: f64);
    fn set_transition(&self, transition: &Transition);
}

/// The whole machine: its reels, the win marker and the result line.
pub trait SlotsSurface {
    fn reels(&self) -> Vec<Rc<dyn ReelSurface>>;
    fn add_win_marker(&self, kind: WinKind);
    fn remove_win_marker(&self, kind: WinKind);
    fn set_result_text(&self, text: &str);
}

pub trait WalletGate {
    fn is_connected(&self) -> bool;
}

/// Connection flag owned by the front end.
#[derive(Debug, Default)]
pub struct ConnectedFlag(Cell<bool>);

impl ConnectedFlag {
    pub fn new(connected: bool) -> Self {
        Self(Cell::new(connected))
    }

    pub fn set(&self, connected: bool) {
        self.0.set(connected);
    }
}

impl WalletGate for ConnectedFlag {
    fn is_connected(&self) -> bool {
        self.0.get()
    }
}

/// Fire-and-forget audio.
pub trait SoundCue {
    fn play_reel_spin(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundCue for Silent {
    fn play_reel_spin(&self) {}
}
