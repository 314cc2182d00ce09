use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// Adjacent pair on the first three reels.
    #[serde(rename = "win1")]
    Pair,
    /// First three reels all show the same icon.
    #[serde(rename = "win2")]
    Triple,
}

impl WinKind {
    /// Marker name applied to the slots display while the win is shown.
    pub fn marker(self) -> &'static str {
        match self {
            WinKind::Pair => "win1",
            WinKind::Triple => "win2",
        }
    }
}

/// Classify the resting indices of a spin.
///
/// Only reels 0..=2 are considered; any further reels are animated but never
/// take part. A win needs an adjacent match (`0 == 1` or `1 == 2`) and is a
/// [`WinKind::Triple`] when the outer reels match as well.
pub fn evaluate(indices: &[usize]) -> Option<WinKind> {
    match indices {
        [a, b, c, ..] if a == b || b == c => Some(if a == c {
            WinKind::Triple
        } else {
            WinKind::Pair
        }),
        _ => None,
    }
}
