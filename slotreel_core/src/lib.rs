pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod reel;
pub mod rng;
pub mod runtime;
pub mod surface;
pub mod symbols;
pub mod win;

pub use crate::config::{CubicBezier, EngineConfig, MIN_REELS};
pub use crate::engine::{ReelEngine, SpinOutcome, ROLLING_TEXT};
pub use crate::error::{ConfigError, SlotError, SlotResult};
pub use crate::memory::{MemoryReel, MemorySlots};
pub use crate::reel::{roll, RollPlan};
pub use crate::rng::{FixedRandom, RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
#[cfg(feature = "tokio")]
pub use crate::runtime::TokioRuntime;
pub use crate::runtime::Runtime;
pub use crate::surface::{
    ConnectedFlag, ReelSurface, Silent, SlotsSurface, SoundCue, Transition, WalletGate,
};
pub use crate::symbols::{IconCatalog, RESULT_SEPARATOR};
pub use crate::win::{evaluate, WinKind};
