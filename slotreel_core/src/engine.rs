use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    error::{SlotError, SlotResult},
    reel::{roll, RollPlan},
    rng::RandomSource,
    runtime::Runtime,
    surface::{ReelSurface, SlotsSurface, SoundCue, WalletGate},
    win::{self, WinKind},
};

/// Result line shown while the reels are moving.
pub const ROLLING_TEXT: &str = "rolling...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub indices: Vec<usize>,
    pub win: Option<WinKind>,
    pub text: String,
}

/// Drives every reel of one machine.
///
/// All collaborators are single-threaded handles; spins are awaited on the
/// same event loop that owns the display.
pub struct ReelEngine {
    config: EngineConfig,
    slots: Rc<dyn SlotsSurface>,
    reels: Vec<Rc<dyn ReelSurface>>,
    wallet: Rc<dyn WalletGate>,
    sound: Rc<dyn SoundCue>,
    runtime: Rc<dyn Runtime>,
    rng: RefCell<Box<dyn RandomSource>>,
    indices: RefCell<Vec<usize>>,
    spinning: Cell<bool>,
}

struct SpinGuard<'a>(&'a Cell<bool>);

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ReelEngine {
    pub fn new(
        config: EngineConfig,
        slots: Rc<dyn SlotsSurface>,
        wallet: Rc<dyn WalletGate>,
        sound: Rc<dyn SoundCue>,
        runtime: Rc<dyn Runtime>,
        rng: Box<dyn RandomSource>,
    ) -> SlotResult<Self> {
        config.validate()?;
        let reels = slots.reels();
        if reels.len() != config.reel_count {
            return Err(SlotError::ReelCountMismatch {
                expected: config.reel_count,
                found: reels.len(),
            });
        }
        let indices = vec![0; config.reel_count];
        Ok(Self {
            config,
            slots,
            reels,
            wallet,
            sound,
            runtime,
            rng: RefCell::new(rng),
            indices: RefCell::new(indices),
            spinning: Cell::new(false),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resting icon index of every reel.
    pub fn indices(&self) -> Vec<usize> {
        self.indices.borrow().clone()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning.get()
    }

    /// Whether a spin request would be accepted right now.
    pub fn can_spin(&self) -> bool {
        self.wallet.is_connected() && !self.is_spinning()
    }

    pub fn result_text_for(&self, indices: &[usize]) -> String {
        self.config.catalog.describe(indices)
    }

    /// Roll every reel, wait for all of them to stop and settle the outcome.
    ///
    /// Rejects the request while a previous spin is still running or when no
    /// wallet is connected. A declared win marker is removed by a detached
    /// task after `win_marker_ms`; this future does not wait for it.
    pub async fn spin(&self) -> SlotResult<SpinOutcome> {
        if !self.wallet.is_connected() {
            warn!("spin rejected: wallet not connected");
            return Err(SlotError::WalletDisconnected);
        }
        if self.spinning.replace(true) {
            warn!("spin rejected: already spinning");
            return Err(SlotError::SpinInProgress);
        }
        let _guard = SpinGuard(&self.spinning);

        self.slots.set_result_text(ROLLING_TEXT);
        self.sound.play_reel_spin();

        let plans: Vec<RollPlan> = {
            let mut rng = self.rng.borrow_mut();
            self.reels
                .iter()
                .enumerate()
                .map(|(stagger, reel)| {
                    RollPlan::new(&self.config, stagger, reel.offset(), rng.next_unit())
                })
                .collect()
        };
        let deltas = join_all(self.reels.iter().zip(plans).map(|(reel, plan)| {
            roll(
                reel.as_ref(),
                plan,
                self.config.easing,
                self.runtime.as_ref(),
            )
        }))
        .await;

        let icons = self.config.icon_count();
        let indices: Vec<usize> = self
            .indices
            .borrow()
            .iter()
            .zip(&deltas)
            .map(|(old, delta)| (old + delta) % icons)
            .collect();
        debug!(?indices, "reels settled");

        let text = self.result_text_for(&indices);
        self.slots.set_result_text(&text);

        let win = win::evaluate(&indices);
        if let Some(kind) = win {
            info!(marker = kind.marker(), %text, "win");
            self.show_win(kind);
        }

        *self.indices.borrow_mut() = indices.clone();
        info!(%text, "spin complete");
        Ok(SpinOutcome { indices, win, text })
    }

    fn show_win(&self, kind: WinKind) {
        self.slots.add_win_marker(kind);
        let slots = Rc::clone(&self.slots);
        let expiry = self.runtime.sleep(self.config.win_marker_duration());
        self.runtime.spawn(Box::pin(async move {
            expiry.await;
            slots.remove_win_marker(kind);
        }));
    }
}
