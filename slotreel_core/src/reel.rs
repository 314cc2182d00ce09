use std::time::Duration;

use tracing::debug;

use crate::{
    config::{CubicBezier, EngineConfig},
    runtime::Runtime,
    surface::{ReelSurface, Transition},
};

/// Everything one roll will do, worked out before any timer starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RollPlan {
    pub stagger: usize,
    /// Icons travelled, at least two full turns plus one turn per stagger step.
    pub distance: u64,
    pub start_offset: f64,
    pub target_offset: f64,
    /// `target_offset` folded into one strip length.
    pub resting_offset: f64,
    pub start_delay: Duration,
    pub duration: Duration,
    /// Net index advance, always in `[0, icon_count)`.
    pub delta: usize,
}

impl RollPlan {
    pub fn new(config: &EngineConfig, stagger: usize, start_offset: f64, draw: f64) -> Self {
        let icons = config.icon_count() as u64;
        let extra = (draw.clamp(0.0, 1.0) * icons as f64).round() as u64;
        let distance = (stagger as u64 + 2) * icons + extra;
        let target_offset = start_offset + distance as f64 * config.icon_height;
        let resting_offset = target_offset % config.strip_height();
        Self {
            stagger,
            distance,
            start_offset,
            target_offset,
            resting_offset,
            start_delay: config.stagger_delay(stagger),
            duration: config.roll_duration(distance),
            delta: (distance % icons) as usize,
        }
    }

    /// Time from the spin request until this reel is at rest.
    pub fn settles_after(&self) -> Duration {
        self.start_delay + self.duration
    }
}

/// Animate one reel through `plan` and resolve with its index delta.
pub async fn roll(
    reel: &dyn ReelSurface,
    plan: RollPlan,
    easing: CubicBezier,
    runtime: &dyn Runtime,
) -> usize {
    runtime.sleep(plan.start_delay).await;
    reel.set_transition(&Transition::Ease {
        duration: plan.duration,
        curve: easing,
    });
    reel.set_offset(plan.target_offset);

    runtime.sleep(plan.duration).await;
    // Snap back without animating so the offset stays bounded.
    reel.set_transition(&Transition::None);
    reel.set_offset(plan.resting_offset);

    debug!(
        stagger = plan.stagger,
        distance = plan.distance,
        delta = plan.delta,
        "reel stopped"
    );
    plan.delta
}
