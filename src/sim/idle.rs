//! Idle/demo mode - a scripted player that jumps over the cactus
//!
//! Reaction distance is jittered with a seeded RNG so demo runs differ from
//! each other but replay identically for the same seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::BodyLabel;
use super::tick::TickInput;
use super::world::Entities;

/// Gap (cactus left edge minus Dino right edge) the player aims to jump at
const IDEAL_GAP: f32 = 35.0;

/// Automatic player
#[derive(Debug, Clone)]
pub struct IdlePlayer {
    rng: Pcg32,
    /// Max deviation from the ideal gap, in pixels
    sloppiness: f32,
    /// Gap chosen for the obstacle currently approaching
    trigger_gap: f32,
}

impl IdlePlayer {
    pub fn new(seed: u64, sloppiness: f32) -> Self {
        let mut player = Self {
            rng: Pcg32::seed_from_u64(seed),
            sloppiness: sloppiness.max(0.0),
            trigger_gap: IDEAL_GAP,
        };
        player.pick_trigger();
        player
    }

    fn pick_trigger(&mut self) {
        self.trigger_gap = if self.sloppiness > 0.0 {
            IDEAL_GAP + self.rng.random_range(-self.sloppiness..=self.sloppiness)
        } else {
            IDEAL_GAP
        };
    }

    /// Decide this tick's input from the current scene
    pub fn input(&mut self, entities: &Entities) -> TickInput {
        let dino = entities.body(BodyLabel::Dino);
        let cactus = entities.body(BodyLabel::Cactus);
        let gap = cactus.left() - dino.right();

        let jump = dino.grounded && gap > 0.0 && gap <= self.trigger_gap;
        if jump {
            log::trace!("Idle player jumps at gap {:.1}", gap);
            self.pick_trigger();
        }
        TickInput { jump }
    }
}
