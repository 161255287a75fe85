//! Gameplay systems run after every physics step
//!
//! Systems are plain tagged variants kept in an ordered list. Each one reads
//! and may mutate the entity mapping and may signal that the run is over.

use serde::{Deserialize, Serialize};

use super::body::BodyLabel;
use super::state::{RunPhase, RunState};
use super::tick::TickInput;
use super::world::Entities;
use crate::Tuning;
use crate::consts::CACTUS_POS;

/// What a system wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemSignal {
    Continue,
    EndRun,
}

/// Data shared with every system during one tick
pub struct TickContext<'a> {
    pub dt: f32,
    pub input: &'a TickInput,
    pub run: &'a mut RunState,
    pub tuning: &'a Tuning,
}

/// Registered update systems, executed in list order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSystem {
    /// Jump input becomes an upward velocity on a grounded Dino
    Jump,
    /// Cactus scrolls left at constant speed and wraps around
    Scroll,
    /// Dino touching the Cactus ends the run
    Collision,
    /// Score from elapsed time and cleared obstacles
    Score,
}

impl GameSystem {
    pub fn run(&self, entities: &mut Entities, ctx: &mut TickContext<'_>) -> SystemSignal {
        match self {
            GameSystem::Jump => {
                let dino = entities.body_mut(BodyLabel::Dino);
                if ctx.input.jump && dino.grounded {
                    dino.vel.y = -ctx.tuning.jump_velocity;
                    dino.grounded = false;
                }
                SystemSignal::Continue
            }
            GameSystem::Scroll => {
                let cactus = entities.body_mut(BodyLabel::Cactus);
                cactus.vel.x = -ctx.tuning.scroll_speed;
                // Rides the ground line, including past the ground's ends
                cactus.pos.y = CACTUS_POS.1;
                cactus.vel.y = 0.0;
                if cactus.right() < 0.0 {
                    cactus.pos.x = ctx.tuning.respawn_x;
                    ctx.run.obstacles_cleared += 1;
                }
                SystemSignal::Continue
            }
            GameSystem::Collision => {
                let hit = entities
                    .physics
                    .contacts()
                    .iter()
                    .any(|c| c.involves(BodyLabel::Dino, BodyLabel::Cactus));
                if hit {
                    ctx.run.phase = RunPhase::GameOver;
                    SystemSignal::EndRun
                } else {
                    SystemSignal::Continue
                }
            }
            GameSystem::Score => {
                ctx.run.score = ctx.run.compute_score(ctx.tuning.clear_bonus);
                SystemSignal::Continue
            }
        }
    }
}

/// The full rule set: jump, scroll, collision, then scoring
pub fn default_systems() -> Vec<GameSystem> {
    vec![
        GameSystem::Jump,
        GameSystem::Scroll,
        GameSystem::Collision,
        GameSystem::Score,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::world::setup_world;

    fn run_system(
        system: GameSystem,
        entities: &mut Entities,
        run: &mut RunState,
        input: &TickInput,
    ) -> SystemSignal {
        let tuning = Tuning::default();
        let mut ctx = TickContext {
            dt: SIM_DT,
            input,
            run,
            tuning: &tuning,
        };
        system.run(entities, &mut ctx)
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut entities = setup_world(&Tuning::default());
        let mut run = RunState::new();
        let jump = TickInput { jump: true };

        // Spawned in the air: no jump
        run_system(GameSystem::Jump, &mut entities, &mut run, &jump);
        assert_eq!(entities.body(BodyLabel::Dino).vel.y, 0.0);

        entities.body_mut(BodyLabel::Dino).grounded = true;
        run_system(GameSystem::Jump, &mut entities, &mut run, &jump);
        let dino = entities.body(BodyLabel::Dino);
        assert_eq!(dino.vel.y, -Tuning::default().jump_velocity);
        assert!(!dino.grounded);
    }

    #[test]
    fn test_scroll_wraps_and_counts() {
        let mut entities = setup_world(&Tuning::default());
        let mut run = RunState::new();

        run_system(GameSystem::Scroll, &mut entities, &mut run, &TickInput::default());
        assert_eq!(
            entities.body(BodyLabel::Cactus).vel.x,
            -Tuning::default().scroll_speed
        );
        assert_eq!(run.obstacles_cleared, 0);

        entities.body_mut(BodyLabel::Cactus).pos.x = -20.0;
        run_system(GameSystem::Scroll, &mut entities, &mut run, &TickInput::default());
        assert_eq!(run.obstacles_cleared, 1);
        assert_eq!(
            entities.body(BodyLabel::Cactus).pos.x,
            Tuning::default().respawn_x
        );
    }

    #[test]
    fn test_collision_ends_run() {
        let mut entities = setup_world(&Tuning::default());
        let mut run = RunState::new();

        entities.physics.step(SIM_DT);
        let signal = run_system(GameSystem::Collision, &mut entities, &mut run, &TickInput::default());
        assert_eq!(signal, SystemSignal::Continue);

        entities.body_mut(BodyLabel::Cactus).pos.x = 60.0;
        entities.physics.step(SIM_DT);
        let signal = run_system(GameSystem::Collision, &mut entities, &mut run, &TickInput::default());
        assert_eq!(signal, SystemSignal::EndRun);
        assert!(run.is_over());
    }
}
