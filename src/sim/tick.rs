//! Fixed timestep simulation tick
//!
//! Core game loop step that advances simulation deterministically.

use super::state::RunState;
use super::systems::{GameSystem, SystemSignal, TickContext};
use super::world::Entities;
use crate::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (tap/click/space)
    pub jump: bool,
}

/// Advance the world by one fixed timestep, then run every system in order
///
/// Returns `EndRun` if any system ended the run during this tick. Remaining
/// systems still run so the final score is up to date.
pub fn tick(
    entities: &mut Entities,
    systems: &[GameSystem],
    run: &mut RunState,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
) -> SystemSignal {
    // Finished runs never advance
    if run.is_over() {
        return SystemSignal::EndRun;
    }

    entities.physics.step(dt);
    run.time_ticks += 1;

    let mut ctx = TickContext {
        dt,
        input,
        run,
        tuning,
    };
    let mut signal = SystemSignal::Continue;
    for system in systems {
        if system.run(entities, &mut ctx) == SystemSignal::EndRun {
            signal = SystemSignal::EndRun;
        }
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::body::BodyLabel;
    use crate::sim::systems::default_systems;
    use crate::sim::world::setup_world;

    #[test]
    fn test_empty_systems_still_step_physics() {
        let tuning = Tuning::default();
        let mut entities = setup_world(&tuning);
        let mut run = RunState::new();

        for _ in 0..10 {
            let signal = tick(&mut entities, &[], &mut run, &TickInput::default(), &tuning, SIM_DT);
            assert_eq!(signal, SystemSignal::Continue);
        }

        assert_eq!(entities.physics.steps, 10);
        assert_eq!(run.time_ticks, 10);
        // Gravity pulled the Dino down, nothing scrolled, nothing scored
        assert!(entities.body(BodyLabel::Dino).pos.y > 300.0);
        assert_eq!(entities.body(BodyLabel::Cactus).pos.x, 300.0);
        assert_eq!(run.score, 0);
    }

    #[test]
    fn test_run_ends_on_cactus() {
        let tuning = Tuning::default();
        let mut entities = setup_world(&tuning);
        let mut run = RunState::new();
        let systems = default_systems();

        // Never jump: the cactus reaches the Dino
        let mut ended_at = None;
        for i in 0..1000 {
            if tick(&mut entities, &systems, &mut run, &TickInput::default(), &tuning, SIM_DT)
                == SystemSignal::EndRun
            {
                ended_at = Some(i);
                break;
            }
        }

        assert!(ended_at.is_some());
        assert!(run.is_over());
        assert!(run.score > 0);

        // Further ticks are no-ops
        let ticks = run.time_ticks;
        tick(&mut entities, &systems, &mut run, &TickInput::default(), &tuning, SIM_DT);
        assert_eq!(run.time_ticks, ticks);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let systems = default_systems();
        let mut a = setup_world(&tuning);
        let mut b = setup_world(&tuning);
        let mut run_a = RunState::new();
        let mut run_b = RunState::new();

        for i in 0..300 {
            let input = TickInput { jump: i % 50 == 0 };
            tick(&mut a, &systems, &mut run_a, &input, &tuning, SIM_DT);
            tick(&mut b, &systems, &mut run_b, &input, &tuning, SIM_DT);
        }

        assert_eq!(run_a.time_ticks, run_b.time_ticks);
        assert_eq!(run_a.score, run_b.score);
        assert_eq!(a.body(BodyLabel::Dino).pos, b.body(BodyLabel::Dino).pos);
        assert_eq!(a.body(BodyLabel::Cactus).pos, b.body(BodyLabel::Cactus).pos);
    }
}
