//! Game loop host
//!
//! Samples the running flag on every frame and, while it is set, advances
//! the session in fixed substeps. Stopping only halts advancement; bodies
//! keep whatever state they reached.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Session, SystemSignal, TickInput};

/// Whether the host is currently advancing the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Fixed ticks executed
    pub ticks: u32,
    /// A system ended the run during this frame
    pub run_ended: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GameLoop {
    state: LoopState,
    accumulator: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run one frame
    ///
    /// `running` is sampled here, so the state follows the flag's current
    /// level rather than its changes. One-shot inputs in `input` are cleared
    /// once consumed by a tick.
    pub fn frame(
        &mut self,
        running: bool,
        dt: f32,
        session: &mut Session,
        input: &mut TickInput,
    ) -> FrameReport {
        let next = if running {
            LoopState::Running
        } else {
            LoopState::Stopped
        };
        if next != self.state {
            log::debug!("Game loop {:?} -> {:?}", self.state, next);
            // Time spent stopped never turns into catch-up ticks
            self.accumulator = 0.0;
            self.state = next;
        }

        let mut report = FrameReport::default();
        if self.state == LoopState::Stopped {
            return report;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        while self.accumulator >= SIM_DT && report.ticks < MAX_SUBSTEPS {
            let signal = session.tick(input, SIM_DT);
            self.accumulator -= SIM_DT;
            report.ticks += 1;

            // Clear one-shot inputs after processing
            input.jump = false;

            if signal == SystemSignal::EndRun {
                report.run_ended = true;
                self.accumulator = 0.0;
                break;
            }
        }

        // Time beyond the substep budget is dropped, never replayed later
        if report.ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::BodyLabel;

    #[test]
    fn test_stopped_does_not_advance() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        let report = host.frame(false, 0.05, &mut session, &mut input);
        assert_eq!(report.ticks, 0);
        assert_eq!(host.state(), LoopState::Stopped);
        assert_eq!(session.entities.physics.steps, 0);
    }

    #[test]
    fn test_running_uses_fixed_substeps() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        // 3.5 ticks worth of time
        let report = host.frame(true, SIM_DT * 3.5, &mut session, &mut input);
        assert_eq!(report.ticks, 3);
        assert_eq!(host.state(), LoopState::Running);

        // Leftover half tick carries into the next frame
        let report = host.frame(true, SIM_DT * 0.6, &mut session, &mut input);
        assert_eq!(report.ticks, 1);
        assert_eq!(session.run.time_ticks, 4);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        let report = host.frame(true, 5.0, &mut session, &mut input);
        assert_eq!(report.ticks, MAX_SUBSTEPS);
    }

    #[test]
    fn test_slow_frames_do_not_build_backlog() {
        let mut host = GameLoop::new();
        let mut session = Session::with_systems(Tuning::default(), Vec::new());
        let mut input = TickInput::default();

        // Ten seconds at 10 FPS, each frame over the substep budget
        for _ in 0..100 {
            host.frame(true, 0.1, &mut session, &mut input);
            assert!(host.accumulator <= SIM_DT);
        }

        // Back to 60 FPS: no fast-forward burst
        let ticks: u32 = (0..60)
            .map(|_| host.frame(true, 1.0 / 60.0, &mut session, &mut input).ticks)
            .sum();
        assert!(ticks <= 122, "replayed a backlog: {} ticks", ticks);
    }

    #[test]
    fn test_toggle_twice_keeps_bodies() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        host.frame(true, 0.05, &mut session, &mut input);
        let dino_y = session.entities.body(BodyLabel::Dino).pos.y;
        let cactus_x = session.entities.body(BodyLabel::Cactus).pos.x;
        assert!(cactus_x < 300.0);

        host.frame(false, 0.05, &mut session, &mut input);
        host.frame(false, 0.05, &mut session, &mut input);
        assert_eq!(host.state(), LoopState::Stopped);

        // Not reset, not advanced
        assert_eq!(session.entities.body(BodyLabel::Dino).pos.y, dino_y);
        assert_eq!(session.entities.body(BodyLabel::Cactus).pos.x, cactus_x);
        assert_eq!(session.entities.physics.bodies().len(), 3);
    }

    #[test]
    fn test_jump_input_is_one_shot() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        // Let the Dino land
        for _ in 0..5 {
            host.frame(true, 0.05, &mut session, &mut input);
        }
        assert!(session.entities.body(BodyLabel::Dino).grounded);

        input.jump = true;
        host.frame(true, SIM_DT, &mut session, &mut input);
        assert!(!input.jump);
        assert!(session.entities.body(BodyLabel::Dino).vel.y < 0.0);
    }

    #[test]
    fn test_run_end_reported() {
        let mut host = GameLoop::new();
        let mut session = Session::new(Tuning::default());
        let mut input = TickInput::default();

        let mut ended = false;
        for _ in 0..100 {
            if host.frame(true, 0.05, &mut session, &mut input).run_ended {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(session.run.is_over());
    }
}
