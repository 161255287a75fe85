//! Screen composition and action routing
//!
//! The screen owns all per-screen state: the running flag, the current play
//! session, the game loop host and the leaderboard. Platform front-ends
//! forward user actions here and draw whatever `view` returns.

use glam::Vec2;

use crate::Tuning;
use crate::host::{FrameReport, GameLoop, LoopState};
use crate::platform::seed_from_clock;
use crate::scoreboard::{ScoreBoard, SyncStatus};
use crate::settings::Settings;
use crate::sim::{BodyLabel, Session, TickInput};
use crate::store::Storage;

pub const START_LABEL: &str = "Iniciar";
pub const STOP_LABEL: &str = "Detener";
pub const RECORDS_TITLE: &str = "Records:";

/// One box to draw in the game viewport
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub label: BodyLabel,
    /// Center (screen coords)
    pub center: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
}

/// Everything a front-end needs to draw the screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub sprites: Vec<SpriteView>,
    pub toggle_label: &'static str,
    pub records_title: &'static str,
    /// `"{user}: {score} puntos"` per record, best first
    pub record_lines: Vec<String>,
    pub score: u64,
    pub best: Option<u64>,
    pub game_over: bool,
    pub sync: SyncStatus,
}

pub struct Screen {
    settings: Settings,
    tuning: Tuning,
    running: bool,
    session: Session,
    game_loop: GameLoop,
    board: ScoreBoard,
    /// Input gathered since the last tick
    input: TickInput,
    mounted: bool,
}

impl Screen {
    pub fn new(settings: Settings, tuning: Tuning, store: Box<dyn Storage>) -> Self {
        let session = Self::new_session(&settings, &tuning);
        Self {
            settings,
            tuning,
            running: false,
            session,
            game_loop: GameLoop::new(),
            board: ScoreBoard::new(store),
            input: TickInput::default(),
            mounted: false,
        }
    }

    fn new_session(settings: &Settings, tuning: &Tuning) -> Session {
        let session = Session::new(tuning.clone());
        if settings.idle_mode {
            session.with_idle_player(seed_from_clock())
        } else {
            session
        }
    }

    /// First display: request the stored records
    pub fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            self.board.load_initial();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn loop_state(&self) -> LoopState {
        self.game_loop.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start/stop button. After game over it starts a fresh session.
    pub fn toggle(&mut self) {
        if self.session.run.is_over() {
            self.session = Self::new_session(&self.settings, &self.tuning);
            self.game_loop = GameLoop::new();
            self.input = TickInput::default();
            self.running = true;
            log::info!("New run started");
        } else {
            self.running = !self.running;
            log::info!("{}", if self.running { "Running" } else { "Stopped" });
        }
    }

    /// Jump action (tap/space); ignored while stopped
    pub fn jump(&mut self) {
        if self.running {
            self.input.jump = true;
        }
    }

    /// Advance one display frame and settle storage work
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let report = self
            .game_loop
            .frame(self.running, dt, &mut self.session, &mut self.input);

        if report.run_ended {
            self.running = false;
            let score = self.session.run.score;
            log::info!("Game over with {} points", score);
            self.board.append(&self.settings.user, score);
        }

        self.board.settle();
        report
    }

    pub fn view(&self) -> ScreenView {
        let entities = &self.session.entities;
        let sprites = entities
            .iter()
            .map(|(label, entity)| {
                let body = entities.physics.body(entity.body);
                SpriteView {
                    label,
                    center: body.pos,
                    size: body.size,
                    color: entity.renderer.color,
                }
            })
            .collect();

        ScreenView {
            sprites,
            toggle_label: if self.running { STOP_LABEL } else { START_LABEL },
            records_title: RECORDS_TITLE,
            record_lines: self.board.records().iter().map(|r| r.display_line()).collect(),
            score: self.session.run.score,
            best: self.board.records().top_score(),
            game_over: self.session.run.is_over(),
            sync: self.board.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RECORDS_KEY, load_records};

    fn screen_with(store: MemoryStore) -> Screen {
        Screen::new(Settings::default().with_user("Ada"), Tuning::default(), Box::new(store))
    }

    #[test]
    fn test_mount_loads_records() {
        let store = MemoryStore::new().with_item(
            RECORDS_KEY,
            r#"[{"user":"Lin","score":99,"date":"d"},{"user":"Ada","score":42,"date":"d"}]"#,
        );
        let mut screen = screen_with(store);
        screen.mount();
        screen.frame(0.016);

        let view = screen.view();
        assert_eq!(view.record_lines, ["Lin: 99 puntos", "Ada: 42 puntos"]);
        assert_eq!(view.records_title, "Records:");
        assert_eq!(view.best, Some(99));
    }

    #[test]
    fn test_toggle_labels() {
        let mut screen = screen_with(MemoryStore::new());
        assert_eq!(screen.view().toggle_label, "Iniciar");

        screen.toggle();
        assert_eq!(screen.view().toggle_label, "Detener");
        screen.frame(0.016);
        assert_eq!(screen.loop_state(), LoopState::Running);

        screen.toggle();
        screen.frame(0.016);
        assert_eq!(screen.view().toggle_label, "Iniciar");
        assert_eq!(screen.loop_state(), LoopState::Stopped);
    }

    #[test]
    fn test_world_survives_frames() {
        let mut screen = screen_with(MemoryStore::new());
        screen.toggle();
        for _ in 0..10 {
            screen.frame(0.016);
        }
        // Same session the whole time, so physics accumulated
        assert!(screen.session().entities.physics.steps >= 15);
        let cactus = screen
            .view()
            .sprites
            .into_iter()
            .find(|s| s.label == BodyLabel::Cactus)
            .unwrap();
        assert!(cactus.center.x < 300.0);
        assert_eq!(cactus.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_game_over_records_score() {
        let mut screen = screen_with(MemoryStore::new());
        screen.mount();
        screen.toggle();

        // No jumping: the cactus ends the run
        for _ in 0..200 {
            screen.frame(0.05);
            if screen.view().game_over {
                break;
            }
        }

        let view = screen.view();
        assert!(view.game_over);
        assert!(!screen.is_running());
        assert_eq!(view.toggle_label, "Iniciar");
        assert_eq!(view.record_lines.len(), 1);
        assert_eq!(view.record_lines[0], format!("Ada: {} puntos", view.score));
        assert_eq!(view.sync, SyncStatus::Synced);

        // Persisted
        let stored = load_records(screen.board().store()).unwrap();
        assert_eq!(stored.entries()[0].user, "Ada");

        // Starting again builds a fresh world
        screen.toggle();
        assert!(screen.is_running());
        assert!(!screen.view().game_over);
        assert_eq!(screen.session().entities.physics.steps, 0);
    }

    #[test]
    fn test_jump_ignored_while_stopped() {
        let mut screen = screen_with(MemoryStore::new());
        screen.jump();
        screen.toggle();
        screen.frame(crate::consts::SIM_DT);
        assert!(screen.session().entities.body(BodyLabel::Dino).vel.y >= 0.0);
    }

    #[test]
    fn test_idle_mode_plays_itself() {
        let settings = Settings {
            idle_mode: true,
            ..Settings::default()
        };
        let screen = Screen::new(settings, Tuning::default(), Box::new(MemoryStore::new()));
        assert!(screen.session().is_idle());
    }
}
