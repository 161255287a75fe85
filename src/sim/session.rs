//! One play session: a world built once plus the rules that drive it
//!
//! A session lives from the first "start" until game over. Starting again
//! afterwards creates a new session (and a fresh world).

use super::idle::IdlePlayer;
use super::state::RunState;
use super::systems::{GameSystem, SystemSignal, default_systems};
use super::tick::{TickInput, tick};
use super::world::{Entities, setup_world};
use crate::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    pub entities: Entities,
    pub run: RunState,
    systems: Vec<GameSystem>,
    tuning: Tuning,
    /// Scripted player replacing user input when set
    idle: Option<IdlePlayer>,
}

impl Session {
    /// Session with the full rule set
    pub fn new(tuning: Tuning) -> Self {
        Self::with_systems(tuning, default_systems())
    }

    /// Session with an explicit system list (may be empty)
    pub fn with_systems(tuning: Tuning, systems: Vec<GameSystem>) -> Self {
        Self {
            entities: setup_world(&tuning),
            run: RunState::new(),
            systems,
            tuning,
            idle: None,
        }
    }

    /// Let the idle player drive this session
    pub fn with_idle_player(mut self, seed: u64) -> Self {
        self.idle = Some(IdlePlayer::new(seed, self.tuning.idle_sloppiness));
        self
    }

    pub fn systems(&self) -> &[GameSystem] {
        &self.systems
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_idle(&self) -> bool {
        self.idle.is_some()
    }

    /// Advance one fixed step
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> SystemSignal {
        let input = match self.idle.as_mut() {
            Some(player) => player.input(&self.entities),
            None => input.clone(),
        };
        tick(
            &mut self.entities,
            &self.systems,
            &mut self.run,
            &input,
            &self.tuning,
            dt,
        )
    }
}
