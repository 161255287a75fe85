//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bodies in insertion order, systems in list order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod idle;
pub mod session;
pub mod state;
pub mod systems;
pub mod tick;
pub mod world;

pub use body::{Aabb, Body, BodyLabel};
pub use collision::{Contact, Resolution, detect_contact, resolve_static};
pub use idle::IdlePlayer;
pub use session::Session;
pub use state::{RunPhase, RunState};
pub use systems::{GameSystem, SystemSignal, TickContext, default_systems};
pub use tick::{TickInput, tick};
pub use world::{BodyHandle, Entities, Entity, PhysicsWorld, Sprite, setup_world};
