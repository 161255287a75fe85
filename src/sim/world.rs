//! Physics world and the fixed three-body scene
//!
//! `setup_world` is called once per play session; the returned `Entities`
//! owns its `PhysicsWorld` for the whole session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyLabel};
use super::collision::{Contact, detect_contact, resolve_static};
use crate::Tuning;
use crate::consts::*;

/// Index of a body inside its `PhysicsWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(usize);

/// Owns every body and steps them together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    /// Gravity acceleration (pixels/s², +y is down)
    pub gravity: Vec2,
    bodies: Vec<Body>,
    /// Dynamic/dynamic overlaps found by the last step
    #[serde(skip)]
    contacts: Vec<Contact>,
    /// Steps taken since construction
    pub steps: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            contacts: Vec::new(),
            steps: 0,
        }
    }

    /// Register a body, returning its handle
    pub fn add(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0]
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut Body {
        &mut self.bodies[handle.0]
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advance every dynamic body by `dt`
    ///
    /// Integrates gravity (semi-implicit Euler), resolves dynamic bodies
    /// against static ones, then records dynamic/dynamic contacts.
    pub fn step(&mut self, dt: f32) {
        self.steps += 1;

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.vel += self.gravity * dt;
            body.pos += body.vel * dt;
            body.grounded = false;
        }

        // Split so dynamic bodies can be mutated while reading static ones
        let (statics, mut dynamics): (Vec<_>, Vec<_>) =
            self.bodies.iter_mut().partition(|b| b.is_static);
        for body in dynamics.iter_mut() {
            for obstacle in &statics {
                if let Some(res) = resolve_static(body, obstacle) {
                    body.grounded |= res.landed;
                }
            }
        }

        self.contacts.clear();
        for (i, a) in dynamics.iter().enumerate() {
            for b in dynamics.iter().skip(i + 1) {
                if let Some(contact) = detect_contact(a, b) {
                    self.contacts.push(contact);
                }
            }
        }
    }
}

/// Visual representation of an entity (flat colored box of the body's size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub color: [f32; 4],
}

impl Sprite {
    pub const DINO: Sprite = Sprite {
        color: [0.0, 0.5, 0.0, 1.0], // green
    };
    pub const GROUND: Sprite = Sprite {
        color: [0.65, 0.16, 0.16, 1.0], // brown
    };
    pub const CACTUS: Sprite = Sprite {
        color: [1.0, 0.0, 0.0, 1.0], // red
    };
}

/// A named game object: its body plus how to draw it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Entity {
    pub body: BodyHandle,
    pub renderer: Sprite,
}

/// Entity mapping consumed by the game loop and the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entities {
    pub physics: PhysicsWorld,
    pub dino: Entity,
    pub ground: Entity,
    pub cactus: Entity,
}

impl Entities {
    pub fn get(&self, label: BodyLabel) -> &Entity {
        match label {
            BodyLabel::Dino => &self.dino,
            BodyLabel::Ground => &self.ground,
            BodyLabel::Cactus => &self.cactus,
        }
    }

    pub fn body(&self, label: BodyLabel) -> &Body {
        self.physics.body(self.get(label).body)
    }

    pub fn body_mut(&mut self, label: BodyLabel) -> &mut Body {
        let handle = self.get(label).body;
        self.physics.body_mut(handle)
    }

    /// Entities in draw order
    pub fn iter(&self) -> impl Iterator<Item = (BodyLabel, &Entity)> {
        [BodyLabel::Ground, BodyLabel::Cactus, BodyLabel::Dino]
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }
}

/// Build the fixed scene: Dino, Ground and Cactus in one world
pub fn setup_world(tuning: &Tuning) -> Entities {
    let mut physics = PhysicsWorld::new(Vec2::new(0.0, tuning.gravity));

    let dino = physics.add(Body::rectangle(
        BodyLabel::Dino,
        DINO_POS.0,
        DINO_POS.1,
        DINO_SIZE.0,
        DINO_SIZE.1,
    ));
    let ground = physics.add(
        Body::rectangle(
            BodyLabel::Ground,
            GROUND_POS.0,
            GROUND_POS.1,
            GROUND_SIZE.0,
            GROUND_SIZE.1,
        )
        .with_static(true),
    );
    let cactus = physics.add(Body::rectangle(
        BodyLabel::Cactus,
        CACTUS_POS.0,
        CACTUS_POS.1,
        CACTUS_SIZE.0,
        CACTUS_SIZE.1,
    ));

    log::debug!("World built with {} bodies", physics.bodies().len());

    Entities {
        physics,
        dino: Entity {
            body: dino,
            renderer: Sprite::DINO,
        },
        ground: Entity {
            body: ground,
            renderer: Sprite::GROUND,
        },
        cactus: Entity {
            body: cactus,
            renderer: Sprite::CACTUS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_world_layout() {
        let entities = setup_world(&Tuning::default());

        assert_eq!(entities.physics.bodies().len(), 3);
        assert_eq!(entities.body(BodyLabel::Dino).pos, Vec2::new(50.0, 300.0));
        assert_eq!(entities.body(BodyLabel::Dino).size, Vec2::new(50.0, 50.0));
        assert!(entities.body(BodyLabel::Ground).is_static);
        assert_eq!(entities.body(BodyLabel::Ground).size, Vec2::new(400.0, 10.0));
        assert!(!entities.body(BodyLabel::Cactus).is_static);
        assert_eq!(entities.body(BodyLabel::Cactus).pos, Vec2::new(300.0, 320.0));
    }

    #[test]
    fn test_worlds_are_independent() {
        let mut first = setup_world(&Tuning::default());
        let second = setup_world(&Tuning::default());

        for _ in 0..60 {
            first.physics.step(SIM_DT);
        }
        first.body_mut(BodyLabel::Cactus).pos.x = 10.0;

        assert_eq!(second.physics.steps, 0);
        assert_eq!(second.body(BodyLabel::Dino).pos, Vec2::new(50.0, 300.0));
        assert_eq!(second.body(BodyLabel::Cactus).pos, Vec2::new(300.0, 320.0));
    }

    #[test]
    fn test_dino_settles_on_ground() {
        let mut entities = setup_world(&Tuning::default());
        for _ in 0..240 {
            entities.physics.step(SIM_DT);
        }

        let dino = entities.body(BodyLabel::Dino);
        assert!(dino.grounded);
        assert!((dino.bottom() - 345.0).abs() < 0.5);
        // Ground never moves
        assert_eq!(entities.body(BodyLabel::Ground).pos, Vec2::new(200.0, 350.0));
        // Cactus rests on the ground too
        assert!((entities.body(BodyLabel::Cactus).bottom() - 345.0).abs() < 0.5);
        assert!(entities.physics.contacts().is_empty());
    }

    #[test]
    fn test_contacts_reported_not_resolved() {
        let mut entities = setup_world(&Tuning::default());
        entities.body_mut(BodyLabel::Cactus).pos.x = 60.0;
        entities.physics.step(SIM_DT);

        assert_eq!(entities.physics.contacts().len(), 1);
        assert!(entities.physics.contacts()[0].involves(BodyLabel::Dino, BodyLabel::Cactus));
        // No push-apart between dynamic bodies
        assert!((entities.body(BodyLabel::Cactus).pos.x - 60.0).abs() < 0.001);
    }
}
