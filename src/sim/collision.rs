//! Collision detection and response for box bodies
//!
//! Dynamic bodies are pushed out of static bodies along the axis of least
//! penetration. Overlaps between two dynamic bodies are never resolved, only
//! reported as contacts so game systems can react to them.

use glam::Vec2;

use super::body::{Body, BodyLabel};

/// Two dynamic bodies overlapping after a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyLabel,
    pub b: BodyLabel,
}

impl Contact {
    /// True if this contact is between the two labels (in either order)
    pub fn involves(&self, first: BodyLabel, second: BodyLabel) -> bool {
        (self.a == first && self.b == second) || (self.a == second && self.b == first)
    }
}

/// Result of resolving a dynamic body against a static one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Position correction applied to the dynamic body
    pub correction: Vec2,
    /// The dynamic body ended up resting on top of the static one
    pub landed: bool,
}

/// Push `body` out of `obstacle` if they overlap
///
/// Returns `None` when there is no overlap. Velocity along the correction
/// axis is zeroed when the body was moving into the obstacle.
pub fn resolve_static(body: &mut Body, obstacle: &Body) -> Option<Resolution> {
    let a = body.aabb();
    let b = obstacle.aabb();
    if !a.overlaps(&b) {
        return None;
    }

    let pen = a.penetration(&b);
    let delta = body.pos - obstacle.pos;

    let (correction, landed) = if pen.y <= pen.x {
        if delta.y < 0.0 {
            // Body above obstacle: push up, stop falling
            if body.vel.y > 0.0 {
                body.vel.y = 0.0;
            }
            (Vec2::new(0.0, -pen.y), true)
        } else {
            if body.vel.y < 0.0 {
                body.vel.y = 0.0;
            }
            (Vec2::new(0.0, pen.y), false)
        }
    } else if delta.x < 0.0 {
        if body.vel.x > 0.0 {
            body.vel.x = 0.0;
        }
        (Vec2::new(-pen.x, 0.0), false)
    } else {
        if body.vel.x < 0.0 {
            body.vel.x = 0.0;
        }
        (Vec2::new(pen.x, 0.0), false)
    };

    body.pos += correction;
    Some(Resolution { correction, landed })
}

/// Check two dynamic bodies for overlap
pub fn detect_contact(a: &Body, b: &Body) -> Option<Contact> {
    a.aabb().overlaps(&b.aabb()).then_some(Contact {
        a: a.label,
        b: b.label,
    })
}
