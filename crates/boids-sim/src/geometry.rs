//! Presentation triangles derived from position and heading.

use glam::Vec2;

/// cos/sin of 120°, the angle between the tip and each base corner.
const COS_120: f32 = -0.5;
const SIN_120: f32 = 0.866_025_4;

/// One agent drawn as a triangle pointing along its velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Triangle {
    pub tip:   Vec2,
    pub left:  Vec2,
    pub right: Vec2,
}

impl Triangle {
    /// Triangle for an agent at `position` heading along `velocity`.
    ///
    /// The tip is `length` ahead; the base corners are `width` away, rotated
    /// ±120° from the heading.  Returns `None` for a zero velocity, whose
    /// heading is undefined.
    pub fn oriented(position: Vec2, velocity: Vec2, length: f32, width: f32) -> Option<Self> {
        let dir = velocity.try_normalize()?;
        let ccw = Vec2::new(COS_120, SIN_120).rotate(dir);
        let cw = Vec2::new(COS_120, -SIN_120).rotate(dir);
        Some(Self {
            tip:   position + length * dir,
            left:  position + width * ccw,
            right: position + width * cw,
        })
    }

    /// Zero-area triangle collapsed onto `position`.
    pub fn collapsed(position: Vec2) -> Self {
        Self { tip: position, left: position, right: position }
    }
}
