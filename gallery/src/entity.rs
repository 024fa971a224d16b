//! Renderable entities and their animation parameters

use glam::Vec3;

/// Per-entity animation knobs, used purely as inputs to the motion
/// functions. Meaning varies by recipe (an orbit radius here, a fringe
/// phase there).
#[derive(Debug, Clone, Copy)]
pub struct MotionParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub orbit_radius: f32,
    pub axis: Vec3,
    pub speed: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            frequency: 1.0,
            phase: 0.0,
            orbit_radius: 0.0,
            axis: Vec3::Y,
            speed: 1.0,
        }
    }
}

/// One renderable primitive within a scene. Owned exclusively by its
/// scene; `home`, `base_size`, and `base_color` record the resting
/// configuration so toggles can restore it exactly.
#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Vec3,
    pub home: Vec3,
    pub size: f32,
    pub base_size: f32,
    pub color: [f32; 4],
    pub base_color: [f32; 4],
    pub params: MotionParams,
}

impl Entity {
    pub fn new(home: Vec3, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: home,
            home,
            size,
            base_size: size,
            color,
            base_color: color,
            params: MotionParams::default(),
        }
    }

    /// Return size and color to the resting configuration.
    pub fn restore(&mut self) {
        self.size = self.base_size;
        self.color = self.base_color;
        self.position = self.home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_round_trips_visual_state() {
        let mut e = Entity::new(Vec3::new(1.0, 2.0, 3.0), 0.2, [0.1, 0.2, 0.3, 1.0]);
        e.size = 0.9;
        e.color = [1.0; 4];
        e.position = Vec3::ZERO;
        e.restore();
        assert_eq!(e.size, 0.2);
        assert_eq!(e.color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(e.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
