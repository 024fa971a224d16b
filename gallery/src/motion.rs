//! Procedural motion functions
//!
//! Pure functions of elapsed time and entity parameters. Callers write the
//! results back into entity transforms; nothing here has side effects.

use crate::entity::MotionParams;
use glam::Vec3;

/// Sinusoidal displacement from `home` along `axis`.
pub fn oscillate(home: Vec3, axis: Vec3, p: &MotionParams, t: f32) -> Vec3 {
    home + axis * (p.amplitude * (p.frequency * t + p.phase).sin())
}

/// Circular motion of radius `orbit_radius` about `p.axis` through
/// `center`. A degenerate radius or axis collapses to the center point
/// rather than dividing by zero.
pub fn orbit(center: Vec3, p: &MotionParams, t: f32) -> Vec3 {
    if p.orbit_radius <= f32::EPSILON {
        return center;
    }
    let axis = p.axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return center;
    }
    let u = axis.any_orthonormal_vector();
    let v = axis.cross(u);
    let angle = p.speed * t + p.phase;
    center + (u * angle.cos() + v * angle.sin()) * p.orbit_radius
}

/// Orbit with a gentle vertical wobble along the orbit axis.
pub fn swirl(center: Vec3, p: &MotionParams, t: f32) -> Vec3 {
    let base = orbit(center, p, t);
    base + p.axis.normalize_or_zero() * (p.amplitude * (p.frequency * t + p.phase).sin())
}

/// Size multiplier for a breathing pulse, always positive.
pub fn breathe(p: &MotionParams, t: f32) -> f32 {
    1.0 + p.amplitude * 0.5 * (1.0 + (p.frequency * t + p.phase).sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn oscillate_passes_through_home_at_zero_phase() {
        let p = MotionParams {
            amplitude: 2.0,
            frequency: 1.0,
            phase: 0.0,
            ..Default::default()
        };
        let home = Vec3::new(1.0, 0.0, 0.0);
        assert!(close(oscillate(home, Vec3::Y, &p, 0.0), home));
        assert!(close(oscillate(home, Vec3::Y, &p, PI), home));
    }

    #[test]
    fn orbit_keeps_constant_radius() {
        let p = MotionParams {
            orbit_radius: 3.0,
            speed: 2.0,
            ..Default::default()
        };
        for i in 0..16 {
            let t = i as f32 * 0.37;
            let pos = orbit(Vec3::ZERO, &p, t);
            assert!((pos.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn orbit_zero_radius_degrades_to_center() {
        let p = MotionParams::default();
        let center = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(orbit(center, &p, 1.0), center);
    }

    #[test]
    fn orbit_zero_axis_degrades_to_center() {
        let p = MotionParams {
            orbit_radius: 2.0,
            axis: Vec3::ZERO,
            ..Default::default()
        };
        assert_eq!(orbit(Vec3::ZERO, &p, 1.0), Vec3::ZERO);
    }

    #[test]
    fn breathe_stays_positive() {
        let p = MotionParams {
            amplitude: 1.0,
            frequency: 3.0,
            ..Default::default()
        };
        for i in 0..64 {
            assert!(breathe(&p, i as f32 * 0.1) > 0.0);
        }
    }
}
