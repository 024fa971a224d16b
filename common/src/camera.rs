//! Camera rig shared by all verse scenes
//!
//! Flat scenes (the double slit) use an orthographic camera; everything
//! else orbits a perspective camera around the origin. The rig wraps both
//! behind one interface so the app never branches on projection.

use glam::{Mat4, Vec3};

/// Orthographic camera for flat scenes
#[derive(Debug, Clone)]
pub struct FlatCamera {
    pub center: Vec3,
    /// Half-height of the visible region in world units
    pub extent: f32,
    pub aspect: f32,
}

impl FlatCamera {
    pub fn new(extent: f32, aspect: f32) -> Self {
        Self {
            center: Vec3::ZERO,
            extent,
            aspect,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let half_w = self.extent * self.aspect;
        let proj = Mat4::orthographic_rh(-half_w, half_w, -self.extent, self.extent, -10.0, 10.0);
        proj * Mat4::from_translation(-self.center)
    }
}

/// Perspective camera orbiting a target point
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.6,
            pitch: 0.35,
            fov: 45.0f32.to_radians(),
            aspect,
            near: 0.1,
            far: 500.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            )
    }

    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        // Stop short of the poles so the view matrix stays well defined
        self.pitch = (self.pitch + d_pitch).clamp(-1.45, 1.45);
    }

    pub fn dolly(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(2.0, 80.0);
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        proj * view
    }
}

/// Tagged rig: which projection a scene asked for
#[derive(Debug, Clone)]
pub enum CameraRig {
    Flat(FlatCamera),
    Orbit(OrbitCamera),
}

impl CameraRig {
    pub fn flat(extent: f32, aspect: f32) -> Self {
        Self::Flat(FlatCamera::new(extent, aspect))
    }

    pub fn orbit(distance: f32, aspect: f32) -> Self {
        Self::Orbit(OrbitCamera::new(distance, aspect))
    }

    /// Resize updates the aspect ratio only; world-space placement of
    /// entities is untouched by design.
    pub fn set_aspect(&mut self, aspect: f32) {
        match self {
            CameraRig::Flat(c) => c.aspect = aspect,
            CameraRig::Orbit(c) => c.aspect = aspect,
        }
    }

    pub fn aspect(&self) -> f32 {
        match self {
            CameraRig::Flat(c) => c.aspect,
            CameraRig::Orbit(c) => c.aspect,
        }
    }

    /// Orbit input; ignored by flat cameras
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        if let CameraRig::Orbit(c) = self {
            c.orbit(d_yaw, d_pitch);
        }
    }

    /// Wheel zoom: dolly for orbit cameras, extent change for flat ones
    pub fn zoom(&mut self, delta: f32) {
        match self {
            CameraRig::Flat(c) => c.extent = (c.extent - delta).clamp(1.0, 40.0),
            CameraRig::Orbit(c) => c.dolly(delta),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        match self {
            CameraRig::Flat(c) => c.view_projection(),
            CameraRig::Orbit(c) => c.view_projection(),
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        match self {
            CameraRig::Flat(c) => c.center + Vec3::Z,
            CameraRig::Orbit(c) => c.eye(),
        }
    }
}

/// Camera data as the shaders see it. `proj_scale` carries the diagonal
/// projection terms the point shader uses to billboard world-sized discs.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub proj_scale: [f32; 4],
}

impl CameraUniform {
    pub fn from_rig(rig: &CameraRig) -> Self {
        let eye = rig.eye_position();
        let (sx, sy) = match rig {
            CameraRig::Flat(c) => (1.0 / (c.extent * c.aspect), 1.0 / c.extent),
            CameraRig::Orbit(c) => {
                let f = 1.0 / (c.fov * 0.5).tan();
                (f / c.aspect, f)
            }
        };
        Self {
            view_proj: rig.view_projection().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
            proj_scale: [sx, sy, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_reaches_both_variants() {
        let mut flat = CameraRig::flat(5.0, 1.0);
        let mut orbit = CameraRig::orbit(10.0, 1.0);
        flat.set_aspect(2.0);
        orbit.set_aspect(2.0);
        assert_eq!(flat.aspect(), 2.0);
        assert_eq!(orbit.aspect(), 2.0);
    }

    #[test]
    fn aspect_changes_projection_only() {
        let mut rig = CameraRig::orbit(10.0, 1.0);
        let before = rig.view_projection();
        rig.set_aspect(1.8);
        assert_ne!(before, rig.view_projection());
        // Eye position is a function of orbit parameters, not aspect
        assert_eq!(
            CameraRig::orbit(10.0, 1.0).eye_position(),
            rig.eye_position()
        );
    }

    #[test]
    fn pitch_stays_off_the_poles() {
        let mut cam = OrbitCamera::new(10.0, 1.0);
        cam.orbit(0.0, 100.0);
        assert!(cam.pitch <= 1.45);
        cam.orbit(0.0, -100.0);
        assert!(cam.pitch >= -1.45);
    }

    #[test]
    fn dolly_clamps_distance() {
        let mut cam = OrbitCamera::new(10.0, 1.0);
        cam.dolly(1000.0);
        assert_eq!(cam.distance, 2.0);
        cam.dolly(-1000.0);
        assert_eq!(cam.distance, 80.0);
    }

    #[test]
    fn flat_zoom_clamps_extent() {
        let mut rig = CameraRig::flat(5.0, 1.0);
        rig.zoom(100.0);
        if let CameraRig::Flat(c) = &rig {
            assert_eq!(c.extent, 1.0);
        } else {
            unreachable!();
        }
    }
}
