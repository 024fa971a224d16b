//! Shared graphics plumbing for the verse gallery
//!
//! Window/GPU bootstrap, the camera rig used by every scene, and the
//! common color palette.

pub mod camera;
pub mod graphics;

pub use camera::*;
pub use graphics::*;

/// Colors shared across scenes so the gallery reads as one piece
pub mod palette {
    /// Near-black blue used as the clear color
    pub const VOID: wgpu::Color = wgpu::Color {
        r: 0.015,
        g: 0.015,
        b: 0.05,
        a: 1.0,
    };

    pub const AMBER: [f32; 4] = [1.0, 0.72, 0.25, 1.0];
    pub const CYAN: [f32; 4] = [0.3, 0.85, 1.0, 1.0];
    pub const VIOLET: [f32; 4] = [0.65, 0.4, 1.0, 1.0];
    pub const JADE: [f32; 4] = [0.25, 0.9, 0.55, 1.0];
    pub const ROSE: [f32; 4] = [1.0, 0.35, 0.5, 1.0];
    pub const MIST: [f32; 4] = [0.75, 0.78, 0.85, 0.6];

    /// Fade a color's alpha, leaving the hue alone
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }

    /// Linear blend between two colors
    pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::palette;

    #[test]
    fn mix_endpoints() {
        let a = [0.0, 0.2, 0.4, 1.0];
        let b = [1.0, 0.8, 0.6, 0.0];
        assert_eq!(palette::mix(a, b, 0.0), a);
        assert_eq!(palette::mix(a, b, 1.0), b);
    }

    #[test]
    fn mix_clamps_out_of_range() {
        let a = [0.0; 4];
        let b = [1.0; 4];
        assert_eq!(palette::mix(a, b, -3.0), a);
        assert_eq!(palette::mix(a, b, 7.0), b);
    }
}
