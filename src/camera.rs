// camera.rs - Perspective camera fitted to the viewport
//
// The vertical field of view is chosen so the frustum at distance `d`
// is exactly `height` units tall. A plane at z = 0 scaled to pixel
// dimensions then covers the same pixels as its DOM element.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::viewport::Viewport;

/// Vertical field of view in degrees for a pixel-exact focal plane
pub fn fov_for_height(height: f64, distance: f64) -> f64 {
    (2.0 * (height / 2.0 / distance).atan()).to_degrees()
}

pub struct Camera {
    pub fov: f64,
    pub aspect: f64,
    pub near: f32,
    pub far: f32,
    pub distance: f64,
}

impl Camera {
    pub fn new(vp: Viewport, cfg: &CameraConfig) -> Self {
        let mut cam = Self {
            fov: 0.0,
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
            distance: cfg.distance,
        };
        cam.fit(vp);
        cam
    }

    /// Recompute fov and aspect for a new viewport
    pub fn fit(&mut self, vp: Viewport) {
        self.fov = fov_for_height(vp.height, self.distance);
        self.aspect = vp.aspect_ratio();
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance as f32)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            (self.fov as f32).to_radians(),
            self.aspect as f32,
            self.near,
            self.far,
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }
}
