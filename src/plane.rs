// plane.rs - Image-backed planes
//
// One plane per <img>. Each frame the plane is re-derived from the
// element's bounding box; nothing is cached beyond the last frame.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::viewport::{Rect, Viewport};

/// Shader inputs: uTexture, uOffset, uAlpha
pub struct PlaneUniforms<T> {
    pub texture: T,
    pub offset: Vec2,
    pub alpha: f32,
}

/// Distortion gains applied to the uOffset uniform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distortion {
    pub x: f32,
    pub y: f32,
}

pub struct TrackedPlane<E, T> {
    pub element: E,
    pub offset: Vec2,
    pub size: Vec2,
    pub position: Vec3,
    pub scale: Vec3,
    pub uniforms: PlaneUniforms<T>,
}

impl<E, T> TrackedPlane<E, T> {
    pub fn new(element: E, texture: T, alpha: f32) -> Self {
        Self {
            element,
            offset: Vec2::ZERO,
            size: Vec2::ZERO,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            uniforms: PlaneUniforms { texture, offset: Vec2::ZERO, alpha },
        }
    }

    /// Place the plane over its element's box
    pub fn place(&mut self, rect: Rect, vp: Viewport) {
        self.size = rect.size();
        self.offset = rect.scene_offset(vp);
        self.position = Vec3::new(self.offset.x, self.offset.y, 0.0);
        self.scale = Vec3::new(self.size.x, self.size.y, 1.0);
    }

    /// Full per-frame update: placement plus velocity-driven bend
    pub fn sync(&mut self, rect: Rect, vp: Viewport, velocity: f64, d: Distortion) {
        self.place(rect, vp);
        self.uniforms.offset = Vec2::new(self.offset.x * d.x, -(velocity as f32) * d.y);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}
