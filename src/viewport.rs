// viewport.rs - Screen space to scene space
//
// DOM space: origin top-left, y down, CSS pixels.
// Scene space: origin at viewport center, y up, one unit per CSS pixel
// on the z = 0 plane (see camera.rs).

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Element bounding box relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Center of the box in scene coordinates
    pub fn scene_offset(&self, vp: Viewport) -> Vec2 {
        let x = self.left - vp.width / 2.0 + self.width / 2.0;
        let y = -self.top + vp.height / 2.0 - self.height / 2.0;
        Vec2::new(x as f32, y as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_dom_box_to_scene_center() {
        let vp = Viewport::new(1024.0, 768.0);
        let r = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(r.scene_offset(vp), Vec2::new(-312.0, 284.0));
        assert_eq!(r.size(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn centered_box_maps_to_origin() {
        let vp = Viewport::new(800.0, 600.0);
        let r = Rect::new(300.0, 200.0, 200.0, 200.0);
        assert_eq!(r.scene_offset(vp), Vec2::ZERO);
    }

    #[test]
    fn box_below_fold_has_negative_y() {
        let vp = Viewport::new(800.0, 600.0);
        let r = Rect::new(0.0, 900.0, 100.0, 100.0);
        assert_eq!(r.scene_offset(vp), Vec2::new(-350.0, -650.0));
    }

    #[test]
    fn detached_element_collapses_to_viewport_corner() {
        let vp = Viewport::new(1024.0, 768.0);
        let r = Rect::default();
        assert_eq!(r.scene_offset(vp), Vec2::new(-512.0, 384.0));
        assert_eq!(r.size(), Vec2::ZERO);
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(Viewport::new(1920.0, 1080.0).aspect_ratio(), 1920.0 / 1080.0);
    }
}
