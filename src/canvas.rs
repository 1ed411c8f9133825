// canvas.rs - Scroll-synced plane renderer
//
// EffectCanvas owns all per-page state: eased scroll, camera, planes.
// The page and the draw surface sit behind traits so the frame step runs
// the same against the DOM/WebGL and against in-memory test doubles.
//
// Frame order: read scroll + bounding boxes, write transforms, draw.

use crate::camera::Camera;
use crate::config::EffectConfig;
use crate::error::EngineError;
use crate::plane::{Distortion, TrackedPlane};
use crate::scroll::ScrollState;
use crate::viewport::{Rect, Viewport};

/// What the effect needs from the hosting page
pub trait Page {
    type Image;

    fn viewport(&self) -> Viewport;
    fn scroll_y(&self) -> f64;
    /// Natural height of the scrollable content
    fn content_height(&self) -> f64;
    fn set_body_height(&self, px: f64) -> Result<(), EngineError>;
    fn set_content_transform(&self, css: &str) -> Result<(), EngineError>;
    fn images(&self) -> Vec<Self::Image>;
    fn image_source(&self, image: &Self::Image) -> String;
    fn bounding_rect(&self, image: &Self::Image) -> Rect;
}

/// What the effect needs from the renderer
pub trait DrawSurface {
    type Texture;

    /// Starts loading; the returned texture may still be a placeholder
    fn load_texture(&mut self, src: &str) -> Result<Self::Texture, EngineError>;
    fn set_size(&mut self, vp: Viewport);
    fn draw<E>(&mut self, camera: &Camera, planes: &[TrackedPlane<E, Self::Texture>]) -> Result<(), EngineError>;
}

pub struct EffectCanvas<P: Page, S: DrawSurface> {
    page: P,
    surface: S,
    scroll: ScrollState,
    camera: Camera,
    planes: Vec<TrackedPlane<P::Image, S::Texture>>,
    distortion: Distortion,
}

impl<P: Page, S: DrawSurface> EffectCanvas<P, S> {
    pub fn new(page: P, mut surface: S, cfg: &EffectConfig) -> Result<Self, EngineError> {
        page.set_body_height(page.content_height())?;

        let vp = page.viewport();
        let camera = Camera::new(vp, &cfg.camera);
        surface.set_size(vp);

        let mut planes = Vec::new();
        for image in page.images() {
            let texture = surface.load_texture(&page.image_source(&image))?;
            let rect = page.bounding_rect(&image);
            let mut plane = TrackedPlane::new(image, texture, cfg.alpha);
            plane.place(rect, vp);
            planes.push(plane);
        }
        log::debug!("tracking {} image planes", planes.len());

        Ok(Self {
            page,
            surface,
            scroll: ScrollState::new(cfg.ease),
            camera,
            planes,
            distortion: Distortion { x: cfg.distortion_x, y: cfg.distortion_y },
        })
    }

    /// One animation frame
    pub fn tick(&mut self) -> Result<(), EngineError> {
        self.scroll.advance(self.page.scroll_y());
        self.page.set_content_transform(&self.scroll.transform())?;

        let vp = self.page.viewport();
        let velocity = self.scroll.velocity();
        for plane in &mut self.planes {
            let rect = self.page.bounding_rect(&plane.element);
            plane.sync(rect, vp, velocity, self.distortion);
        }

        self.surface.draw(&self.camera, &self.planes)
    }

    /// Viewport changed: body height, camera and surface move together
    pub fn resize(&mut self) -> Result<(), EngineError> {
        self.page.set_body_height(self.page.content_height())?;
        let vp = self.page.viewport();
        self.camera.fit(vp);
        self.surface.set_size(vp);
        log::debug!("resized to {}x{}, fov {:.2}", vp.width, vp.height, self.camera.fov);
        Ok(())
    }

    pub fn planes(&self) -> &[TrackedPlane<P::Image, S::Texture>] { &self.planes }
}
