// page.rs - DOM side of the effect

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

use crate::canvas::Page;
use crate::config::Selectors;
use crate::error::EngineError;
use crate::viewport::{Rect, Viewport};

pub struct DomPage {
    window: Window,
    document: Document,
    body: HtmlElement,
    scrollable: HtmlElement,
    image_selector: String,
}

impl DomPage {
    pub fn new(window: Window, selectors: &Selectors) -> Result<Self, EngineError> {
        let document = window.document().ok_or(EngineError::NoWindow)?;
        let body = document.body().ok_or_else(|| EngineError::MissingElement("body".into()))?;
        let scrollable = query(&document, &selectors.scrollable)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| EngineError::MissingElement(selectors.scrollable.clone()))?;

        Ok(Self {
            window,
            document,
            body,
            scrollable,
            image_selector: selectors.images.clone(),
        })
    }

    pub fn document(&self) -> &Document { &self.document }

    pub fn query(&self, selector: &str) -> Result<Element, EngineError> {
        query(&self.document, selector)
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>, EngineError> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .collect())
    }
}

fn query(document: &Document, selector: &str) -> Result<Element, EngineError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| EngineError::MissingElement(selector.into()))
}

fn number(v: Result<JsValue, JsValue>) -> f64 {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Page for DomPage {
    type Image = HtmlImageElement;

    fn viewport(&self) -> Viewport {
        Viewport::new(number(self.window.inner_width()), number(self.window.inner_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn content_height(&self) -> f64 {
        self.scrollable.get_bounding_client_rect().height()
    }

    fn set_body_height(&self, px: f64) -> Result<(), EngineError> {
        self.body.style().set_property("height", &format!("{}px", px))?;
        Ok(())
    }

    fn set_content_transform(&self, css: &str) -> Result<(), EngineError> {
        self.scrollable.style().set_property("transform", css)?;
        Ok(())
    }

    fn images(&self) -> Vec<HtmlImageElement> {
        match self.query_all(&self.image_selector) {
            Ok(els) => els.into_iter().filter_map(|e| e.dyn_into::<HtmlImageElement>().ok()).collect(),
            Err(e) => {
                log::warn!("image lookup '{}' failed: {}", self.image_selector, e);
                Vec::new()
            }
        }
    }

    fn image_source(&self, image: &HtmlImageElement) -> String {
        image.src()
    }

    fn bounding_rect(&self, image: &HtmlImageElement) -> Rect {
        let r = image.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }
}
