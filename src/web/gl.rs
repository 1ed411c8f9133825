// gl.rs - WebGL1 draw surface
//
// One program, one shared unit-plane geometry. Each tracked plane is a
// draw call with its own model matrix, uniforms and texture.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlImageElement, WebGlBuffer, WebGlProgram,
    WebGlRenderingContext as GL, WebGlShader, WebGlTexture, WebGlUniformLocation,
};

use crate::camera::Camera;
use crate::canvas::DrawSurface;
use crate::config::EffectConfig;
use crate::error::EngineError;
use crate::geometry::PlaneGeometry;
use crate::plane::TrackedPlane;
use crate::shader;
use crate::viewport::Viewport;

struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    offset: Option<WebGlUniformLocation>,
    alpha: Option<WebGlUniformLocation>,
}

pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    u: Uniforms,
    index_count: i32,
    pixel_ratio: f64,
    _buffers: [WebGlBuffer; 3],
}

impl WebGlSurface {
    /// Create a canvas under `parent` and prepare the plane program
    pub fn new(document: &Document, parent: &Element, cfg: &EffectConfig, pixel_ratio: f64) -> Result<Self, EngineError> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::WebGl("could not create canvas".into()))?;

        let attrs = js_sys::Object::new();
        js_sys::Reflect::set(&attrs, &"antialias".into(), &JsValue::from_bool(cfg.antialias))?;
        js_sys::Reflect::set(&attrs, &"alpha".into(), &JsValue::TRUE)?;
        let gl = canvas
            .get_context_with_context_options("webgl", &attrs)?
            .ok_or_else(|| EngineError::WebGl("WebGL not supported".into()))?
            .dyn_into::<GL>()
            .map_err(|_| EngineError::WebGl("unexpected context type".into()))?;
        parent.append_child(&canvas)?;

        let program = link_program(&gl, shader::VERTEX, shader::FRAGMENT)?;
        gl.use_program(Some(&program));

        let geometry = PlaneGeometry::new(cfg.segments, cfg.segments)?;
        let positions = attribute(&gl, &program, shader::ATTR_POSITION, &geometry.positions, 3)?;
        let uvs = attribute(&gl, &program, shader::ATTR_UV, &geometry.uvs, 2)?;

        let indices = gl.create_buffer().ok_or_else(|| EngineError::WebGl("could not create index buffer".into()))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        // SAFETY: the view is consumed by buffer_data before any allocation
        unsafe {
            let view = js_sys::Uint16Array::view(&geometry.indices);
            gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
        }

        let u = Uniforms {
            projection: gl.get_uniform_location(&program, shader::U_PROJECTION),
            view: gl.get_uniform_location(&program, shader::U_VIEW),
            model: gl.get_uniform_location(&program, shader::U_MODEL),
            texture: gl.get_uniform_location(&program, shader::U_TEXTURE),
            offset: gl.get_uniform_location(&program, shader::U_OFFSET),
            alpha: gl.get_uniform_location(&program, shader::U_ALPHA),
        };

        // Transparent, double sided
        gl.disable(GL::CULL_FACE);
        gl.disable(GL::DEPTH_TEST);
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self {
            canvas,
            gl,
            program,
            u,
            index_count: geometry.index_count() as i32,
            pixel_ratio,
            _buffers: [positions, uvs, indices],
        })
    }
}

impl DrawSurface for WebGlSurface {
    type Texture = WebGlTexture;

    fn load_texture(&mut self, src: &str) -> Result<WebGlTexture, EngineError> {
        let gl = &self.gl;
        let texture = gl.create_texture().ok_or_else(|| EngineError::WebGl("could not create texture".into()))?;

        // 1x1 transparent until the image arrives
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D, 0, GL::RGBA as i32, 1, 1, 0, GL::RGBA, GL::UNSIGNED_BYTE, Some(&[0u8; 4][..]),
        )?;
        set_sampling(gl);

        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));

        let onload = {
            let gl = gl.clone();
            let texture = texture.clone();
            let img = image.clone();
            let src = src.to_string();
            Closure::<dyn FnMut()>::new(move || {
                gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
                if let Err(e) = gl.tex_image_2d_with_u32_and_u32_and_image(
                    GL::TEXTURE_2D, 0, GL::RGBA as i32, GL::RGBA, GL::UNSIGNED_BYTE, &img,
                ) {
                    log::warn!("texture upload failed for {}: {:?}", src, e);
                    return;
                }
                set_sampling(&gl);
            })
        };
        let onerror = {
            let src = src.to_string();
            Closure::<dyn FnMut()>::new(move || log::warn!("could not load image {}", src))
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        image.set_src(src);
        Ok(texture)
    }

    fn set_size(&mut self, vp: Viewport) {
        let w = (vp.width * self.pixel_ratio).floor() as u32;
        let h = (vp.height * self.pixel_ratio).floor() as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);

        let style = self.canvas.style();
        for (k, v) in [("width", vp.width), ("height", vp.height)] {
            if let Err(e) = style.set_property(k, &format!("{}px", v)) {
                log::warn!("canvas {} not applied: {:?}", k, e);
            }
        }
        self.gl.viewport(0, 0, w as i32, h as i32);
    }

    fn draw<E>(&mut self, camera: &Camera, planes: &[TrackedPlane<E, WebGlTexture>]) -> Result<(), EngineError> {
        let gl = &self.gl;
        if gl.is_context_lost() {
            return Err(EngineError::WebGl("context lost".into()));
        }

        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(self.u.projection.as_ref(), false, &camera.projection().to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(self.u.view.as_ref(), false, &camera.view().to_cols_array());
        gl.active_texture(GL::TEXTURE0);
        gl.uniform1i(self.u.texture.as_ref(), 0);

        for plane in planes {
            gl.uniform_matrix4fv_with_f32_array(self.u.model.as_ref(), false, &plane.model_matrix().to_cols_array());
            gl.uniform2f(self.u.offset.as_ref(), plane.uniforms.offset.x, plane.uniforms.offset.y);
            gl.uniform1f(self.u.alpha.as_ref(), plane.uniforms.alpha);
            gl.bind_texture(GL::TEXTURE_2D, Some(&plane.uniforms.texture));
            gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
        }
        Ok(())
    }
}

// Leaves `main` when the last owner of the canvas state lets go
impl Drop for WebGlSurface {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}

// Non-power-of-two safe: no mipmaps, clamp
fn set_sampling(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}

fn attribute(gl: &GL, program: &WebGlProgram, name: &str, data: &[f32], size: i32) -> Result<WebGlBuffer, EngineError> {
    let loc = gl.get_attrib_location(program, name);
    if loc < 0 {
        return Err(EngineError::WebGl(format!("attribute '{}' not found", name)));
    }
    let buf = gl.create_buffer().ok_or_else(|| EngineError::WebGl("could not create buffer".into()))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buf));
    // SAFETY: the view is consumed by buffer_data before any allocation
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.enable_vertex_attrib_array(loc as u32);
    gl.vertex_attrib_pointer_with_i32(loc as u32, size, GL::FLOAT, false, 0, 0);
    Ok(buf)
}

fn compile(gl: &GL, src: &str, kind: u32, stage: &'static str) -> Result<WebGlShader, EngineError> {
    let shader = gl.create_shader(kind).ok_or_else(|| EngineError::WebGl("could not create shader".into()))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    let ok = gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false);
    if !ok {
        return Err(EngineError::Shader { stage, log: gl.get_shader_info_log(&shader).unwrap_or_default() });
    }
    Ok(shader)
}

fn link_program(gl: &GL, vert: &str, frag: &str) -> Result<WebGlProgram, EngineError> {
    let vs = compile(gl, vert, GL::VERTEX_SHADER, "vertex")?;
    let fs = compile(gl, frag, GL::FRAGMENT_SHADER, "fragment")?;
    let program = gl.create_program().ok_or_else(|| EngineError::WebGl("could not create program".into()))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    let ok = gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false);
    if !ok {
        return Err(EngineError::Shader { stage: "link", log: gl.get_program_info_log(&program).unwrap_or_default() });
    }
    Ok(program)
}
