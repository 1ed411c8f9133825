// shader.rs - Plane material (GLSL ES 1.00)
//
// Attributes: position (vec3), uv (vec2)
// Uniforms:   projectionMatrix, viewMatrix, modelMatrix,
//             uTexture, uOffset, uAlpha

pub const ATTR_POSITION: &str = "position";
pub const ATTR_UV: &str = "uv";

pub const U_PROJECTION: &str = "projectionMatrix";
pub const U_VIEW: &str = "viewMatrix";
pub const U_MODEL: &str = "modelMatrix";
pub const U_TEXTURE: &str = "uTexture";
pub const U_OFFSET: &str = "uOffset";
pub const U_ALPHA: &str = "uAlpha";

pub const VERTEX: &str = r#"
precision mediump float;

attribute vec3 position;
attribute vec2 uv;

uniform mat4 projectionMatrix;
uniform mat4 viewMatrix;
uniform mat4 modelMatrix;
uniform vec2 uOffset;

varying vec2 vUv;

#define M_PI 3.1415926535897932384626433832795

// Bow the plane: edges stay put, the middle follows the offset
vec3 deformationCurve(vec3 p, vec2 uv, vec2 offset) {
    p.x = p.x + sin(uv.y * M_PI) * offset.x;
    p.y = p.y + sin(uv.x * M_PI) * offset.y;
    return p;
}

void main() {
    vUv = uv;
    vec3 p = deformationCurve(position, uv, uOffset);
    gl_Position = projectionMatrix * viewMatrix * modelMatrix * vec4(p, 1.0);
}
"#;

pub const FRAGMENT: &str = r#"
precision mediump float;

uniform sampler2D uTexture;
uniform float uAlpha;
uniform vec2 uOffset;

varying vec2 vUv;

vec3 rgbShift(sampler2D tex, vec2 uv, vec2 offset) {
    float r = texture2D(tex, uv + offset).r;
    vec2 gb = texture2D(tex, uv).gb;
    return vec3(r, gb);
}

void main() {
    vec3 color = rgbShift(uTexture, vUv, uOffset);
    gl_FragColor = vec4(color, uAlpha);
}
"#;
