//=========================================================================
// Shader Sources
//=========================================================================
//
// GLSL ES 1.00 program used for every draw.
//
// Attributes: `a_position` (vec3), `a_coord` (vec2).
// Uniforms map one-to-one onto `Uniforms`:
// ```text
//   u_mvp      model_view_projection
//   u_texture  texture_unit
//   u_factor   factor  (mix toward the atlas row 0.25 below)
//   u_over     over    (warm glow when > 1)
//   u_sky      sky     (fog colour red / blue)
// ```
// Fragments with alpha below 0.8 are discarded; near-white texels skip
// fog so the moon and candles stay bright.
//
//=========================================================================

pub const VERTEX_SHADER: &str = r#"
attribute vec3 a_position;
attribute vec2 a_coord;

uniform mat4 u_mvp;

varying vec2 v_coord;
varying vec4 v_pos;

void main() {
    v_coord = a_coord;
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_pos = gl_Position;
}
"#;

pub const FRAGMENT_SHADER: &str = r#"
precision mediump float;

uniform sampler2D u_texture;
uniform float u_factor;
uniform float u_over;
uniform vec2 u_sky;

varying vec2 v_coord;
varying vec4 v_pos;

float fog_amount(float d) {
    const float LOG2 = -1.442695;
    return 1.0 - clamp(exp2(d * d * LOG2), 0.0, 1.0);
}

void main() {
    vec4 base = texture2D(u_texture, v_coord);
    vec4 alt = texture2D(u_texture, v_coord + vec2(0.0, 0.25));
    base = mix(base, alt, u_factor);
    if (base.a < 0.8) discard;

    float fog = fog_amount(gl_FragCoord.z / gl_FragCoord.w * 0.5);
    float glow = (1.0 / distance(vec4(0.0), v_pos)) * (u_over - 1.0);
    gl_FragColor = mix(base, vec4(u_sky.x, 0.26, u_sky.y, 1.0), fog)
        + vec4(0.87, 0.46, 0.051, 1.0) * glow;
    if (base.r > 0.9 && base.g > 0.9) gl_FragColor = base;
}
"#;

//=== Unit Tests ==========================================================
