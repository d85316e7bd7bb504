//! Built-in shader stages.
//!
//! The fragment stage is the product: a rotating 2x2-tiled tangent pattern
//! that reacts to clicks. `renderer::pattern` carries a CPU transcription of
//! it for regression tests; the two must change together.

/// Pass-through vertex stage for the clip-space quad.
pub const VERTEX_SOURCE: &str = "\
attribute vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

/// Procedural pattern evaluated once per covered pixel per frame.
pub const FRAGMENT_SOURCE: &str = "\
#define PI 3.14159265358979323846
precision highp float;

uniform float width;
uniform float height;
uniform float u_time;
uniform vec2 u_mouse;

vec2 rotate2d(vec2 st, float angle) {
    st -= 0.5;
    st = mat2(cos(angle), -sin(angle), sin(angle), cos(angle)) * st;
    st += 0.5;
    return st;
}

// 2x2 four-way rotational tiling: index each cell by axis parity and spin
// its local coordinate by 0, 90, -90, or 180 degrees.
vec2 rotateTilePattern(vec2 st) {
    st *= 2.0;
    float index = 0.0;
    index += step(1.0, mod(st.x, 2.0));
    index += step(1.0, mod(st.y, 2.0)) * 2.0;
    st = fract(st);
    if (index == 1.0) {
        st = rotate2d(st, PI * 0.5);
    } else if (index == 2.0) {
        st = rotate2d(st, PI * -0.5);
    } else if (index == 3.0) {
        st = rotate2d(st, PI);
    }
    return st;
}

void main() {
    vec2 resolution = vec2(width, height);
    vec2 st = gl_FragCoord.xy / resolution;
    float d = 1.0 - distance(st - u_mouse, vec2(0.5));
    st.y *= height / width;

    float periodic = 8.0 * sin(u_time + 8.0 * d);
    st *= 12.0;
    st = rotateTilePattern(st);
    st = rotate2d(st, u_time);
    float angle = st.y * PI * periodic;
    float tangent = tan(angle);

    float shape = (cos(angle) + sin(angle) + tangent) * tangent;
    shape = step(shape - d, st.x * st.y * (periodic + 0.5));

    vec3 color = (7.0 * d) + u_time + st.xyx + vec3(0.0, 9.0, 8.0);
    color = 0.8 + 0.5 * (tan(color) + cos(color));
    gl_FragColor = vec4(shape * color, 2.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_declare_the_expected_interface() {
        assert!(VERTEX_SOURCE.contains("attribute vec2 position"));
        for uniform in [
            "uniform float width",
            "uniform float height",
            "uniform float u_time",
            "uniform vec2 u_mouse",
        ] {
            assert!(FRAGMENT_SOURCE.contains(uniform), "missing `{uniform}`");
        }
    }
}
