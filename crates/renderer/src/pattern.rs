//! CPU reference implementation of the fragment stage.
//!
//! [`shade`] mirrors the built-in fragment shader operation for operation in
//! `f32`, so tests can pin the procedural formula without a GPU. It is a pure
//! function of its inputs with no shared state between invocations — the same
//! execution contract the fragment stage runs under — and [`render`] keeps
//! that property observable by evaluating pixels with a data-parallel loop
//! rather than a sequential scan.
//!
//! Any change to the fragment source in the `tilespin` crate must be mirrored
//! here, and vice versa.

use rayon::prelude::*;

const PI: f32 = std::f32::consts::PI;

/// Raw alpha written by the fragment stage. Deliberately outside [0, 1]; see
/// [`display_color`] for the observable value after the render target clamp.
pub const RAW_ALPHA: f32 = 2.0;

/// GLSL `step(edge, x)`.
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// GLSL `mod(x, y)` (always non-negative for positive `y`).
fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Rotates `st` around (0.5, 0.5) by `angle` radians.
fn rotate2d(st: [f32; 2], angle: f32) -> [f32; 2] {
    let (x, y) = (st[0] - 0.5, st[1] - 0.5);
    let (sin, cos) = angle.sin_cos();
    [cos * x + sin * y + 0.5, -sin * x + cos * y + 0.5]
}

/// 2x2 four-way rotational tiling: doubles the coordinate, indexes the cell
/// by axis parity (0-3), and rotates the cell-local coordinate by 0, 90, -90,
/// or 180 degrees.
fn rotate_tile_pattern(st: [f32; 2]) -> [f32; 2] {
    let st = [st[0] * 2.0, st[1] * 2.0];
    let index = step(1.0, glsl_mod(st[0], 2.0)) + step(1.0, glsl_mod(st[1], 2.0)) * 2.0;
    let local = [st[0] - st[0].floor(), st[1] - st[1].floor()];
    if index == 1.0 {
        rotate2d(local, PI * 0.5)
    } else if index == 2.0 {
        rotate2d(local, PI * -0.5)
    } else if index == 3.0 {
        rotate2d(local, PI)
    } else {
        local
    }
}

/// Evaluates the procedural color for one fragment.
///
/// `frag_coord` follows the GL convention: pixel centers, origin at the
/// bottom-left of the viewport. `pointer` is the clip-space pointer position.
pub fn shade(frag_coord: [f32; 2], resolution: [f32; 2], time: f32, pointer: [f32; 2]) -> [f32; 4] {
    let st = [frag_coord[0] / resolution[0], frag_coord[1] / resolution[1]];

    // Signed proximity to the pointer.
    let dx = st[0] - pointer[0] - 0.5;
    let dy = st[1] - pointer[1] - 0.5;
    let d = 1.0 - (dx * dx + dy * dy).sqrt();

    // Aspect-correct the vertical axis, then scale up into repeating cells.
    let mut st = [st[0], st[1] * (resolution[1] / resolution[0])];
    let periodic = 8.0 * (time + 8.0 * d).sin();
    st = [st[0] * 12.0, st[1] * 12.0];
    st = rotate_tile_pattern(st);
    st = rotate2d(st, time);

    let angle = st[1] * PI * periodic;
    let tangent = angle.tan();

    let shape = (angle.cos() + angle.sin() + tangent) * tangent;
    let shape = step(shape - d, st[0] * st[1] * (periodic + 0.5));

    let base = 7.0 * d + time;
    let color = [base + st[0], base + st[1] + 9.0, base + st[0] + 8.0];
    let color = color.map(|c| 0.8 + 0.5 * (c.tan() + c.cos()));

    [shape * color[0], shape * color[1], shape * color[2], RAW_ALPHA]
}

/// Clamps a shaded color to the displayable [0, 1] range, matching what a
/// UNORM render target stores. In particular the out-of-range alpha lands on
/// exactly 1.0.
pub fn display_color(color: [f32; 4]) -> [f32; 4] {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Evaluates every pixel of a `width` x `height` viewport.
///
/// Rows are shaded in parallel; the output is row-major with row 0 at the
/// bottom of the viewport, matching the fragment coordinate convention.
pub fn render(width: u32, height: u32, time: f32, pointer: [f32; 2]) -> Vec<[f32; 4]> {
    let resolution = [width as f32, height as f32];
    (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| {
                let frag_coord = [x as f32 + 0.5, y as f32 + 0.5];
                shade(frag_coord, resolution, time, pointer)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_TIME_SEED;

    fn assert_close(actual: [f32; 4], expected: [f32; 4], tolerance: f32) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (a - e).abs() <= tolerance,
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    #[test]
    fn shading_is_pure() {
        let inputs = ([13.5, 7.5], [640.0, 480.0], 1.75, [-0.25, 0.5]);
        let first = shade(inputs.0, inputs.1, inputs.2, inputs.3);
        let second = shade(inputs.0, inputs.1, inputs.2, inputs.3);
        assert_eq!(first, second, "identical inputs must be bit-identical");
    }

    #[test]
    fn evaluation_order_does_not_matter() {
        let (width, height) = (7u32, 5u32);
        let time = 0.825;
        let pointer = [0.1, -0.3];
        let frame = render(width, height, time, pointer);
        assert_eq!(frame.len(), (width * height) as usize);
        // Walk the pixels in reverse and compare against the parallel pass.
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                let expected = shade(
                    [x as f32 + 0.5, y as f32 + 0.5],
                    [width as f32, height as f32],
                    time,
                    pointer,
                );
                assert_eq!(frame[(y * width + x) as usize], expected);
            }
        }
    }

    #[test]
    fn rotation_fixes_the_cell_center() {
        for angle in [0.0, 0.4, PI * 0.5, PI, -2.0] {
            assert_eq!(rotate2d([0.5, 0.5], angle), [0.5, 0.5]);
        }
    }

    #[test]
    fn tile_cells_rotate_local_coordinates() {
        // Cell index 0 passes through untouched.
        let identity = rotate_tile_pattern([0.25, 0.25]);
        assert_close([identity[0], identity[1], 0.0, 0.0], [0.5, 0.5, 0.0, 0.0], 1e-6);
        // Cell index 1 (odd x) rotates by 90 degrees: local (0.75, 0.5)
        // becomes (0.5, 0.25).
        let rotated = rotate_tile_pattern([0.875, 0.25]);
        assert_close([rotated[0], rotated[1], 0.0, 0.0], [0.5, 0.25, 0.0, 0.0], 1e-6);
    }

    #[test]
    fn alpha_is_two_until_display_clamps_it() {
        let color = shade([0.5, 0.5], [2.0, 2.0], DEFAULT_TIME_SEED, [0.0, 0.0]);
        assert_eq!(color[3], 2.0);
        assert_eq!(display_color(color)[3], 1.0);
    }

    #[test]
    fn display_clamp_bounds_every_channel() {
        let clamped = display_color([-0.5, 0.25, 7.0, 2.0]);
        assert_eq!(clamped, [0.0, 0.25, 1.0, 1.0]);
    }

    /// Straight-line transcription of the published formula, kept free of the
    /// module's helpers so it can catch a regression in either of them.
    fn shade_transcribed(frag: [f32; 2], res: [f32; 2], time: f32, mouse: [f32; 2]) -> [f32; 4] {
        let rotate = |x: f32, y: f32, a: f32| -> (f32, f32) {
            let (px, py) = (x - 0.5, y - 0.5);
            (
                a.cos() * px + a.sin() * py + 0.5,
                -a.sin() * px + a.cos() * py + 0.5,
            )
        };

        let mut sx = frag[0] / res[0];
        let mut sy = frag[1] / res[1];
        let d = 1.0
            - ((sx - mouse[0] - 0.5).powi(2) + (sy - mouse[1] - 0.5).powi(2)).sqrt();
        sy *= res[1] / res[0];

        let periodic = 8.0 * (time + 8.0 * d).sin();
        sx *= 12.0;
        sy *= 12.0;

        // 2x2 tiling.
        sx *= 2.0;
        sy *= 2.0;
        let mx = sx - 2.0 * (sx / 2.0).floor();
        let my = sy - 2.0 * (sy / 2.0).floor();
        let index = if mx >= 1.0 { 1.0 } else { 0.0 } + if my >= 1.0 { 2.0 } else { 0.0 };
        sx -= sx.floor();
        sy -= sy.floor();
        if index == 1.0 {
            (sx, sy) = rotate(sx, sy, PI * 0.5);
        } else if index == 2.0 {
            (sx, sy) = rotate(sx, sy, PI * -0.5);
        } else if index == 3.0 {
            (sx, sy) = rotate(sx, sy, PI);
        }

        (sx, sy) = rotate(sx, sy, time);

        let angle = sy * PI * periodic;
        let tangent = angle.tan();
        let mut shape = (angle.cos() + angle.sin() + tangent) * tangent;
        shape = if sx * sy * (periodic + 0.5) >= shape - d {
            1.0
        } else {
            0.0
        };

        let c = [
            7.0 * d + time + sx,
            7.0 * d + time + sy + 9.0,
            7.0 * d + time + sx + 8.0,
        ];
        [
            shape * (0.8 + 0.5 * (c[0].tan() + c[0].cos())),
            shape * (0.8 + 0.5 * (c[1].tan() + c[1].cos())),
            shape * (0.8 + 0.5 * (c[2].tan() + c[2].cos())),
            2.0,
        ]
    }

    #[test]
    fn corner_pixels_match_the_published_formula() {
        let resolution = [2.0, 2.0];
        let pointer = [0.0, 0.0];
        let corners = [[0.5, 0.5], [1.5, 0.5], [0.5, 1.5], [1.5, 1.5]];
        for corner in corners {
            let actual = shade(corner, resolution, DEFAULT_TIME_SEED, pointer);
            let expected = shade_transcribed(corner, resolution, DEFAULT_TIME_SEED, pointer);
            assert_close(actual, expected, 1e-5);
        }
    }
}
