//! Shape and stroke rasterization. Everything bottoms out in per-pixel
//! writes that clip silently at the surface edge, since a drag may
//! legitimately leave the board mid-gesture.

use crate::surface::{Rgba, Surface};

/// Round brush stamp of diameter `width` centered at (cx, cy).
pub fn draw_disc(surface: &mut Surface, cx: i32, cy: i32, width: u32, color: Rgba) {
    let radius = width as f64 / 2.0;
    let reach = radius.ceil() as i32;
    let limit = radius * radius;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f64 <= limit {
                surface.set_clipped(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Stroke segment with round caps: a disc stamped along the Bresenham line
/// from `from` to `to`.
pub fn draw_segment(
    surface: &mut Surface,
    from: (i32, i32),
    to: (i32, i32),
    width: u32,
    color: Rgba,
) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut error = dx + dy;

    loop {
        draw_disc(surface, x, y, width, color);
        if x == x1 && y == y1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
    }
}

/// Axis-aligned rectangle between opposite corners `a` and `b`.
pub fn draw_rect(
    surface: &mut Surface,
    a: (i32, i32),
    b: (i32, i32),
    width: u32,
    filled: bool,
    color: Rgba,
) {
    let (min_x, max_x) = (a.0.min(b.0), a.0.max(b.0));
    let (min_y, max_y) = (a.1.min(b.1), a.1.max(b.1));

    if filled {
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                surface.set_clipped(x, y, color);
            }
        }
        return;
    }

    // Concentric 1px rings, inset per ring, collapsing to a filled box when
    // the insets meet.
    for ring in 0..width as i32 {
        let (left, right) = (min_x + ring, max_x - ring);
        let (top, bottom) = (min_y + ring, max_y - ring);
        if left > right || top > bottom {
            break;
        }
        for x in left..=right {
            surface.set_clipped(x, top, color);
            surface.set_clipped(x, bottom, color);
        }
        for y in top..=bottom {
            surface.set_clipped(left, y, color);
            surface.set_clipped(right, y, color);
        }
    }
}

/// Circle centered at `center`; outlines are an annulus `width` pixels deep.
pub fn draw_circle(
    surface: &mut Surface,
    center: (i32, i32),
    radius: f64,
    width: u32,
    filled: bool,
    color: Rgba,
) {
    let radius = radius.abs();
    let outer = radius * radius;
    let inner = if filled {
        -1.0
    } else {
        let rim = (radius - width as f64).max(0.0);
        rim * rim
    };
    let reach = radius.ceil() as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance = (dx * dx + dy * dy) as f64;
            if distance <= outer && distance > inner {
                surface.set_clipped(center.0 + dx, center.1 + dy, color);
            }
        }
    }
    if filled && radius < 1.0 {
        surface.set_clipped(center.0, center.1, color);
    }
}

/// Isoceles triangle: apex at `a`, base from `b` to the mirror of `b` about
/// the apex's column.
pub fn draw_triangle(
    surface: &mut Surface,
    a: (i32, i32),
    b: (i32, i32),
    width: u32,
    filled: bool,
    color: Rgba,
) {
    let c = (2 * a.0 - b.0, b.1);
    if filled {
        fill_triangle(surface, a, b, c, color);
    } else {
        draw_segment(surface, a, b, width, color);
        draw_segment(surface, b, c, width, color);
        draw_segment(surface, c, a, width, color);
    }
}

fn fill_triangle(
    surface: &mut Surface,
    a: (i32, i32),
    b: (i32, i32),
    c: (i32, i32),
    color: Rgba,
) {
    let min_x = a.0.min(b.0).min(c.0);
    let max_x = a.0.max(b.0).max(c.0);
    let min_y = a.1.min(b.1).min(c.1);
    let max_y = a.1.max(b.1).max(c.1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x, y);
            let e0 = edge(a, b, p);
            let e1 = edge(b, c, p);
            let e2 = edge(c, a, p);
            let inside = (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0);
            if inside {
                surface.set_clipped(x, y, color);
            }
        }
    }
}

fn edge(from: (i32, i32), to: (i32, i32), p: (i32, i32)) -> i64 {
    let ax = (to.0 - from.0) as i64;
    let ay = (to.1 - from.1) as i64;
    let bx = (p.0 - from.0) as i64;
    let by = (p.1 - from.1) as i64;
    ax * by - ay * bx
}
