use crate::surface::{Rgba, Surface, SurfaceError};

/// Scanline seed fill: recolors the maximal 4-connected region of pixels
/// matching the seed pixel's exact color. Matching is exact equality on all
/// four channels; the fill color is forced opaque.
///
/// Filling a region that already has the requested color is a no-op, which
/// also rules out the classic infinite loop when target == fill.
pub fn flood_fill(
    surface: &mut Surface,
    seed_x: i32,
    seed_y: i32,
    color: Rgba,
) -> Result<(), SurfaceError> {
    let color = color.opaque();
    let target = surface.get(seed_x, seed_y)?;
    if target == color {
        return Ok(());
    }

    let width = surface.width() as i32;
    let height = surface.height() as i32;
    let mut stack = vec![(seed_x, seed_y)];

    while let Some((x, mut y)) = stack.pop() {
        // Walk to the top of the contiguous vertical run. The y >= 0 guard
        // must come before the pixel read.
        while y >= 0 && matches(surface, x, y, target) {
            y -= 1;
        }
        y += 1;

        let mut reach_left = false;
        let mut reach_right = false;

        // Color downward through the run, seeding the neighbor columns once
        // per contiguous sub-run.
        while y < height && matches(surface, x, y, target) {
            surface.set(x, y, color)?;

            if x > 0 {
                if matches(surface, x - 1, y, target) {
                    if !reach_left {
                        stack.push((x - 1, y));
                        reach_left = true;
                    }
                } else {
                    reach_left = false;
                }
            }

            if x < width - 1 {
                if matches(surface, x + 1, y, target) {
                    if !reach_right {
                        stack.push((x + 1, y));
                        reach_right = true;
                    }
                } else {
                    reach_right = false;
                }
            }

            y += 1;
        }
    }

    Ok(())
}

fn matches(surface: &Surface, x: i32, y: i32, target: Rgba) -> bool {
    surface.get(x, y) == Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::draw_rect;

    const RED: Rgba = Rgba([255, 0, 0, 255]);

    fn count_color(surface: &Surface, color: Rgba) -> usize {
        let mut count = 0;
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.get(x, y).unwrap() == color {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn fill_inside_outline_stops_at_boundary() {
        // 10x10 white board, black 1px rectangle outline from (2,2) to (7,7),
        // fill seeded at (4,4) with red.
        let mut surface = Surface::new(10, 10, Rgba::WHITE);
        draw_rect(&mut surface, (2, 2), (7, 7), 1, false, Rgba::BLACK);
        flood_fill(&mut surface, 4, 4, RED).unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let expected = if (3..=6).contains(&x) && (3..=6).contains(&y) {
                    RED
                } else if (2..=7).contains(&x)
                    && (2..=7).contains(&y)
                    && (x == 2 || x == 7 || y == 2 || y == 7)
                {
                    Rgba::BLACK
                } else {
                    Rgba::WHITE
                };
                assert_eq!(surface.get(x, y).unwrap(), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_is_idempotent_on_matching_color() {
        let mut surface = Surface::new(8, 8, Rgba::WHITE);
        surface.set(3, 3, Rgba::BLACK).unwrap();
        let before = surface.snapshot();
        flood_fill(&mut surface, 0, 0, Rgba::WHITE).unwrap();
        assert_eq!(surface.snapshot(), before);
    }

    #[test]
    fn separated_regions_fill_independently() {
        // Vertical black line at x = 4 splits the board in two.
        let mut surface = Surface::new(9, 5, Rgba::WHITE);
        for y in 0..5 {
            surface.set(4, y, Rgba::BLACK).unwrap();
        }
        flood_fill(&mut surface, 1, 2, RED).unwrap();

        for y in 0..5 {
            for x in 0..9 {
                let expected = match x {
                    0..=3 => RED,
                    4 => Rgba::BLACK,
                    _ => Rgba::WHITE,
                };
                assert_eq!(surface.get(x, y).unwrap(), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn diagonal_adjacency_does_not_leak() {
        // Two white regions that only touch corner-to-corner stay separate.
        let mut surface = Surface::new(2, 2, Rgba::WHITE);
        surface.set(1, 0, Rgba::BLACK).unwrap();
        surface.set(0, 1, Rgba::BLACK).unwrap();
        flood_fill(&mut surface, 0, 0, RED).unwrap();
        assert_eq!(surface.get(0, 0).unwrap(), RED);
        assert_eq!(surface.get(1, 1).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn unbounded_region_floods_to_grid_edge() {
        let mut surface = Surface::new(6, 6, Rgba::WHITE);
        flood_fill(&mut surface, 3, 3, RED).unwrap();
        assert_eq!(count_color(&surface, RED), 36);
    }

    #[test]
    fn concave_region_is_covered() {
        // U-shaped cavity: fill must wrap around the black pillar.
        let mut surface = Surface::new(7, 5, Rgba::WHITE);
        for y in 0..4 {
            surface.set(3, y, Rgba::BLACK).unwrap();
        }
        flood_fill(&mut surface, 0, 0, RED).unwrap();
        assert_eq!(surface.get(6, 0).unwrap(), RED);
        assert_eq!(surface.get(3, 4).unwrap(), RED);
        assert_eq!(count_color(&surface, Rgba::BLACK), 4);
        assert_eq!(count_color(&surface, RED), 31);
    }

    #[test]
    fn fill_alpha_is_forced_opaque() {
        let mut surface = Surface::new(3, 3, Rgba::WHITE);
        flood_fill(&mut surface, 1, 1, Rgba([10, 20, 30, 7])).unwrap();
        assert_eq!(surface.get(0, 0).unwrap(), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn out_of_bounds_seed_is_rejected_without_mutation() {
        let mut surface = Surface::new(4, 4, Rgba::WHITE);
        let before = surface.snapshot();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4)] {
            assert_eq!(
                flood_fill(&mut surface, x, y, RED),
                Err(SurfaceError::OutOfBounds { x, y })
            );
        }
        assert_eq!(surface.snapshot(), before);
    }

    #[test]
    fn single_pixel_region() {
        let mut surface = Surface::new(3, 3, Rgba::WHITE);
        surface.set(1, 1, Rgba::BLACK).unwrap();
        flood_fill(&mut surface, 1, 1, RED).unwrap();
        assert_eq!(surface.get(1, 1).unwrap(), RED);
        assert_eq!(count_color(&surface, Rgba::WHITE), 8);
    }
}
