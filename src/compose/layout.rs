//! Grid layout selection for the composite canvas

/// Grid shape as (rows, cols), derived solely from image count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl GridLayout {
    pub fn capacity(self) -> usize {
        (self.rows * self.cols) as usize
    }
}

/// Pick the grid for a given image count.
///
/// Small counts get hand-tuned layouts; larger counts fall back to a
/// near-square grid. Three images deliberately land in a 2x2 grid with
/// one empty cell. Callers reject zero images before getting here.
pub fn grid_for(image_count: usize) -> GridLayout {
    debug_assert!(image_count >= 1, "grid selection needs at least one image");

    match image_count {
        0 | 1 => GridLayout { rows: 1, cols: 1 },
        2 => GridLayout { rows: 1, cols: 2 },
        3 | 4 => GridLayout { rows: 2, cols: 2 },
        5 | 6 => GridLayout { rows: 2, cols: 3 },
        7..=9 => GridLayout { rows: 3, cols: 3 },
        n => {
            let cols = (n as f64).sqrt().ceil() as u32;
            let rows = (n as u32).div_ceil(cols);
            GridLayout { rows, cols }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_table() {
        let expected = [
            (1, (1, 1)),
            (2, (1, 2)),
            (3, (2, 2)),
            (4, (2, 2)),
            (5, (2, 3)),
            (6, (2, 3)),
            (7, (3, 3)),
            (8, (3, 3)),
            (9, (3, 3)),
            (10, (3, 4)),
            (12, (3, 4)),
            (16, (4, 4)),
            (17, (4, 5)),
        ];

        for (count, (rows, cols)) in expected {
            assert_eq!(
                grid_for(count),
                GridLayout { rows, cols },
                "layout for {count} images"
            );
        }
    }

    #[test]
    fn test_grid_always_fits_count() {
        for count in 1..=100 {
            let grid = grid_for(count);
            assert!(
                grid.capacity() >= count,
                "{count} images do not fit a {}x{} grid",
                grid.rows,
                grid.cols
            );
        }
    }
}
