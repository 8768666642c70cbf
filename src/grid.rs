//! Grid layout: one point per cell center, in normalized device coordinates.

use crate::error::{Error, Result};

/// A `cols x rows` tiling of a `width x height` canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub width: f32,
    pub height: f32,
}

impl GridSpec {
    pub fn new(
        cols: u32,
        rows: u32,
        cell_width: f32,
        cell_height: f32,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid { cols, rows });
        }
        for (what, value) in [
            ("cell width", cell_width),
            ("cell height", cell_height),
            ("canvas width", width),
            ("canvas height", height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidDimension { what, value });
            }
        }
        check_span("column", cols, cell_width, width)?;
        check_span("row", rows, cell_height, height)?;
        Ok(Self {
            cols,
            rows,
            cell_width,
            cell_height,
            width,
            height,
        })
    }

    /// Tiles the canvas with `cols` columns and as many rows as the aspect
    /// ratio allows, truncating toward zero.
    pub fn fit(width: f32, height: f32, cols: u32) -> Result<Self> {
        if cols == 0 || width <= 0.0 || height <= 0.0 {
            return Err(Error::EmptyGrid { cols, rows: 0 });
        }
        let aspect = height as f64 / width as f64;
        let rows = (cols as f64 * aspect).trunc() as u32;
        if rows == 0 {
            return Err(Error::EmptyGrid { cols, rows });
        }
        let cell_width = width / cols as f32;
        let cell_height = height / rows as f32;
        Self::new(cols, rows, cell_width, cell_height, width, height)
    }

    pub fn count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Largest circle radius that still fits inside a cell.
    pub fn max_radius(&self) -> f32 {
        self.cell_width.min(self.cell_height) / 2.0
    }

    /// Flat `[x0, y0, x1, y1, ...]` in row-major order.
    pub fn points(&self) -> Vec<f32> {
        let count = self.count();
        let mut points = vec![0.0; count * 2];
        let cols = self.cols as usize;

        for (i, xy) in points.chunks_exact_mut(2).enumerate() {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;

            let x = col * self.cell_width + self.cell_width / 2.0;
            let y = row * self.cell_height + self.cell_height / 2.0;

            xy[0] = (2.0 * x) / self.width - 1.0;
            xy[1] = (2.0 * y) / self.height - 1.0;
        }

        points
    }
}

/// `cells * cell` must fit in `extent`. Cell sizes obtained by dividing the
/// extent may round one ulp high, so that much slack is allowed.
fn check_span(axis: &'static str, cells: u32, cell: f32, extent: f32) -> Result<()> {
    let span = cells as f64 * cell as f64;
    if span > extent as f64 * (1.0 + f32::EPSILON as f64) {
        return Err(Error::GridOverflow {
            axis,
            span: span as f32,
            extent,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_one_lands_on_cell_centers() {
        let grid = GridSpec::new(2, 1, 2.0, 2.0, 4.0, 2.0).unwrap();
        assert_eq!(grid.points(), vec![-0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn fit_truncates_rows() {
        // 10 * 0.75 = 7.5 -> 7 rows
        let grid = GridSpec::fit(800.0, 600.0, 10).unwrap();
        assert_eq!(grid.rows, 7);
        assert_eq!(grid.count(), 70);
        assert_eq!(grid.points().len(), 140);
    }

    #[test]
    fn fit_rejects_strip_too_thin_for_a_row() {
        assert!(matches!(
            GridSpec::fit(1000.0, 10.0, 50),
            Err(Error::EmptyGrid { cols: 50, rows: 0 })
        ));
    }

    #[test]
    fn fit_truncates_rows_in_double_precision() {
        // 50 * 1.06 is 52.99.. in f32
        let grid = GridSpec::fit(200.0, 212.0, 50).unwrap();
        assert_eq!(grid.rows, 53);
        assert!(grid.points().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn cells_wider_than_canvas_are_rejected() {
        assert!(matches!(
            GridSpec::new(2, 1, 10.0, 10.0, 4.0, 2.0),
            Err(Error::GridOverflow { axis: "column", .. })
        ));
        assert!(matches!(
            GridSpec::new(1, 3, 1.0, 1.0, 1.0, 2.0),
            Err(Error::GridOverflow { axis: "row", .. })
        ));
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(matches!(
            GridSpec::new(1, 1, 1.0, 1.0, 0.0, 0.0),
            Err(Error::InvalidDimension { what: "canvas width", .. })
        ));
        assert!(matches!(
            GridSpec::new(1, 1, 1.0, 1.0, 1.0, f32::INFINITY),
            Err(Error::InvalidDimension { what: "canvas height", .. })
        ));
        assert!(matches!(
            GridSpec::new(1, 1, -1.0, 1.0, 1.0, 1.0),
            Err(Error::InvalidDimension { what: "cell width", .. })
        ));
        assert!(matches!(
            GridSpec::new(1, 1, 1.0, f32::NAN, 1.0, 1.0),
            Err(Error::InvalidDimension { what: "cell height", .. })
        ));
    }

    #[test]
    fn max_radius_uses_smaller_side() {
        let grid = GridSpec::new(4, 2, 10.0, 6.0, 40.0, 12.0).unwrap();
        assert_eq!(grid.max_radius(), 3.0);
    }
}
