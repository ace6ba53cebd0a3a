use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{RotaskError, RotaskResult};

/// Grid dimensions `(cols, rows)` for a given object count.
///
/// Fixed table: one object gets the whole canvas, two sit side by side, three
/// or four share a 2x2 grid, five a 3x2 grid. Cells partition the canvas, so
/// objects can never be confused as interacting.
pub fn grid_dims(object_count: usize) -> RotaskResult<(u32, u32)> {
    match object_count {
        1 => Ok((1, 1)),
        2 => Ok((2, 1)),
        3 | 4 => Ok((2, 2)),
        5 => Ok((3, 2)),
        n => Err(RotaskError::validation(format!(
            "grid layout supports 1-5 objects, got {n}"
        ))),
    }
}

/// Pixel center of cell `index` in a row-major `cols x rows` grid.
///
/// Integer cell arithmetic keeps centers stable for odd canvas sizes.
pub fn cell_center(index: usize, cols: u32, rows: u32, canvas: Canvas) -> Point {
    let cell_w = canvas.width / cols.max(1);
    let cell_h = canvas.height / rows.max(1);
    let col = (index as u32) % cols.max(1);
    let row = (index as u32) / cols.max(1);
    Point::new(
        f64::from(col * cell_w + cell_w / 2),
        f64::from(row * cell_h + cell_h / 2),
    )
}
