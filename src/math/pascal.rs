//! Pascal's triangle.

use crate::error::AppError;

/// Largest level count whose entries fit in a `u64` (row 67 holds `C(67, 33)`).
pub const MAX_LEVELS: usize = 68;

/// Build the first `levels` rows of Pascal's triangle.
///
/// Row `i` has `i + 1` entries equal to `C(i, j)`. `levels == 0` is rejected,
/// and so is any level count whose entries no longer fit in a `u64`.
pub fn pascal_triangle(levels: usize) -> Result<Vec<Vec<u64>>, AppError> {
    if levels == 0 {
        return Err(AppError::invalid_input(
            "Number of levels for Pascal Triangle must be at least 1.",
        ));
    }
    if levels > MAX_LEVELS {
        return Err(AppError::invalid_input(format!(
            "Pascal Triangle with {levels} levels overflows 64-bit integers (at most {MAX_LEVELS} levels)."
        )));
    }

    let mut triangle: Vec<Vec<u64>> = Vec::with_capacity(levels);
    triangle.push(vec![1]);

    for i in 1..levels {
        let prev = &triangle[i - 1];
        let mut row = Vec::with_capacity(i + 1);
        row.push(1);
        for j in 1..i {
            let value = prev[j - 1].checked_add(prev[j]).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Pascal Triangle with {levels} levels overflows 64-bit integers at row {i}."
                ))
            })?;
            row.push(value);
        }
        row.push(1);
        triangle.push(row);
    }

    Ok(triangle)
}
