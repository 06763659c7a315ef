//! Storable-position validation

use crate::error::MatrixError;
use crate::layout::DiagonalRange;

/// Validate a write against the storable pattern
///
/// Writing zero outside the pattern is a no-op and always allowed; writing
/// a nonzero value there is a pattern violation. Returns whether the position
/// is storable.
pub fn validate_pattern_write(
    range: DiagonalRange,
    row: usize,
    col: usize,
    is_zero: bool,
) -> Result<bool, MatrixError> {
    if range.contains(row, col) {
        Ok(true)
    } else if is_zero {
        Ok(false)
    } else {
        Err(MatrixError::PatternViolation { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_write() {
        let band = DiagonalRange::new(-1, 1);
        assert_eq!(validate_pattern_write(band, 1, 2, false), Ok(true));
        assert_eq!(validate_pattern_write(band, 0, 2, true), Ok(false));
        assert_eq!(
            validate_pattern_write(band, 0, 2, false),
            Err(MatrixError::PatternViolation { row: 0, col: 2 })
        );
    }
}
