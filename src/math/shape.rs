use ndarray::Array2;

use crate::error::{ModelError, Result};

/// `(rows, cols)` of a matrix.
pub type Shape = (usize, usize);

/// Row-major matrix as handed in by callers.
pub type Matrix<T = f32> = Vec<Vec<T>>;

/// Returns the shape of a rectangular matrix.
///
/// ```
/// use tensorscript_core::math::input_shape;
///
/// let input = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
/// assert_eq!(input_shape(&input).unwrap(), (2, 2));
/// ```
///
/// Fails with [`ModelError::InvalidType`] when there is no row or the first row
/// is empty, and with [`ModelError::RaggedRow`] on the first row whose length
/// differs from the first one.
pub fn input_shape<T, R>(matrix: &[R]) -> Result<Shape>
where
    R: AsRef<[T]>,
{
    let first = matrix
        .first()
        .ok_or_else(|| ModelError::InvalidType("matrix has no rows".to_string()))?;
    let cols = first.as_ref().len();
    if cols == 0 {
        return Err(ModelError::InvalidType(
            "first row of matrix is empty".to_string(),
        ));
    }

    for (row, vector) in matrix.iter().enumerate().skip(1) {
        let found = vector.as_ref().len();
        if found != cols {
            return Err(ModelError::RaggedRow {
                expected: cols,
                row,
                found,
            });
        }
    }

    Ok((matrix.len(), cols))
}

/// Lays a row-major buffer out as a matrix of the given shape.
///
/// The buffer length must be exactly `rows * cols`; a trailing partial row is
/// rejected rather than returned short.
pub fn reshape<T: Clone>(flat: &[T], shape: Shape) -> Result<Matrix<T>> {
    let (rows, cols) = shape;
    let mismatch = || ModelError::ShapeMismatch {
        rows,
        cols,
        len: flat.len(),
    };

    if cols == 0 {
        return Err(mismatch());
    }
    let chunks = (flat.len() + cols - 1) / cols;
    if chunks != rows || flat.len() % cols != 0 {
        return Err(mismatch());
    }

    Ok(flat.chunks(cols).map(|chunk| chunk.to_vec()).collect())
}

/// Row-major concatenation of the rows of `matrix`.
pub fn flatten<T: Clone, R: AsRef<[T]>>(matrix: &[R]) -> Vec<T> {
    let mut data = Vec::with_capacity(matrix.iter().map(|r| r.as_ref().len()).sum());
    for row in matrix {
        data.extend_from_slice(row.as_ref());
    }
    data
}

/// Validates `matrix` and copies it into a dense `Array2`.
pub fn to_array2<T: Clone, R: AsRef<[T]>>(matrix: &[R]) -> Result<Array2<T>> {
    let shape = input_shape(matrix)?;
    let data = flatten(matrix);
    let len = data.len();
    Array2::from_shape_vec(shape, data).map_err(|_| ModelError::ShapeMismatch {
        rows: shape.0,
        cols: shape.1,
        len,
    })
}

pub fn from_array2<T: Clone>(array: &Array2<T>) -> Matrix<T> {
    array.outer_iter().map(|row| row.to_vec()).collect()
}
