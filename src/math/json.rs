//! Matrix validation for dynamically typed input.
//!
//! Callers that receive matrices as JSON (configuration files, request bodies)
//! can hand them in untyped; every structural problem is reported as
//! [`ModelError::InvalidType`] except ragged rows, which keep their own error.
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::math::shape::{input_shape, Matrix, Shape};

/// Converts a JSON array of numeric arrays into a rectangular matrix.
///
/// Only the first row decides whether the value is a matrix at all; a later
/// row that is not an array counts as a ragged row of length zero.
pub fn matrix_from_value(value: &Value) -> Result<Matrix<f32>> {
    let rows = value.as_array().ok_or_else(|| {
        ModelError::InvalidType(format!("expected an array of rows, got {}", kind(value)))
    })?;

    let cols = match rows.first() {
        None => return Err(ModelError::InvalidType("matrix has no rows".to_string())),
        Some(Value::Array(first)) => first.len(),
        Some(first) => {
            return Err(ModelError::InvalidType(format!(
                "expected the first row to be an array, got {}",
                kind(first)
            )))
        }
    };

    let mut matrix = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cells = row.as_array().ok_or(ModelError::RaggedRow {
            expected: cols,
            row: i,
            found: 0,
        })?;
        let mut values = Vec::with_capacity(cells.len());
        for (j, cell) in cells.iter().enumerate() {
            let v = cell.as_f64().ok_or_else(|| {
                ModelError::InvalidType(format!(
                    "cell ({}, {}) is {}, not a number",
                    i,
                    j,
                    kind(cell)
                ))
            })?;
            values.push(v as f32);
        }
        matrix.push(values);
    }

    input_shape(&matrix)?;
    Ok(matrix)
}

/// Shape of a JSON matrix, validated the same way as [`matrix_from_value`].
pub fn input_shape_value(value: &Value) -> Result<Shape> {
    let matrix = matrix_from_value(value)?;
    input_shape(&matrix)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
