//! MNIST-style CSV ingestion.
//!
//! Format:
//! - UTF-8, comma-separated, one record per line
//! - first column is the integer class label, followed by `expected_pixels`
//!   integer intensities in `[0, 255]`
//! - an optional header row is skipped (auto-detected: the first row is a
//!   header if its label cell is not a number); blank lines are ignored
//!
//! Pixels are normalized to `[0, 1]` by dividing by 255.
use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Pixels per flattened 28x28 MNIST image.
pub const MNIST_PIXELS: usize = 784;

/// Labelled samples, one per row of `inputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Matrix,
    labels: Vec<usize>,
}

impl Dataset {
    /// Pairs each row of `inputs` with the label at the same index.
    pub fn new(inputs: Matrix, labels: Vec<usize>) -> Result<Dataset> {
        if inputs.rows() != labels.len() {
            return Err(Error::InvalidParameter(format!(
                "dataset has {} input rows but {} labels",
                inputs.rows(),
                labels.len()
            )));
        }
        Ok(Dataset { inputs, labels })
    }

    pub fn inputs(&self) -> &Matrix {
        &self.inputs
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Normalized pixels and label of sample `i`.
    pub fn sample(&self, i: usize) -> (&[f64], usize) {
        (self.inputs.row(i), self.labels[i])
    }
}

/// Opens `path` and parses it as an MNIST CSV with 784 pixels per record.
pub fn load_mnist_csv(path: &str) -> Result<Dataset> {
    let file = File::open(path)?;
    let dataset = parse_mnist_csv(BufReader::new(file), MNIST_PIXELS)?;
    debug!(path, samples = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Parses label-first CSV records with `expected_pixels` pixel columns each.
pub fn parse_mnist_csv<R: BufRead>(reader: R, expected_pixels: usize) -> Result<Dataset> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();
    let mut blank_lines = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            blank_lines += 1;
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if idx == 0 && is_header(&cells) {
            continue;
        }

        if cells.len() != expected_pixels + 1 {
            return Err(Error::Dataset {
                line: line_no,
                message: format!(
                    "expected {} columns (label + {} pixels), got {}",
                    expected_pixels + 1,
                    expected_pixels,
                    cells.len()
                ),
            });
        }

        let label = cells[0].parse::<usize>().map_err(|_| Error::Dataset {
            line: line_no,
            message: format!("label '{}' is not a non-negative integer", cells[0]),
        })?;

        let pixels = cells[1..]
            .iter()
            .map(|cell| parse_pixel(cell, line_no))
            .collect::<Result<Vec<f64>>>()?;

        labels.push(label);
        rows.push(pixels);
    }

    if blank_lines > 0 {
        warn!(blank_lines, "skipped blank lines in dataset");
    }

    if rows.is_empty() {
        return Err(Error::Dataset {
            line: 0,
            message: "no data rows".into(),
        });
    }

    Dataset::new(Matrix::from_data(rows)?, labels)
}

/// Returns `true` if the row looks like a header (label cell non-numeric).
/// A numeric label means a data record, so bad pixels there still fail.
fn is_header(cells: &[&str]) -> bool {
    cells
        .first()
        .is_some_and(|label| !label.is_empty() && label.parse::<f64>().is_err())
}

fn parse_pixel(cell: &str, line_no: usize) -> Result<f64> {
    let value = cell.parse::<f64>().map_err(|_| Error::Dataset {
        line: line_no,
        message: format!("'{}' is not a valid number", cell),
    })?;
    if !(0.0..=255.0).contains(&value) {
        return Err(Error::Dataset {
            line: line_no,
            message: format!("pixel {} outside [0, 255]", value),
        });
    }
    Ok(value / 255.0)
}
