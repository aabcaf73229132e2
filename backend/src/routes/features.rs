use serde::{Deserialize, Serialize};

// =========================================================
// Fused feature matrix + route
// =========================================================

/// Row-major per-pixel feature table: the four index values of each pixel
/// followed by one sensor feature vector repeated on every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedMatrix {
    pub columns: Vec<String>,
    pub rows: usize,
    pub data: Vec<f64>,
}

impl FusedMatrix {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Values of row `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.rows {
            return None;
        }
        let width = self.width();
        self.data.get(i * width..(i + 1) * width)
    }

    /// Index of the column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

pub const GET_FEATURES: &str = "/datasets/current/features";
