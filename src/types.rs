// src/types.rs
//! Accelerometer channel identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::table::{FILTERED_SUFFIX, MANUAL_FILTERED_SUFFIX, X_COLUMN, Y_COLUMN};

/// One of the two measured acceleration axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Name of the raw column
    pub fn column(&self) -> &'static str {
        match self {
            Axis::X => X_COLUMN,
            Axis::Y => Y_COLUMN,
        }
    }

    /// Column written by zero-phase filtering
    pub fn filtered_column(&self) -> String {
        format!("{}{}", self.column(), FILTERED_SUFFIX)
    }

    /// Column written by the causal dot-product filter
    pub fn manual_filtered_column(&self) -> String {
        format!("{}{}", self.column(), MANUAL_FILTERED_SUFFIX)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X Accel"),
            Axis::Y => write!(f, "Y Accel"),
        }
    }
}
