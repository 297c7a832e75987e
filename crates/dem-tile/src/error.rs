//! Error types for the tile crate.

use thiserror::Error;

/// Errors that can occur when configuring or accessing a tile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    /// Non-positive step or dimension, or non-finite coordinate, passed as tile geometry.
    #[error("Invalid tile geometry: {reason}")]
    InvalidGeometry {
        /// Which geometry parameter was rejected and why.
        reason: String,
    },

    /// Elevation access outside the tile grid.
    #[error(
        "Indices ({latitude_index}, {longitude_index}) are out of tile bounds \
         [0, {max_latitude_index}] x [0, {max_longitude_index}]"
    )]
    IndexOutOfBounds {
        /// Requested latitude (row) index.
        latitude_index: i64,
        /// Requested longitude (column) index.
        longitude_index: i64,
        /// Largest valid latitude index (`latitude_rows - 1`).
        max_latitude_index: i64,
        /// Largest valid longitude index (`longitude_columns - 1`).
        max_longitude_index: i64,
    },

    /// The storage could not materialize the backing grid.
    #[error("Failed to allocate elevation grid of {latitude_rows} x {longitude_columns} samples")]
    AllocationFailure {
        /// Requested number of latitude rows.
        latitude_rows: usize,
        /// Requested number of longitude columns.
        longitude_columns: usize,
    },
}

impl TileError {
    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        TileError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}
