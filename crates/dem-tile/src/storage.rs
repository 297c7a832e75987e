//! Storage strategies backing the elevation grid of a tile.
//!
//! [`BaseTile`](crate::BaseTile) owns geometry and index checks; a
//! [`TileStorage`] only has to shape the grid and move single cell values in
//! and out. Indices handed to a storage are always within the configured grid.

use crate::{Result, TileError, TileGeometry};
use tracing::trace;

/// Storage-specific part of a tile.
pub trait TileStorage {
    /// Allocate or reshape the backing grid for `geometry`.
    ///
    /// Called once per configuration, after the geometry has been validated.
    fn init_geometry(&mut self, geometry: &TileGeometry) -> Result<()>;

    /// Write the elevation (meters) of one raster element.
    fn store(&mut self, latitude_index: usize, longitude_index: usize, elevation: f64);

    /// Read the elevation (meters) of one raster element.
    fn load(&self, latitude_index: usize, longitude_index: usize) -> f64;

    /// Post-load finalization hook, e.g. building auxiliary indices.
    fn update_completed(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Dense in-memory grid, row-major with latitude rows outermost.
///
/// Cells that have not been written read as NaN.
#[derive(Debug, Clone, Default)]
pub struct GridStorage {
    samples: Vec<f64>,
    longitude_columns: usize,
}

impl GridStorage {
    /// Create an empty storage; the grid is allocated on geometry configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// All samples in row-major order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of cells that have been written with a non-NaN value.
    pub fn populated_count(&self) -> usize {
        self.samples.iter().filter(|v| !v.is_nan()).count()
    }

    fn offset(&self, latitude_index: usize, longitude_index: usize) -> usize {
        latitude_index * self.longitude_columns + longitude_index
    }
}

impl TileStorage for GridStorage {
    fn init_geometry(&mut self, geometry: &TileGeometry) -> Result<()> {
        let failure = || TileError::AllocationFailure {
            latitude_rows: geometry.latitude_rows,
            longitude_columns: geometry.longitude_columns,
        };

        let count = geometry.sample_count().ok_or_else(failure)?;

        let mut samples = Vec::new();
        samples.try_reserve_exact(count).map_err(|_| failure())?;
        samples.resize(count, f64::NAN);

        trace!(
            "GridStorage: allocated {} x {} samples",
            geometry.latitude_rows,
            geometry.longitude_columns
        );

        self.samples = samples;
        self.longitude_columns = geometry.longitude_columns;
        Ok(())
    }

    fn store(&mut self, latitude_index: usize, longitude_index: usize, elevation: f64) {
        let idx = self.offset(latitude_index, longitude_index);
        self.samples[idx] = elevation;
    }

    fn load(&self, latitude_index: usize, longitude_index: usize) -> f64 {
        self.samples[self.offset(latitude_index, longitude_index)]
    }
}
