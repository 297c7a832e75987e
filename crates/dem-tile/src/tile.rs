//! Tile contract and the shared bookkeeping common to every storage strategy.

use crate::storage::{GridStorage, TileStorage};
use crate::{Footprint, Result, TileError, TileGeometry};
use tracing::{debug, warn};

/// Geometry reported by a tile whose geometry has not been configured yet.
const EMPTY_GEOMETRY: TileGeometry = TileGeometry {
    min_latitude: 0.0,
    min_longitude: 0.0,
    latitude_step: 0.0,
    longitude_step: 0.0,
    latitude_rows: 0,
    longitude_columns: 0,
};

/// Interface for raster elevation tiles.
///
/// Loaders call [`Tile::set_geometry`], then [`Tile::set_elevation`] for each
/// sample, then [`Tile::tile_update_completed`]. After that the tile is
/// read-only and can be shared between threads.
pub trait Tile {
    /// Set the tile global geometry.
    ///
    /// Resets the elevation bounds. Fails with [`TileError::InvalidGeometry`]
    /// for non-positive steps or dimensions and with
    /// [`TileError::AllocationFailure`] if the storage cannot hold the grid.
    fn set_geometry(&mut self, geometry: TileGeometry) -> Result<()>;

    /// Hook called at the end of tile update.
    fn tile_update_completed(&mut self) -> Result<()>;

    /// Current geometry. All counts and steps are zero before configuration.
    fn geometry(&self) -> TileGeometry;

    /// Set the elevation (meters) for one raster element.
    fn set_elevation(
        &mut self,
        latitude_index: i64,
        longitude_index: i64,
        elevation: f64,
    ) -> Result<()>;

    /// Get the elevation (meters) of an exact grid point.
    fn elevation_at_indices(&self, latitude_index: i64, longitude_index: i64) -> Result<f64>;

    /// Minimum elevation set so far, `+inf` if none.
    fn min_elevation(&self) -> f64;

    /// Maximum elevation set so far, `-inf` if none.
    fn max_elevation(&self) -> f64;

    /// Elevation bounds as (min, max), or `None` while no sample has been set.
    fn elevation_range(&self) -> Option<(f64, f64)> {
        let (min, max) = (self.min_elevation(), self.max_elevation());
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }

    /// Check if a ground point is within the tile footprint.
    fn covers(&self, latitude: f64, longitude: f64) -> bool {
        self.geometry().covers(latitude, longitude)
    }

    /// Minimum latitude.
    fn minimum_latitude(&self) -> f64 {
        self.geometry().min_latitude
    }

    /// Minimum longitude.
    fn minimum_longitude(&self) -> f64 {
        self.geometry().min_longitude
    }

    /// Step in latitude (size of one raster element).
    fn latitude_step(&self) -> f64 {
        self.geometry().latitude_step
    }

    /// Step in longitude (size of one raster element).
    fn longitude_step(&self) -> f64 {
        self.geometry().longitude_step
    }

    /// Number of latitude rows.
    fn latitude_rows(&self) -> usize {
        self.geometry().latitude_rows
    }

    /// Number of longitude columns.
    fn longitude_columns(&self) -> usize {
        self.geometry().longitude_columns
    }

    /// Excluded upper latitude of the footprint.
    fn maximum_latitude(&self) -> f64 {
        self.geometry().footprint().max_lat
    }

    /// Excluded upper longitude of the footprint.
    fn maximum_longitude(&self) -> f64 {
        self.geometry().footprint().max_lon
    }

    /// Latitude of the row at `latitude_index`.
    fn latitude_at_index(&self, latitude_index: i64) -> f64 {
        self.geometry().latitude_at_index(latitude_index)
    }

    /// Longitude of the column at `longitude_index`.
    fn longitude_at_index(&self, longitude_index: i64) -> f64 {
        self.geometry().longitude_at_index(longitude_index)
    }

    /// Row index containing `latitude`, possibly outside the grid.
    fn floor_latitude_index(&self, latitude: f64) -> Option<i64> {
        self.geometry().floor_latitude_index(latitude)
    }

    /// Column index containing `longitude`, possibly outside the grid.
    fn floor_longitude_index(&self, longitude: f64) -> Option<i64> {
        self.geometry().floor_longitude_index(longitude)
    }

    /// Geographic footprint of the tile.
    fn footprint(&self) -> Footprint {
        self.geometry().footprint()
    }
}

/// Lifecycle of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Constructed, no geometry yet.
    Empty,
    /// Geometry set, no elevation written yet.
    GeometryConfigured,
    /// At least one elevation written.
    Populating,
    /// Update completed; the tile is read-only.
    Finalized,
}

/// Tile implementation shared by all storage strategies.
///
/// Handles geometry, running elevation bounds and index checks, and forwards
/// cell access to `S` with indices already known to be inside the grid.
#[derive(Debug, Clone)]
pub struct BaseTile<S> {
    geometry: TileGeometry,
    min_elevation: f64,
    max_elevation: f64,
    state: TileState,
    storage: S,
}

/// Tile backed by a dense in-memory grid.
pub type SimpleTile = BaseTile<GridStorage>;

impl<S: Default> Default for BaseTile<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: TileStorage + Default> BaseTile<S> {
    /// Create a tile with default storage and configure its geometry.
    pub fn with_geometry(geometry: TileGeometry) -> Result<Self> {
        let mut tile = Self::default();
        tile.set_geometry(geometry)?;
        Ok(tile)
    }
}

impl<S> BaseTile<S> {
    /// Create an empty tile around `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            geometry: EMPTY_GEOMETRY,
            min_elevation: f64::INFINITY,
            max_elevation: f64::NEG_INFINITY,
            state: TileState::Empty,
            storage,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Check indices against the grid, returning them as storage indices.
    fn check_indices(&self, latitude_index: i64, longitude_index: i64) -> Result<(usize, usize)> {
        let rows = self.geometry.latitude_rows;
        let columns = self.geometry.longitude_columns;

        match (usize::try_from(latitude_index), usize::try_from(longitude_index)) {
            (Ok(i), Ok(j)) if i < rows && j < columns => Ok((i, j)),
            _ => Err(TileError::IndexOutOfBounds {
                latitude_index,
                longitude_index,
                max_latitude_index: max_index(rows),
                max_longitude_index: max_index(columns),
            }),
        }
    }
}

fn max_index(count: usize) -> i64 {
    i64::try_from(count).map_or(i64::MAX, |c| c - 1)
}

impl<S: TileStorage> Tile for BaseTile<S> {
    fn set_geometry(&mut self, geometry: TileGeometry) -> Result<()> {
        geometry.validate()?;

        if self.state != TileState::Empty {
            warn!(
                "Tile geometry reconfigured in state {:?}; previous samples are discarded",
                self.state
            );
        }

        // Storage failure leaves the tile as it was.
        self.storage.init_geometry(&geometry)?;

        self.geometry = geometry;
        self.min_elevation = f64::INFINITY;
        self.max_elevation = f64::NEG_INFINITY;
        self.state = TileState::GeometryConfigured;

        debug!(
            "Tile geometry set: origin ({}, {}), step ({}, {}), {} x {} samples",
            geometry.min_latitude,
            geometry.min_longitude,
            geometry.latitude_step,
            geometry.longitude_step,
            geometry.latitude_rows,
            geometry.longitude_columns
        );
        Ok(())
    }

    fn tile_update_completed(&mut self) -> Result<()> {
        match self.state {
            TileState::Finalized => Ok(()),
            TileState::Empty => {
                warn!("Tile update completed before geometry was set; ignoring");
                Ok(())
            }
            TileState::GeometryConfigured | TileState::Populating => {
                self.storage.update_completed()?;
                self.state = TileState::Finalized;
                debug!(
                    "Tile update completed, elevation range {:?}",
                    self.elevation_range()
                );
                Ok(())
            }
        }
    }

    fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    fn set_elevation(
        &mut self,
        latitude_index: i64,
        longitude_index: i64,
        elevation: f64,
    ) -> Result<()> {
        let (i, j) = self.check_indices(latitude_index, longitude_index)?;

        match self.state {
            TileState::GeometryConfigured => self.state = TileState::Populating,
            TileState::Finalized => warn!(
                "Elevation written at ({}, {}) after tile update completed",
                latitude_index, longitude_index
            ),
            TileState::Empty | TileState::Populating => {}
        }

        // f64::min/max skip NaN, so no-data samples leave the bounds alone.
        self.min_elevation = self.min_elevation.min(elevation);
        self.max_elevation = self.max_elevation.max(elevation);
        self.storage.store(i, j, elevation);
        Ok(())
    }

    fn elevation_at_indices(&self, latitude_index: i64, longitude_index: i64) -> Result<f64> {
        let (i, j) = self.check_indices(latitude_index, longitude_index)?;
        Ok(self.storage.load(i, j))
    }

    fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    fn max_elevation(&self) -> f64 {
        self.max_elevation
    }
}
