//! # dem-tile
//!
//! Core of a raster Digital Elevation Model (DEM) tile: a rectangular,
//! regularly sampled grid of ground elevations covering a bounded
//! latitude/longitude extent.
//!
//! ## Overview
//!
//! - [`Tile`] is the contract loaders, caches and terrain-intersection code
//!   depend on: geometry setup, elevation get/set, coverage test and
//!   elevation bounds.
//! - [`BaseTile`] implements the bookkeeping shared by every storage
//!   strategy: geometry, running min/max elevation and index validation.
//! - [`TileStorage`] is the storage-specific extension point. [`GridStorage`]
//!   is a dense in-memory grid; [`SimpleTile`] pairs it with [`BaseTile`].
//!
//! Loading tiles from files, choosing among several tiles and interpolating
//! between grid points are left to higher layers.
//!
//! ## Lifecycle
//!
//! A tile starts [`TileState::Empty`], gets its geometry once, receives
//! samples cell by cell and is finalized with
//! [`Tile::tile_update_completed`]. A finalized tile is read-only and can be
//! shared between threads behind an `Arc`.
//!
//! ## Example
//!
//! ```
//! use dem_tile::{SimpleTile, Tile, TileError, TileGeometry};
//!
//! let mut tile = SimpleTile::with_geometry(TileGeometry::new(0.0, 0.0, 1.0, 1.0, 3, 3))?;
//! tile.set_elevation(0, 0, 10.0)?;
//! tile.set_elevation(1, 1, 50.0)?;
//! tile.set_elevation(2, 2, 5.0)?;
//! tile.tile_update_completed()?;
//!
//! assert_eq!(tile.min_elevation(), 5.0);
//! assert_eq!(tile.max_elevation(), 50.0);
//! assert!(tile.covers(0.5, 0.5));
//! assert!(!tile.covers(3.0, 0.0));
//! assert!(matches!(
//!     tile.elevation_at_indices(3, 0),
//!     Err(TileError::IndexOutOfBounds { max_latitude_index: 2, max_longitude_index: 2, .. })
//! ));
//! # Ok::<(), dem_tile::TileError>(())
//! ```

mod error;
mod geometry;
mod storage;
mod tile;

pub use error::TileError;
pub use geometry::{Footprint, TileGeometry};
pub use storage::{GridStorage, TileStorage};
pub use tile::{BaseTile, SimpleTile, Tile, TileState};

/// Result type for tile operations.
pub type Result<T> = std::result::Result<T, TileError>;
