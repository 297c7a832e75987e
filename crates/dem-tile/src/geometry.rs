//! Tile geometry: origin, sample spacing and grid dimensions.

use crate::{Result, TileError};

/// Geometry of a regularly sampled elevation tile.
///
/// The tile covers the half-open rectangle
/// `[min_latitude, min_latitude + latitude_rows * latitude_step)` x
/// `[min_longitude, min_longitude + longitude_columns * longitude_step)`.
/// Angular units are left to the caller (radians or degrees) but must be
/// used consistently for every query against the same tile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGeometry {
    /// Latitude of the lower corner (first row).
    pub min_latitude: f64,
    /// Longitude of the lower corner (first column).
    pub min_longitude: f64,
    /// Step in latitude (size of one raster element).
    pub latitude_step: f64,
    /// Step in longitude (size of one raster element).
    pub longitude_step: f64,
    /// Number of latitude rows.
    pub latitude_rows: usize,
    /// Number of longitude columns.
    pub longitude_columns: usize,
}

impl TileGeometry {
    /// Create a geometry from its six parameters.
    ///
    /// No validation happens here; see [`TileGeometry::validate`].
    pub fn new(
        min_latitude: f64,
        min_longitude: f64,
        latitude_step: f64,
        longitude_step: f64,
        latitude_rows: usize,
        longitude_columns: usize,
    ) -> Self {
        Self {
            min_latitude,
            min_longitude,
            latitude_step,
            longitude_step,
            latitude_rows,
            longitude_columns,
        }
    }

    /// Check that steps are strictly positive and finite, dimensions are
    /// non-zero and the origin is finite.
    pub fn validate(&self) -> Result<()> {
        if !self.min_latitude.is_finite() {
            return Err(TileError::invalid_geometry(format!(
                "minimum latitude must be finite, got {}",
                self.min_latitude
            )));
        }
        if !self.min_longitude.is_finite() {
            return Err(TileError::invalid_geometry(format!(
                "minimum longitude must be finite, got {}",
                self.min_longitude
            )));
        }
        // Negated comparison so that NaN is rejected too.
        if !(self.latitude_step > 0.0) || !self.latitude_step.is_finite() {
            return Err(TileError::invalid_geometry(format!(
                "latitude step must be strictly positive, got {}",
                self.latitude_step
            )));
        }
        if !(self.longitude_step > 0.0) || !self.longitude_step.is_finite() {
            return Err(TileError::invalid_geometry(format!(
                "longitude step must be strictly positive, got {}",
                self.longitude_step
            )));
        }
        if self.latitude_rows == 0 {
            return Err(TileError::invalid_geometry("latitude rows must be positive"));
        }
        if self.longitude_columns == 0 {
            return Err(TileError::invalid_geometry(
                "longitude columns must be positive",
            ));
        }
        Ok(())
    }

    /// Total number of samples in the grid, if it fits in `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        self.latitude_rows.checked_mul(self.longitude_columns)
    }

    /// Latitude of the row with the given index.
    pub fn latitude_at_index(&self, latitude_index: i64) -> f64 {
        self.min_latitude + latitude_index as f64 * self.latitude_step
    }

    /// Longitude of the column with the given index.
    pub fn longitude_at_index(&self, longitude_index: i64) -> f64 {
        self.min_longitude + longitude_index as f64 * self.longitude_step
    }

    /// Row index of the grid cell containing `latitude`, by floor division.
    ///
    /// Returns `None` when the index is not a finite number (NaN input).
    /// Magnitudes beyond `i64` saturate.
    pub fn floor_latitude_index(&self, latitude: f64) -> Option<i64> {
        floor_index(latitude, self.min_latitude, self.latitude_step)
    }

    /// Column index of the grid cell containing `longitude`, by floor division.
    ///
    /// Returns `None` when the index is not a finite number (NaN input).
    /// Magnitudes beyond `i64` saturate.
    pub fn floor_longitude_index(&self, longitude: f64) -> Option<i64> {
        floor_index(longitude, self.min_longitude, self.longitude_step)
    }

    /// Half-open containment test on the tile footprint.
    ///
    /// A point is covered when its floor-division indices lie in
    /// `[0, latitude_rows)` x `[0, longitude_columns)`. Populated cells are
    /// not checked.
    pub fn covers(&self, latitude: f64, longitude: f64) -> bool {
        let lat_index = ((latitude - self.min_latitude) / self.latitude_step).floor();
        let lon_index = ((longitude - self.min_longitude) / self.longitude_step).floor();

        // Float comparisons keep NaN out and avoid saturating casts at the edges.
        lat_index >= 0.0
            && lat_index < self.latitude_rows as f64
            && lon_index >= 0.0
            && lon_index < self.longitude_columns as f64
    }

    /// Geographic footprint of the grid.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            min_lat: self.min_latitude,
            max_lat: self.latitude_at_index(self.latitude_rows as i64),
            min_lon: self.min_longitude,
            max_lon: self.longitude_at_index(self.longitude_columns as i64),
        }
    }
}

fn floor_index(coordinate: f64, min: f64, step: f64) -> Option<i64> {
    let index = ((coordinate - min) / step).floor();
    if index.is_nan() {
        None
    } else {
        Some(index as i64)
    }
}

/// Geographic extent covered by a tile.
///
/// The maximum edges are excluded: they are the first latitude/longitude
/// past the last row/column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    /// Minimum latitude (first row).
    pub min_lat: f64,
    /// Excluded maximum latitude.
    pub max_lat: f64,
    /// Minimum longitude (first column).
    pub min_lon: f64,
    /// Excluded maximum longitude.
    pub max_lon: f64,
}

impl Footprint {
    /// Check if a coordinate is within the half-open rectangle.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat < self.max_lat && lon >= self.min_lon && lon < self.max_lon
    }

    /// Extent in latitude and longitude, as (lat_span, lon_span).
    pub fn span(&self) -> (f64, f64) {
        (self.max_lat - self.min_lat, self.max_lon - self.min_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_geometry() -> TileGeometry {
        TileGeometry::new(0.0, 0.0, 1.0, 1.0, 3, 3)
    }

    #[test]
    fn test_validate_accepts_positive_geometry() {
        assert!(unit_geometry().validate().is_ok());
        assert!(TileGeometry::new(-0.5, 2.1, 1.0e-4, 2.0e-4, 1, 1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let geometry = TileGeometry::new(0.0, 0.0, step, 1.0, 3, 3);
            assert!(
                matches!(geometry.validate(), Err(TileError::InvalidGeometry { .. })),
                "latitude step {} should be rejected",
                step
            );
            let geometry = TileGeometry::new(0.0, 0.0, 1.0, step, 3, 3);
            assert!(
                matches!(geometry.validate(), Err(TileError::InvalidGeometry { .. })),
                "longitude step {} should be rejected",
                step
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let geometry = TileGeometry::new(0.0, 0.0, 1.0, 1.0, 0, 3);
        assert!(matches!(geometry.validate(), Err(TileError::InvalidGeometry { .. })));
        let geometry = TileGeometry::new(0.0, 0.0, 1.0, 1.0, 3, 0);
        assert!(matches!(geometry.validate(), Err(TileError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_validate_rejects_non_finite_origin() {
        let geometry = TileGeometry::new(f64::NAN, 0.0, 1.0, 1.0, 3, 3);
        assert!(geometry.validate().is_err());
        let geometry = TileGeometry::new(0.0, f64::NEG_INFINITY, 1.0, 1.0, 3, 3);
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_floor_indices() {
        let geometry = TileGeometry::new(10.0, -5.0, 0.5, 0.25, 4, 8);
        assert_eq!(geometry.floor_latitude_index(10.0), Some(0));
        assert_eq!(geometry.floor_latitude_index(10.49), Some(0));
        assert_eq!(geometry.floor_latitude_index(10.5), Some(1));
        assert_eq!(geometry.floor_latitude_index(9.99), Some(-1));
        assert_eq!(geometry.floor_longitude_index(-4.0), Some(4));
        assert_eq!(geometry.floor_longitude_index(f64::NAN), None);
    }

    #[test]
    fn test_index_coordinates() {
        let geometry = TileGeometry::new(10.0, -5.0, 0.5, 0.25, 4, 8);
        assert_relative_eq!(geometry.latitude_at_index(0), 10.0);
        assert_relative_eq!(geometry.latitude_at_index(3), 11.5);
        assert_relative_eq!(geometry.longitude_at_index(8), -3.0);
        assert_relative_eq!(geometry.longitude_at_index(-2), -5.5);
    }

    #[test]
    fn test_covers_half_open() {
        let geometry = unit_geometry();
        assert!(geometry.covers(0.0, 0.0));
        assert!(geometry.covers(0.5, 0.5));
        assert!(geometry.covers(2.999, 2.999));
        assert!(!geometry.covers(3.0, 0.0));
        assert!(!geometry.covers(0.0, 3.0));
        assert!(!geometry.covers(-0.001, 1.0));
        assert!(!geometry.covers(1.0, -0.001));
        assert!(!geometry.covers(f64::NAN, 1.0));
        assert!(!geometry.covers(1.0e300, 1.0));
    }

    #[test]
    fn test_footprint() {
        let geometry = TileGeometry::new(47.0, -123.0, 0.25, 0.5, 4, 2);
        let footprint = geometry.footprint();

        assert_relative_eq!(footprint.min_lat, 47.0);
        assert_relative_eq!(footprint.max_lat, 48.0);
        assert_relative_eq!(footprint.min_lon, -123.0);
        assert_relative_eq!(footprint.max_lon, -122.0);

        let (lat_span, lon_span) = footprint.span();
        assert_relative_eq!(lat_span, 1.0);
        assert_relative_eq!(lon_span, 1.0);

        assert!(footprint.contains(47.5, -122.5));
        assert!(footprint.contains(47.0, -123.0)); // Lower corner
        assert!(!footprint.contains(48.0, -122.5)); // Upper edge excluded
        assert!(!footprint.contains(47.5, -122.0));
        assert!(!footprint.contains(46.5, -122.5));
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(unit_geometry().sample_count(), Some(9));
        let huge = TileGeometry::new(0.0, 0.0, 1.0, 1.0, usize::MAX, 2);
        assert_eq!(huge.sample_count(), None);
    }
}
