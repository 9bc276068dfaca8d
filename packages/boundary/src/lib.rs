#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State boundary store.
//!
//! Loads a `GeoJSON` `FeatureCollection` of state features (one feature per
//! state, `Polygon` or `MultiPolygon` geometry, a name property) into strict
//! [`StateBoundary`] values and answers "does point P lie inside state S".
//!
//! The store is built once per run and read-only afterwards, so it can be
//! shared across concurrent lookups without locking.

use std::collections::BTreeMap;
use std::path::Path;

use geojson::{GeoJson, Value};
use state_days_geometry::{Point, Polygon, Ring};
use thiserror::Error;

/// Name property key used by the public US states `GeoJSON` datasets.
pub const DEFAULT_NAME_PROPERTY: &str = "NAME";

/// Errors that can occur while loading or querying boundary data.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Boundary file could not be read.
    #[error("Failed to read boundary data: {0}")]
    Io(#[from] std::io::Error),

    /// Boundary input is not valid `GeoJSON`.
    #[error("Failed to parse boundary data: {0}")]
    Parse(#[from] geojson::Error),

    /// A feature is missing required fields or carries unsupported geometry.
    #[error("Malformed boundary data: {message}")]
    MalformedBoundaryData {
        /// Description of what was wrong with the feature.
        message: String,
    },

    /// Two features resolved to the same state name.
    #[error("Duplicate state name in boundary data: {name}")]
    DuplicateState {
        /// The name shared by more than one feature.
        name: String,
    },

    /// Requested state name is absent from the loaded set.
    #[error("Unknown state: {name}")]
    UnknownState {
        /// The name that was requested.
        name: String,
    },
}

impl BoundaryError {
    fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBoundaryData {
            message: message.into(),
        }
    }
}

/// A named state with its constituent polygons.
///
/// A state may be a multi-polygon (islands, exclaves); a point is a member of
/// the state iff it is a member of at least one constituent polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct StateBoundary {
    name: String,
    polygons: Vec<Polygon>,
}

impl StateBoundary {
    #[must_use]
    pub fn new(name: String, polygons: Vec<Polygon>) -> Self {
        Self { name, polygons }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Whether the point lies inside this state.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.polygons.iter().any(|polygon| polygon.contains(point))
    }
}

/// Read-only index of state boundaries keyed by state name.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryStore {
    states: BTreeMap<String, StateBoundary>,
}

impl BoundaryStore {
    /// Loads boundaries from a `GeoJSON` file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the file cannot be read or its content
    /// fails [`Self::from_geojson_str`].
    pub fn from_geojson_file(path: &Path, name_property: &str) -> Result<Self, BoundaryError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&data, name_property)
    }

    /// Loads boundaries from `GeoJSON` text.
    ///
    /// Each feature must carry a string property `name_property` and a
    /// `Polygon` or `MultiPolygon` geometry. Coordinates are `[lon, lat]`
    /// pairs and are converted to the internal latitude/longitude [`Point`]s.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::MalformedBoundaryData`] on a feature without
    /// the name property, with missing or non-polygon geometry, or with a
    /// degenerate ring, and [`BoundaryError::DuplicateState`] when two
    /// features share a name.
    pub fn from_geojson_str(data: &str, name_property: &str) -> Result<Self, BoundaryError> {
        let geojson: GeoJson = data.parse()?;
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(BoundaryError::malformed(
                "boundary data is not a FeatureCollection",
            ));
        };

        let mut states = BTreeMap::new();

        for feature in collection.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(name_property))
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| {
                    BoundaryError::malformed(format!(
                        "feature is missing string property \"{name_property}\""
                    ))
                })?
                .to_string();

            let geometry = feature.geometry.ok_or_else(|| {
                BoundaryError::malformed(format!("feature \"{name}\" has no geometry"))
            })?;

            let polygons = match geometry.value {
                Value::Polygon(rings) => vec![convert_polygon(&name, &rings)?],
                Value::MultiPolygon(parts) => parts
                    .iter()
                    .map(|rings| convert_polygon(&name, rings))
                    .collect::<Result<Vec<_>, _>>()?,
                other => {
                    return Err(BoundaryError::malformed(format!(
                        "feature \"{name}\" has unsupported geometry type {}",
                        other.type_name()
                    )));
                }
            };

            if states.contains_key(&name) {
                return Err(BoundaryError::DuplicateState { name });
            }
            states.insert(name.clone(), StateBoundary::new(name, polygons));
        }

        log::info!("Loaded {} state boundaries", states.len());

        Ok(Self { states })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Names of all loaded states, in sorted order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Looks up a state by name.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::UnknownState`] if the name is not loaded.
    pub fn state(&self, name: &str) -> Result<&StateBoundary, BoundaryError> {
        self.states
            .get(name)
            .ok_or_else(|| BoundaryError::UnknownState {
                name: name.to_string(),
            })
    }

    /// Whether the point lies inside the named state.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::UnknownState`] if the name is not loaded.
    pub fn contains(&self, state_name: &str, point: Point) -> Result<bool, BoundaryError> {
        Ok(self.state(state_name)?.contains(point))
    }
}

/// Converts one `GeoJSON` polygon (outer ring + holes) into a strict [`Polygon`].
fn convert_polygon(name: &str, rings: &[Vec<Vec<f64>>]) -> Result<Polygon, BoundaryError> {
    let mut converted = rings
        .iter()
        .map(|ring| convert_ring(name, ring))
        .collect::<Result<Vec<_>, _>>()?;

    if converted.is_empty() {
        return Err(BoundaryError::malformed(format!(
            "feature \"{name}\" has a polygon with no rings"
        )));
    }

    let outer = converted.remove(0);
    Ok(Polygon::new(outer, converted))
}

fn convert_ring(name: &str, positions: &[Vec<f64>]) -> Result<Ring, BoundaryError> {
    let mut points = Vec::with_capacity(positions.len());

    for position in positions {
        // GeoJSON positions are [lon, lat, (elevation)].
        let (Some(&lon), Some(&lat)) = (position.first(), position.get(1)) else {
            return Err(BoundaryError::malformed(format!(
                "feature \"{name}\" has a coordinate with fewer than 2 components"
            )));
        };
        if !lon.is_finite() || !lat.is_finite() {
            return Err(BoundaryError::malformed(format!(
                "feature \"{name}\" has a non-finite coordinate"
            )));
        }
        points.push(Point::new(lat, lon));
    }

    let ring = Ring::new(points);
    if ring.points().len() < 3 {
        return Err(BoundaryError::malformed(format!(
            "feature \"{name}\" has a ring with fewer than 3 distinct points"
        )));
    }

    Ok(ring)
}
