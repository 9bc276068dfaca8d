#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar geometry primitives for boundary membership tests.
//!
//! Coordinates are raw WGS84 degrees treated as planar x/y (longitude/latitude).
//! At state-boundary precision no projection correction is applied; membership
//! is decided by a crossing-number (ray-casting) test per ring, with a
//! bounding-box pre-check per polygon to short-circuit the full scan on
//! high-resolution boundary data.
//!
//! A point exactly on a boundary edge counts as a member, for the outer ring
//! and for hole rings alike. Only the strict interior of a hole is excluded.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Latitude in degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub lon: f64,
}

impl Point {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both coordinates fall within valid WGS84 ranges.
    ///
    /// Out-of-range fixes show up in real exports (sign flips, E7 scaling
    /// mistakes) and must not be fed to the ring tests.
    #[must_use]
    pub fn in_valid_range(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Axis-aligned bounding box over latitude/longitude degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Computes the bounding box of a point set. Returns `None` for an empty set.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_lat: first.lat,
            min_lon: first.lon,
            max_lat: first.lat,
            max_lon: first.lon,
        };
        for p in &points[1..] {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.max_lon = bbox.max_lon.max(p.lon);
        }
        Some(bbox)
    }

    /// Inclusive containment check, so edge points survive the pre-filter.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

/// Where a point sits relative to a single ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPosition {
    /// Strictly inside the ring.
    Inside,
    /// Exactly on one of the ring's edges.
    OnEdge,
    /// Outside the ring.
    Outside,
}

/// An ordered closed loop of points, used as an outer boundary or a hole.
///
/// The closing edge from the last point back to the first is implicit; an
/// explicit duplicate closing point is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    #[must_use]
    pub fn new(mut points: Vec<Point>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Classifies a point against this ring with the crossing-number test.
    ///
    /// Casts a horizontal ray east from the point and counts edge crossings;
    /// an odd count means inside. Edges are checked for exact incidence first,
    /// so a point on the boundary reports [`RingPosition::OnEdge`] rather than
    /// falling into crossing-count ambiguity.
    #[must_use]
    pub fn locate(&self, point: Point) -> RingPosition {
        let n = self.points.len();
        let mut inside = false;

        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];

            if on_segment(a, b, point) {
                return RingPosition::OnEdge;
            }

            // Edge crosses the point's latitude with exactly one endpoint
            // strictly above it; the half-open comparison keeps vertex
            // crossings from being counted twice.
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let lon_at_lat = a.lon + (point.lat - a.lat) / (b.lat - a.lat) * (b.lon - a.lon);
                if point.lon < lon_at_lat {
                    inside = !inside;
                }
            }
        }

        if inside {
            RingPosition::Inside
        } else {
            RingPosition::Outside
        }
    }
}

/// One outer ring plus zero or more hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer: Ring,
    holes: Vec<Ring>,
    bbox: Option<BoundingBox>,
}

impl Polygon {
    #[must_use]
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Self {
        let bbox = BoundingBox::from_points(outer.points());
        Self { outer, holes, bbox }
    }

    #[must_use]
    pub fn outer(&self) -> &Ring {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    #[must_use]
    pub const fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Whether the point is a member of this polygon.
    ///
    /// Inside the outer ring (boundary included) and not strictly inside any
    /// hole. A point on a hole's edge is still on the polygon's boundary and
    /// therefore a member.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let Some(bbox) = self.bbox else {
            return false;
        };
        if !bbox.contains(point) {
            return false;
        }

        match self.outer.locate(point) {
            RingPosition::Outside => false,
            RingPosition::OnEdge => true,
            RingPosition::Inside => !self
                .holes
                .iter()
                .any(|hole| hole.locate(point) == RingPosition::Inside),
        }
    }
}

/// Whether `p` lies exactly on the segment from `a` to `b`.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon);
    if cross.abs() > f64::EPSILON {
        return false;
    }
    p.lon >= a.lon.min(b.lon)
        && p.lon <= a.lon.max(b.lon)
        && p.lat >= a.lat.min(b.lat)
        && p.lat <= a.lat.max(b.lat)
}
