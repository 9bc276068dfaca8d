//! Semantic Location History monthly files.
//!
//! Each monthly file holds a list of timeline objects. A `placeVisit`
//! contributes one sample at the visit's start; an `activitySegment`
//! contributes samples at its start and end locations. Waypoint paths are
//! not sampled; the segment endpoints bound the travel day already.

use serde::Deserialize;
use state_days_classify_models::LocationSample;
use state_days_geometry::Point;

use crate::parsing::{coordinate_from_e7, resolve_timestamp};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineMonth {
    #[serde(default)]
    timeline_objects: Vec<TimelineObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineObject {
    #[serde(default)]
    place_visit: Option<PlaceVisit>,
    #[serde(default)]
    activity_segment: Option<ActivitySegment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceVisit {
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    duration: Option<Duration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivitySegment {
    #[serde(default)]
    start_location: Option<RawLocation>,
    #[serde(default)]
    end_location: Option<RawLocation>,
    #[serde(default)]
    duration: Option<Duration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    #[serde(default)]
    latitude_e7: Option<i64>,
    #[serde(default)]
    longitude_e7: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Duration {
    #[serde(default)]
    start_timestamp_ms: Option<String>,
    #[serde(default)]
    start_timestamp: Option<String>,
    #[serde(default)]
    end_timestamp_ms: Option<String>,
    #[serde(default)]
    end_timestamp: Option<String>,
}

impl RawLocation {
    fn to_point(&self) -> Option<Point> {
        Some(Point::new(
            coordinate_from_e7(self.latitude_e7?),
            coordinate_from_e7(self.longitude_e7?),
        ))
    }
}

impl Duration {
    fn start(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        resolve_timestamp(
            self.start_timestamp_ms.as_deref(),
            self.start_timestamp.as_deref(),
        )
    }

    fn end(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        resolve_timestamp(
            self.end_timestamp_ms.as_deref(),
            self.end_timestamp.as_deref(),
        )
    }
}

/// Parses a Semantic Location History monthly document into samples.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the document as a whole is not valid
/// JSON of the expected shape. Individually incomplete timeline objects are
/// skipped and logged, not fatal.
pub fn parse_semantic_month(data: &str) -> Result<Vec<LocationSample>, serde_json::Error> {
    let month: TimelineMonth = serde_json::from_str(data)?;
    let total = month.timeline_objects.len();
    let mut samples = Vec::new();
    let mut skipped = 0_usize;

    for object in &month.timeline_objects {
        if let Some(visit) = &object.place_visit {
            match visit_sample(visit) {
                Some(sample) => samples.push(sample),
                None => skipped += 1,
            }
        } else if let Some(segment) = &object.activity_segment {
            let endpoints = segment_samples(segment);
            if endpoints.is_empty() {
                skipped += 1;
            }
            samples.extend(endpoints);
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} of {total} timeline objects with missing fields");
    }

    Ok(samples)
}

fn visit_sample(visit: &PlaceVisit) -> Option<LocationSample> {
    let point = visit.location.as_ref()?.to_point()?;
    let timestamp = visit.duration.as_ref()?.start()?;
    Some(LocationSample::new(timestamp, point))
}

/// Samples for whichever segment endpoints are complete.
fn segment_samples(segment: &ActivitySegment) -> Vec<LocationSample> {
    let mut samples = Vec::with_capacity(2);
    let Some(duration) = &segment.duration else {
        return samples;
    };

    if let (Some(point), Some(timestamp)) = (
        segment.start_location.as_ref().and_then(RawLocation::to_point),
        duration.start(),
    ) {
        samples.push(LocationSample::new(timestamp, point));
    }
    if let (Some(point), Some(timestamp)) = (
        segment.end_location.as_ref().and_then(RawLocation::to_point),
        duration.end(),
    ) {
        samples.push(LocationSample::new(timestamp, point));
    }

    samples
}
