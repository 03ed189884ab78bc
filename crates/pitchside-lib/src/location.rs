//! Reference location resolution.
//!
//! The app's location provider owns permission prompts and platform APIs.
//! Here it is reduced to its last resolved value: an explicit coordinate, or
//! the `PITCHSIDE_LOCATION` environment variable. Anything unusable resolves
//! to `None`, which the ranking treats as "location unknown".

use std::env;

use tracing::{debug, warn};

use crate::geo::Coordinate;

/// Environment variable holding a default `LAT,LON` reference.
pub const LOCATION_ENV_VAR: &str = "PITCHSIDE_LOCATION";

/// Resolve the reference location for a nearby query.
pub fn resolve_reference(explicit: Option<Coordinate>) -> Option<Coordinate> {
    if explicit.is_some() {
        return explicit;
    }
    parse_reference(env::var(LOCATION_ENV_VAR).ok().as_deref())
}

/// Parse a stored `LAT,LON` value, logging and discarding malformed input.
pub fn parse_reference(value: Option<&str>) -> Option<Coordinate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match value.parse::<Coordinate>() {
        Ok(coordinate) => {
            debug!(%coordinate, "using reference location from environment");
            Some(coordinate)
        }
        Err(err) => {
            warn!(
                variable = LOCATION_ENV_VAR,
                error = %err,
                "ignoring unusable reference location"
            );
            None
        }
    }
}
