//! Proximity ranking shared by the nearby players, games and fields views.
//!
//! # Missing data policy
//!
//! - No reference location: every entity is returned in input order with no
//!   distance. A user without location access still sees the whole catalog.
//! - Entity without a coordinate: always kept, sorted after every entity with
//!   a known distance, in input order.
//! - Non-finite distance (malformed coordinates): dropped by the radius check,
//!   since `NaN <= radius` is false.
//! - Radius `<= 0` or NaN: every entity with a known distance is dropped.

use std::cmp::Ordering;

use serde::Serialize;

use crate::entity::Locatable;
use crate::geo::{distance_km, Coordinate};

/// Radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// An entity decorated with its distance from the reference point.
///
/// Built fresh on every ranking pass and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub entity: T,
    /// Kilometres from the reference; `None` when either side has no location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl<T> Ranked<T> {
    fn unranked(entity: T) -> Self {
        Self {
            entity,
            distance_km: None,
        }
    }
}

/// Rank entities by distance from `reference`, keeping those within `radius_km`.
///
/// Accepts owned records or borrows (`&records`), since `&T` is
/// [`Locatable`] whenever `T` is. The sort is stable, so ties and unlocated
/// entities keep their input order.
pub fn rank_by_proximity<T, I>(
    reference: Option<Coordinate>,
    entities: I,
    radius_km: f64,
) -> Vec<Ranked<T>>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
{
    let Some(reference) = reference else {
        return entities.into_iter().map(Ranked::unranked).collect();
    };

    // Written as `>` so a NaN radius also rejects everything.
    let radius_usable = radius_km > 0.0;

    let mut ranked: Vec<Ranked<T>> = entities
        .into_iter()
        .filter_map(|entity| match entity.coordinate() {
            None => Some(Ranked::unranked(entity)),
            Some(position) => {
                let distance = distance_km(reference, position);
                (radius_usable && distance <= radius_km).then_some(Ranked {
                    entity,
                    distance_km: Some(distance),
                })
            }
        })
        .collect();

    ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    ranked
}

/// Known distances ascending, unknown distances last.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Radius and result cap for a nearby query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    /// Maximum distance in kilometres.
    pub radius_km: f64,
    /// Maximum number of results, applied after sorting.
    pub limit: Option<usize>,
}

impl Default for ProximityQuery {
    fn default() -> Self {
        Self::within(DEFAULT_RADIUS_KM)
    }
}

impl ProximityQuery {
    /// Query with a radius and no result cap.
    pub fn within(radius_km: f64) -> Self {
        Self {
            radius_km,
            limit: None,
        }
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Rank entities and apply the result cap.
    pub fn rank<T, I>(&self, reference: Option<Coordinate>, entities: I) -> Vec<Ranked<T>>
    where
        T: Locatable,
        I: IntoIterator<Item = T>,
    {
        let mut ranked = rank_by_proximity(reference, entities, self.radius_km);
        self.truncate(&mut ranked);
        ranked
    }

    /// Drop everything past the limit, keeping the nearest entries.
    pub fn truncate<T>(&self, ranked: &mut Vec<Ranked<T>>) {
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }
    }
}
