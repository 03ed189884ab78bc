//! Pitchside library entry points.
//!
//! This crate ranks players, pickup games and sports fields by great-circle
//! distance from a reference location, and loads the catalogs they come from.
//! Higher-level consumers (the CLI, app bindings) should only depend on the
//! functions exported here instead of reimplementing the distance formula or
//! the missing-location policy.
//!

#![deny(warnings)]

pub mod catalog;
pub mod dataset;
pub mod db;
pub mod entity;
pub mod error;
pub mod geo;
pub mod location;
pub mod output;
pub mod proximity;

pub use catalog::Catalog;
pub use dataset::{
    default_dataset_path, load_dataset, load_dataset_near, resolve_dataset_path, DatasetFormat,
    DATASET_ENV_VAR,
};
pub use db::{load_catalog, load_catalog_near};
pub use entity::{Entity, EntityKind, Field, Game, Locatable, Player};
pub use error::{Error, Result};
pub use geo::{distance_km, BoundingBox, Coordinate, EARTH_RADIUS_KM};
pub use location::{resolve_reference, LOCATION_ENV_VAR};
pub use output::{NearbyRenderMode, NearbySummary};
pub use proximity::{rank_by_proximity, ProximityQuery, Ranked, DEFAULT_RADIUS_KM};
