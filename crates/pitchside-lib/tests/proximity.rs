//! Integration tests for distance and proximity ranking.
//!
//! These tests verify:
//! - Symmetry, identity and the triangle inequality across the globe
//! - Ranking the Madrid fixture catalog for every entity kind
//! - Graceful handling of a missing reference location

mod common;

use pitchside_lib::{
    distance_km, rank_by_proximity, Catalog, Coordinate, Entity, NearbySummary, ProximityQuery,
};

const MADRID: Coordinate = Coordinate::new(40.4168, -3.7038);

/// Coarse global grid including poles, the equator and the antimeridian.
fn sample_points() -> Vec<Coordinate> {
    let mut points = Vec::new();
    for lat in [-90.0, -60.5, -33.9, 0.0, 12.25, 40.4168, 71.0, 90.0] {
        for lon in [-180.0, -122.4, -3.7038, 0.0, 2.17, 151.2, 180.0] {
            points.push(Coordinate::new(lat, lon));
        }
    }
    points
}

#[test]
fn distance_is_symmetric() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let ab = distance_km(*a, *b);
            let ba = distance_km(*b, *a);
            assert!((ab - ba).abs() < 1e-9, "{a} <-> {b}: {ab} vs {ba}");
        }
    }
}

#[test]
fn distance_to_self_is_zero() {
    for point in sample_points() {
        assert_eq!(distance_km(point, point), 0.0, "{point}");
    }
}

#[test]
fn distance_is_finite_and_non_negative() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let d = distance_km(*a, *b);
            assert!(d.is_finite() && d >= 0.0, "{a} -> {b}: {d}");
        }
    }
}

#[test]
fn distance_respects_triangle_inequality() {
    let points = sample_points();
    let epsilon = 1e-6;
    for a in points.iter().step_by(3) {
        for b in points.iter().step_by(2) {
            for c in &points {
                let direct = distance_km(*a, *c);
                let via = distance_km(*a, *b) + distance_km(*b, *c);
                assert!(direct <= via + epsilon, "{a} -> {b} -> {c}");
            }
        }
    }
}

fn labels<T: Entity>(ranked: &[pitchside_lib::Ranked<T>]) -> Vec<String> {
    ranked.iter().map(|r| r.entity.label().to_string()).collect()
}

#[test]
fn ranks_fixture_players_around_madrid() {
    let catalog = Catalog::from_path(&common::madrid_catalog_path()).expect("fixture loads");
    let ranked = rank_by_proximity(Some(MADRID), catalog.players.iter(), 10.0);

    assert_eq!(labels(&ranked), vec!["Ana", "Marta", "Sam"]);
    assert_eq!(ranked[0].distance_km, Some(0.0));
    let marta = ranked[1].distance_km.expect("Marta is located");
    assert!((marta - 3.7).abs() < 0.1);
    assert!(ranked[2].distance_km.is_none());
}

#[test]
fn ranks_fixture_games_using_field_locations() {
    let catalog = Catalog::from_path(&common::madrid_catalog_path()).expect("fixture loads");
    let ranked = rank_by_proximity(Some(MADRID), catalog.games.iter(), 10.0);

    assert_eq!(
        labels(&ranked),
        vec!["Sunday 3v3", "Retiro Sevens", "Beach volley meetup"]
    );
}

#[test]
fn ranks_fixture_fields_with_limit() {
    let catalog = Catalog::from_path(&common::madrid_catalog_path()).expect("fixture loads");
    let query = ProximityQuery::within(10.0).with_limit(2);
    let summary = NearbySummary::build(Some(MADRID), &query, catalog.fields.iter());

    assert_eq!(summary.total, 4);
    assert_eq!(labels(&summary.results), vec!["Plaza Mayor Court", "Retiro Pitch"]);
}

#[test]
fn missing_reference_returns_catalog_order() {
    let catalog = Catalog::from_path(&common::madrid_catalog_path()).expect("fixture loads");
    let ranked = rank_by_proximity(None, catalog.fields.iter(), 10.0);

    let expected: Vec<String> = catalog.fields.iter().map(|f| f.name.clone()).collect();
    assert_eq!(labels(&ranked), expected);
    assert!(ranked.iter().all(|r| r.distance_km.is_none()));
}
