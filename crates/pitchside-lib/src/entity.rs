//! Domain records that can be ranked by proximity.
//!
//! Coordinates are kept as two optional columns, mirroring the backend rows.
//! A record is only considered located when *both* are present; a value of
//! `0.0` is a real position (equator / prime meridian), never "unset".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Anything that may carry a geographic position.
pub trait Locatable {
    /// Position of the record, or `None` when it has not been set.
    fn coordinate(&self) -> Option<Coordinate>;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// A catalog record with an identifier and a human-readable label.
pub trait Entity: Locatable {
    /// Kind used in summaries and error messages.
    const KIND: EntityKind;

    /// Stable identifier (backend primary key).
    fn id(&self) -> &str;

    /// Name shown in list rows and map markers.
    fn label(&self) -> &str;
}

impl<T: Entity> Entity for &T {
    const KIND: EntityKind = T::KIND;

    fn id(&self) -> &str {
        (**self).id()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// The three kinds of record the app lists near the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Game,
    Field,
}

impl EntityKind {
    /// Singular lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Game => "game",
            EntityKind::Field => "field",
        }
    }

    /// Plural lowercase name, also the SQLite table name.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Player => "players",
            EntityKind::Game => "games",
            EntityKind::Field => "fields",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" | "players" => Ok(EntityKind::Player),
            "game" | "games" => Ok(EntityKind::Game),
            "field" | "fields" | "court" | "courts" => Ok(EntityKind::Field),
            _ => Err(Error::UnknownEntityKind {
                name: s.to_string(),
            }),
        }
    }
}

fn coordinate_from(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    latitude
        .zip(longitude)
        .map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// A player profile. Location is optional; players may keep it private.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourite_sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Locatable for Player {
    fn coordinate(&self) -> Option<Coordinate> {
        coordinate_from(self.latitude, self.longitude)
    }
}

impl Entity for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.display_name
    }
}

/// A public sports field or court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Locatable for Field {
    fn coordinate(&self) -> Option<Coordinate> {
        coordinate_from(self.latitude, self.longitude)
    }
}

impl Entity for Field {
    const KIND: EntityKind = EntityKind::Field;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A pickup game, usually hosted at a [`Field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    /// RFC 3339 start time as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Game {
    /// Copy the field's position onto the game when the game has none.
    ///
    /// Returns true if the location was filled in.
    pub fn inherit_location(&mut self, field: &Field) -> bool {
        if self.coordinate().is_some() {
            return false;
        }
        match field.coordinate() {
            Some(coordinate) => {
                self.latitude = Some(coordinate.latitude);
                self.longitude = Some(coordinate.longitude);
                true
            }
            None => false,
        }
    }
}

impl Locatable for Game {
    fn coordinate(&self) -> Option<Coordinate> {
        coordinate_from(self.latitude, self.longitude)
    }
}

impl Entity for Game {
    const KIND: EntityKind = EntityKind::Game;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(lat: Option<f64>, lon: Option<f64>) -> Field {
        Field {
            id: "f1".to_string(),
            name: "Retiro Courts".to_string(),
            sport: Some("basketball".to_string()),
            surface: None,
            address: None,
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn zero_coordinates_count_as_located() {
        let f = field(Some(0.0), Some(0.0));
        assert_eq!(f.coordinate(), Some(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn half_a_coordinate_is_unlocated() {
        assert_eq!(field(Some(40.0), None).coordinate(), None);
        assert_eq!(field(None, Some(-3.0)).coordinate(), None);
    }

    #[test]
    fn borrowed_records_are_locatable() {
        let f = field(Some(1.0), Some(2.0));
        let borrowed: &Field = &f;
        assert_eq!(Locatable::coordinate(&borrowed), f.coordinate());
        assert_eq!(<&Field as Entity>::KIND, EntityKind::Field);
    }

    #[test]
    fn game_inherits_field_location_only_when_missing() {
        let host = field(Some(40.42), Some(-3.68));
        let mut game = Game {
            id: "g1".to_string(),
            title: "Sunday 3v3".to_string(),
            sport: None,
            field_id: Some("f1".to_string()),
            starts_at: None,
            max_players: Some(6),
            latitude: None,
            longitude: None,
        };
        assert!(game.inherit_location(&host));
        assert_eq!(game.coordinate(), host.coordinate());

        let elsewhere = field(Some(0.0), Some(0.0));
        assert!(!game.inherit_location(&elsewhere));
        assert_eq!(game.coordinate(), host.coordinate());
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("Players".parse::<EntityKind>().unwrap(), EntityKind::Player);
        assert_eq!("courts".parse::<EntityKind>().unwrap(), EntityKind::Field);
        assert_eq!("game".parse::<EntityKind>().unwrap(), EntityKind::Game);
        assert!(matches!(
            "stadiums".parse::<EntityKind>(),
            Err(Error::UnknownEntityKind { .. })
        ));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let player: Player =
            serde_json::from_str(r#"{"id":"p1","display_name":"Ana"}"#).expect("valid player");
        assert!(player.coordinate().is_none());
        assert!(player.skill_level.is_none());
    }
}
