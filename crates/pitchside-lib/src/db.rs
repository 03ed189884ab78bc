use std::path::Path;

use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::entity::{EntityKind, Field, Game, Player};
use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinate};

/// Table layout expected for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableDefinition {
    kind: EntityKind,
    columns: &'static [&'static str],
}

const PLAYERS: TableDefinition = TableDefinition {
    kind: EntityKind::Player,
    columns: &[
        "id",
        "display_name",
        "favourite_sport",
        "skill_level",
        "latitude",
        "longitude",
    ],
};

const FIELDS: TableDefinition = TableDefinition {
    kind: EntityKind::Field,
    columns: &[
        "id",
        "name",
        "sport",
        "surface",
        "address",
        "latitude",
        "longitude",
    ],
};

const GAMES: TableDefinition = TableDefinition {
    kind: EntityKind::Game,
    columns: &[
        "id",
        "title",
        "sport",
        "field_id",
        "starts_at",
        "max_players",
        "latitude",
        "longitude",
    ],
};

impl TableDefinition {
    fn table(&self) -> &'static str {
        self.kind.plural()
    }
}

/// Load every player, game and field from a SQLite snapshot.
pub fn load_catalog(db_path: &Path) -> Result<Catalog> {
    load_catalog_near(db_path, None, f64::INFINITY)
}

/// Load a SQLite snapshot, skipping rows that cannot be within `radius_km`.
///
/// When a reference is given and a [`BoundingBox`] can be built, rows whose
/// position lies outside the box are left in the database. Rows without a
/// position are always loaded. The result still needs exact ranking with
/// [`crate::rank_by_proximity`]; the box is only a coarse prefilter.
pub fn load_catalog_near(
    db_path: &Path,
    reference: Option<Coordinate>,
    radius_km: f64,
) -> Result<Catalog> {
    if !db_path.exists() {
        return Err(Error::DatasetNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    for definition in [PLAYERS, FIELDS, GAMES] {
        check_table(&connection, &definition)?;
    }

    let bbox = reference.and_then(|center| BoundingBox::around(center, radius_km));
    debug!(
        path = %db_path.display(),
        prefilter = bbox.is_some(),
        "loading SQLite catalog"
    );

    let catalog = Catalog {
        players: load_players(&connection, bbox.as_ref())?,
        games: load_games(&connection, bbox.as_ref())?,
        fields: load_fields(&connection, bbox.as_ref())?,
    };
    catalog.validate()?;

    info!(
        players = catalog.players.len(),
        games = catalog.games.len(),
        fields = catalog.fields.len(),
        "loaded SQLite catalog"
    );

    Ok(catalog)
}

fn load_players(connection: &Connection, bbox: Option<&BoundingBox>) -> Result<Vec<Player>> {
    let sql = "SELECT CAST(id AS TEXT), display_name, favourite_sport, skill_level, \
               latitude, longitude FROM players";
    query_rows(connection, sql, bbox, row_to_player)
}

fn load_fields(connection: &Connection, bbox: Option<&BoundingBox>) -> Result<Vec<Field>> {
    let sql = "SELECT CAST(id AS TEXT), name, sport, surface, address, \
               latitude, longitude FROM fields";
    query_rows(connection, sql, bbox, row_to_field)
}

/// Games without a complete position of their own take their field's.
fn load_games(connection: &Connection, bbox: Option<&BoundingBox>) -> Result<Vec<Game>> {
    let sql = "SELECT CAST(g.id AS TEXT) AS id, g.title, g.sport, \
               CAST(g.field_id AS TEXT) AS field_id, g.starts_at, g.max_players, \
               CASE WHEN g.latitude IS NOT NULL AND g.longitude IS NOT NULL \
                    THEN g.latitude ELSE f.latitude END AS latitude, \
               CASE WHEN g.latitude IS NOT NULL AND g.longitude IS NOT NULL \
                    THEN g.longitude ELSE f.longitude END AS longitude \
               FROM games g LEFT JOIN fields f ON f.id = g.field_id";
    query_rows(connection, sql, bbox, row_to_game)
}

/// Run `base_sql`, wrapping it in a bounding-box filter when one is given.
///
/// `base_sql` must expose `latitude` and `longitude` columns.
fn query_rows<T>(
    connection: &Connection,
    base_sql: &str,
    bbox: Option<&BoundingBox>,
    map_row: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let (sql, params) = match bbox {
        Some(bbox) => (
            format!(
                "SELECT * FROM ({base_sql}) \
                 WHERE latitude IS NULL OR longitude IS NULL \
                 OR (latitude BETWEEN ?1 AND ?2 AND longitude BETWEEN ?3 AND ?4)"
            ),
            vec![
                bbox.min_latitude,
                bbox.max_latitude,
                bbox.min_longitude,
                bbox.max_longitude,
            ],
        ),
        None => (base_sql.to_string(), Vec::new()),
    };

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params), map_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        display_name: row.get(1)?,
        favourite_sport: row.get(2)?,
        skill_level: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
    })
}

fn row_to_field(row: &Row<'_>) -> rusqlite::Result<Field> {
    Ok(Field {
        id: row.get(0)?,
        name: row.get(1)?,
        sport: row.get(2)?,
        surface: row.get(3)?,
        address: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
    })
}

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        sport: row.get(2)?,
        field_id: row.get(3)?,
        starts_at: row.get(4)?,
        max_players: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
    })
}

fn check_table(connection: &Connection, definition: &TableDefinition) -> Result<()> {
    let table = definition.table();
    if !table_exists(connection, table)? {
        return Err(Error::MissingTable {
            table: table.to_string(),
        });
    }

    let present = table_columns(connection, table)?;
    let missing: Vec<String> = definition
        .columns
        .iter()
        .filter(|required| {
            !present
                .iter()
                .any(|column| column.eq_ignore_ascii_case(required))
        })
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns {
            table: table.to_string(),
            columns: missing,
        })
    }
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_columns(connection: &Connection, table: &str) -> Result<Vec<String>> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }
    Ok(columns)
}
