use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entity::{Entity, EntityKind, Field, Game, Player};
use crate::error::{Error, Result};

/// In-memory snapshot of the backend's players, games and fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Catalog {
    /// Load a catalog from a JSON export on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading JSON catalog");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a JSON catalog, validate identifiers and resolve game locations.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        catalog.resolve_game_locations();
        Ok(catalog)
    }

    /// Number of records of the given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => self.players.len(),
            EntityKind::Game => self.games.len(),
            EntityKind::Field => self.fields.len(),
        }
    }

    /// Reject catalogs where two records of one kind share an id.
    pub fn validate(&self) -> Result<()> {
        ensure_unique_ids(&self.players)?;
        ensure_unique_ids(&self.games)?;
        ensure_unique_ids(&self.fields)?;
        Ok(())
    }

    /// Give games without their own position the position of their field.
    ///
    /// Returns the number of games that were updated.
    pub fn resolve_game_locations(&mut self) -> usize {
        let fields: HashMap<&str, &Field> = self
            .fields
            .iter()
            .map(|field| (field.id.as_str(), field))
            .collect();

        let mut resolved = 0usize;
        let mut dangling = 0usize;
        for game in &mut self.games {
            let Some(field_id) = game.field_id.as_deref() else {
                continue;
            };
            match fields.get(field_id) {
                Some(field) => {
                    if game.inherit_location(field) {
                        resolved += 1;
                    }
                }
                None => dangling += 1,
            }
        }

        if dangling > 0 {
            warn!(dangling, "ignored games referencing unknown fields");
        }
        resolved
    }
}

fn ensure_unique_ids<T: Entity>(records: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(Error::DuplicateEntity {
                kind: T::KIND.to_string(),
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}
