use std::fmt::Write;

use serde::Serialize;

use crate::entity::{Entity, EntityKind};
use crate::geo::Coordinate;
use crate::proximity::{rank_by_proximity, ProximityQuery, Ranked};

/// Presentation style for turning a [`NearbySummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyRenderMode {
    PlainText,
    /// Markdown, for pasting into a group chat.
    RichText,
}

/// Result of a nearby query, ready to be rendered or serialised.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbySummary<T> {
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Coordinate>,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Matches before the limit was applied.
    pub total: usize,
    pub results: Vec<Ranked<T>>,
}

impl<T: Entity> NearbySummary<T> {
    /// Rank `entities` for `query` and record the totals.
    pub fn build<I>(reference: Option<Coordinate>, query: &ProximityQuery, entities: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut results = rank_by_proximity(reference, entities, query.radius_km);
        let total = results.len();
        query.truncate(&mut results);

        Self {
            kind: T::KIND,
            reference,
            radius_km: query.radius_km,
            limit: query.limit,
            total,
            results,
        }
    }

    /// Number of results dropped by the limit.
    pub fn hidden(&self) -> usize {
        self.total.saturating_sub(self.results.len())
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: NearbyRenderMode) -> String {
        match mode {
            NearbyRenderMode::PlainText => self.render_plain(),
            NearbyRenderMode::RichText => self.render_rich(),
        }
    }

    /// Plain text rendering.
    pub fn render_text(&self) -> String {
        self.render(NearbyRenderMode::PlainText)
    }

    fn headline(&self) -> String {
        let noun = self.kind.plural();
        match self.reference {
            Some(reference) => format!(
                "{} {} within {} km of {}",
                self.total,
                noun,
                format_km(self.radius_km),
                reference
            ),
            None => format!("{} {} (location unknown, not filtered)", self.total, noun),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}:", self.headline());
        for result in &self.results {
            let _ = writeln!(
                buffer,
                " - {} ({})",
                result.entity.label(),
                describe_distance(result.distance_km)
            );
        }
        if self.hidden() > 0 {
            let _ = writeln!(buffer, "   ... and {} more", self.hidden());
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "**{}**", self.headline());
        for (index, result) in self.results.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{}. **{}** — _{}_",
                index + 1,
                result.entity.label(),
                describe_distance(result.distance_km)
            );
        }
        if self.hidden() > 0 {
            let _ = writeln!(buffer, "_…and {} more_", self.hidden());
        }
        buffer
    }
}

fn describe_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{} km", format_km(km)),
        None => "distance unknown".to_string(),
    }
}

/// One decimal place, dropping a trailing `.0`.
fn format_km(km: f64) -> String {
    let rounded = format!("{km:.1}");
    rounded
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(rounded)
}
