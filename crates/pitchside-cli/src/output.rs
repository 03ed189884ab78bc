//! Output formatting for nearby listings and distance checks.
//!
//! Text formats write human-friendly listings; JSON writes the library's
//! serialisable summaries unchanged so other tools can consume them.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use pitchside_lib::{Coordinate, Entity, NearbyRenderMode, NearbySummary};
use serde::Serialize;

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain listing, colored on capable terminals.
    #[default]
    Text,
    /// Markdown listing for sharing in chats.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Great-circle distance between two points, as reported by `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceReport {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
}

impl DistanceReport {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from,
            to,
            distance_km: from.distance_to(&to),
        }
    }
}

/// Format a nearby summary as a colored listing.
pub fn format_nearby_text<T: Entity>(summary: &NearbySummary<T>, palette: ColorPalette) -> String {
    let mut buffer = String::new();
    let noun = summary.kind.plural();

    match summary.reference {
        Some(reference) => {
            let _ = writeln!(
                buffer,
                "{}{} {} within {} km of {}{}",
                palette.cyan,
                summary.total,
                noun,
                summary.radius_km,
                reference,
                palette.reset
            );
        }
        None => {
            let _ = writeln!(
                buffer,
                "{}{} {}{} {}(location unknown, not filtered){}",
                palette.cyan,
                summary.total,
                noun,
                palette.reset,
                palette.gray,
                palette.reset
            );
        }
    }

    for result in &summary.results {
        let distance = match result.distance_km {
            Some(km) => format!("{}{:.1} km{}", palette.green, km, palette.reset),
            None => format!("{}distance unknown{}", palette.gray, palette.reset),
        };
        let _ = writeln!(
            buffer,
            " - {}{}{} ({})",
            palette.white_bold,
            result.entity.label(),
            palette.reset,
            distance
        );
    }

    let hidden = summary.hidden();
    if hidden > 0 {
        let _ = writeln!(
            buffer,
            "{}   ... and {} more (raise --limit to see them){}",
            palette.gray, hidden, palette.reset
        );
    }

    buffer
}

/// Print a nearby summary to stdout in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_nearby<T>(summary: &NearbySummary<T>, format: OutputFormat) -> io::Result<()>
where
    T: Entity + Serialize,
{
    match format {
        OutputFormat::Text => write_stdout(&format_nearby_text(summary, ColorPalette::detect())),
        OutputFormat::Rich => write_stdout(&summary.render(NearbyRenderMode::RichText)),
        OutputFormat::Json => render_json(summary),
    }
}

/// Print a distance report to stdout in the requested format.
pub fn render_distance(report: &DistanceReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_stdout(&format!(
            "{} -> {}: {:.1} km\n",
            report.from, report.to, report.distance_km
        )),
        OutputFormat::Rich => write_stdout(&format!(
            "**{:.1} km** from _{}_ to _{}_\n",
            report.distance_km, report.from, report.to
        )),
        OutputFormat::Json => render_json(report),
    }
}

fn render_json<S: Serialize + ?Sized>(value: &S) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
