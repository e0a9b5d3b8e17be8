// Peer-vote import.
//
// Reads the CSV export of the weekly voting form: one row per vote, with a
// Name column and one column per rated category. Votes for the same member
// are averaged into a single stat line.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::member::{Stat, StatLine};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Averaged votes for one member.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRating {
    pub name: String,
    pub stats: StatLine,
    /// Number of rows that contributed.
    pub votes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RatingsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("vote export {path} has no {column} column")]
    MissingColumn { path: String, column: &'static str },
}

// ---------------------------------------------------------------------------
// Header mapping (private)
// ---------------------------------------------------------------------------

/// Header spellings accepted for the member name column.
const NAME_HEADERS: [&str; 2] = ["name", "player"];

/// Positions of the name and category columns in one export. Form exports
/// carry extra columns (Timestamp, voter email, ...) which are ignored.
#[derive(Debug)]
struct Columns {
    name: usize,
    stats: [usize; 6],
}

impl Columns {
    /// Locate the required columns, or name the first one missing.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, &'static str> {
        let name = headers
            .iter()
            .position(|h| NAME_HEADERS.contains(&h.to_lowercase().as_str()))
            .ok_or("Name")?;

        let mut stats = [0; 6];
        for (slot, stat) in stats.iter_mut().zip(Stat::ALL) {
            *slot = headers
                .iter()
                .position(|h| Stat::from_str_stat(h) == Some(stat))
                .ok_or(stat.display_str())?;
        }
        Ok(Columns { name, stats })
    }

    /// Values are f64 because some forms use a decimal scale.
    fn values(&self, record: &csv::StringRecord) -> Option<[f64; 6]> {
        let mut values = [0.0; 6];
        for (value, &col) in values.iter_mut().zip(&self.stats) {
            *value = record.get(col)?.parse().ok()?;
        }
        Some(values)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Tally {
    sums: [f64; 6],
    votes: usize,
}

impl Tally {
    fn average(&self) -> StatLine {
        let mut line = StatLine::default();
        for (i, stat) in Stat::ALL.into_iter().enumerate() {
            line.set(stat, (self.sums[i] / self.votes as f64).round() as i64);
        }
        line
    }
}

fn load_ratings_from_reader<R: Read>(
    rdr: R,
    path: &str,
) -> Result<Vec<AggregatedRating>, RatingsError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

    let headers = reader.headers().map_err(|e| RatingsError::Csv {
        path: path.to_string(),
        source: e,
    })?;
    let columns = Columns::from_headers(headers).map_err(|column| RatingsError::MissingColumn {
        path: path.to_string(),
        column,
    })?;

    // First-seen order is kept so the output is deterministic.
    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed vote row: {}", e);
                continue;
            }
        };

        let name = record.get(columns.name).unwrap_or_default().trim().to_string();
        if name.is_empty() {
            warn!("skipping vote row {} with an empty name", row + 1);
            continue;
        }
        let Some(values) = columns.values(&record) else {
            warn!("skipping vote for '{}': a rating is not a number", name);
            continue;
        };
        if !values.iter().all(|v| v.is_finite()) {
            warn!("skipping vote for '{}': non-finite value", name);
            continue;
        }

        let tally = tallies.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            Tally::default()
        });
        for (sum, value) in tally.sums.iter_mut().zip(values) {
            *sum += value;
        }
        tally.votes += 1;
    }

    Ok(order
        .into_iter()
        .filter_map(|name| {
            let tally = tallies.remove(&name)?;
            Some(AggregatedRating {
                stats: tally.average(),
                votes: tally.votes,
                name,
            })
        })
        .collect())
}

/// Load and average peer votes from a CSV file.
pub fn load_ratings(path: &Path) -> Result<Vec<AggregatedRating>, RatingsError> {
    let path_str = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| RatingsError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let ratings = load_ratings_from_reader(file, &path_str)?;
    info!("Loaded ratings for {} members from {}", ratings.len(), path_str);
    Ok(ratings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
