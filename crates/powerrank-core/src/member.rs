// Member records and the six peer-voted sub-scores.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stat categories
// ---------------------------------------------------------------------------

/// The six rated categories, in the fixed order used for prompting,
/// CSV columns and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defense,
    Physicality,
}

impl Stat {
    /// All categories in canonical order.
    pub const ALL: [Stat; 6] = [
        Stat::Pace,
        Stat::Shooting,
        Stat::Passing,
        Stat::Dribbling,
        Stat::Defense,
        Stat::Physicality,
    ];

    /// Parse a category name, e.g. a vote export column header
    /// (case-insensitive). Accepts the British spelling "defence" as well.
    pub fn from_str_stat(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pace" => Some(Stat::Pace),
            "shooting" => Some(Stat::Shooting),
            "passing" => Some(Stat::Passing),
            "dribbling" => Some(Stat::Dribbling),
            "defense" | "defence" => Some(Stat::Defense),
            "physicality" => Some(Stat::Physicality),
            _ => None,
        }
    }

    /// Return the display label for this category.
    pub fn display_str(&self) -> &'static str {
        match self {
            Stat::Pace => "Pace",
            Stat::Shooting => "Shooting",
            Stat::Passing => "Passing",
            Stat::Dribbling => "Dribbling",
            Stat::Defense => "Defense",
            Stat::Physicality => "Physicality",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// StatLine
// ---------------------------------------------------------------------------

/// One value per category. Used both for a member's current ratings and for
/// the signed deltas applied after a match.
///
/// Values are unbounded; ratings conventionally sit in 0..=100 but updates
/// may push them anywhere, including below zero. Totals saturate at the
/// `i64` limits instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub pace: i64,
    pub shooting: i64,
    pub passing: i64,
    pub dribbling: i64,
    pub defense: i64,
    pub physicality: i64,
}

impl StatLine {
    pub fn new(
        pace: i64,
        shooting: i64,
        passing: i64,
        dribbling: i64,
        defense: i64,
        physicality: i64,
    ) -> Self {
        StatLine {
            pace,
            shooting,
            passing,
            dribbling,
            defense,
            physicality,
        }
    }

    /// Sum of the six categories.
    pub fn total(&self) -> i64 {
        Stat::ALL
            .iter()
            .fold(0i64, |acc, stat| acc.saturating_add(self.get(*stat)))
    }

    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Pace => self.pace,
            Stat::Shooting => self.shooting,
            Stat::Passing => self.passing,
            Stat::Dribbling => self.dribbling,
            Stat::Defense => self.defense,
            Stat::Physicality => self.physicality,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i64) {
        let slot = match stat {
            Stat::Pace => &mut self.pace,
            Stat::Shooting => &mut self.shooting,
            Stat::Passing => &mut self.passing,
            Stat::Dribbling => &mut self.dribbling,
            Stat::Defense => &mut self.defense,
            Stat::Physicality => &mut self.physicality,
        };
        *slot = value;
    }

    /// Add `delta` field by field, returning the new line. No clamping.
    ///
    /// Fails with the first category whose sum does not fit in an `i64`;
    /// `self` is never modified.
    pub fn checked_apply(&self, delta: &StatLine) -> Result<StatLine, Stat> {
        let mut line = *self;
        for stat in Stat::ALL {
            let value = self.get(stat).checked_add(delta.get(stat)).ok_or(stat)?;
            line.set(stat, value);
        }
        Ok(line)
    }

    /// Build a line from values given in `Stat::ALL` order.
    pub fn from_ordered(values: [i64; 6]) -> Self {
        let mut line = StatLine::default();
        for (stat, value) in Stat::ALL.into_iter().zip(values) {
            line.set(stat, value);
        }
        line
    }
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A tracked club member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(flatten)]
    pub stats: StatLine,
    /// Attendance for the current run only; never written to disk.
    #[serde(skip, default = "present_by_default")]
    pub present: bool,
}

fn present_by_default() -> bool {
    true
}

impl Member {
    pub fn new(name: impl Into<String>, stats: StatLine) -> Self {
        Member {
            name: name.into(),
            stats,
            present: true,
        }
    }

    /// Recomputed from the current stats on every call.
    pub fn total_score(&self) -> i64 {
        self.stats.total()
    }
}

/// Combined total score of a group of members, saturating like
/// [`StatLine::total`].
pub fn combined_total<'a>(members: impl IntoIterator<Item = &'a Member>) -> i64 {
    members
        .into_iter()
        .fold(0i64, |acc, m| acc.saturating_add(m.total_score()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
