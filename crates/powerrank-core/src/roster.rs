// Roster storage: outfield members, the two goalkeepers, and the TOML file
// they are loaded from and written back to after each update pass.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::member::Member;
use crate::ratings::AggregatedRating;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse roster file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write roster file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("duplicate member name `{0}` in roster")]
    DuplicateName(String),

    #[error("roster contains a member with an empty name")]
    EmptyName,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The two fixed goalkeepers. They are kept out of ranking and splitting and
/// placed one per team afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goalkeepers {
    pub team_a: Member,
    pub team_b: Member,
}

/// The full club roster for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Date of the last update pass that was written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<NaiveDate>,
    pub goalkeepers: Goalkeepers,
    /// Outfield members in insertion order. Ordering matters: it breaks
    /// ranking ties and fixes the update prompt order.
    #[serde(rename = "member", default)]
    pub members: Vec<Member>,
}

impl Roster {
    pub fn new(members: Vec<Member>, goalkeepers: Goalkeepers) -> Self {
        Roster {
            updated_on: None,
            goalkeepers,
            members,
        }
    }

    /// Check that every name is non-empty and unique across outfield members
    /// and goalkeepers.
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let everyone = self
            .members
            .iter()
            .chain([&self.goalkeepers.team_a, &self.goalkeepers.team_b]);
        for member in everyone {
            if member.name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !seen.insert(member.name.as_str()) {
                return Err(RosterError::DuplicateName(member.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up an outfield member by exact name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Overwrite stats from aggregated peer votes. Applies to outfield
    /// members and goalkeepers alike; names with no matching member are
    /// skipped. Returns how many members were updated.
    pub fn apply_ratings(&mut self, ratings: &[AggregatedRating]) -> usize {
        let mut applied = 0;
        for rating in ratings {
            let target = self
                .members
                .iter_mut()
                .chain([&mut self.goalkeepers.team_a, &mut self.goalkeepers.team_b])
                .find(|m| m.name == rating.name);
            match target {
                Some(member) => {
                    member.stats = rating.stats;
                    applied += 1;
                }
                None => {
                    warn!("ratings for '{}' match no roster member, skipping", rating.name)
                }
            }
        }
        applied
    }
}

// ---------------------------------------------------------------------------
// File IO
// ---------------------------------------------------------------------------

/// Load and validate a roster from a TOML file.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let text = std::fs::read_to_string(path).map_err(|e| RosterError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let roster = parse_roster(&text).map_err(|e| match e {
        RosterError::Parse { source, .. } => RosterError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(
        "Loaded roster from {}: {} members plus goalkeepers {} and {}",
        path.display(),
        roster.members.len(),
        roster.goalkeepers.team_a.name,
        roster.goalkeepers.team_b.name
    );
    Ok(roster)
}

/// Parse and validate roster TOML text.
pub fn parse_roster(text: &str) -> Result<Roster, RosterError> {
    let roster: Roster = toml::from_str(text).map_err(|e| RosterError::Parse {
        path: PathBuf::new(),
        source: e,
    })?;
    roster.validate()?;
    Ok(roster)
}

/// Write the roster back to disk, stamping it with `updated_on`.
///
/// The file is written to a sibling temp file first and then renamed over
/// the target, so a failed write never leaves a truncated roster behind.
pub fn save_roster(
    roster: &mut Roster,
    path: &Path,
    updated_on: NaiveDate,
) -> Result<(), RosterError> {
    roster.updated_on = Some(updated_on);
    let text = toml::to_string_pretty(roster)?;

    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, text).map_err(|e| RosterError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| RosterError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Saved roster to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::StatLine;
    use std::fs;

    const SAMPLE: &str = r#"
[goalkeepers.team_a]
name = "Luis"
pace = 0
shooting = 0
passing = 0
dribbling = 0
defense = 0
physicality = 0

[goalkeepers.team_b]
name = "Eder"
pace = 88
shooting = 84
passing = 85
dribbling = 87
defense = 89
physicality = 86

[[member]]
name = "David"
pace = 97
shooting = 91
passing = 92
dribbling = 93
defense = 90
physicality = 92

[[member]]
name = "Newhsa"
pace = 94
shooting = 97
passing = 92
dribbling = 93
defense = 85
physicality = 91
"#;

    fn keepers() -> Goalkeepers {
        Goalkeepers {
            team_a: Member::new("Luis", StatLine::default()),
            team_b: Member::new("Eder", StatLine::new(88, 84, 85, 87, 89, 86)),
        }
    }

    #[test]
    fn parses_sample_roster() {
        let roster = parse_roster(SAMPLE).unwrap();
        assert_eq!(roster.members.len(), 2);
        assert_eq!(roster.members[0].name, "David");
        assert_eq!(roster.members[0].total_score(), 555);
        assert_eq!(roster.members[1].stats.shooting, 97);
        assert_eq!(roster.goalkeepers.team_a.name, "Luis");
        assert_eq!(roster.goalkeepers.team_b.total_score(), 519);
        assert!(roster.updated_on.is_none());
    }

    #[test]
    fn loaded_members_start_present() {
        let roster = parse_roster(SAMPLE).unwrap();
        assert!(roster.members.iter().all(|m| m.present));
        assert!(roster.goalkeepers.team_a.present);
    }

    #[test]
    fn parses_updated_on() {
        let text = format!("updated_on = \"2024-10-12\"\n{SAMPLE}");
        let roster = parse_roster(&text).unwrap();
        assert_eq!(roster.updated_on, NaiveDate::from_ymd_opt(2024, 10, 12));
    }

    #[test]
    fn missing_stat_is_parse_error() {
        let text = SAMPLE.replace("physicality = 91\n", "");
        assert!(matches!(parse_roster(&text), Err(RosterError::Parse { .. })));
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = SAMPLE.replace("name = \"Newhsa\"", "name = \"David\"");
        match parse_roster(&text) {
            Err(RosterError::DuplicateName(name)) => assert_eq!(name, "David"),
            other => panic!("expected DuplicateName, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_member_sharing_goalkeeper_name() {
        let text = SAMPLE.replace("name = \"Newhsa\"", "name = \"Eder\"");
        assert!(matches!(
            parse_roster(&text),
            Err(RosterError::DuplicateName(_))
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let text = SAMPLE.replace("name = \"Newhsa\"", "name = \"  \"");
        assert!(matches!(parse_roster(&text), Err(RosterError::EmptyName)));
    }

    #[test]
    fn save_then_load_keeps_stats_and_order() {
        let tmp = std::env::temp_dir().join("roster_test_save");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("roster.toml");

        let mut roster = Roster::new(
            vec![
                Member::new("Lucas", StatLine::new(93, 84, 85, 87, 89, 86)),
                Member::new("Facu", StatLine::new(-2, 84, 85, 87, 89, 86)),
            ],
            keepers(),
        );
        roster.members[1].present = false;
        let date = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        save_roster(&mut roster, &path, date).unwrap();
        assert!(!tmp.join("roster.toml.tmp").exists());

        let loaded = load_roster(&path).unwrap();
        assert_eq!(loaded.updated_on, Some(date));
        assert_eq!(loaded.members[0].name, "Lucas");
        assert_eq!(loaded.members[1].stats.pace, -2);
        // Attendance is per run and never persisted.
        assert!(loaded.members[1].present);
        assert_eq!(loaded.goalkeepers, roster.goalkeepers);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let path = std::env::temp_dir().join("roster_test_missing/none.toml");
        match load_roster(&path) {
            Err(RosterError::Read { path: p, .. }) => assert!(p.ends_with("none.toml")),
            other => panic!("expected Read error, got: {other:?}"),
        }
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let tmp = std::env::temp_dir().join("roster_test_parse_error");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("roster.toml");
        fs::write(&path, "this is not valid [[[ toml").unwrap();

        match load_roster(&path) {
            Err(RosterError::Parse { path: p, .. }) => assert!(p.ends_with("roster.toml")),
            other => panic!("expected Parse error, got: {other:?}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn apply_ratings_overwrites_known_names() {
        let mut roster = parse_roster(SAMPLE).unwrap();
        let ratings = vec![
            AggregatedRating {
                name: "Newhsa".into(),
                stats: StatLine::new(1, 2, 3, 4, 5, 6),
                votes: 3,
            },
            AggregatedRating {
                name: "Luis".into(),
                stats: StatLine::new(70, 70, 70, 70, 70, 70),
                votes: 2,
            },
            AggregatedRating {
                name: "Stranger".into(),
                stats: StatLine::default(),
                votes: 1,
            },
        ];
        assert_eq!(roster.apply_ratings(&ratings), 2);
        assert_eq!(roster.member("Newhsa").unwrap().total_score(), 21);
        assert_eq!(roster.goalkeepers.team_a.total_score(), 420);
        assert_eq!(roster.member("David").unwrap().total_score(), 555);
    }
}
