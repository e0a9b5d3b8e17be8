// Post-match stat updates driven by an injected delta source.

use thiserror::Error;
use tracing::{debug, info};

use crate::member::{Member, Stat, StatLine};

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("invalid {stat} change for {member}: {input:?} is not an integer")]
    MalformedInput {
        member: String,
        stat: Stat,
        input: String,
    },

    #[error("input ended while reading changes for {member}")]
    InputClosed { member: String },

    #[error("failed to read changes for {member}: {source}")]
    Io {
        member: String,
        source: std::io::Error,
    },

    #[error("{stat} change for {member} overflows the stored value")]
    Overflow { member: String, stat: Stat },
}

/// Supplies the six signed changes for one member after a match.
///
/// The console prompter implements this in the binary; tests use scripted
/// doubles.
pub trait DeltaSource {
    fn deltas_for(&mut self, member: &Member) -> Result<StatLine, UpdateError>;
}

/// Parse one delta value. Surrounding whitespace is allowed, a leading `+`
/// is accepted, anything else that is not an integer is an error.
pub fn parse_delta(member: &str, stat: Stat, input: &str) -> Result<i64, UpdateError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| UpdateError::MalformedInput {
            member: member.to_string(),
            stat,
            input: input.trim().to_string(),
        })
}

/// Ask `source` for every member's changes, in roster order, then apply them.
///
/// Nothing is applied until all members have been read and every new value
/// has been computed, so an error leaves `members` exactly as it was.
/// Returns the number of members updated.
pub fn apply_updates<S: DeltaSource + ?Sized>(
    members: &mut [Member],
    source: &mut S,
) -> Result<usize, UpdateError> {
    let mut pending = Vec::with_capacity(members.len());
    for member in members.iter() {
        let delta = source.deltas_for(member)?;
        debug!("{}: change {:?}", member.name, delta);
        let updated = member
            .stats
            .checked_apply(&delta)
            .map_err(|stat| UpdateError::Overflow {
                member: member.name.clone(),
                stat,
            })?;
        pending.push(updated);
    }

    for (member, updated) in members.iter_mut().zip(&pending) {
        let before = member.total_score();
        member.stats = *updated;
        debug!(
            "{}: total {} -> {}",
            member.name,
            before,
            member.total_score()
        );
    }

    info!("applied stat changes to {} members", pending.len());
    Ok(pending.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Returns a fixed delta per name, zero for anyone unlisted, and records
    /// the order members were asked for.
    struct Scripted {
        deltas: HashMap<String, StatLine>,
        asked: Vec<String>,
    }

    impl DeltaSource for Scripted {
        fn deltas_for(&mut self, member: &Member) -> Result<StatLine, UpdateError> {
            self.asked.push(member.name.clone());
            Ok(self.deltas.get(&member.name).copied().unwrap_or_default())
        }
    }

    /// Fails on the named member.
    struct FailsOn(&'static str);

    impl DeltaSource for FailsOn {
        fn deltas_for(&mut self, member: &Member) -> Result<StatLine, UpdateError> {
            if member.name == self.0 {
                return Err(parse_delta(&member.name, Stat::Passing, "abc").unwrap_err());
            }
            Ok(StatLine::new(1, 1, 1, 1, 1, 1))
        }
    }

    fn squad() -> Vec<Member> {
        vec![
            Member::new("David", StatLine::new(90, 80, 80, 80, 80, 80)),
            Member::new("Dean", StatLine::new(93, 83, 87, 87, 78, 88)),
            Member::new("Ian", StatLine::new(88, 84, 85, 87, 89, 86)),
        ]
    }

    #[test]
    fn applies_deltas_to_matching_member() {
        let mut members = squad();
        let mut source = Scripted {
            deltas: HashMap::from([("David".to_string(), StatLine::new(5, -3, 0, 0, 0, 0))]),
            asked: vec![],
        };

        let updated = apply_updates(&mut members, &mut source).unwrap();
        assert_eq!(updated, 3);
        assert_eq!(members[0].stats, StatLine::new(95, 77, 80, 80, 80, 80));
        assert_eq!(members[0].total_score(), 492);
        // Zero deltas leave the others alone.
        assert_eq!(members[1].total_score(), 516);
    }

    #[test]
    fn visits_every_member_in_roster_order() {
        let mut members = squad();
        members[1].present = false;
        let mut source = Scripted {
            deltas: HashMap::new(),
            asked: vec![],
        };
        apply_updates(&mut members, &mut source).unwrap();
        assert_eq!(source.asked, vec!["David", "Dean", "Ian"]);
    }

    #[test]
    fn error_leaves_roster_untouched() {
        let mut members = squad();
        let before = members.clone();
        let err = apply_updates(&mut members, &mut FailsOn("Ian")).unwrap_err();
        match err {
            UpdateError::MalformedInput { member, stat, input } => {
                assert_eq!(member, "Ian");
                assert_eq!(stat, Stat::Passing);
                assert_eq!(input, "abc");
            }
            other => panic!("expected MalformedInput, got: {other}"),
        }
        assert_eq!(members, before);
    }

    #[test]
    fn overflowing_change_is_rejected_before_anything_applies() {
        let mut members = squad();
        let before = members.clone();
        let mut source = Scripted {
            deltas: HashMap::from([
                ("David".to_string(), StatLine::new(5, 0, 0, 0, 0, 0)),
                ("Dean".to_string(), StatLine::new(i64::MAX, 0, 0, 0, 0, 0)),
            ]),
            asked: vec![],
        };

        let err = apply_updates(&mut members, &mut source).unwrap_err();
        match err {
            UpdateError::Overflow { member, stat } => {
                assert_eq!(member, "Dean");
                assert_eq!(stat, Stat::Pace);
            }
            other => panic!("expected Overflow, got: {other}"),
        }
        assert_eq!(members, before);
    }

    #[test]
    fn parse_delta_accepts_signed_integers() {
        assert_eq!(parse_delta("x", Stat::Pace, "5").unwrap(), 5);
        assert_eq!(parse_delta("x", Stat::Pace, " -3 ").unwrap(), -3);
        assert_eq!(parse_delta("x", Stat::Pace, "+2").unwrap(), 2);
        assert_eq!(parse_delta("x", Stat::Pace, "0\n").unwrap(), 0);
    }

    #[test]
    fn parse_delta_rejects_non_integers() {
        for bad in ["", "1.5", "five", "3 4"] {
            assert!(
                matches!(
                    parse_delta("Dean", Stat::Defense, bad),
                    Err(UpdateError::MalformedInput { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
