// Team splitting: positional alternation plus goalkeeper assignment.

use crate::member::{combined_total, Member};
use crate::roster::Goalkeepers;

/// Which of the two groups a member lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// The two groups produced for a match, borrowing from the roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Teams<'a> {
    pub team_a: Vec<&'a Member>,
    pub team_b: Vec<&'a Member>,
}

impl<'a> Teams<'a> {
    pub fn side(&self, side: Side) -> &[&'a Member] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Append one goalkeeper to each group. The keepers go last regardless
    /// of their scores.
    pub fn with_goalkeepers(mut self, goalkeepers: &'a Goalkeepers) -> Self {
        self.team_a.push(&goalkeepers.team_a);
        self.team_b.push(&goalkeepers.team_b);
        self
    }

    /// Combined total score of one group, keepers included.
    pub fn total(&self, side: Side) -> i64 {
        combined_total(self.side(side).iter().copied())
    }

    /// The group a member was placed in, looked up by name.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.team_a.iter().any(|m| m.name == name) {
            Some(Side::A)
        } else if self.team_b.iter().any(|m| m.name == name) {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// Deal a ranked list into two groups by position: even indices to A, odd
/// indices to B.
///
/// This is plain alternation, not a snake draft. With an odd count, A gets
/// the extra member.
pub fn split_alternating<'a>(ranked: &[&'a Member]) -> Teams<'a> {
    let mut teams = Teams::default();
    for (i, member) in ranked.iter().enumerate() {
        if i % 2 == 0 {
            teams.team_a.push(*member);
        } else {
            teams.team_b.push(*member);
        }
    }
    teams
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
