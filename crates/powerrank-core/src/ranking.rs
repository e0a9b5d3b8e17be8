// Power ranking: order present members by total score.

use std::cmp::Reverse;

use crate::member::Member;

/// Sort members by total score, highest first.
///
/// The sort is stable: members with equal totals keep the order they had in
/// `members`, so identical rosters always rank identically.
pub fn rank<'a>(members: impl IntoIterator<Item = &'a Member>) -> Vec<&'a Member> {
    let mut ranked: Vec<&Member> = members.into_iter().collect();
    ranked.sort_by_key(|m| Reverse(m.total_score()));
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
