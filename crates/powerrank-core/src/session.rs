// One matchday: attendance -> ranking -> split -> goalkeepers.

use tracing::info;

use crate::attendance::{mark_absent, present_members};
use crate::ranking::rank;
use crate::roster::Roster;
use crate::split::{split_alternating, Side, Teams};

/// Pick the two teams for this week.
///
/// Marks `absent` on the roster, ranks the members still present, deals them
/// alternately into two groups and appends one goalkeeper to each. The
/// returned teams borrow from `roster`.
pub fn select_teams<'r>(roster: &'r mut Roster, absent: &[String]) -> Teams<'r> {
    let marked = mark_absent(&mut roster.members, absent);
    let roster: &'r Roster = roster;

    let present = present_members(&roster.members);
    info!(
        "{} of {} members present ({} marked absent)",
        present.len(),
        roster.members.len(),
        marked
    );

    let ranked = rank(present);
    let teams = split_alternating(&ranked).with_goalkeepers(&roster.goalkeepers);
    info!(
        "teams picked: {} players (total {}) vs {} players (total {})",
        teams.team_a.len(),
        teams.total(Side::A),
        teams.team_b.len(),
        teams.total(Side::B)
    );
    teams
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
