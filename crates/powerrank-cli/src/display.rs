// Plain-text team sheets.

use powerrank_core::member::{combined_total, Member};

/// One sheet line: `"{name} - Total Score: {total}"`.
pub fn format_member_line(member: &Member) -> String {
    format!("{} - Total Score: {}", member.name, member.total_score())
}

/// Render one team: a blank line, the label, then one line per member in
/// assignment order.
pub fn render_team_sheet(label: &str, members: &[&Member]) -> String {
    let mut out = format!("\n{label}:\n");
    for member in members {
        out.push_str(&format_member_line(member));
        out.push('\n');
    }
    out.push_str(&format!(
        "Team total: {}\n",
        combined_total(members.iter().copied())
    ));
    out
}
