// Attendance: marking absent members and filtering them out of the run.

use tracing::debug;

use crate::member::Member;

/// Split a comma-separated attendance line into names.
///
/// Entries are trimmed and blanks are dropped, so `"Dean, Ian"`,
/// `"Dean,Ian"` and `"Dean , Ian,"` all yield `["Dean", "Ian"]`. An empty
/// line yields no names.
pub fn parse_absent_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Clear the presence flag of every member whose name exactly matches one of
/// `absent`. Names that match no member are ignored.
///
/// Returns the number of members marked absent.
pub fn mark_absent(members: &mut [Member], absent: &[String]) -> usize {
    let mut marked = 0;
    for member in members.iter_mut() {
        if absent.iter().any(|name| *name == member.name) {
            member.present = false;
            marked += 1;
        }
    }

    for name in absent {
        if !members.iter().any(|m| m.name == *name) {
            debug!("absent name '{}' matches no member, ignoring", name);
        }
    }

    marked
}

/// Members still flagged present, in their original relative order.
pub fn present_members(members: &[Member]) -> Vec<&Member> {
    members.iter().filter(|m| m.present).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::StatLine;

    fn squad() -> Vec<Member> {
        ["David", "Newhsa", "Dean", "Fabian"]
            .iter()
            .map(|name| Member::new(*name, StatLine::new(80, 80, 80, 80, 80, 80)))
            .collect()
    }

    fn names(members: &[&Member]) -> Vec<String> {
        members.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn parse_trims_and_drops_blanks() {
        assert_eq!(parse_absent_list("Dean, Ian"), vec!["Dean", "Ian"]);
        assert_eq!(parse_absent_list("Dean,Ian"), vec!["Dean", "Ian"]);
        assert_eq!(parse_absent_list(" Dean , Ian, "), vec!["Dean", "Ian"]);
        assert_eq!(parse_absent_list("Juan Pablo"), vec!["Juan Pablo"]);
    }

    #[test]
    fn parse_empty_line_is_empty() {
        assert!(parse_absent_list("").is_empty());
        assert!(parse_absent_list("   ").is_empty());
        assert!(parse_absent_list(" , ,").is_empty());
    }

    #[test]
    fn marks_matching_members() {
        let mut members = squad();
        let marked = mark_absent(&mut members, &["Dean".to_string()]);
        assert_eq!(marked, 1);
        assert!(!members[2].present);
        assert!(members.iter().filter(|m| m.name != "Dean").all(|m| m.present));
    }

    #[test]
    fn unknown_name_is_ignored() {
        let mut members = squad();
        let marked = mark_absent(&mut members, &["Zidane".to_string()]);
        assert_eq!(marked, 0);
        assert!(members.iter().all(|m| m.present));
    }

    #[test]
    fn empty_absent_list_is_noop() {
        let mut members = squad();
        assert_eq!(mark_absent(&mut members, &[]), 0);
        assert!(members.iter().all(|m| m.present));
    }

    #[test]
    fn match_is_exact() {
        let mut members = squad();
        mark_absent(&mut members, &["dean".to_string(), "Dav".to_string()]);
        assert!(members.iter().all(|m| m.present));
    }

    #[test]
    fn filter_preserves_order() {
        let mut members = squad();
        mark_absent(&mut members, &["Newhsa".to_string()]);
        let present = present_members(&members);
        assert_eq!(names(&present), vec!["David", "Dean", "Fabian"]);
    }
}
