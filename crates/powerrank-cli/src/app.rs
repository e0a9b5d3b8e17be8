// Matchday run: owns the roster for the whole session.
//
// Sequence:
// 1. Load roster (and apply this week's vote export, if present)
// 2. Ask who is absent
// 3. Pick and print both teams
// 4. Ask for every member's stat changes
// 5. Write the updated roster back
// 6. Move the applied vote export aside so later runs keep the updates

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{info, warn};

use powerrank_core::config::Config;
use powerrank_core::ratings::load_ratings;
use powerrank_core::roster::{load_roster, save_roster, Roster};
use powerrank_core::session::select_teams;
use powerrank_core::split::Side;
use powerrank_core::update::apply_updates;

use crate::display::render_team_sheet;
use crate::prompt::Prompter;

/// The roster for one run, plus the vote export folded into it (if any).
#[derive(Debug)]
pub struct ClubRoster {
    pub roster: Roster,
    pub vote_export: Option<PathBuf>,
}

/// Where a vote export is moved once its ratings are saved in the roster:
/// `data/votes.csv` becomes `data/votes.csv.applied`.
pub fn applied_export_path(export: &Path) -> PathBuf {
    let mut name = export.as_os_str().to_os_string();
    name.push(".applied");
    PathBuf::from(name)
}

/// Load the roster named in `config` and fold in the vote export if one is
/// configured and present on disk.
pub fn load_club_roster(config: &Config) -> anyhow::Result<ClubRoster> {
    let roster_path = Path::new(&config.data_paths.roster);
    let mut roster = load_roster(roster_path)
        .with_context(|| format!("failed to load roster from {}", roster_path.display()))?;

    let mut vote_export = None;
    if let Some(ratings_path) = config.data_paths.ratings.as_deref().map(Path::new) {
        if ratings_path.exists() {
            let ratings = load_ratings(ratings_path).context("failed to load vote export")?;
            let applied = roster.apply_ratings(&ratings);
            info!("Applied vote export to {} members", applied);
            vote_export = Some(ratings_path.to_path_buf());
        } else {
            info!(
                "No vote export at {}, using stored ratings",
                ratings_path.display()
            );
        }
    }

    Ok(ClubRoster {
        roster,
        vote_export,
    })
}

/// Move a consumed vote export out of the way so the next run does not
/// overwrite this week's updates with the same votes.
fn archive_vote_export(export: &Path) -> anyhow::Result<PathBuf> {
    let target = applied_export_path(export);
    std::fs::rename(export, &target).with_context(|| {
        format!(
            "failed to move applied vote export {} to {}",
            export.display(),
            target.display()
        )
    })?;
    info!("Archived vote export to {}", target.display());
    Ok(target)
}

/// Run one matchday against the given input and output streams.
///
/// The roster is only written back after every member's changes have been
/// read successfully. A vote export is archived only after that write, so an
/// aborted run leaves it in place for the next attempt.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    output: W,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let ClubRoster {
        mut roster,
        vote_export,
    } = load_club_roster(config)?;
    let mut prompter = Prompter::new(input, output);

    writeln!(prompter.output(), "{} Power Rankings", config.club.name)?;

    let absent = prompter.read_absent_list().context("failed to read absent list")?;
    info!("Absent this week: {:?}", absent);

    {
        let teams = select_teams(&mut roster, &absent);
        let sheets = [
            (config.display.team_a_label.as_str(), Side::A),
            (config.display.team_b_label.as_str(), Side::B),
        ];
        for (label, side) in sheets {
            write!(prompter.output(), "{}", render_team_sheet(label, teams.side(side)))?;
        }
        writeln!(prompter.output())?;
    }

    let updated = apply_updates(&mut roster.members, &mut prompter).map_err(|e| {
        warn!("Update pass aborted, roster left unchanged: {}", e);
        anyhow::Error::new(e).context("stat update aborted")
    })?;

    let roster_path = Path::new(&config.data_paths.roster);
    save_roster(&mut roster, roster_path, today)
        .with_context(|| format!("failed to save roster to {}", roster_path.display()))?;

    if let Some(export) = vote_export {
        archive_vote_export(&export)?;
    }

    writeln!(
        prompter.output(),
        "Updated {} members. Saved to {}.",
        updated,
        roster_path.display()
    )?;
    Ok(())
}
