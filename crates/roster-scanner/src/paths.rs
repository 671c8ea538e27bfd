//! Candidate roster locations.
//!
//! Athletics sites are built on a handful of site-builder platforms, each
//! with its own URL convention for team rosters. The templates below are a
//! prior over those conventions, most specific first and the bare `/roster`
//! near the end. New conventions are added here and nowhere else.

use chrono::{Datelike, NaiveDate, Utc};
use roster_core::{RosterRequest, ScanningConfig};
use std::collections::HashSet;

/// Roster path templates in priority order.
const PATH_TEMPLATES: [&str; 9] = [
    "/sports/{gender}-{sport}/roster",
    "/sports/{sport}/roster",
    "/roster.aspx?path={sport}",
    "/sports/{sport}/{gender}/roster",
    "/sports/{gender}{sport}/roster",
    "/roster",
    "/team/roster",
    "/teams/{sport}/roster",
    "/{sport}/roster",
];

/// Season-qualified template, appended once per season.
const SEASON_TEMPLATE: &str = "/sports/{sport}/{season}/roster";

/// Month in which a new athletic season's rosters go up.
const SEASON_ROLLOVER_MONTH: u32 = 7;

/// An academic-year season such as `2024-25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Season {
    start_year: i32,
}

impl Season {
    /// Season starting in the given calendar year.
    #[must_use]
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Season in progress on `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= SEASON_ROLLOVER_MONTH {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    /// Season in progress today.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// The season before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::starting(self.start_year - 1)
    }

    /// `count` seasons, newest first.
    #[must_use]
    pub fn recent(self, count: u32) -> Vec<Season> {
        std::iter::successors(Some(self), |season| Some(season.previous()))
            .take(count as usize)
            .collect()
    }

    /// URL label, e.g. `2024-25`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}

/// Ordered, de-duplicated roster path candidates for a sport and gender.
///
/// Inputs are lowercased; the output depends only on the arguments.
#[must_use]
pub fn candidate_paths(sport: &str, gender: &str, seasons: &[Season]) -> Vec<String> {
    let sport = sport.trim().to_lowercase();
    let gender = gender.trim().to_lowercase();

    let fill = |template: &str| {
        template
            .replace("{sport}", &sport)
            .replace("{gender}", &gender)
    };

    let generated = PATH_TEMPLATES.iter().map(|template| fill(template)).chain(
        seasons
            .iter()
            .map(|season| fill(SEASON_TEMPLATE).replace("{season}", &season.label())),
    );

    let mut seen = HashSet::new();
    generated.filter(|path| seen.insert(path.clone())).collect()
}

/// Candidates for a request, with season variants counted back from today.
#[must_use]
pub fn candidate_paths_for(request: &RosterRequest, scanning: &ScanningConfig) -> Vec<String> {
    let seasons = Season::current().recent(scanning.season_count);
    candidate_paths(request.sport(), request.gender().as_slug(), &seasons)
}
