//! Shared types used across roster discovery.
//!
//! These model the request a caller supplies, the athlete entries the
//! extractor produces, and the result shapes handed back to callers.

use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Control-label text that roster layouts render as a link next to each athlete.
const FULL_BIO_LABEL: &str = "full bio";

/// Path segments that mark staff pages rather than athlete profiles.
const STAFF_SEGMENTS: [&str; 2] = ["/coaches/", "/staff/"];

/// Message returned when the school's homepage cannot be loaded.
pub const HOMEPAGE_UNAVAILABLE: &str = "could not load athletics homepage";

/// Message returned when every roster hypothesis is exhausted.
pub const NO_ROSTER_FOUND: &str = "no roster found for this sport/gender at this school";

/// Team gender as used in athletics URL conventions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Men's team (`mens`)
    Mens,
    /// Women's team (`womens`)
    Womens,
    /// Any other designation, kept verbatim in lowercase
    Other(String),
}

impl Gender {
    /// URL slug for this gender.
    #[must_use]
    pub fn as_slug(&self) -> &str {
        match self {
            Gender::Mens => "mens",
            Gender::Womens => "womens",
            Gender::Other(other) => other,
        }
    }
}

impl FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err(RosterError::Validation(
                "gender must not be empty".to_string(),
            )),
            "mens" | "men" | "men's" | "m" | "male" => Ok(Gender::Mens),
            "womens" | "women" | "women's" | "w" | "female" => Ok(Gender::Womens),
            _ => Ok(Gender::Other(normalized)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

/// A roster lookup: which school, which sport, which team.
///
/// Sport and gender are lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRequest {
    base_url: Url,
    sport: String,
    gender: Gender,
}

impl RosterRequest {
    /// Build a request from raw caller input.
    ///
    /// # Errors
    /// Returns a validation error if the base URL is not an absolute
    /// http(s) URL or if sport or gender is empty.
    pub fn new(base_url: &str, sport: &str, gender: &str) -> Result<Self, RosterError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| RosterError::Validation(format!("invalid base URL '{base_url}': {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(RosterError::Validation(format!(
                "base URL must be an http(s) URL with a host, got '{base_url}'"
            )));
        }

        let sport = sport.trim().to_lowercase();
        if sport.is_empty() {
            return Err(RosterError::Validation(
                "sport must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            sport,
            gender: gender.parse()?,
        })
    }

    /// The school's base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL as text without a trailing slash, the form paths are appended to.
    #[must_use]
    pub fn base_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Lowercased sport name.
    #[must_use]
    pub fn sport(&self) -> &str {
        &self.sport
    }

    /// Team gender.
    #[must_use]
    pub fn gender(&self) -> &Gender {
        &self.gender
    }
}

/// One athlete on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteEntry {
    /// Display name as rendered on the roster page
    pub name: String,
    /// Absolute profile URL, or empty when the roster has no link
    pub player_bio_url: String,
}

impl AthleteEntry {
    /// Build an entry, returning `None` when it fails the validity rules:
    /// the name must be non-empty and not the "Full Bio" control label, and
    /// the URL must not point at a coach or staff page.
    #[must_use]
    pub fn new(name: impl Into<String>, player_bio_url: impl Into<String>) -> Option<Self> {
        let entry = Self {
            name: name.into(),
            player_bio_url: player_bio_url.into(),
        };
        entry.is_valid().then_some(entry)
    }

    /// Whether this entry satisfies the athlete invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && !self.name.eq_ignore_ascii_case(FULL_BIO_LABEL)
            && !STAFF_SEGMENTS
                .iter()
                .any(|segment| self.player_bio_url.contains(segment))
    }

    /// Identity used for deduplication.
    #[must_use]
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.player_bio_url)
    }
}

/// Explicit degraded outcome of a roster lookup.
///
/// Serializes as `{"error": <message>, "roster": []}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFailure {
    /// Human-readable reason
    #[serde(rename = "error")]
    pub message: String,
    /// Always empty
    pub roster: Vec<AthleteEntry>,
}

/// Outcome of a roster lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterResult {
    /// Athletes in page order
    Roster(Vec<AthleteEntry>),
    /// No roster could be produced
    Failure(RosterFailure),
}

impl RosterResult {
    /// Build a failure descriptor with an empty roster.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        RosterResult::Failure(RosterFailure {
            message: message.into(),
            roster: Vec::new(),
        })
    }

    /// Whether this is a failure descriptor.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, RosterResult::Failure(_))
    }

    /// Athletes found; empty for failures.
    #[must_use]
    pub fn athletes(&self) -> &[AthleteEntry] {
        match self {
            RosterResult::Roster(athletes) => athletes,
            RosterResult::Failure(failure) => &failure.roster,
        }
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RosterResult::Roster(_) => None,
            RosterResult::Failure(failure) => Some(&failure.message),
        }
    }
}

/// Sanitized HTML fragment of an athlete profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileDocument(String);

impl ProfileDocument {
    /// Wrap an already-sanitized fragment.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The fragment markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the markup.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProfileDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response envelope for a roster lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    /// Base URL as supplied by the caller
    pub school: String,
    /// Sport as supplied by the caller
    pub sport: String,
    /// Gender as supplied by the caller
    pub gender: String,
    /// Roster or failure descriptor
    pub roster: RosterResult,
}

/// Response envelope for a profile extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Profile URL as supplied by the caller
    pub player_url: String,
    /// Sanitized fragment, `null` when extraction failed
    pub profile_html: Option<ProfileDocument>,
}
