//! Structured filename matching.
//!
//! Recognized names look like `wk<week>_<type>_<code>_<title>.<ext>`:
//! a 1-2 digit week, a type of `lab`, `ws` or `lec` plus 1-2 digits,
//! a unit code of four lowercase letters and four digits, and an
//! alphanumeric title and extension.

use regex::Regex;
use tracing::info;

use crate::error::Result;

const FILENAME_PATTERN: &str =
    r"^wk([0-9]{1,2})_(lec[0-9]{1,2}|lab|ws)_([a-z]{4}[0-9]{4})_([a-zA-Z0-9]+)\.([a-zA-Z0-9]+)$";

/// Fields extracted from a recognized filename, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFile {
    /// Week number as written, e.g. `"3"` or `"03"`.
    pub week: String,

    /// Activity type: `lab`, `ws` or `lec<N>`.
    pub activity: String,

    /// Unit code, e.g. `cits2002`.
    pub course_code: String,

    /// Title.
    pub title: String,

    /// Extension without the dot.
    pub extension: String,
}

impl CourseFile {
    /// Whether the activity is a lab.
    pub fn is_lab(&self) -> bool {
        self.activity.starts_with("lab")
    }
}

/// Outcome of matching one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Name does not follow the structured format.
    NoMatch { name: String },

    /// Name matched; fields extracted.
    Matched(CourseFile),
}

/// Holds the compiled filename pattern.
#[derive(Debug, Clone)]
pub struct FilenameMatcher {
    pattern: Regex,
}

impl FilenameMatcher {
    /// Compile the pattern. Call once at startup.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(FILENAME_PATTERN)?;
        info!(
            "Compiled filename pattern with {} groups",
            pattern.captures_len() - 1
        );
        Ok(Self { pattern })
    }

    /// Match a bare file name (no directory components).
    pub fn match_name(&self, name: &str) -> MatchResult {
        let Some(caps) = self.pattern.captures(name) else {
            return MatchResult::NoMatch {
                name: name.to_string(),
            };
        };

        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        let file = CourseFile {
            week: group(1),
            activity: group(2),
            course_code: group(3),
            title: group(4),
            extension: group(5),
        };

        info!(
            week = %file.week,
            activity = %file.activity,
            course_code = %file.course_code,
            title = %file.title,
            extension = %file.extension,
            "Matched {name}"
        );

        MatchResult::Matched(file)
    }
}
