//! Provenance stamping for resampled output.
//!
//! Version and timestamp are explicit parameters rather than module-level
//! state, keeping the resampling core a pure function; callers decide what
//! to stamp and when.

use chrono::NaiveDateTime;
use demeter_calendar::Calendar;

use crate::output::ResampledGrid;

/// Provenance information to stamp into resampled output.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    version: String,
    stamped_at: NaiveDateTime,
}

impl Provenance {
    /// Creates a provenance record from a library version string and the
    /// moment of processing.
    pub fn new(version: impl Into<String>, stamped_at: NaiveDateTime) -> Self {
        Self {
            version: version.into(),
            stamped_at,
        }
    }

    /// Returns the library version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the processing timestamp.
    pub fn stamped_at(&self) -> NaiveDateTime {
        self.stamped_at
    }
}

/// Merges provenance metadata into a resampled grid's attribute store:
/// the library version, the calendar's anchor and full configuration, and a
/// history line prepended to any existing modification history. Descriptive
/// attributes are added for the output coordinates.
pub fn annotate(grid: &mut ResampledGrid, calendar: &Calendar, provenance: &Provenance) {
    let mut history = format!(
        "{} - resampled with a demeter calendar (v{})\n",
        provenance.stamped_at().format("%Y-%m-%d %H:%M:%S"),
        provenance.version(),
    );
    if let Some(previous) = grid.attrs().get("history") {
        history.push_str(previous);
    }

    let anchor = calendar.anchor().to_string();
    let attrs = grid.attrs_mut();
    attrs.insert("demeter_version".to_string(), provenance.version().to_string());
    attrs.insert("demeter_calendar_anchor".to_string(), anchor.clone());
    attrs.insert("demeter_calendar_code".to_string(), calendar.to_string());
    attrs.insert("history".to_string(), history);

    let coord_attrs = grid.coord_attrs_mut();
    coord_attrs.insert(
        "anchor_year".to_string(),
        [
            ("long_name".to_string(), "anchor year".to_string()),
            ("units".to_string(), "year".to_string()),
            (
                "description".to_string(),
                format!(
                    "the anchor date (here: {anchor}) carries no year; anchor years \
                     combine it into the concrete date each realization is built from"
                ),
            ),
        ]
        .into(),
    );
    coord_attrs.insert(
        "i_interval".to_string(),
        [
            ("long_name".to_string(), "interval index".to_string()),
            (
                "description".to_string(),
                "positive indices denote intervals after the anchor date (targets), \
                 negative indices intervals before it (precursors)"
                    .to_string(),
            ),
        ]
        .into(),
    );
    coord_attrs.insert(
        "is_target".to_string(),
        [(
            "description".to_string(),
            "whether the interval was marked as a target interval in the calendar"
                .to_string(),
        )]
        .into(),
    );
}
