//! Search criteria, sort spec, and pagination mode.
//!
//! These are the user-editable inputs of the directory. Changing any of
//! them is destructive: the orchestrator throws away accumulated results
//! and starts the session over.

use clap::ValueEnum;

/// Pagination strategy. Offset paging supports sorting and exposes totals;
/// cursor paging scales to unbounded collections but fixes the server-side
/// order (id descending) and reports no totals.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Offset,
    Cursor,
}

impl Mode {
    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Mode::Offset => "offset",
            Mode::Cursor => "cursor",
        }
    }

    /// The other mode (used by the UI's mode toggle).
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Offset => Mode::Cursor,
            Mode::Cursor => Mode::Offset,
        }
    }
}

/// The five server-recognized filter fields. Blank fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub enrollment_number: String,
}

impl SearchFilters {
    /// Field values paired with their wire-level query parameter names.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phoneNumber", self.phone_number.as_str()),
            ("department", self.department.as_str()),
            ("enrollmentNumber", self.enrollment_number.as_str()),
        ]
    }

    /// Query parameters for every non-blank field, values verbatim.
    pub fn params(&self) -> Vec<(String, String)> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// True when no field would be sent, i.e. no active filters.
    pub fn is_empty(&self) -> bool {
        self.fields()
            .into_iter()
            .all(|(_, value)| value.trim().is_empty())
    }
}

/// Sort direction for offset-mode queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A sort request. Only meaningful under offset pagination; the cursor
/// endpoint ignores sorting entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }

    /// The `sort=` query parameter value, e.g. `name,asc`.
    pub fn query_value(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}
