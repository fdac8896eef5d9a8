//! Enumerations and field types for task records.
//!
//! The remote collection stores `finish` and `priority` as plain strings. These
//! enums name the values the form offers; the empty string is the "not chosen"
//! option and is a legal value on the wire.

use clap::ValueEnum;

/// Completion flag offered by the form.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Finish {
    #[value(name = "none")]
    Unset,
    Yes,
    No,
}

impl Finish {
    /// Selector order in the form.
    pub const ALL: [Finish; 3] = [Finish::Unset, Finish::Yes, Finish::No];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Finish::Unset => "",
            Finish::Yes => "Yes",
            Finish::No => "No",
        }
    }

    /// Match a wire value exactly; unknown strings yield `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

/// Priority classification offered by the form.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Priority {
    #[value(name = "none")]
    Unset,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Selector order in the form.
    pub const ALL: [Priority; 4] = [Priority::Unset, Priority::Low, Priority::Medium, Priority::High];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Unset => "",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Match a wire value exactly; unknown strings yield `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

/// The six editable fields of a task, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    DueDay,
    Detail,
    Finish,
    Priority,
    Category,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::DueDay,
        Field::Detail,
        Field::Finish,
        Field::Priority,
        Field::Category,
    ];

    /// Human label used by the form and the card view.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::DueDay => "Due Day",
            Field::Detail => "Detail",
            Field::Finish => "Finish",
            Field::Priority => "Priority",
            Field::Category => "Category",
        }
    }

    /// Whether the form presents this field as a fixed-choice selector.
    pub fn is_selector(self) -> bool {
        matches!(self, Field::Finish | Field::Priority)
    }
}

/// Display text for a selector value; the empty choice reads as "Select".
pub fn format_choice(value: &str) -> &str {
    if value.is_empty() {
        "Select"
    } else {
        value
    }
}
