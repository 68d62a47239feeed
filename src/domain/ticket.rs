use std::ops::Deref;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Email,
    Title,
    Description,
    Category,
    Priority,
    Floor,
    Office,
}

impl TicketField {
    /// Every field in declaration order; required-field errors follow this order.
    pub const ALL: [TicketField; 7] = [
        TicketField::Email,
        TicketField::Title,
        TicketField::Description,
        TicketField::Category,
        TicketField::Priority,
        TicketField::Floor,
        TicketField::Office,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketField::Email => "email",
            TicketField::Title => "title",
            TicketField::Description => "description",
            TicketField::Category => "category",
            TicketField::Priority => "priority",
            TicketField::Floor => "floor",
            TicketField::Office => "office",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Hardware,
    Software,
    Networking,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hardware, Category::Software, Category::Networking];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hardware => "Hardware",
            Category::Software => "Software",
            Category::Networking => "Networking",
        }
    }

    /// Exact, case-sensitive match against the values the intake backend accepts.
    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    VeryUrgent,
    Urgent,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::VeryUrgent, Priority::Urgent, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::VeryUrgent => "Very Urgent",
            Priority::Urgent => "Urgent",
            Priority::Low => "Low",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == value)
    }
}

/// The ticket as the user is editing it. Empty strings stand in for fields
/// that were never filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketDraft {
    pub email: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub floor: String,
    pub office: String,
}

impl TicketDraft {
    pub fn get(&self, field: TicketField) -> &str {
        match field {
            TicketField::Email => &self.email,
            TicketField::Title => &self.title,
            TicketField::Description => &self.description,
            TicketField::Category => &self.category,
            TicketField::Priority => &self.priority,
            TicketField::Floor => &self.floor,
            TicketField::Office => &self.office,
        }
    }

    pub fn set(&mut self, field: TicketField, value: impl Into<String>) {
        let slot = match field {
            TicketField::Email => &mut self.email,
            TicketField::Title => &mut self.title,
            TicketField::Description => &mut self.description,
            TicketField::Category => &mut self.category,
            TicketField::Priority => &mut self.priority,
            TicketField::Floor => &mut self.floor,
            TicketField::Office => &mut self.office,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Trimmed, submission-ready copy of a draft. Serializes to the intake payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedTicket(TicketDraft);

impl SanitizedTicket {
    /// Wraps field values that have already been trimmed.
    pub(crate) fn from_trimmed(fields: TicketDraft) -> Self {
        Self(fields)
    }
}

impl Deref for SanitizedTicket {
    type Target = TicketDraft;

    fn deref(&self) -> &TicketDraft {
        &self.0
    }
}
