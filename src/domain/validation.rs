use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ticket::{Category, Priority, SanitizedTicket, TicketDraft, TicketField};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Trims surrounding whitespace from every field. Never fails.
pub fn sanitize(draft: &TicketDraft) -> SanitizedTicket {
    let mut trimmed = TicketDraft::default();
    for field in TicketField::ALL {
        trimmed.set(field, draft.get(field).trim());
    }
    SanitizedTicket::from_trimmed(trimmed)
}

/// Runs every check and collects all violations, in a fixed order:
/// category, priority, required fields, email format.
pub fn validate(ticket: &SanitizedTicket) -> ValidationResult {
    let mut errors = Vec::new();

    if Category::from_str(&ticket.category).is_none() {
        errors.push(format!(
            "Invalid category: {}. Allowed values: {}",
            ticket.category,
            allowed_categories()
        ));
    }

    if Priority::from_str(&ticket.priority).is_none() {
        errors.push(format!(
            "Invalid priority: {}. Allowed values: {}",
            ticket.priority,
            allowed_priorities()
        ));
    }

    for field in TicketField::ALL {
        if ticket.get(field).trim().is_empty() {
            errors.push(format!("{} is required", field.as_str()));
        }
    }

    if !ticket.email.is_empty() && !EMAIL_PATTERN.is_match(&ticket.email) {
        errors.push("Invalid email format".to_string());
    }

    ValidationResult::from_errors(errors)
}

pub fn allowed_categories() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn allowed_priorities() -> String {
    Priority::ALL
        .iter()
        .map(Priority::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> TicketDraft {
        TicketDraft {
            email: "a@b.com".to_string(),
            title: "Printer down".to_string(),
            description: "Won't turn on".to_string(),
            category: "Hardware".to_string(),
            priority: "Urgent".to_string(),
            floor: "3".to_string(),
            office: "301A".to_string(),
        }
    }

    #[test]
    fn trims_every_field() {
        let draft = TicketDraft {
            email: "  a@b.com\n".to_string(),
            title: "\tPrinter down ".to_string(),
            description: " Won't turn on ".to_string(),
            category: " Hardware".to_string(),
            priority: "Urgent ".to_string(),
            floor: " 3 ".to_string(),
            office: "301A  ".to_string(),
        };
        assert_eq!(sanitize(&draft), sanitize(&valid_draft()));
        assert_eq!(sanitize(&draft).email, "a@b.com");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let draft = TicketDraft {
            email: "   ".to_string(),
            title: " x  y ".to_string(),
            ..valid_draft()
        };
        let once = sanitize(&draft);
        let again = sanitize(&once);
        assert_eq!(once, again);
        assert_eq!(once.title, "x  y");
    }

    #[test]
    fn accepts_complete_ticket() {
        let result = validate(&sanitize(&valid_draft()));
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let draft = TicketDraft {
            category: "Printer".to_string(),
            ..valid_draft()
        };
        let result = validate(&sanitize(&draft));
        assert!(!result.is_valid());
        assert_eq!(
            result.errors(),
            ["Invalid category: Printer. Allowed values: Hardware, Software, Networking"]
        );
    }

    #[test]
    fn rejects_wrong_case_priority() {
        let draft = TicketDraft {
            priority: "urgent".to_string(),
            ..valid_draft()
        };
        let result = validate(&sanitize(&draft));
        assert_eq!(
            result.errors(),
            ["Invalid priority: urgent. Allowed values: Very Urgent, Urgent, Low"]
        );
    }

    #[test]
    fn reports_each_missing_field_once() {
        for field in TicketField::ALL {
            let mut draft = valid_draft();
            draft.set(field, "   ");
            let result = validate(&sanitize(&draft));
            let required = format!("{} is required", field.as_str());

            assert!(!result.is_valid());
            assert_eq!(
                result.errors().iter().filter(|e| **e == required).count(),
                1,
                "field {}",
                field.as_str()
            );

            let expected_len = match field {
                TicketField::Category | TicketField::Priority => 2,
                _ => 1,
            };
            assert_eq!(result.errors().len(), expected_len, "field {}", field.as_str());
        }
    }

    #[test]
    fn empty_draft_lists_errors_in_check_order() {
        let result = validate(&sanitize(&TicketDraft::default()));
        assert_eq!(
            result.errors(),
            [
                "Invalid category: . Allowed values: Hardware, Software, Networking",
                "Invalid priority: . Allowed values: Very Urgent, Urgent, Low",
                "email is required",
                "title is required",
                "description is required",
                "category is required",
                "priority is required",
                "floor is required",
                "office is required",
            ]
        );
    }

    #[test]
    fn checks_email_shape() {
        let missing_tld = TicketDraft {
            email: "foo@bar".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&sanitize(&missing_tld)).errors(),
            ["Invalid email format"]
        );

        let well_formed = TicketDraft {
            email: "foo@bar.com".to_string(),
            ..valid_draft()
        };
        assert!(validate(&sanitize(&well_formed)).is_valid());

        let inner_space = TicketDraft {
            email: "foo bar@baz.com".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&sanitize(&inner_space)).errors(),
            ["Invalid email format"]
        );
    }
}
