use std::io::{self, BufRead, Write};

use clap::Args;
use tracing::warn;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::ticket::{TicketDraft, TicketField};
use crate::domain::validation::{
    ValidationResult, allowed_categories, allowed_priorities, sanitize, validate,
};
use crate::error::AppResult;
use crate::workflow::submission::{Event, SubmissionController, SubmissionState};

#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Contact email for the ticket.
    #[arg(long)]
    pub email: Option<String>,
    /// Brief summary of the issue.
    #[arg(long)]
    pub title: Option<String>,
    /// Detailed description of the issue.
    #[arg(long)]
    pub description: Option<String>,
    /// One of: Hardware, Software, Networking.
    #[arg(long)]
    pub category: Option<String>,
    /// One of: Very Urgent, Urgent, Low.
    #[arg(long)]
    pub priority: Option<String>,
    /// Floor where the issue is located.
    #[arg(long)]
    pub floor: Option<String>,
    /// Office or room where the issue is located.
    #[arg(long)]
    pub office: Option<String>,
    /// Validate the ticket without sending it.
    #[arg(long)]
    pub dry_run: bool,
    /// Never prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

impl SubmitArgs {
    /// Flag values as a draft; flags that were not given stay empty.
    fn to_draft(&self) -> TicketDraft {
        TicketDraft {
            email: self.email.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            priority: self.priority.clone().unwrap_or_default(),
            floor: self.floor.clone().unwrap_or_default(),
            office: self.office.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Checked(ValidationResult),
    Finished(SubmissionState),
}

pub async fn run(ctx: &AppContext, args: SubmitArgs) -> AppResult<SubmitOutcome> {
    let mut controller = SubmissionController::new();
    apply_known_values(&mut controller, &args, &ctx.config);

    if !args.no_input {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        prompt_missing(&mut controller, &mut stdin.lock(), &mut stdout)?;
    }

    if args.dry_run {
        let result = validate(&sanitize(controller.draft()));
        return Ok(SubmitOutcome::Checked(result));
    }

    if ctx.config.endpoint_url.is_none() {
        warn!("intake endpoint URL not configured; submission will fail");
    }

    let state = controller.submit(ctx.intake.as_ref()).await.clone();
    Ok(SubmitOutcome::Finished(state))
}

/// Feeds flag values, then stored defaults, into the draft.
fn apply_known_values(controller: &mut SubmissionController, args: &SubmitArgs, config: &AppConfig) {
    let flags = args.to_draft();
    for field in TicketField::ALL {
        let fallback = match field {
            TicketField::Email => config.default_email.as_deref(),
            TicketField::Floor => config.default_floor.as_deref(),
            TicketField::Office => config.default_office.as_deref(),
            _ => None,
        };
        let given = Some(flags.get(field)).filter(|value| !value.is_empty());
        if let Some(value) = given.or(fallback) {
            controller.dispatch(Event::Edit {
                field,
                value: value.to_string(),
            });
        }
    }
}

fn prompt_missing(
    controller: &mut SubmissionController,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> AppResult<()> {
    for field in TicketField::ALL {
        if !controller.draft().get(field).trim().is_empty() {
            continue;
        }

        write!(output, "{}: ", field_label(field))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        controller.dispatch(Event::Edit {
            field,
            value: line.trim_end_matches(['\r', '\n']).to_string(),
        });
    }
    Ok(())
}

fn field_label(field: TicketField) -> String {
    match field {
        TicketField::Email => "Email address".to_string(),
        TicketField::Title => "Issue title".to_string(),
        TicketField::Description => "Detailed description".to_string(),
        TicketField::Category => format!("Category ({})", allowed_categories()),
        TicketField::Priority => format!("Priority ({})", allowed_priorities()),
        TicketField::Floor => "Floor".to_string(),
        TicketField::Office => "Office/Room".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            endpoint_url: None,
            timeout: Duration::from_secs(30),
            default_email: Some("desk@corp.example".to_string()),
            default_floor: Some("3".to_string()),
            default_office: None,
        }
    }

    #[test]
    fn flags_take_precedence_over_defaults() {
        let args = SubmitArgs {
            email: Some("me@corp.example".to_string()),
            title: Some("VPN drops".to_string()),
            ..SubmitArgs::default()
        };
        let mut controller = SubmissionController::new();
        apply_known_values(&mut controller, &args, &config());

        let draft = controller.draft();
        assert_eq!(draft.email, "me@corp.example");
        assert_eq!(draft.floor, "3");
        assert_eq!(draft.title, "VPN drops");
        assert_eq!(draft.office, "");
    }

    #[test]
    fn prompts_only_for_missing_fields() {
        let args = SubmitArgs {
            title: Some("VPN drops".to_string()),
            category: Some("Networking".to_string()),
            ..SubmitArgs::default()
        };
        let mut controller = SubmissionController::new();
        apply_known_values(&mut controller, &args, &config());

        let mut input = Cursor::new("Drops every hour\nLow\n301A\n");
        let mut output = Vec::new();
        prompt_missing(&mut controller, &mut input, &mut output).unwrap();

        let draft = controller.draft();
        assert_eq!(draft.description, "Drops every hour");
        assert_eq!(draft.priority, "Low");
        assert_eq!(draft.office, "301A");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Priority (Very Urgent, Urgent, Low): "));
        assert!(!shown.contains("Issue title"));
        assert!(validate(&sanitize(draft)).is_valid());
    }

    #[test]
    fn stops_prompting_at_end_of_input() {
        let mut controller = SubmissionController::new();
        let mut input = Cursor::new("a@b.com\n");
        let mut output = Vec::new();
        prompt_missing(&mut controller, &mut input, &mut output).unwrap();

        assert_eq!(controller.draft().email, "a@b.com");
        assert_eq!(controller.draft().title, "");
    }
}
