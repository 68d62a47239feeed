use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring deskline.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        "Intake endpoint URL (e.g., https://intake.example.com/webhook/create-ticket)",
        &mut cfg.endpoint_url,
    )?;
    apply_prompt("Request timeout in seconds", &mut cfg.timeout_secs)?;
    apply_prompt("Default contact email", &mut cfg.default_email)?;
    apply_prompt("Default floor", &mut cfg.default_floor)?;
    apply_prompt("Default office/room", &mut cfg.default_office)?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Intake endpoint URL: {}", display_value(&cfg.endpoint_url));
    println!("Request timeout (s): {}", display_value(&cfg.timeout_secs));
    println!("Default email: {}", display_value(&cfg.default_email));
    println!("Default floor: {}", display_value(&cfg.default_floor));
    println!("Default office: {}", display_value(&cfg.default_office));

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match prompt(field, target.as_deref(), &mut stdin.lock(), &mut stdout)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(
    field: &str,
    current: Option<&str>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> AppResult<PromptAction> {
    match current {
        Some(value) => write!(output, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer(current: Option<&str>, typed: &str) -> (PromptAction, String) {
        let mut input = Cursor::new(typed.to_string());
        let mut output = Vec::new();
        let action = prompt("Default floor", current, &mut input, &mut output).unwrap();
        (action, String::from_utf8(output).unwrap())
    }

    #[test]
    fn enter_keeps_current_value() {
        let (action, shown) = answer(Some("3"), "\n");
        assert_eq!(action, PromptAction::Keep);
        assert_eq!(shown, "Default floor [3] (Enter to keep, '-' to clear): ");
    }

    #[test]
    fn dash_clears_and_text_sets() {
        assert_eq!(answer(Some("3"), "-\n").0, PromptAction::Clear);
        assert_eq!(
            answer(None, "  4th Floor \n").0,
            PromptAction::Set("4th Floor".to_string())
        );
    }

    #[test]
    fn displays_unset_values() {
        assert_eq!(display_value(&None), "<not set>");
        assert_eq!(display_value(&Some(String::new())), "<not set>");
        assert_eq!(display_value(&Some("301A".to_string())), "301A");
    }
}
