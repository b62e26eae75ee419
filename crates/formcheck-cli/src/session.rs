// File: formcheck-cli/src/session.rs
// Purpose: Line-driven form session on top of a FormEngine

use anyhow::{bail, Result};
use formcheck::{FieldName, FormEngine, FormValues, SubmitHandler, SubmitOutcome};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::config::SubmitConfig;
use crate::render;

const HELP: &str = "\
commands:
  set <field> <value>   edit a field (value may be empty or contain spaces)
  blur <field>          mark a field as touched
  submit                validate everything and submit
  show                  print the form
  reset                 clear the form
  help                  print this message
  quit                  end the session
fields: firstName lastName email password confirmPassword phone website";

/// One parsed session line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FieldName, String),
    Blur(FieldName),
    Submit,
    Show,
    Reset,
    Help,
    Quit,
}

/// Parses a session line; blank lines and `#` comments yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim_start();
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
    let command = match word {
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest.trim_end(), ""));
            if field.is_empty() {
                bail!("usage: set <field> <value>");
            }
            Command::Set(field.parse()?, value.to_string())
        }
        "blur" => {
            let field = rest.trim();
            if field.is_empty() {
                bail!("usage: blur <field>");
            }
            Command::Blur(field.parse()?)
        }
        "submit" => Command::Submit,
        "show" => Command::Show,
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command: {other:?} (try `help`)"),
    };
    Ok(Some(command))
}

async fn simulate_submit(values: FormValues, config: SubmitConfig) -> Result<()> {
    debug!(delay_ms = config.delay_ms, "simulating API call");
    tokio::time::sleep(config.delay()).await;
    if config.fail {
        bail!("simulated API failure");
    }
    info!(fields = values.len(), "account created");
    Ok(())
}

/// Handler that waits `delay_ms` and then succeeds, or fails when `fail` is set
pub fn demo_handler(config: SubmitConfig) -> impl SubmitHandler {
    move |values: FormValues| simulate_submit(values, config.clone())
}

/// Output options for [`run`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Print snapshots as JSON instead of a table
    pub json: bool,
    /// Print a prompt before each line
    pub prompt: bool,
}

fn print_snapshot(
    engine: &FormEngine,
    out: &mut impl Write,
    options: SessionOptions,
) -> Result<()> {
    let snapshot = engine.snapshot();
    if options.json {
        writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    } else {
        render::render_snapshot(out, &snapshot)?;
    }
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input
///
/// Bad lines are reported on `out` and the session carries on.
pub async fn run(
    engine: &FormEngine,
    input: impl BufRead,
    out: &mut impl Write,
    options: SessionOptions,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if options.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match command {
            Command::Set(name, value) => engine.edit_field(name, value),
            Command::Blur(name) => engine.blur_field(name),
            Command::Submit => match engine.attempt_submit().await {
                SubmitOutcome::Invalid => writeln!(out, "submit blocked: fix the marked fields")?,
                SubmitOutcome::AlreadySubmitting => writeln!(out, "a submission is already pending")?,
                SubmitOutcome::Submitted => writeln!(out, "submitted")?,
                SubmitOutcome::HandlerFailed => writeln!(out, "submission failed, try again")?,
            },
            Command::Show => {}
            Command::Reset => {
                if !engine.reset() {
                    writeln!(out, "cannot reset while submitting")?;
                }
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }
        print_snapshot(engine, out, options)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck::{RuleOptions, RuleSet};
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Option<Command> {
        parse_command(line).unwrap()
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set phone +1 (555) 123-4567"),
            Some(Command::Set(FieldName::Phone, "+1 (555) 123-4567".to_string()))
        );
    }

    #[test]
    fn test_parse_set_without_value_clears() {
        assert_eq!(
            parse("set website"),
            Some(Command::Set(FieldName::Website, String::new()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("blur email"), Some(Command::Blur(FieldName::Email)));
        assert_eq!(parse("submit"), Some(Command::Submit));
        assert_eq!(parse("  show  "), Some(Command::Show));
        assert_eq!(parse("reset"), Some(Command::Reset));
        assert_eq!(parse("exit"), Some(Command::Quit));
        assert_eq!(parse(""), None);
        assert_eq!(parse("# comment"), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_command("set nickname Bob").unwrap_err();
        assert!(err.to_string().contains("nickname"));
        assert!(parse_command("blur").is_err());
        assert!(parse_command("set").is_err());
        assert!(parse_command("dance").is_err());
    }

    fn engine(fail: bool) -> FormEngine {
        FormEngine::new(
            RuleSet::signup(&RuleOptions::default()),
            demo_handler(SubmitConfig { delay_ms: 0, fail }),
        )
    }

    async fn run_script(engine: &FormEngine, script: &str, json: bool) -> String {
        let mut out = Vec::new();
        let options = SessionOptions { json, prompt: false };
        run(engine, script.as_bytes(), &mut out, options).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    const VALID_SCRIPT: &str = "\
set firstName Jo
set lastName Do
set email a@b.com
set password Abc123!@
set confirmPassword Abc123!@
set phone 1234567890
submit
";

    #[tokio::test]
    async fn test_script_submits_and_resets() {
        let engine = engine(false);
        let output = run_script(&engine, VALID_SCRIPT, false).await;

        assert!(output.contains("submitted\n"));
        assert!(output.ends_with("Success! Your form has been submitted.\n"));
        assert_eq!(engine.snapshot().fields.email.value, "");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_values() {
        let engine = engine(true);
        let output = run_script(&engine, VALID_SCRIPT, false).await;

        assert!(output.contains("submission failed, try again\n"));
        assert_eq!(engine.snapshot().fields.email.value, "a@b.com");
    }

    #[tokio::test]
    async fn test_bad_lines_do_not_end_session() {
        let engine = engine(false);
        let script = "set nickname Bob\nfly\nset firstName J\nquit\nset firstName Jo\n";
        let output = run_script(&engine, script, false).await;

        assert!(output.contains("error: unknown form field: \"nickname\""));
        assert!(output.contains("error: unknown command: \"fly\""));
        assert_eq!(engine.snapshot().fields.first_name.value, "J");
    }

    #[tokio::test]
    async fn test_json_output_is_one_line_per_command() {
        let engine = engine(false);
        let output = run_script(&engine, "set email nope\nshow\n", true).await;

        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0]["fields"]["email"]["error"],
            "Please enter a valid email address"
        );
        assert_eq!(lines[1]["submission"], "idle");
    }
}
