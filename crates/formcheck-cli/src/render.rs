// File: formcheck-cli/src/render.rs
// Purpose: Plain-text rendering of engine snapshots and strength reports

use formcheck::{FieldName, FieldStatus, FormSnapshot, SubmissionState};
use formcheck_rules::PasswordStrength;
use std::io::{self, Write};

fn status_marker(status: FieldStatus) -> &'static str {
    match status {
        FieldStatus::Neutral => " ",
        FieldStatus::Error => "!",
        FieldStatus::Success => "+",
    }
}

fn display_value(name: FieldName, value: &str) -> String {
    match name {
        FieldName::Password | FieldName::ConfirmPassword => "*".repeat(value.chars().count()),
        _ => value.to_string(),
    }
}

pub fn render_snapshot(out: &mut impl Write, snapshot: &FormSnapshot) -> io::Result<()> {
    for (name, field) in snapshot.fields.iter() {
        let required = if name.is_required() { "*" } else { " " };
        write!(
            out,
            "[{}] {:<17}{} {}",
            status_marker(field.status()),
            name.label(),
            required,
            display_value(name, &field.value)
        )?;
        // Errors only show once the user has interacted with the field
        if let (true, Some(error)) = (field.touched, &field.error) {
            write!(out, "  <- {}", error)?;
        }
        writeln!(out)?;

        if name == FieldName::Password && !field.value.is_empty() {
            let strength = formcheck_rules::score(&field.value);
            writeln!(
                out,
                "      strength: {} ({}%)",
                strength.label,
                strength.percentage()
            )?;
        }
    }

    let summary = match snapshot.submission {
        SubmissionState::Submitting => "Submitting...",
        SubmissionState::Success => "Success! Your form has been submitted.",
        SubmissionState::Idle if snapshot.is_form_valid => "Form is valid",
        SubmissionState::Idle => "Please complete all required fields",
    };
    writeln!(out, "{}", summary)
}

pub fn render_strength(out: &mut impl Write, strength: &PasswordStrength) -> io::Result<()> {
    writeln!(
        out,
        "Password strength: {} ({}/5)",
        strength.label, strength.strength
    )?;
    for requirement in &strength.requirements {
        let mark = if requirement.met { "x" } else { " " };
        writeln!(out, "  [{}] {}", mark, requirement.text)?;
    }
    Ok(())
}
