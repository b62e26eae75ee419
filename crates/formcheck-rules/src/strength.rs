//! Password strength scoring
//!
//! Informational only: the score never decides whether the password rule
//! passes. It is computed independently from [`crate::catalog::password`].

use serde::Serialize;

use crate::catalog::is_password_special;

const STRENGTH_LEVELS: [(&str, &str); 6] = [
    ("Very Weak", "bg-red-500"),
    ("Weak", "bg-red-400"),
    ("Fair", "bg-amber-400"),
    ("Good", "bg-amber-300"),
    ("Strong", "bg-green-400"),
    ("Very Strong", "bg-green-500"),
];

/// Coarse grouping of the score, for colouring the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTone {
    Weak,
    Fair,
    Strong,
}

/// One line of the requirement checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub text: &'static str,
    pub met: bool,
}

/// Result of [`score`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// Number of satisfied criteria, 0..=5
    pub strength: u8,
    pub label: &'static str,
    pub color: &'static str,
    pub tone: StrengthTone,
    pub requirements: Vec<Requirement>,
}

impl PasswordStrength {
    /// Fill level for a strength bar, 0..=100
    pub fn percentage(&self) -> u8 {
        self.strength * 20
    }

    pub fn is_max(&self) -> bool {
        usize::from(self.strength) == STRENGTH_LEVELS.len() - 1
    }
}

/// Scores `password` by counting the criteria it satisfies
pub fn score(password: &str) -> PasswordStrength {
    let requirements = vec![
        Requirement {
            text: "At least 8 characters",
            met: password.chars().count() >= 8,
        },
        Requirement {
            text: "One lowercase letter",
            met: password.chars().any(|c| c.is_ascii_lowercase()),
        },
        Requirement {
            text: "One uppercase letter",
            met: password.chars().any(|c| c.is_ascii_uppercase()),
        },
        Requirement {
            text: "One number",
            met: password.chars().any(|c| c.is_ascii_digit()),
        },
        Requirement {
            text: "One special character",
            met: password.chars().any(is_password_special),
        },
    ];

    let strength = requirements.iter().filter(|r| r.met).count() as u8;
    let (label, color) = STRENGTH_LEVELS[usize::from(strength)];
    let tone = match strength {
        0..=2 => StrengthTone::Weak,
        3 => StrengthTone::Fair,
        _ => StrengthTone::Strong,
    };

    PasswordStrength {
        strength,
        label,
        color,
        tone,
        requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::password;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", 0, "Very Weak")]
    #[case("abc", 1, "Weak")]
    #[case("abcdefgh", 2, "Fair")]
    #[case("Abcdefgh", 3, "Good")]
    #[case("Abcdefg1", 4, "Strong")]
    #[case("Abc123!@", 5, "Very Strong")]
    fn test_score_levels(#[case] input: &str, #[case] strength: u8, #[case] label: &str) {
        let result = score(input);
        assert_eq!(result.strength, strength);
        assert_eq!(result.label, label);
    }

    #[test]
    fn test_tone_and_color() {
        assert_eq!(score("abcdefgh").tone, StrengthTone::Weak);
        assert_eq!(score("Abcdefgh").tone, StrengthTone::Fair);
        assert_eq!(score("Abcdefg1").tone, StrengthTone::Strong);
        assert_eq!(score("Abc123!@").color, "bg-green-500");
        assert_eq!(score("").color, "bg-red-500");
    }

    #[test]
    fn test_requirement_checklist() {
        let met: Vec<bool> = score("abc1").requirements.iter().map(|r| r.met).collect();
        assert_eq!(met, vec![false, true, false, true, false]);

        let texts: Vec<&str> = score("").requirements.iter().map(|r| r.text).collect();
        assert_eq!(
            texts,
            vec![
                "At least 8 characters",
                "One lowercase letter",
                "One uppercase letter",
                "One number",
                "One special character",
            ]
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(score("").percentage(), 0);
        assert_eq!(score("Abcdefgh").percentage(), 60);
        assert!(score("Abc123!@").is_max());
        assert_eq!(score("Abc123!@").percentage(), 100);
    }

    #[test]
    fn test_score_is_independent_of_rule() {
        // Full score, but '#' is outside the accepted character set
        let input = "Abc123!#";
        assert_eq!(score(input).strength, 5);
        assert!(!password().check(input));
    }
}
