//! Password strength scoring.
//!
//! Four independent checks worth 25 points each. Only ASCII classes are
//! consulted so the score is the same on every platform and locale.

use std::fmt;

const MIN_LENGTH: usize = 8;
const POINTS_PER_CHECK: u8 = 25;

/// Qualitative label for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s < 25 => Strength::Weak,
            s if s < 50 => Strength::Fair,
            s if s < 75 => Strength::Good,
            _ => Strength::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Fair => "Fair",
            Strength::Good => "Good",
            Strength::Strong => "Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score a password: one of 0, 25, 50, 75 or 100.
pub fn password_score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8 * POINTS_PER_CHECK
}

/// Score and label in one call.
pub fn password_strength(password: &str) -> (u8, Strength) {
    let score = password_score(password);
    (score, Strength::from_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_scores_zero() {
        assert_eq!(password_score(""), 0);
        assert_eq!(password_strength(""), (0, Strength::Weak));
    }

    #[test]
    fn test_all_checks_pass() {
        assert_eq!(password_score("Abcdefg1!"), 100);
        assert_eq!(Strength::from_score(100), Strength::Strong);
    }

    #[test]
    fn test_each_check_counts_once() {
        assert_eq!(password_score("abcdefgh"), 25);
        assert_eq!(password_score("A"), 25);
        assert_eq!(password_score("1111"), 25);
        assert_eq!(password_score("!!"), 25);
        assert_eq!(password_score("student123"), 50);
        assert_eq!(password_score("Student123"), 75);
    }

    #[test]
    fn test_non_ascii_counts_as_symbol_not_uppercase() {
        // 'É' is not an ASCII capital but is outside [A-Za-z0-9]
        assert_eq!(password_score("É"), 25);
    }

    #[test]
    fn test_score_is_always_a_multiple_of_25() {
        for password in ["", "a", "Aa1!", "longpassword", "PASSWORD", "pass word", "Ünïcödé9"] {
            let score = password_score(password);
            assert!([0, 25, 50, 75, 100].contains(&score), "{password}: {score}");
            assert_eq!(score, password_score(password));
        }
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(Strength::from_score(0), Strength::Weak);
        assert_eq!(Strength::from_score(25), Strength::Fair);
        assert_eq!(Strength::from_score(50), Strength::Good);
        assert_eq!(Strength::from_score(75), Strength::Strong);
        assert_eq!(Strength::Good.to_string(), "Good");
    }
}
