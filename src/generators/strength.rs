// src/generators/strength.rs
use thiserror::Error;

/// Hard minimum for a user-typed master password, independent of any policy.
pub const MIN_MASTER_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrengthIssue {
    #[error("password must be at least 8 characters long")]
    TooShort,

    #[error("password needs a lowercase letter")]
    MissingLowercase,

    #[error("password needs an uppercase letter")]
    MissingUppercase,

    #[error("password needs a digit or symbol")]
    MissingDigitOrSymbol,
}

/// Coarse acceptance check for a user-typed master password.
///
/// This is deliberately not policy satisfaction: it requires length >= 8 and
/// lowercase AND uppercase AND (digit OR other symbol), nothing more. Keep
/// it separate from `Policy::validate`.
pub fn check_password(candidate: &str) -> Result<(), Vec<StrengthIssue>> {
    let mut issues = Vec::new();

    if candidate.chars().count() < MIN_MASTER_LENGTH {
        issues.push(StrengthIssue::TooShort);
    }

    let has_lower = candidate.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = candidate.chars().any(|c| c.is_ascii_uppercase());
    let has_other = candidate.chars().any(|c| !c.is_ascii_alphabetic());

    if !has_lower {
        issues.push(StrengthIssue::MissingLowercase);
    }
    if !has_upper {
        issues.push(StrengthIssue::MissingUppercase);
    }
    if !has_other {
        issues.push(StrengthIssue::MissingDigitOrSymbol);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

// Rough 0-100 score for UI strength meters; not a gate.
pub fn strength_score(password: &str) -> u8 {
    let mut score: i32 = 0;

    // Length contribution, capped at 40
    score += (password.chars().count() as i32).min(40);

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 10;
    }

    // Heavy repetition drags the score down
    let distinct = password
        .chars()
        .collect::<std::collections::HashSet<_>>()
        .len();
    if distinct < password.chars().count() / 2 {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}
