// src/models.rs
use serde::{Deserialize, Serialize};

use crate::errors::{PolicyError, Result};

/// Name of the single built-in default policy slot. Never a valid name for
/// an ordinary named policy.
pub const DEFAULT_POLICY_NAME: &str = "Default Policy";

/// Named policies are indexed by two hex digits in the serialized form used
/// elsewhere, so a manager holds at most 255 of them.
pub const MAX_POLICIES: usize = 255;

pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    HexDigit,
}

// Rules governing one class of generated passwords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub length: usize,
    pub use_lowercase: bool,
    pub use_uppercase: bool,
    pub use_digits: bool,
    pub use_symbols: bool,
    pub min_lowercase: usize,
    pub min_uppercase: usize,
    pub min_digits: usize,
    pub min_symbols: usize,
    pub use_easy_vision: bool,
    pub use_pronounceable: bool,
    pub use_hex: bool,
    /// Explicit symbol override; `None` means "use the default symbol set
    /// from preferences, or the built-in set for the active mode".
    pub symbols: Option<Vec<char>>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            length: 12,
            use_lowercase: true,
            use_uppercase: true,
            use_digits: true,
            use_symbols: true,
            min_lowercase: 1,
            min_uppercase: 1,
            min_digits: 1,
            min_symbols: 1,
            use_easy_vision: false,
            use_pronounceable: false,
            use_hex: false,
            symbols: None,
        }
    }
}

impl Policy {
    /// A hex-only policy of the given (even) length.
    pub fn hex(length: usize) -> Self {
        Self {
            length,
            use_lowercase: false,
            use_uppercase: false,
            use_digits: false,
            use_symbols: false,
            min_lowercase: 0,
            min_uppercase: 0,
            min_digits: 0,
            min_symbols: 0,
            use_easy_vision: false,
            use_pronounceable: false,
            use_hex: true,
            symbols: None,
        }
    }

    pub fn uses_class(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.use_lowercase,
            CharacterClass::Uppercase => self.use_uppercase,
            CharacterClass::Digit => self.use_digits,
            CharacterClass::Symbol => self.use_symbols,
            CharacterClass::HexDigit => self.use_hex,
        }
    }

    /// The per-class minimum that generation actually enforces. Disabled
    /// classes count as 0. Easy-vision and pronounceable modes force the
    /// minimum of every active class to 1.
    pub fn effective_min(&self, class: CharacterClass) -> usize {
        if !self.uses_class(class) || class == CharacterClass::HexDigit {
            return 0;
        }
        if self.use_easy_vision || self.use_pronounceable {
            return 1;
        }
        match class {
            CharacterClass::Lowercase => self.min_lowercase,
            CharacterClass::Uppercase => self.min_uppercase,
            CharacterClass::Digit => self.min_digits,
            CharacterClass::Symbol => self.min_symbols,
            CharacterClass::HexDigit => 0,
        }
    }

    /// Check every policy invariant. Call before handing the policy to the
    /// generator or storing it in a manager.
    pub fn validate(&self) -> Result<()> {
        if self.length < MIN_LENGTH || self.length > MAX_LENGTH {
            return Err(PolicyError::InvalidPolicy(format!(
                "length {} outside {}..={}",
                self.length, MIN_LENGTH, MAX_LENGTH
            )));
        }

        if self.use_hex {
            if self.use_lowercase
                || self.use_uppercase
                || self.use_digits
                || self.use_symbols
                || self.use_easy_vision
                || self.use_pronounceable
            {
                return Err(PolicyError::InvalidPolicy(
                    "hex-only mode excludes all other class and mode flags".into(),
                ));
            }
            if self.length % 2 != 0 {
                return Err(PolicyError::InvalidPolicy(
                    "hex-only length must be even".into(),
                ));
            }
            return Ok(());
        }

        let any_class =
            self.use_lowercase || self.use_uppercase || self.use_digits || self.use_symbols;
        if !any_class && !self.use_pronounceable {
            return Err(PolicyError::InvalidPolicy(
                "at least one character class (or pronounceable mode) is required".into(),
            ));
        }

        // Easy-vision and pronounceable force each active minimum to 1 and
        // skip the sum check entirely.
        if !self.use_easy_vision && !self.use_pronounceable {
            let required: usize = [
                CharacterClass::Lowercase,
                CharacterClass::Uppercase,
                CharacterClass::Digit,
                CharacterClass::Symbol,
            ]
            .iter()
            .map(|&c| self.effective_min(c))
            .sum();
            if required > self.length {
                return Err(PolicyError::InvalidPolicy(format!(
                    "sum of per-class minimums ({}) exceeds length {}",
                    required, self.length
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert!(Policy::default().validate().is_ok());
    }

    #[test]
    fn rejects_minima_exceeding_length() {
        let p = Policy {
            length: 4,
            min_lowercase: 2,
            min_uppercase: 2,
            min_digits: 2,
            min_symbols: 2,
            ..Policy::default()
        };
        assert!(matches!(p.validate(), Err(PolicyError::InvalidPolicy(_))));
    }

    #[test]
    fn easy_vision_skips_sum_check_and_forces_minima() {
        let p = Policy {
            length: 4,
            min_lowercase: 100,
            use_easy_vision: true,
            ..Policy::default()
        };
        assert!(p.validate().is_ok());
        assert_eq!(p.effective_min(CharacterClass::Lowercase), 1);
        assert_eq!(p.effective_min(CharacterClass::Symbol), 1);
    }

    #[test]
    fn hex_requires_even_length_and_exclusivity() {
        assert!(Policy::hex(16).validate().is_ok());
        assert!(Policy::hex(15).validate().is_err());

        let mixed = Policy {
            use_hex: true,
            ..Policy::default()
        };
        assert!(mixed.validate().is_err());
    }

    #[test]
    fn rejects_no_classes_without_pronounceable() {
        let p = Policy {
            use_lowercase: false,
            use_uppercase: false,
            use_digits: false,
            use_symbols: false,
            ..Policy::default()
        };
        assert!(p.validate().is_err());

        let pron = Policy {
            use_pronounceable: true,
            ..p
        };
        assert!(pron.validate().is_ok());
    }

    #[test]
    fn disabled_class_minimum_is_zero() {
        let p = Policy {
            use_symbols: false,
            min_symbols: 5,
            ..Policy::default()
        };
        assert_eq!(p.effective_min(CharacterClass::Symbol), 0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn policy_serde_round_trip() {
        let p = Policy {
            symbols: Some(vec!['!', '@']),
            ..Policy::default()
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
