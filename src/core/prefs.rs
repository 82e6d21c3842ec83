// src/core/prefs.rs
use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::Policy;

/// Supplies and accepts the default policy and the default symbol set.
///
/// Reads are taken at PolicyManager construction time; writes happen only
/// when the caller explicitly commits a change. Generation never writes.
pub trait PreferenceStore {
    fn default_policy(&self) -> Policy;

    /// The process-wide default symbol set. Empty or absent means "use the
    /// built-in symbols for the active mode".
    fn default_symbols(&self) -> Option<Vec<char>>;

    fn save_default_policy(&mut self, policy: &Policy) -> Result<()>;

    fn save_default_symbols(&mut self, symbols: &[char]) -> Result<()>;
}

/// Returns how many stored records reference the given named policy. This
/// core does not compute usage; it only carries the number through for
/// display.
pub trait UsageLookup {
    fn usage_count(&self, name: &str) -> usize;
}

// In-memory preference store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPrefs {
    pub default_policy: Policy,
    pub default_symbols: Option<Vec<char>>,
}

impl Default for MemoryPrefs {
    fn default() -> Self {
        Self {
            default_policy: Policy::default(),
            default_symbols: None,
        }
    }
}

impl MemoryPrefs {
    // Load preferences from environment variables, falling back to defaults
    pub fn load() -> Self {
        let mut prefs = MemoryPrefs::default();

        if let Ok(val) = env::var("PASSPOLICY_DEFAULT_LENGTH") {
            match val.parse() {
                Ok(length) => prefs.default_policy.length = length,
                Err(_) => log::warn!("Ignoring bad PASSPOLICY_DEFAULT_LENGTH '{}'", val),
            }
        }

        if let Ok(val) = env::var("PASSPOLICY_USE_SYMBOLS") {
            if let Ok(flag) = val.parse() {
                prefs.default_policy.use_symbols = flag;
                if !flag {
                    prefs.default_policy.min_symbols = 0;
                }
            }
        }

        if let Ok(val) = env::var("PASSPOLICY_EASY_VISION") {
            if let Ok(flag) = val.parse() {
                prefs.default_policy.use_easy_vision = flag;
            }
        }

        if let Ok(symbols) = env::var("PASSPOLICY_DEFAULT_SYMBOLS") {
            if !symbols.trim().is_empty() {
                prefs.default_symbols = Some(symbols.chars().collect());
            }
        }

        if prefs.default_policy.validate().is_err() {
            log::warn!("Environment produced an invalid default policy, reverting to built-in");
            prefs.default_policy = Policy::default();
        }

        prefs
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PreferenceStore for MemoryPrefs {
    fn default_policy(&self) -> Policy {
        self.default_policy.clone()
    }

    fn default_symbols(&self) -> Option<Vec<char>> {
        match &self.default_symbols {
            Some(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    fn save_default_policy(&mut self, policy: &Policy) -> Result<()> {
        policy.validate()?;
        self.default_policy = policy.clone();
        Ok(())
    }

    fn save_default_symbols(&mut self, symbols: &[char]) -> Result<()> {
        self.default_symbols = if symbols.is_empty() {
            None
        } else {
            Some(symbols.to_vec())
        };
        Ok(())
    }
}
