// src/generators/pool.rs
use crate::errors::{PolicyError, Result};
use crate::models::{CharacterClass, Policy};

pub const STD_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const STD_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const STD_DIGITS: &str = "0123456789";
pub const STD_SYMBOLS: &str = "+-=_@#$%^&;:,.<>/~\\[](){}?!|";
pub const HEX_DIGITS: &str = "0123456789abcdef";

// Easy-vision variants drop visually ambiguous glyphs (l/1/|, O/0, I, S/5, Z/2, B/8).
pub const EASY_LOWERCASE: &str = "abcdefghijkmnopqrstuvwxyz";
pub const EASY_UPPERCASE: &str = "ABCDEFGHJKLMNPQRTUVWXY";
pub const EASY_DIGITS: &str = "346789";
pub const EASY_SYMBOLS: &str = "+-=_@#$%^&<>/~?";

/// Symbols the pronounceable strategy can substitute in; kept in sync with
/// the leet table in `trigram.rs`.
pub const PRONOUNCEABLE_SYMBOLS: &str = "@&(#!|$+";

/// The eligible characters for each active class under one policy, with a
/// prefix-sum index for weighted class selection.
///
/// A pool is a pure function of the policy and the default-symbols
/// preference passed to `build`; it never touches shared state.
#[derive(Debug, Clone)]
pub struct CharacterPool {
    entries: Vec<(CharacterClass, Vec<char>)>,
    // prefix[i] = total characters in entries[..i]; prefix.len() == entries.len() + 1
    prefix: Vec<usize>,
}

impl CharacterPool {
    /// Resolve each class's character set for `policy` and index them.
    ///
    /// Symbol resolution order: policy-level override, then the
    /// `default_symbols` preference, then the built-in set for the active
    /// mode. Fails with `EmptyCharacterPool` if no active class contributes
    /// any characters, so generation never discovers an empty pool mid-loop.
    pub fn build(policy: &Policy, default_symbols: Option<&[char]>) -> Result<CharacterPool> {
        let mut entries: Vec<(CharacterClass, Vec<char>)> = Vec::new();

        if policy.use_hex {
            entries.push((CharacterClass::HexDigit, HEX_DIGITS.chars().collect()));
        } else {
            if policy.use_lowercase {
                let set = if policy.use_easy_vision {
                    EASY_LOWERCASE
                } else {
                    STD_LOWERCASE
                };
                entries.push((CharacterClass::Lowercase, set.chars().collect()));
            }
            if policy.use_uppercase {
                let set = if policy.use_easy_vision {
                    EASY_UPPERCASE
                } else {
                    STD_UPPERCASE
                };
                entries.push((CharacterClass::Uppercase, set.chars().collect()));
            }
            if policy.use_digits {
                let set = if policy.use_easy_vision {
                    EASY_DIGITS
                } else {
                    STD_DIGITS
                };
                entries.push((CharacterClass::Digit, set.chars().collect()));
            }
            if policy.use_symbols {
                let set = Self::resolve_symbols(policy, default_symbols);
                if !set.is_empty() {
                    entries.push((CharacterClass::Symbol, set));
                }
            }
        }

        entries.retain(|(_, set)| !set.is_empty());
        if entries.is_empty() {
            return Err(PolicyError::EmptyCharacterPool);
        }

        let mut prefix = Vec::with_capacity(entries.len() + 1);
        prefix.push(0);
        for (_, set) in &entries {
            prefix.push(prefix.last().copied().unwrap_or(0) + set.len());
        }

        Ok(CharacterPool { entries, prefix })
    }

    fn resolve_symbols(policy: &Policy, default_symbols: Option<&[char]>) -> Vec<char> {
        if let Some(symbols) = &policy.symbols {
            if !symbols.is_empty() {
                return symbols.clone();
            }
        }
        if let Some(symbols) = default_symbols {
            if !symbols.is_empty() {
                return symbols.to_vec();
            }
        }
        let builtin = if policy.use_easy_vision {
            EASY_SYMBOLS
        } else if policy.use_pronounceable {
            PRONOUNCEABLE_SYMBOLS
        } else {
            STD_SYMBOLS
        };
        builtin.chars().collect()
    }

    /// Sum of the lengths of all active sets; the sampling range.
    pub fn total_length(&self) -> usize {
        *self.prefix.last().unwrap_or(&0)
    }

    /// The class owning `offset`. Offsets in `[prefix[i], prefix[i+1])`
    /// select class `i`, making selection probability proportional to each
    /// class's cardinality.
    pub fn class_for_offset(&self, offset: usize) -> CharacterClass {
        for (i, (class, _)) in self.entries.iter().enumerate() {
            if offset < self.prefix[i + 1] {
                return *class;
            }
        }
        // Offsets come from next_uint(total_length()), so this is only
        // reachable on a caller bug; clamp to the last class.
        self.entries[self.entries.len() - 1].0
    }

    /// The character at `offset % set_len` within `class`'s set. Returns
    /// `None` for a class that is not active in this pool.
    pub fn char_for(&self, class: CharacterClass, offset: usize) -> Option<char> {
        self.entries
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, set)| set[offset % set.len()])
    }

    /// Resolve one raw offset to its class and character in a single step.
    pub fn resolve(&self, offset: usize) -> (CharacterClass, char) {
        let class = self.class_for_offset(offset);
        // class_for_offset only returns active classes
        let ch = self.char_for(class, offset).unwrap_or('?');
        (class, ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.entries.iter().any(|(_, set)| set.contains(&ch))
    }
}
