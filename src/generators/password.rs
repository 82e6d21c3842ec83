// src/generators/password.rs
use crate::errors::{PolicyError, Result};
use crate::generators::pool::CharacterPool;
use crate::generators::rng::RandomSource;
use crate::generators::trigram;
use crate::models::{CharacterClass, Policy};

/// Whole candidates are discarded and redrawn until every per-class minimum
/// is met; a sane policy needs only a handful of attempts. The cap turns a
/// pathological policy into an error instead of a hang.
pub const MAX_ATTEMPTS: usize = 10_000;

const CLASSES: [CharacterClass; 5] = [
    CharacterClass::Lowercase,
    CharacterClass::Uppercase,
    CharacterClass::Digit,
    CharacterClass::Symbol,
    CharacterClass::HexDigit,
];

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    /// Generate one password satisfying `policy`. Pronounceable mode
    /// overrides everything else; hex is checked only when pronounceable is
    /// off; otherwise the constrained-random strategy runs.
    pub fn generate(
        &self,
        policy: &Policy,
        default_symbols: Option<&[char]>,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        policy.validate()?;
        if policy.use_pronounceable {
            return self.make_pronounceable(policy, rng);
        }
        let pool = CharacterPool::build(policy, default_symbols)?;
        self.make_random(policy, &pool, rng)
    }

    /// Constrained-random strategy: draw `policy.length` characters uniformly
    /// over the pool's union, then reject the whole candidate unless every
    /// per-class minimum was hit. Rejection sampling keeps the unconstrained
    /// positions unbiased; constructive placement would not.
    pub fn make_random(
        &self,
        policy: &Policy,
        pool: &CharacterPool,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        let total = pool.total_length();
        if total == 0 {
            return Err(PolicyError::EmptyCharacterPool);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let mut needed = Self::initial_counters(policy);
            let mut candidate = String::with_capacity(policy.length);

            for _ in 0..policy.length {
                let offset = rng.next_uint(total);
                let (class, ch) = pool.resolve(offset);
                candidate.push(ch);
                let slot = &mut needed[Self::class_index(class)];
                *slot -= 1;
            }

            if needed.iter().all(|&n| n <= 0) {
                return Ok(candidate);
            }
            log::debug!("candidate missed per-class minimums (attempt {})", attempt);
        }

        log::warn!(
            "gave up after {} attempts; policy minimums are effectively unsatisfiable",
            MAX_ATTEMPTS
        );
        Err(PolicyError::InvalidPolicy(
            "per-class minimums not satisfiable within the retry budget".into(),
        ))
    }

    fn class_index(class: CharacterClass) -> usize {
        CLASSES.iter().position(|&c| c == class).unwrap_or(0)
    }

    fn initial_counters(policy: &Policy) -> [i64; 5] {
        let mut needed = [0i64; 5];
        if policy.use_hex {
            needed[Self::class_index(CharacterClass::HexDigit)] = policy.length as i64;
        } else {
            for &class in &CLASSES {
                needed[Self::class_index(class)] = policy.effective_min(class) as i64;
            }
        }
        needed
    }

    /// Pronounceable strategy: a trigram-frequency random walk over
    /// lowercase letters, then leet substitution on roughly half the
    /// eligible positions, then a case pass. The walk stops early when the
    /// table has no continuation for the trailing bigram, so the result may
    /// be shorter than requested but never longer.
    pub fn make_pronounceable(
        &self,
        policy: &Policy,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        let table = trigram::table();
        let length = policy.length;

        let mut letters: Vec<usize> = Vec::with_capacity(length);
        let r = rng.next_uint(table.sigma());
        let (a, b, c) = table.pick_first(r);
        for letter in [a, b, c] {
            if letters.len() < length {
                letters.push(letter);
            }
        }

        while letters.len() < length {
            let a = letters[letters.len() - 2];
            let b = letters[letters.len() - 1];
            let total = table.continuation_total(a, b);
            if total == 0 {
                break;
            }
            let r = rng.next_uint(total);
            letters.push(table.pick_continuation(a, b, r));
        }

        let mut chars: Vec<char> = letters
            .into_iter()
            .map(|i| (b'a' + i as u8) as char)
            .collect();

        self.substitute_leet(policy, &mut chars, rng);
        self.apply_case(policy, &mut chars, rng);

        Ok(chars.into_iter().collect())
    }

    // Replace (candidates-1)/2 + 1 of the leet-eligible positions, chosen by
    // shuffling the candidate list. Substitution stays inside the classes
    // the policy requests.
    fn substitute_leet(&self, policy: &Policy, chars: &mut [char], rng: &mut dyn RandomSource) {
        if !policy.use_digits && !policy.use_symbols {
            return;
        }

        let mut candidates: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, &ch)| {
                let (digit, symbol) = trigram::leet_substitutes(ch);
                (policy.use_digits && digit.is_some()) || (policy.use_symbols && symbol.is_some())
            })
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return;
        }

        // Fisher-Yates over the candidate positions
        for i in (1..candidates.len()).rev() {
            let j = rng.next_uint(i + 1);
            candidates.swap(i, j);
        }

        let count = (candidates.len() - 1) / 2 + 1;
        for &pos in candidates.iter().take(count) {
            let (digit, symbol) = trigram::leet_substitutes(chars[pos]);
            let digit = digit.filter(|_| policy.use_digits);
            let symbol = symbol.filter(|_| policy.use_symbols);
            chars[pos] = match (digit, symbol) {
                (Some(d), Some(s)) => {
                    if rng.next_bool() {
                        d
                    } else {
                        s
                    }
                }
                (Some(d), None) => d,
                (None, Some(s)) => s,
                (None, None) => chars[pos],
            };
        }
    }

    fn apply_case(&self, policy: &Policy, chars: &mut [char], rng: &mut dyn RandomSource) {
        if policy.use_uppercase && policy.use_lowercase {
            for ch in chars.iter_mut() {
                if ch.is_ascii_alphabetic() && rng.next_bool() {
                    *ch = ch.to_ascii_uppercase();
                }
            }
        } else if policy.use_uppercase {
            for ch in chars.iter_mut() {
                *ch = ch.to_ascii_uppercase();
            }
        }
        // lowercase-only (or neither): the walk already produced lowercase
    }
}
