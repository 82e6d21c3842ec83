// src/lib.rs
//! Password policy management and policy-driven password generation.
//!
//! Two tightly coupled halves: the generators (character pool resolution,
//! constrained-random and pronounceable strategies, the master-password
//! strength check) and the policy manager (named policies plus the default
//! slot, with full undo/redo). The manager hands `Policy` values to the
//! generator; the generator never mutates policies, and the manager never
//! generates.
//!
//! Randomness and preferences are explicit injected capabilities
//! ([`RandomSource`], [`PreferenceStore`]); nothing here reads ambient
//! global state or performs I/O.

pub mod core;
pub mod errors;
pub mod generators;
pub mod models;
pub mod policy;

pub use crate::core::{MemoryPrefs, PreferenceStore, UsageLookup};
pub use crate::errors::{PolicyError, Result};
pub use crate::generators::{
    check_password, strength_score, CharacterPool, PasswordGenerator, RandomSource, StrengthIssue,
};
pub use crate::models::{CharacterClass, Policy, DEFAULT_POLICY_NAME, MAX_POLICIES};
pub use crate::policy::{Command, PolicyManager};
