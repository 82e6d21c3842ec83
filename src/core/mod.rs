// src/core/mod.rs
pub mod prefs;

pub use prefs::{MemoryPrefs, PreferenceStore, UsageLookup};
