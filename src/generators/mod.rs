// src/generators/mod.rs
pub mod password;
pub mod pool;
pub mod rng;
pub mod strength;
pub mod trigram;

pub use password::PasswordGenerator;
pub use pool::CharacterPool;
pub use rng::RandomSource;
pub use strength::{check_password, strength_score, StrengthIssue};
