// src/policy/mod.rs
pub mod command;
pub mod manager;

pub use command::Command;
pub use manager::PolicyManager;
