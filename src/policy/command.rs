// src/policy/command.rs
use serde::{Deserialize, Serialize};

use crate::models::{Policy, DEFAULT_POLICY_NAME};

/// One reversible policy mutation. Each variant carries full pre- and
/// post-state, so undo is simply applying `inverse()`: no per-command
/// dispatch objects and no mocking needed to test the stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Add {
        name: String,
        policy: Policy,
    },
    Remove {
        name: String,
        policy: Policy,
    },
    ModifyNamed {
        name: String,
        old: Policy,
        new: Policy,
    },
    ModifyDefault {
        old: Policy,
        new: Policy,
    },
    Rename {
        old_name: String,
        new_name: String,
        old_policy: Policy,
        new_policy: Policy,
    },
}

impl Command {
    /// The command that exactly reverses this one.
    pub fn inverse(&self) -> Command {
        match self {
            Command::Add { name, policy } => Command::Remove {
                name: name.clone(),
                policy: policy.clone(),
            },
            Command::Remove { name, policy } => Command::Add {
                name: name.clone(),
                policy: policy.clone(),
            },
            Command::ModifyNamed { name, old, new } => Command::ModifyNamed {
                name: name.clone(),
                old: new.clone(),
                new: old.clone(),
            },
            Command::ModifyDefault { old, new } => Command::ModifyDefault {
                old: new.clone(),
                new: old.clone(),
            },
            Command::Rename {
                old_name,
                new_name,
                old_policy,
                new_policy,
            } => Command::Rename {
                old_name: new_name.clone(),
                new_name: old_name.clone(),
                old_policy: new_policy.clone(),
                new_policy: old_policy.clone(),
            },
        }
    }

    /// The policy name the UI should re-select once this command has been
    /// applied.
    pub fn selects(&self) -> &str {
        match self {
            Command::Add { name, .. } => name,
            Command::Remove { name, .. } => name,
            Command::ModifyNamed { name, .. } => name,
            Command::ModifyDefault { .. } => DEFAULT_POLICY_NAME,
            Command::Rename { new_name, .. } => new_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_an_involution() {
        let policy = Policy::default();
        let other = Policy {
            length: 20,
            ..Policy::default()
        };
        let commands = vec![
            Command::Add {
                name: "Web".into(),
                policy: policy.clone(),
            },
            Command::Remove {
                name: "Web".into(),
                policy: policy.clone(),
            },
            Command::ModifyNamed {
                name: "Web".into(),
                old: policy.clone(),
                new: other.clone(),
            },
            Command::ModifyDefault {
                old: policy.clone(),
                new: other.clone(),
            },
            Command::Rename {
                old_name: "Web".into(),
                new_name: "Sites".into(),
                old_policy: policy,
                new_policy: other,
            },
        ];
        for cmd in commands {
            assert_eq!(cmd.inverse().inverse(), cmd);
        }
    }

    #[test]
    fn rename_inverse_swaps_names_and_policies() {
        let old_policy = Policy::default();
        let new_policy = Policy {
            length: 32,
            ..Policy::default()
        };
        let cmd = Command::Rename {
            old_name: "A".into(),
            new_name: "B".into(),
            old_policy: old_policy.clone(),
            new_policy: new_policy.clone(),
        };
        let inv = cmd.inverse();
        assert_eq!(
            inv,
            Command::Rename {
                old_name: "B".into(),
                new_name: "A".into(),
                old_policy: new_policy,
                new_policy: old_policy,
            }
        );
        assert_eq!(inv.selects(), "A");
    }
}
