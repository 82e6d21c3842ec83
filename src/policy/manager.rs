// src/policy/manager.rs
use std::collections::BTreeMap;

use crate::core::prefs::{PreferenceStore, UsageLookup};
use crate::errors::{PolicyError, Result};
use crate::models::{Policy, DEFAULT_POLICY_NAME, MAX_POLICIES};
use crate::policy::command::Command;

/// Single source of truth for named policies and the default policy, with
/// unlimited undo/redo.
///
/// Every mutator validates first, then performs the map mutation and the
/// undo-stack push together; a failed validation leaves no trace. Executing
/// a fresh command deliberately does NOT clear the redo stack (the original
/// behavior this manager preserves); a stale redo that no longer applies is
/// dropped quietly by `redo()`.
pub struct PolicyManager {
    policies: BTreeMap<String, Policy>,
    default_policy: Policy,
    default_symbols: Option<Vec<char>>,
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl PolicyManager {
    /// Read the default policy and default symbol set from preferences.
    /// Both stacks start empty; they live for the manager's lifetime only.
    pub fn new(prefs: &dyn PreferenceStore) -> Self {
        PolicyManager {
            policies: BTreeMap::new(),
            default_policy: prefs.default_policy(),
            default_symbols: prefs.default_symbols(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn has_policy(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    pub fn get_policy(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    pub fn policy_names(&self) -> Vec<String> {
        self.policies.keys().cloned().collect()
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    pub fn default_policy(&self) -> &Policy {
        &self.default_policy
    }

    /// Default symbol set read from preferences at construction; handed to
    /// `CharacterPool::build` by callers.
    pub fn default_symbols(&self) -> Option<&[char]> {
        self.default_symbols.as_deref()
    }

    /// The policy to generate with: a named policy, or the default slot for
    /// the reserved name.
    pub fn resolve(&self, name: &str) -> Result<Policy> {
        if name == DEFAULT_POLICY_NAME {
            return Ok(self.default_policy.clone());
        }
        self.policies
            .get(name)
            .cloned()
            .ok_or_else(|| PolicyError::PolicyNotFound(name.to_string()))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn add(&mut self, name: &str, policy: Policy) -> Result<()> {
        policy.validate()?;
        let cmd = Command::Add {
            name: name.to_string(),
            policy,
        };
        self.apply(&cmd)?;
        log::debug!("added policy '{}'", name);
        self.undo_stack.push(cmd);
        Ok(())
    }

    /// Remove a named policy. Absent names are a no-op (`Ok(false)`), so
    /// callers that already prompted the user need no second lookup.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if name == DEFAULT_POLICY_NAME {
            return Err(PolicyError::PolicyNameReserved);
        }
        let old = match self.policies.get(name) {
            Some(policy) => policy.clone(),
            None => return Ok(false),
        };
        let cmd = Command::Remove {
            name: name.to_string(),
            policy: old,
        };
        self.apply(&cmd)?;
        log::debug!("removed policy '{}'", name);
        self.undo_stack.push(cmd);
        Ok(true)
    }

    /// Replace a policy's value. The reserved name routes to the default
    /// slot, which can be modified but never renamed or removed.
    pub fn modify(&mut self, name: &str, new: Policy) -> Result<()> {
        new.validate()?;
        let cmd = if name == DEFAULT_POLICY_NAME {
            Command::ModifyDefault {
                old: self.default_policy.clone(),
                new,
            }
        } else {
            let old = self
                .policies
                .get(name)
                .cloned()
                .ok_or_else(|| PolicyError::PolicyNotFound(name.to_string()))?;
            Command::ModifyNamed {
                name: name.to_string(),
                old,
                new,
            }
        };
        self.apply(&cmd)?;
        log::debug!("modified policy '{}'", name);
        self.undo_stack.push(cmd);
        Ok(())
    }

    /// Atomically rename a policy, optionally changing its value in the same
    /// step (the edit dialog allows both at once). Renaming to the policy's
    /// own current name degenerates to a modify.
    pub fn rename(&mut self, old_name: &str, new_name: &str, new_policy: Policy) -> Result<()> {
        if old_name == new_name {
            return self.modify(old_name, new_policy);
        }
        if old_name == DEFAULT_POLICY_NAME {
            return Err(PolicyError::PolicyNameReserved);
        }
        new_policy.validate()?;
        let old_policy = self
            .policies
            .get(old_name)
            .cloned()
            .ok_or_else(|| PolicyError::PolicyNotFound(old_name.to_string()))?;
        let cmd = Command::Rename {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            old_policy,
            new_policy,
        };
        self.apply(&cmd)?;
        log::debug!("renamed policy '{}' to '{}'", old_name, new_name);
        self.undo_stack.push(cmd);
        Ok(())
    }

    /// Undo the most recent command. Returns the command that was undone so
    /// the UI can re-select by name (`inverse().selects()`).
    pub fn undo(&mut self) -> Option<Command> {
        let cmd = self.undo_stack.pop()?;
        let inverse = cmd.inverse();
        if let Err(e) = self.apply(&inverse) {
            // Stack discipline makes this unreachable; restore and bail.
            log::warn!("undo failed to apply: {}", e);
            self.undo_stack.push(cmd);
            return None;
        }
        self.redo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Redo the most recently undone command. Because fresh commands do not
    /// clear the redo stack, a stale entry may no longer apply to the
    /// current map; such an entry is dropped and `None` returned.
    pub fn redo(&mut self) -> Option<Command> {
        let cmd = self.redo_stack.pop()?;
        if let Err(e) = self.apply(&cmd) {
            log::warn!("dropping stale redo entry: {}", e);
            return None;
        }
        self.undo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Display text for the usage column: the default slot shows "N/A",
    /// unreferenced policies "Not used", everything else the count.
    pub fn usage_label(&self, name: &str, lookup: &dyn UsageLookup) -> String {
        if name == DEFAULT_POLICY_NAME {
            return "N/A".to_string();
        }
        match lookup.usage_count(name) {
            0 => "Not used".to_string(),
            n => n.to_string(),
        }
    }

    /// Explicit save step for a changed default policy; the manager never
    /// writes preferences on its own.
    pub fn commit_default_policy(&self, prefs: &mut dyn PreferenceStore) -> Result<()> {
        prefs.save_default_policy(&self.default_policy)
    }

    // Forward application of one command against the current state. Either
    // the whole mutation happens or none of it; validation errors surface
    // to the caller with the map untouched.
    fn apply(&mut self, cmd: &Command) -> Result<()> {
        match cmd {
            Command::Add { name, policy } => {
                if name == DEFAULT_POLICY_NAME {
                    return Err(PolicyError::PolicyNameReserved);
                }
                if name.is_empty() {
                    return Err(PolicyError::InvalidPolicy("policy name is empty".into()));
                }
                if self.policies.contains_key(name) {
                    return Err(PolicyError::PolicyNameTaken(name.clone()));
                }
                if self.policies.len() >= MAX_POLICIES {
                    return Err(PolicyError::MaxPoliciesReached);
                }
                self.policies.insert(name.clone(), policy.clone());
            }
            Command::Remove { name, .. } => {
                if self.policies.remove(name).is_none() {
                    return Err(PolicyError::PolicyNotFound(name.clone()));
                }
            }
            Command::ModifyNamed { name, new, .. } => {
                let entry = self
                    .policies
                    .get_mut(name)
                    .ok_or_else(|| PolicyError::PolicyNotFound(name.clone()))?;
                *entry = new.clone();
            }
            Command::ModifyDefault { new, .. } => {
                self.default_policy = new.clone();
            }
            Command::Rename {
                old_name,
                new_name,
                new_policy,
                ..
            } => {
                if new_name == DEFAULT_POLICY_NAME {
                    return Err(PolicyError::PolicyNameReserved);
                }
                if !self.policies.contains_key(old_name) {
                    return Err(PolicyError::PolicyNotFound(old_name.clone()));
                }
                if self.policies.contains_key(new_name) {
                    return Err(PolicyError::PolicyNameTaken(new_name.clone()));
                }
                self.policies.remove(old_name);
                self.policies.insert(new_name.clone(), new_policy.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::MemoryPrefs;

    struct FixedUsage(usize);

    impl UsageLookup for FixedUsage {
        fn usage_count(&self, _name: &str) -> usize {
            self.0
        }
    }

    fn manager() -> PolicyManager {
        PolicyManager::new(&MemoryPrefs::default())
    }

    fn policy(length: usize) -> Policy {
        Policy {
            length,
            ..Policy::default()
        }
    }

    #[test]
    fn add_then_undo_then_redo() {
        let mut mgr = manager();
        mgr.add("Foo", policy(10)).unwrap();
        assert!(mgr.has_policy("Foo"));

        mgr.undo().unwrap();
        assert!(!mgr.has_policy("Foo"));

        mgr.redo().unwrap();
        assert_eq!(mgr.get_policy("Foo"), Some(&policy(10)));
    }

    #[test]
    fn add_rejects_reserved_duplicate_and_overflow() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.add(DEFAULT_POLICY_NAME, policy(10)),
            Err(PolicyError::PolicyNameReserved)
        ));

        mgr.add("Foo", policy(10)).unwrap();
        assert!(matches!(
            mgr.add("Foo", policy(12)),
            Err(PolicyError::PolicyNameTaken(_))
        ));

        for i in 1..MAX_POLICIES {
            mgr.add(&format!("P{}", i), policy(10)).unwrap();
        }
        assert_eq!(mgr.policy_count(), MAX_POLICIES);
        assert!(matches!(
            mgr.add("Overflow", policy(10)),
            Err(PolicyError::MaxPoliciesReached)
        ));
    }

    #[test]
    fn failed_add_pushes_nothing() {
        let mut mgr = manager();
        mgr.add("Foo", policy(10)).unwrap();
        let _ = mgr.add("Foo", policy(12));
        mgr.undo().unwrap();
        assert!(!mgr.has_policy("Foo"));
        assert!(!mgr.can_undo());
    }

    #[test]
    fn remove_absent_is_a_quiet_no_op() {
        let mut mgr = manager();
        assert_eq!(mgr.remove("Ghost").unwrap(), false);
        assert!(!mgr.can_undo());

        mgr.add("Foo", policy(10)).unwrap();
        assert_eq!(mgr.remove("Foo").unwrap(), true);
        mgr.undo().unwrap();
        assert!(mgr.has_policy("Foo"));
    }

    #[test]
    fn default_slot_cannot_be_removed() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.remove(DEFAULT_POLICY_NAME),
            Err(PolicyError::PolicyNameReserved)
        ));
    }

    #[test]
    fn modify_routes_reserved_name_to_default_slot() {
        let mut mgr = manager();
        let new_default = policy(24);
        mgr.modify(DEFAULT_POLICY_NAME, new_default.clone()).unwrap();
        assert_eq!(mgr.default_policy(), &new_default);

        mgr.undo().unwrap();
        assert_eq!(mgr.default_policy(), &Policy::default());

        mgr.redo().unwrap();
        assert_eq!(mgr.default_policy(), &new_default);
    }

    #[test]
    fn modify_named_and_undo_restores_old_value() {
        let mut mgr = manager();
        mgr.add("Foo", policy(10)).unwrap();
        mgr.modify("Foo", policy(20)).unwrap();
        assert_eq!(mgr.get_policy("Foo"), Some(&policy(20)));

        mgr.undo().unwrap();
        assert_eq!(mgr.get_policy("Foo"), Some(&policy(10)));
    }

    #[test]
    fn modify_missing_fails() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.modify("Ghost", policy(10)),
            Err(PolicyError::PolicyNotFound(_))
        ));
    }

    #[test]
    fn rename_then_undo_restores_original_name_and_value() {
        let mut mgr = manager();
        mgr.add("A", policy(10)).unwrap();
        mgr.rename("A", "B", policy(20)).unwrap();
        assert!(!mgr.has_policy("A"));
        assert_eq!(mgr.get_policy("B"), Some(&policy(20)));

        mgr.undo().unwrap();
        assert!(!mgr.has_policy("B"));
        assert_eq!(mgr.get_policy("A"), Some(&policy(10)));
    }

    #[test]
    fn rename_rejects_taken_and_reserved_targets() {
        let mut mgr = manager();
        mgr.add("A", policy(10)).unwrap();
        mgr.add("B", policy(12)).unwrap();
        assert!(matches!(
            mgr.rename("A", "B", policy(10)),
            Err(PolicyError::PolicyNameTaken(_))
        ));
        assert!(matches!(
            mgr.rename("A", DEFAULT_POLICY_NAME, policy(10)),
            Err(PolicyError::PolicyNameReserved)
        ));
        // Same-name rename degenerates to modify
        mgr.rename("A", "A", policy(30)).unwrap();
        assert_eq!(mgr.get_policy("A"), Some(&policy(30)));
    }

    #[test]
    fn fresh_commands_do_not_clear_the_redo_stack() {
        let mut mgr = manager();
        mgr.add("A", policy(10)).unwrap();
        mgr.undo().unwrap();
        assert!(mgr.can_redo());

        // A fresh command leaves the redo stack intact...
        mgr.add("B", policy(12)).unwrap();
        assert!(mgr.can_redo());

        // ...and the stale entry still replays when it applies cleanly.
        assert!(mgr.redo().is_some());
        assert!(mgr.has_policy("A") && mgr.has_policy("B"));
    }

    #[test]
    fn stale_redo_that_conflicts_is_dropped() {
        let mut mgr = manager();
        mgr.add("A", policy(10)).unwrap();
        mgr.undo().unwrap();
        // Re-occupy the name; the pending redo-add of "A" now conflicts.
        mgr.add("A", policy(12)).unwrap();
        assert!(mgr.redo().is_none());
        assert!(!mgr.can_redo());
        assert_eq!(mgr.get_policy("A"), Some(&policy(12)));
    }

    #[test]
    fn resolve_returns_named_or_default() {
        let mut mgr = manager();
        mgr.add("Web", policy(20)).unwrap();
        assert_eq!(mgr.resolve("Web").unwrap(), policy(20));
        assert_eq!(mgr.resolve(DEFAULT_POLICY_NAME).unwrap(), Policy::default());
        assert!(matches!(
            mgr.resolve("Ghost"),
            Err(PolicyError::PolicyNotFound(_))
        ));
    }

    #[test]
    fn usage_label_formats_for_display() {
        let mgr = manager();
        assert_eq!(mgr.usage_label(DEFAULT_POLICY_NAME, &FixedUsage(7)), "N/A");
        assert_eq!(mgr.usage_label("Foo", &FixedUsage(0)), "Not used");
        assert_eq!(mgr.usage_label("Foo", &FixedUsage(7)), "7");
    }

    #[test]
    fn commit_default_policy_writes_preferences() {
        let mut prefs = MemoryPrefs::default();
        let mut mgr = PolicyManager::new(&prefs);
        mgr.modify(DEFAULT_POLICY_NAME, policy(24)).unwrap();
        // Nothing written until the caller commits.
        assert_eq!(prefs.default_policy(), Policy::default());

        mgr.commit_default_policy(&mut prefs).unwrap();
        assert_eq!(prefs.default_policy(), policy(24));
    }

    #[test]
    fn undo_redo_survive_a_mixed_history() {
        let mut mgr = manager();
        mgr.add("A", policy(10)).unwrap();
        mgr.modify("A", policy(12)).unwrap();
        mgr.rename("A", "B", policy(14)).unwrap();
        mgr.remove("B").unwrap();

        mgr.undo().unwrap(); // un-remove
        assert_eq!(mgr.get_policy("B"), Some(&policy(14)));
        mgr.undo().unwrap(); // un-rename
        assert_eq!(mgr.get_policy("A"), Some(&policy(12)));
        mgr.undo().unwrap(); // un-modify
        assert_eq!(mgr.get_policy("A"), Some(&policy(10)));
        mgr.undo().unwrap(); // un-add
        assert_eq!(mgr.policy_count(), 0);
        assert!(!mgr.can_undo());

        mgr.redo().unwrap();
        mgr.redo().unwrap();
        mgr.redo().unwrap();
        mgr.redo().unwrap();
        assert_eq!(mgr.policy_count(), 0);
        assert!(!mgr.can_redo());
        assert!(mgr.can_undo());
    }
}
