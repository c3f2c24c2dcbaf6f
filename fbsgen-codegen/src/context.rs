//! Cross-file generation state.
//!
//! [`GenerationContext`] owns the include graph and the per-unit enum default
//! maps. The preparation pass writes both; the conversion pass only reads them
//! and asks for a merged map per unit.

use std::collections::{BTreeMap, HashSet};

/// Mapping from enum name to the name of its default (minimum-valued) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultValueMap {
    entries: BTreeMap<String, String>,
}

impl DefaultValueMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the default entry of an enum.
    pub fn insert(&mut self, enum_name: String, entry_name: String) {
        self.entries.insert(enum_name, entry_name);
    }

    /// Looks up the default entry of an enum.
    #[must_use]
    pub fn get(&self, enum_name: &str) -> Option<&str> {
        self.entries.get(enum_name).map(String::as_str)
    }

    /// Copies every mapping of `other` into `self`, replacing collisions.
    pub fn overlay(&mut self, other: &DefaultValueMap) {
        for (enum_name, entry_name) in &other.entries {
            self.entries.insert(enum_name.clone(), entry_name.clone());
        }
    }

    /// Returns the number of mapped enums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no enum is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Include graph and per-unit defaults shared by both generation passes.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    includes: BTreeMap<String, Vec<String>>,
    defaults: BTreeMap<String, DefaultValueMap>,
}

impl GenerationContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the include list of a unit.
    pub fn record_includes(&mut self, unit: &str, includes: Vec<String>) {
        self.includes.insert(unit.to_string(), includes);
    }

    /// Returns the recorded include list of a unit.
    #[must_use]
    pub fn includes_of(&self, unit: &str) -> &[String] {
        self.includes.get(unit).map_or(&[], Vec::as_slice)
    }

    /// Returns true if the unit went through the preparation pass.
    #[must_use]
    pub fn is_known(&self, unit: &str) -> bool {
        self.includes.contains_key(unit)
    }

    /// Returns the default map of a unit for writing.
    pub fn defaults_mut(&mut self, unit: &str) -> &mut DefaultValueMap {
        self.defaults.entry(unit.to_string()).or_default()
    }

    /// Returns the include closure of a unit, grouped by depth.
    ///
    /// Level 0 holds the direct includes in declaration order. Each unit
    /// appears once, at its shallowest depth; the unit itself never appears.
    #[must_use]
    pub fn include_levels(&self, unit: &str) -> Vec<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::from([unit]);
        let mut levels = Vec::new();
        let mut frontier: Vec<String> = self
            .includes_of(unit)
            .iter()
            .filter(|name| visited.insert(name.as_str()))
            .cloned()
            .collect();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for name in &frontier {
                for include in self.includes_of(name) {
                    if visited.insert(include.as_str()) {
                        next.push(include.clone());
                    }
                }
            }
            levels.push(frontier);
            frontier = next;
        }

        levels
    }

    /// Builds the default map visible to a unit's messages.
    ///
    /// Deeper includes are applied first, then shallower ones; within a depth
    /// later declarations override earlier ones. The unit's own defaults are
    /// applied last and always win.
    #[must_use]
    pub fn merged_defaults(&self, unit: &str) -> DefaultValueMap {
        let mut merged = DefaultValueMap::new();

        for level in self.include_levels(unit).iter().rev() {
            for name in level {
                if let Some(defaults) = self.defaults.get(name) {
                    merged.overlay(defaults);
                } else if !self.is_known(name) {
                    tracing::warn!("{} includes {} which is not in the input set", unit, name);
                }
            }
        }

        if let Some(own) = self.defaults.get(unit) {
            merged.overlay(own);
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> DefaultValueMap {
        let mut m = DefaultValueMap::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v.to_string());
        }
        m
    }

    fn add(
        ctx: &mut GenerationContext,
        unit: &str,
        includes: &[&str],
        defaults: &[(&str, &str)],
    ) {
        ctx.record_includes(unit, includes.iter().map(|s| s.to_string()).collect());
        ctx.defaults_mut(unit).overlay(&map(defaults));
    }

    #[test]
    fn test_overlay_replaces() {
        let mut base = map(&[("A", "A0"), ("B", "B0")]);
        base.overlay(&map(&[("B", "B1"), ("C", "C1")]));
        assert_eq!(base, map(&[("A", "A0"), ("B", "B1"), ("C", "C1")]));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_include_default_visible() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "common", &[], &[("Status", "OK")]);
        add(&mut ctx, "telemetry", &["common"], &[]);
        let merged = ctx.merged_defaults("telemetry");
        assert_eq!(merged.get("Status"), Some("OK"));
    }

    #[test]
    fn test_local_wins_over_include() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "common", &[], &[("Status", "REMOTE")]);
        add(&mut ctx, "local", &["common"], &[("Status", "LOCAL")]);
        assert_eq!(ctx.merged_defaults("local").get("Status"), Some("LOCAL"));
    }

    #[test]
    fn test_last_include_wins() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "a", &[], &[("Mode", "A_MODE")]);
        add(&mut ctx, "b", &[], &[("Mode", "B_MODE")]);
        add(&mut ctx, "top", &["a", "b"], &[]);
        assert_eq!(ctx.merged_defaults("top").get("Mode"), Some("B_MODE"));
    }

    #[test]
    fn test_transitive_defaults() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "base", &[], &[("Deep", "D0"), ("Shared", "FROM_BASE")]);
        add(&mut ctx, "mid", &["base"], &[("Shared", "FROM_MID")]);
        add(&mut ctx, "top", &["mid"], &[]);
        let merged = ctx.merged_defaults("top");
        assert_eq!(merged.get("Deep"), Some("D0"));
        assert_eq!(merged.get("Shared"), Some("FROM_MID"));
        assert_eq!(
            ctx.include_levels("top"),
            vec![vec!["mid".to_string()], vec!["base".to_string()]]
        );
    }

    #[test]
    fn test_include_cycle_terminates() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "a", &["b"], &[("A", "A0")]);
        add(&mut ctx, "b", &["a"], &[("B", "B0")]);
        let merged = ctx.merged_defaults("a");
        assert_eq!(merged.get("A"), Some("A0"));
        assert_eq!(merged.get("B"), Some("B0"));
        assert_eq!(ctx.include_levels("a"), vec![vec!["b".to_string()]]);
    }

    #[test]
    fn test_missing_include_contributes_nothing() {
        let mut ctx = GenerationContext::new();
        add(&mut ctx, "top", &["absent"], &[("Own", "X")]);
        let merged = ctx.merged_defaults("top");
        assert_eq!(merged, map(&[("Own", "X")]));
        assert!(!ctx.is_known("absent"));
    }
}
