use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named boolean switches attached to a company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(IndexMap<String, bool>);

impl FeatureFlags {
    /// Empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is switched on; unknown flags are off.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no flag is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `overrides` layered on top of `defaults`. Default ordering is kept and
    /// flags only known to `overrides` are appended.
    pub fn merged(defaults: &FeatureFlags, overrides: &FeatureFlags) -> FeatureFlags {
        let mut merged = defaults.clone();
        for (name, enabled) in overrides.iter() {
            merged.0.insert(name.to_string(), enabled);
        }
        merged
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FeatureFlags {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, enabled)| (name.into(), enabled)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_and_order_is_stable() {
        let defaults: FeatureFlags = [("rides", true), ("map", false)].into_iter().collect();
        let overrides: FeatureFlags = [("map", true), ("beta", true)].into_iter().collect();

        let merged = FeatureFlags::merged(&defaults, &overrides);
        let flags: Vec<_> = merged.iter().collect();
        assert_eq!(flags, vec![("rides", true), ("map", true), ("beta", true)]);
    }

    #[test]
    fn unknown_flags_are_disabled() {
        let flags = FeatureFlags::new();
        assert!(!flags.is_enabled("anything"));
    }

    #[test]
    fn deserializes_from_plain_object() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"rides":true,"map":false}"#).unwrap();
        assert!(flags.is_enabled("rides"));
        assert!(!flags.is_enabled("map"));
        assert_eq!(flags.len(), 2);
    }
}
