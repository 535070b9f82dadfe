//! The fixed-priority sequence of named layers consulted for a lookup.

use crate::layer::PropertyLayer;
use crate::types::LayerKind;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Ordered slots of the resolution chain. Each slot is either absent
/// (no matching source was found) or holds one merged layer.
///
/// Slot order never changes after construction; the custom-class slot
/// is the one exception and may be populated or re-merged at any time.
/// Absent slots simply do not contribute to lookups — they are never an
/// error.
#[derive(Debug, Default)]
pub struct ResolutionChain {
    pub(crate) test_params: Option<PropertyLayer>,
    pub(crate) os: Option<PropertyLayer>,
    pub(crate) custom_class: RwLock<Option<PropertyLayer>>,
    pub(crate) env_class: Option<PropertyLayer>,
    pub(crate) global_class: Option<PropertyLayer>,
    pub(crate) env: Option<PropertyLayer>,
    pub(crate) global: Option<PropertyLayer>,
}

impl ResolutionChain {
    /// Walk the chain top to bottom and return the first slot
    /// containing `key`, with its value.
    pub fn lookup(&self, key: &str) -> Option<(LayerKind, String)> {
        if let Some(value) = slot_get(&self.test_params, key) {
            return Some((LayerKind::TestParams, value));
        }
        if let Some(value) = slot_get(&self.os, key) {
            return Some((LayerKind::Os, value));
        }
        if let Some(value) = slot_get(&self.custom_class.read(), key) {
            return Some((LayerKind::CustomClass, value));
        }
        if let Some(value) = slot_get(&self.env_class, key) {
            return Some((LayerKind::EnvironmentClass, value));
        }
        if let Some(value) = slot_get(&self.global_class, key) {
            return Some((LayerKind::GlobalClass, value));
        }
        if let Some(value) = slot_get(&self.env, key) {
            return Some((LayerKind::Environment, value));
        }
        if let Some(value) = slot_get(&self.global, key) {
            return Some((LayerKind::Global, value));
        }
        None
    }

    /// Whether any slot contains `key`.
    pub fn contains(&self, key: &str) -> bool {
        slot_has(&self.test_params, key)
            || slot_has(&self.os, key)
            || slot_has(&self.custom_class.read(), key)
            || slot_has(&self.env_class, key)
            || slot_has(&self.global_class, key)
            || slot_has(&self.env, key)
            || slot_has(&self.global, key)
    }

    /// Merge `source` into the custom-class slot, creating it on first
    /// use.
    pub fn merge_custom(&self, source: &PropertyLayer) {
        self.custom_class
            .write()
            .get_or_insert_with(PropertyLayer::new)
            .merge_override(source);
    }

    /// Visit populated slots from lowest to highest priority.
    pub fn for_each_low_to_high(&self, mut visit: impl FnMut(LayerKind, &PropertyLayer)) {
        if let Some(layer) = &self.global {
            visit(LayerKind::Global, layer);
        }
        if let Some(layer) = &self.env {
            visit(LayerKind::Environment, layer);
        }
        if let Some(layer) = &self.global_class {
            visit(LayerKind::GlobalClass, layer);
        }
        if let Some(layer) = &self.env_class {
            visit(LayerKind::EnvironmentClass, layer);
        }
        {
            let custom = self.custom_class.read();
            if let Some(layer) = custom.as_ref() {
                visit(LayerKind::CustomClass, layer);
            }
        }
        if let Some(layer) = &self.os {
            visit(LayerKind::Os, layer);
        }
        if let Some(layer) = &self.test_params {
            visit(LayerKind::TestParams, layer);
        }
    }

    /// Union of the keys held by every populated slot.
    pub fn keys(&self) -> BTreeSet<String> {
        let mut all = BTreeSet::new();
        self.for_each_low_to_high(|_, layer| {
            all.extend(layer.keys().map(str::to_owned));
        });
        all
    }
}

fn slot_get(slot: &Option<PropertyLayer>, key: &str) -> Option<String> {
    slot.as_ref().and_then(|layer| layer.get(key)).map(str::to_owned)
}

fn slot_has(slot: &Option<PropertyLayer>, key: &str) -> bool {
    slot.as_ref().is_some_and(|layer| layer.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(kind: &str) -> Option<PropertyLayer> {
        Some([("k", kind), (kind, "set")].into_iter().collect())
    }

    fn full_chain() -> ResolutionChain {
        let chain = ResolutionChain {
            test_params: layer("test_params"),
            os: layer("os"),
            env_class: layer("env_class"),
            global_class: layer("global_class"),
            env: layer("env"),
            global: layer("global"),
            ..Default::default()
        };
        chain.merge_custom(&[("k", "custom"), ("custom", "set")].into_iter().collect());
        chain
    }

    #[test]
    fn test_lookup_precedence_order() {
        let mut chain = full_chain();

        let expected = [
            (LayerKind::TestParams, "test_params"),
            (LayerKind::Os, "os"),
            (LayerKind::CustomClass, "custom"),
            (LayerKind::EnvironmentClass, "env_class"),
            (LayerKind::GlobalClass, "global_class"),
            (LayerKind::Environment, "env"),
            (LayerKind::Global, "global"),
        ];

        for (kind, value) in expected {
            assert_eq!(chain.lookup("k"), Some((kind, value.to_string())));
            // Remove the winning slot and check the next one takes over.
            match kind {
                LayerKind::TestParams => chain.test_params = None,
                LayerKind::Os => chain.os = None,
                LayerKind::CustomClass => *chain.custom_class.write() = None,
                LayerKind::EnvironmentClass => chain.env_class = None,
                LayerKind::GlobalClass => chain.global_class = None,
                LayerKind::Environment => chain.env = None,
                LayerKind::Global => chain.global = None,
            }
        }
        assert_eq!(chain.lookup("k"), None);
    }

    #[test]
    fn test_lookup_skips_slots_missing_the_key() {
        let chain = full_chain();
        // Only the env slot defines "env".
        assert_eq!(
            chain.lookup("env"),
            Some((LayerKind::Environment, "set".to_string()))
        );
    }

    #[test]
    fn test_contains_matches_lookup() {
        let chain = full_chain();
        assert!(chain.contains("k"));
        assert!(chain.contains("global"));
        assert!(!chain.contains("absent"));
    }

    #[test]
    fn test_empty_chain_resolves_nothing() {
        let chain = ResolutionChain::default();
        assert_eq!(chain.lookup("k"), None);
        assert!(!chain.contains("k"));
        assert!(chain.keys().is_empty());
    }

    #[test]
    fn test_merge_custom_creates_then_overrides() {
        let chain = ResolutionChain::default();
        assert_eq!(chain.lookup("a"), None);

        chain.merge_custom(&[("a", "1"), ("b", "2")].into_iter().collect());
        assert_eq!(chain.lookup("a"), Some((LayerKind::CustomClass, "1".to_string())));

        chain.merge_custom(&[("a", "10")].into_iter().collect());
        assert_eq!(chain.lookup("a"), Some((LayerKind::CustomClass, "10".to_string())));
        assert_eq!(chain.lookup("b"), Some((LayerKind::CustomClass, "2".to_string())));
    }

    #[test]
    fn test_keys_union_low_to_high() {
        let chain = full_chain();
        let keys = chain.keys();
        assert!(keys.contains("k"));
        assert!(keys.contains("global"));
        assert!(keys.contains("test_params"));
        assert!(keys.contains("custom"));
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_visit_order_low_to_high() {
        let chain = full_chain();
        let mut order = Vec::new();
        chain.for_each_low_to_high(|kind, _| order.push(kind));
        assert_eq!(
            order,
            [
                LayerKind::Global,
                LayerKind::Environment,
                LayerKind::GlobalClass,
                LayerKind::EnvironmentClass,
                LayerKind::CustomClass,
                LayerKind::Os,
                LayerKind::TestParams,
            ]
        );
    }
}
