use crate::model::OfferCategory;
use crate::view::OfferKey;
use std::collections::HashMap;

/// Which offers have their details expanded, keyed by content rather than
/// list position so re-filtering leaves other entries untouched.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashMap<(OfferCategory, OfferKey), bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one offer and returns its new state.
    pub fn toggle(&mut self, category: OfferCategory, key: &OfferKey) -> bool {
        let entry = self.expanded.entry((category, key.clone())).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn is_expanded(&self, category: OfferCategory, key: &OfferKey) -> bool {
        self.expanded
            .get(&(category, key.clone()))
            .copied()
            .unwrap_or(false)
    }

    /// Collapses everything, as when a different card is selected.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.values().filter(|v| **v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{columns, OfferRow};

    fn key(title: &str) -> OfferKey {
        OfferKey::of(&OfferRow::new().with(columns::TITLE, title))
    }

    #[test]
    fn toggle_flips_only_the_given_offer() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(OfferCategory::Pvr, &key("BOGO")));
        assert!(state.is_expanded(OfferCategory::Pvr, &key("BOGO")));
        assert!(!state.is_expanded(OfferCategory::Pvr, &key("Flat 100")));
        assert!(!state.is_expanded(OfferCategory::Inox, &key("BOGO")));

        assert!(!state.toggle(OfferCategory::Pvr, &key("BOGO")));
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn categories_are_independent() {
        let mut state = ExpansionState::new();
        state.toggle(OfferCategory::Pvr, &key("BOGO"));
        state.toggle(OfferCategory::Inox, &key("BOGO"));
        state.toggle(OfferCategory::BookMyShow, &key("Weekend"));
        assert_eq!(state.expanded_count(), 3);
    }

    #[test]
    fn clear_collapses_everything() {
        let mut state = ExpansionState::new();
        state.toggle(OfferCategory::Pvr, &key("BOGO"));
        state.clear();
        assert!(!state.is_expanded(OfferCategory::Pvr, &key("BOGO")));
    }
}
