//! Pinned destinations and the active (detail view) destination

use crate::catalog::Catalog;

/// Selection state for one session
///
/// `active`, whenever set, is always one of `pinned`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Pinned ids in the order they were pinned
    pinned: Vec<&'static str>,
    active: Option<&'static str>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned(&self) -> &[&'static str] {
        &self.pinned
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|p| *p == id)
    }

    /// Pin and activate `id`, or unpin it if already pinned.
    ///
    /// Unknown ids are ignored. Returns whether anything changed.
    pub fn toggle_pin(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(destination) = catalog.get(id) else {
            return false;
        };

        if !self.remove_pin(destination.id) {
            self.pinned.push(destination.id);
            self.active = Some(destination.id);
        }
        true
    }

    /// Unpin `id`, clearing active if it pointed at it.
    ///
    /// Returns `false` when `id` was not pinned.
    pub fn remove_pin(&mut self, id: &str) -> bool {
        let Some(index) = self.pinned.iter().position(|p| *p == id) else {
            return false;
        };
        self.pinned.remove(index);
        if self.active.is_some_and(|active| active == id) {
            self.active = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn assert_active_is_pinned(selection: &Selection) {
        if let Some(active) = selection.active() {
            assert!(
                selection.is_pinned(active),
                "active {active} dangling in {:?}",
                selection.pinned()
            );
        }
    }

    #[test]
    fn toggle_pins_and_activates() {
        let mut selection = Selection::new();
        assert!(selection.toggle_pin(&catalog(), "paris"));
        assert_eq!(selection.pinned(), &["paris"]);
        assert_eq!(selection.active(), Some("paris"));
    }

    #[test]
    fn toggle_unknown_is_noop() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "tokyo");
        let before = selection.clone();
        assert!(!selection.toggle_pin(&catalog(), "atlantis"));
        assert_eq!(selection, before);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "london");
        selection.toggle_pin(&catalog(), "taipei");
        selection.remove_pin("taipei");
        // london pinned, nothing active
        let before = selection.clone();
        selection.toggle_pin(&catalog(), "tokyo");
        selection.toggle_pin(&catalog(), "tokyo");
        assert_eq!(selection, before);

        // Most recent, active pin toggled off and on again.
        selection.toggle_pin(&catalog(), "capeTown");
        let before = selection.clone();
        selection.toggle_pin(&catalog(), "capeTown");
        selection.toggle_pin(&catalog(), "capeTown");
        assert_eq!(selection, before);
    }

    #[test]
    fn unpinning_active_clears_it() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "tokyo");
        selection.toggle_pin(&catalog(), "tokyo");
        assert!(selection.pinned().is_empty());
        assert_eq!(selection.active(), None);
    }

    #[test]
    fn remove_unpinned_is_noop() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "paris");
        let before = selection.clone();
        assert!(!selection.remove_pin("tokyo"));
        assert!(!selection.remove_pin("atlantis"));
        assert_eq!(selection, before);
    }

    #[test]
    fn removing_inactive_pin_keeps_active() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "tokyo");
        selection.toggle_pin(&catalog(), "paris");
        assert!(selection.remove_pin("tokyo"));
        assert_eq!(selection.pinned(), &["paris"]);
        assert_eq!(selection.active(), Some("paris"));
    }

    #[test]
    fn active_never_dangles() {
        let ids = ["paris", "tokyo", "london", "atlantis", "paris", "lagoComo", "tokyo"];
        let mut selection = Selection::new();
        for (step, id) in ids.iter().enumerate() {
            if step % 3 == 2 {
                selection.remove_pin(id);
            } else {
                selection.toggle_pin(&catalog(), id);
            }
            assert_active_is_pinned(&selection);
        }
    }
}
