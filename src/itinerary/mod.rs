//! Selection state and the views derived from it
//!
//! [`Session`] owns the selection plus the last rendered view model. Every
//! mutation re-renders the whole view and returns the patches between the
//! previous and the new render.

pub mod selection;
pub mod view;

pub use selection::Selection;
pub use view::{render, Tab, ViewModel, ViewPatch};

use crate::catalog::Catalog;

/// One user's browsing session
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    selection: Selection,
    tab: Tab,
    rendered: ViewModel,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        let selection = Selection::new();
        let tab = Tab::default();
        let rendered = render(&catalog, &selection, tab);
        Self {
            catalog,
            selection,
            tab,
            rendered,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The view model as of the last mutation
    pub fn view(&self) -> &ViewModel {
        &self.rendered
    }

    /// Marker click
    pub fn toggle_pin(&mut self, id: &str) -> Vec<ViewPatch> {
        self.selection.toggle_pin(&self.catalog, id);
        self.sync()
    }

    /// Remove control of an itinerary entry
    pub fn remove_pin(&mut self, id: &str) -> Vec<ViewPatch> {
        self.selection.remove_pin(id);
        self.sync()
    }

    /// Card click: toggles the pin and jumps to the globe view
    pub fn choose_card(&mut self, id: &str) -> Vec<ViewPatch> {
        if self.selection.toggle_pin(&self.catalog, id) {
            self.tab = Tab::Assistant;
        }
        self.sync()
    }

    /// Navigation tab click
    pub fn show_tab(&mut self, tab: Tab) -> Vec<ViewPatch> {
        self.tab = tab;
        self.sync()
    }

    fn sync(&mut self) -> Vec<ViewPatch> {
        let next = render(&self.catalog, &self.selection, self.tab);
        let patches = self.rendered.diff(&next);
        self.rendered = next;
        patches
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
