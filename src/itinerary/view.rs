//! View model rendering and diffing
//!
//! [`render`] turns the selection into the complete desired visual state of
//! the frontend. [`ViewModel::diff`] compares two renders and produces the
//! patches the frontend applies; it never touches the DOM itself.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::itinerary::selection::Selection;

pub const DETAIL_PLACEHOLDER_TITLE: &str = "Select a destination";
pub const DETAIL_PLACEHOLDER_MESSAGE: &str =
    "Tap a pin on the globe to see why travelers rave about it.";
pub const ITINERARY_PLACEHOLDER_MESSAGE: &str =
    "No pins yet—tap a city to start crafting your itinerary.";

/// Top-level view switched by the navigation tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    Discover,
    Assistant,
}

/// Globe marker state that depends on the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerView {
    pub id: &'static str,
    pub name: &'static str,
    pub pinned: bool,
}

/// Destination card state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: &'static str,
    pub selected: bool,
}

/// Content of the active destination panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetailPanel {
    Placeholder {
        title: &'static str,
        message: &'static str,
    },
    Destination {
        id: &'static str,
        name: &'static str,
        description: &'static str,
        highlights: &'static [&'static str],
    },
}

/// One pinned destination in the itinerary list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryEntry {
    /// Also the target of the entry's remove control
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
}

/// Content of the itinerary panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItineraryView {
    Empty { message: &'static str },
    Entries { entries: Vec<ItineraryEntry> },
}

/// Complete desired visual state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub tab: Tab,
    pub markers: Vec<MarkerView>,
    pub cards: Vec<CardView>,
    pub detail: DetailPanel,
    pub itinerary: ItineraryView,
}

/// A single change the frontend applies to move between view models
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ViewPatch {
    ShowTab { tab: Tab },
    MarkerPinned { id: &'static str, pinned: bool },
    CardSelected { id: &'static str, selected: bool },
    Detail { panel: DetailPanel },
    Itinerary { view: ItineraryView },
}

/// Render the full view model for a selection
pub fn render(catalog: &Catalog, selection: &Selection, tab: Tab) -> ViewModel {
    let markers = catalog
        .iter()
        .map(|d| MarkerView {
            id: d.id,
            name: d.name,
            pinned: selection.is_pinned(d.id),
        })
        .collect();

    let cards = catalog
        .iter()
        .map(|d| CardView {
            id: d.id,
            selected: selection.is_pinned(d.id),
        })
        .collect();

    ViewModel {
        tab,
        markers,
        cards,
        detail: render_detail(catalog, selection),
        itinerary: render_itinerary(catalog, selection),
    }
}

fn render_detail(catalog: &Catalog, selection: &Selection) -> DetailPanel {
    match selection.active().and_then(|id| catalog.get(id)) {
        Some(destination) => DetailPanel::Destination {
            id: destination.id,
            name: destination.name,
            description: destination.description,
            highlights: destination.highlights,
        },
        None => DetailPanel::Placeholder {
            title: DETAIL_PLACEHOLDER_TITLE,
            message: DETAIL_PLACEHOLDER_MESSAGE,
        },
    }
}

fn render_itinerary(catalog: &Catalog, selection: &Selection) -> ItineraryView {
    let entries: Vec<_> = selection
        .pinned()
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|d| ItineraryEntry {
            id: d.id,
            name: d.name,
            summary: summarize(d.description),
            tags: d.tags,
        })
        .collect();

    if entries.is_empty() {
        ItineraryView::Empty {
            message: ITINERARY_PLACEHOLDER_MESSAGE,
        }
    } else {
        ItineraryView::Entries { entries }
    }
}

/// First sentence of `text`, terminator included
///
/// Returns the whole trimmed text when it has no terminator.
pub fn summarize(text: &str) -> &str {
    let text = text.trim();
    match text.find(['.', '!', '?']) {
        Some(end) => &text[..=end],
        None => text,
    }
}

impl ViewModel {
    /// Patches that turn `self` into `next`
    pub fn diff(&self, next: &ViewModel) -> Vec<ViewPatch> {
        let mut patches = Vec::new();

        if self.tab != next.tab {
            patches.push(ViewPatch::ShowTab { tab: next.tab });
        }

        for marker in &next.markers {
            let unchanged = self
                .markers
                .iter()
                .any(|m| m.id == marker.id && m.pinned == marker.pinned);
            if !unchanged {
                patches.push(ViewPatch::MarkerPinned {
                    id: marker.id,
                    pinned: marker.pinned,
                });
            }
        }

        for card in &next.cards {
            let unchanged = self
                .cards
                .iter()
                .any(|c| c.id == card.id && c.selected == card.selected);
            if !unchanged {
                patches.push(ViewPatch::CardSelected {
                    id: card.id,
                    selected: card.selected,
                });
            }
        }

        if self.detail != next.detail {
            patches.push(ViewPatch::Detail {
                panel: next.detail.clone(),
            });
        }

        if self.itinerary != next.itinerary {
            patches.push(ViewPatch::Itinerary {
                view: next.itinerary.clone(),
            });
        }

        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn empty_selection_shows_placeholders() {
        let view = render(&catalog(), &Selection::new(), Tab::Discover);
        assert_eq!(
            view.itinerary,
            ItineraryView::Empty {
                message: ITINERARY_PLACEHOLDER_MESSAGE
            }
        );
        assert_eq!(
            view.detail,
            DetailPanel::Placeholder {
                title: DETAIL_PLACEHOLDER_TITLE,
                message: DETAIL_PLACEHOLDER_MESSAGE,
            }
        );
        assert!(view.markers.iter().all(|m| !m.pinned));
        assert!(view.cards.iter().all(|c| !c.selected));
    }

    #[test]
    fn pinned_paris_renders_detail_and_entry() {
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "paris");
        let view = render(&catalog(), &selection, Tab::Assistant);

        let DetailPanel::Destination {
            name, description, ..
        } = &view.detail
        else {
            panic!("expected destination detail, got {:?}", view.detail);
        };
        assert_eq!(*name, "Paris, France");
        assert!(description.starts_with("All-day art crawls"));

        let ItineraryView::Entries { entries } = &view.itinerary else {
            panic!("expected entries, got {:?}", view.itinerary);
        };
        let names: Vec<_> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Paris, France"]);
        assert_eq!(
            entries[0].summary,
            "All-day art crawls, golden-hour picnics by the Seine, and indie fashion dens tucked behind wrought-iron balconies—Paris is pure inspiration."
        );
        assert_eq!(entries[0].tags.len(), 3);
    }

    #[test]
    fn itinerary_follows_pin_order() {
        let mut selection = Selection::new();
        for id in ["tokyo", "paris", "london"] {
            selection.toggle_pin(&catalog(), id);
        }
        let view = render(&catalog(), &selection, Tab::Assistant);
        let ItineraryView::Entries { entries } = view.itinerary else {
            panic!("expected entries");
        };
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["tokyo", "paris", "london"]);
    }

    #[test]
    fn summary_stops_at_first_terminator() {
        assert_eq!(summarize("One. Two."), "One.");
        assert_eq!(summarize("Wow! Such travel."), "Wow!");
        assert_eq!(summarize("  no terminator here "), "no terminator here");
        assert_eq!(summarize(""), "");
    }

    #[test]
    fn diff_of_identical_views_is_empty() {
        let view = render(&catalog(), &Selection::new(), Tab::Discover);
        assert!(view.diff(&view.clone()).is_empty());
    }

    #[test]
    fn diff_reports_only_changed_parts() {
        let before = render(&catalog(), &Selection::new(), Tab::Discover);
        let mut selection = Selection::new();
        selection.toggle_pin(&catalog(), "tokyo");
        let after = render(&catalog(), &selection, Tab::Discover);

        let patches = before.diff(&after);
        assert_eq!(patches.len(), 4);
        assert_eq!(
            patches[0],
            ViewPatch::MarkerPinned {
                id: "tokyo",
                pinned: true
            }
        );
        assert_eq!(
            patches[1],
            ViewPatch::CardSelected {
                id: "tokyo",
                selected: true
            }
        );
        assert!(matches!(patches[2], ViewPatch::Detail { .. }));
        assert!(matches!(patches[3], ViewPatch::Itinerary { .. }));
    }

    #[test]
    fn patches_serialize_with_op_tag() {
        let patch = ViewPatch::ShowTab { tab: Tab::Assistant };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "op": "showTab", "tab": "assistant" }));
    }
}
