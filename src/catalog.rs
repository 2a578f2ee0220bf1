//! Destination catalog
//!
//! The fixed set of places shown on the globe and in the card grid. Records
//! are `'static` so every other module can hold identifiers and text by
//! reference without cloning.

use serde::Serialize;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoord {
    pub lat: f32,
    pub lng: f32,
}

impl GeoCoord {
    pub const fn new(lat: f32, lng: f32) -> Self {
        Self { lat, lng }
    }
}

/// A single travel destination
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Stable key used by markers, cards and commands
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    /// Short "quick fact" tags shown as pills
    pub tags: &'static [&'static str],
    pub coord: GeoCoord,
}

/// Lookup table over a static list of destinations
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [Destination],
}

impl Catalog {
    pub const fn new(entries: &'static [Destination]) -> Self {
        Self { entries }
    }

    /// The built-in destination list
    pub const fn builtin() -> Self {
        Self::new(&DESTINATIONS)
    }

    pub fn get(&self, id: &str) -> Option<&'static Destination> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Destination> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub static DESTINATIONS: [Destination; 6] = [
    Destination {
        id: "taipei",
        name: "Taipei, Taiwan",
        description: "Between mountain trails and neon-lit lanes, Taipei offers a seamless blend of ancient temples, sizzling street food, and design-forward cafés.",
        highlights: &[
            "Ride the glass-floor gondola up Maokong for sunset tea ceremonies.",
            "Eat your way through Shilin Night Market's street food legends.",
            "Discover creative boutiques in the Songshan Cultural Park warehouses.",
        ],
        tags: &["Night markets", "Tea culture", "Hot springs"],
        coord: GeoCoord::new(25.033, 121.5654),
    },
    Destination {
        id: "paris",
        name: "Paris, France",
        description: "All-day art crawls, golden-hour picnics by the Seine, and indie fashion dens tucked behind wrought-iron balconies—Paris is pure inspiration.",
        highlights: &[
            "Watch the Eiffel Tower sparkle from the Trocadéro gardens at dusk.",
            "Treat yourself to fresh pastries and people-watching in Le Marais.",
            "Bike the Left Bank to discover hidden bookshops and gallery pop-ups.",
        ],
        tags: &["Iconic skyline", "Art museums", "Riverside picnics"],
        coord: GeoCoord::new(48.8566, 2.3522),
    },
    Destination {
        id: "capeTown",
        name: "Cape Town, South Africa",
        description: "This coastal gem mixes dramatic Table Mountain hikes, penguin-dotted beaches, and wine estates with award-winning cuisine and design hotels.",
        highlights: &[
            "Hike Lion's Head for sunrise and a 360° ocean panorama.",
            "Meet the Boulders Beach penguin colony up close.",
            "Sip Sauvignon Blanc in the Constantia vineyards just minutes from town.",
        ],
        tags: &["Coastal drives", "Wildlife", "Wine estates"],
        coord: GeoCoord::new(-33.9249, 18.4241),
    },
    Destination {
        id: "london",
        name: "London, United Kingdom",
        description: "Heritage landmarks share the skyline with sky gardens, street food halls, and pop-up performances—London rewrites itself every weekend.",
        highlights: &[
            "Visit the Tate Modern before sunset cocktails at the Sky Garden.",
            "Snack your way through Borough Market's global food stalls.",
            "Explore colorful mews and murals in Notting Hill and Shoreditch.",
        ],
        tags: &["Museums", "Markets", "Music"],
        coord: GeoCoord::new(51.5074, -0.1278),
    },
    Destination {
        id: "tokyo",
        name: "Tokyo, Japan",
        description: "From tranquil Shinto shrines to futuristic neighborhoods of neon, Tokyo keeps energy high and aesthetics impeccable in every district.",
        highlights: &[
            "Catch the first light at Senso-ji Temple before the crowds arrive.",
            "Sip artisan coffee in Daikanyama then browse design studios.",
            "Sing karaoke in Golden Gai after a sushi omakase dinner.",
        ],
        tags: &["Culinary adventures", "Design", "Nightlife"],
        coord: GeoCoord::new(35.6762, 139.6503),
    },
    Destination {
        id: "lagoComo",
        name: "Lago di Como, Italy",
        description: "Bell towers, cypress gardens, and mountains plunging into mirror-still waters—Lake Como is the definition of cinematic daydreaming.",
        highlights: &[
            "Cruise between Bellagio and Varenna for pastel-perfect harbor views.",
            "Tour the botanical wonders of Villa del Balbianello.",
            "Enjoy aperitivo hour as the alpenglow hits the surrounding Alps.",
        ],
        tags: &["Lake life", "Boutique villas", "Aperitivo"],
        coord: GeoCoord::new(46.016, 9.257),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn coordinates_are_in_range() {
        for d in Catalog::builtin().iter() {
            assert!((-90.0..=90.0).contains(&d.coord.lat), "{}", d.id);
            assert!((-180.0..=180.0).contains(&d.coord.lng), "{}", d.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("tokyo").map(|d| d.name), Some("Tokyo, Japan"));
        assert!(catalog.get("atlantis").is_none());
    }
}
