//! Globe projection and interaction core
//!
//! [`GlobeRig`] ties the pieces together: anchors computed once from the
//! catalog, the motion state machine, the camera lens and the viewport. The
//! Bevy frame loop calls [`GlobeRig::frame`] once per rendered frame.

pub mod motion;
pub mod projection;

pub use motion::{GlobeMotion, MotionPhase, Orientation, PointerEvent};
pub use projection::{Lens, MarkerPlacement, Viewport};

use bevy::math::Vec3;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::globe;

/// Fixed point on the globe surface for one destination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub id: &'static str,
    /// Position in the globe's unrotated frame
    pub local: Vec3,
}

/// Marker placements for one frame, as sent to the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerFrame {
    pub frame: u64,
    pub viewport: Viewport,
    pub orientation: Orientation,
    pub phase: MotionPhase,
    pub markers: Vec<MarkerPlacement>,
}

/// Everything needed to place markers over the rotating globe
#[derive(Debug, Clone)]
pub struct GlobeRig {
    radius: f32,
    anchors: Vec<Anchor>,
    placements: Vec<MarkerPlacement>,
    motion: GlobeMotion,
    lens: Lens,
    viewport: Viewport,
    frame: u64,
}

impl GlobeRig {
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_radius(catalog, globe::RADIUS)
    }

    pub fn with_radius(catalog: &Catalog, radius: f32) -> Self {
        let anchors: Vec<_> = catalog
            .iter()
            .map(|d| Anchor {
                id: d.id,
                local: projection::geo_to_anchor(d.coord, radius),
            })
            .collect();
        let placements = anchors
            .iter()
            .map(|a| MarkerPlacement::hidden(a.id))
            .collect();
        let viewport = Viewport::default();
        let mut lens = Lens::default();
        lens.set_aspect(viewport);

        Self {
            radius,
            anchors,
            placements,
            motion: GlobeMotion::default(),
            lens,
            viewport,
            frame: 0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn motion(&self) -> &GlobeMotion {
        &self.motion
    }

    pub fn placements(&self) -> &[MarkerPlacement] {
        &self.placements
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.motion.handle(event)
    }

    /// Adopt a new viewport size; returns whether it changed
    ///
    /// Invalid sizes (zero, negative, non-finite) are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        match Viewport::new(width, height) {
            Some(viewport) if viewport != self.viewport => {
                self.viewport = viewport;
                self.lens.set_aspect(viewport);
                true
            }
            _ => false,
        }
    }

    /// Advance the motion one frame and re-place every marker
    pub fn frame(&mut self) -> MarkerFrame {
        self.motion.tick();
        self.frame += 1;
        self.place_markers();
        self.snapshot()
    }

    /// Re-project all anchors under the current orientation
    pub fn place_markers(&mut self) {
        let rotation = self.motion.orientation().rotation();
        for (anchor, placement) in self.anchors.iter().zip(self.placements.iter_mut()) {
            projection::place_anchor(
                placement,
                anchor.local,
                rotation,
                self.radius,
                &self.lens,
                self.viewport,
            );
        }
    }

    pub fn snapshot(&self) -> MarkerFrame {
        MarkerFrame {
            frame: self.frame,
            viewport: self.viewport,
            orientation: self.motion.orientation(),
            phase: self.motion.phase(),
            markers: self.placements.clone(),
        }
    }
}
