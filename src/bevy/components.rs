//! Bevy component definitions
//!
//! This module contains all component markers used to tag and identify
//! entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

/// Marker component for the camera rendering the globe offscreen
#[derive(Component)]
pub struct GlobeCamera;

/// Marker component for the rotating globe parent entity
///
/// Its rotation mirrors the orientation of the `GlobeRig` every frame;
/// anchor points are its children and rotate with it.
#[derive(Component)]
pub struct Globe;

/// Child of the globe at a destination's anchor position
#[derive(Component)]
pub struct AnchorPoint {
    pub id: &'static str,
}
