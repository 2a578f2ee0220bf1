//! Globe motion and marker placement systems
//!
//! Each frame: apply the frontend's queued pointer events and viewport size,
//! advance the rig one tick, mirror its orientation onto the globe entity and
//! publish the marker placements for the frontend to poll.

use bevy::prelude::*;
use tracing::debug;

use crate::bevy::components::Globe;
use crate::bevy::resources::{GlobeRigRes, MarkerBoardRes, PointerQueueRes, ViewportRes};

/// Drain frontend input into the rig
pub fn apply_frontend_input(
    pointer_queue: Option<Res<PointerQueueRes>>,
    viewport: Option<Res<ViewportRes>>,
    mut rig: ResMut<GlobeRigRes>,
) {
    if let Some(queue) = pointer_queue {
        // Take the events out first so the lock is not held while applying them
        let events = match queue.0 .0.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        };
        for event in events {
            rig.handle_pointer(event);
        }
    }

    if let Some(viewport) = viewport {
        let request = match viewport.0 .0.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(request) = request {
            if rig.resize(request.width, request.height) {
                debug!(
                    "[Bevy] Viewport now {}x{}",
                    request.width, request.height
                );
            }
        }
    }
}

/// Advance the globe one frame and publish marker placements
pub fn advance_globe(
    mut rig: ResMut<GlobeRigRes>,
    board: Option<Res<MarkerBoardRes>>,
    mut globes: Query<&mut Transform, With<Globe>>,
) {
    let frame = rig.frame();

    let rotation = frame.orientation.rotation();
    for mut transform in globes.iter_mut() {
        transform.rotation = rotation;
    }

    if let Some(board) = board {
        if let Ok(mut guard) = board.0 .0.lock() {
            *guard = Some(frame);
        }
    }
}
