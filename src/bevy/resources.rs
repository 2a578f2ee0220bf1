//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::bevy::plugins::image_copy::CapturedFrame;
use crate::globe::GlobeRig;
use crate::tauri_bridge::shared_state::{
    SharedFrameBuffer, SharedGlobeStatus, SharedMarkerBoard, SharedPointerQueue, SharedViewport,
};

// =============================================================================
// Globe State
// =============================================================================

/// Projection and interaction core, advanced once per frame
#[derive(Resource, Deref, DerefMut)]
pub struct GlobeRigRes(pub GlobeRig);

/// Pointer events queued by the frontend
#[derive(Resource)]
pub struct PointerQueueRes(pub SharedPointerQueue);

/// Pending viewport size from the frontend
#[derive(Resource)]
pub struct ViewportRes(pub SharedViewport);

/// Where each frame's marker placements are published
#[derive(Resource)]
pub struct MarkerBoardRes(pub SharedMarkerBoard);

/// Renderer availability reported to the frontend
#[derive(Resource)]
pub struct GlobeStatusRes(pub SharedGlobeStatus);

// =============================================================================
// Rendering
// =============================================================================

/// The offscreen image the globe camera renders into
#[derive(Resource, Clone)]
pub struct GlobeRenderTarget {
    pub image: Handle<Image>,
    pub size: UVec2,
    /// Entity holding the `ImageCopier` for `image`
    pub copier: Entity,
}

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames published
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(crate::config::TARGET_FPS)
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Timing samples for the periodic frame stats log line
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives captured frames from the render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<CapturedFrame>);

/// Sends captured frames to the main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<CapturedFrame>);
