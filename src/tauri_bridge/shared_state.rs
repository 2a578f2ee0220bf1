//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the Tauri frontend and the Bevy render backend.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::globe::{MarkerFrame, PointerEvent};
use crate::itinerary::Session;

// =============================================================================
// Frame Buffer
// =============================================================================

/// Latest rendered globe image as tightly packed RGBA8
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Thread-safe frame buffer shared between Bevy and Tauri
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Frame>>>);

/// Frame response containing a Base64-encoded JPEG
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded JPEG (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Frontend Input
// =============================================================================

/// Pointer events queued until the next frame consumes them
#[derive(Clone, Default)]
pub struct SharedPointerQueue(pub Arc<Mutex<Vec<PointerEvent>>>);

/// Globe container size requested by the frontend
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewportRequest {
    pub width: f32,
    pub height: f32,
}

/// Latest unconsumed viewport request; newer requests replace older ones
#[derive(Clone, Default)]
pub struct SharedViewport(pub Arc<Mutex<Option<ViewportRequest>>>);

// =============================================================================
// Frame Loop Output
// =============================================================================

/// Marker placements published by the most recent frame
#[derive(Clone, Default)]
pub struct SharedMarkerBoard(pub Arc<Mutex<Option<MarkerFrame>>>);

/// Whether the globe renderer came up
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GlobeStatus {
    #[default]
    Starting,
    Running,
    Unavailable,
}

#[derive(Clone, Default)]
pub struct SharedGlobeStatus(pub Arc<Mutex<GlobeStatus>>);

impl SharedGlobeStatus {
    pub fn get(&self) -> GlobeStatus {
        self.0
            .lock()
            .map(|guard| *guard)
            .unwrap_or(GlobeStatus::Unavailable)
    }

    pub fn set(&self, status: GlobeStatus) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = status;
        }
    }
}

// =============================================================================
// Selection Session
// =============================================================================

/// Selection and view state, mutated only by commands
#[derive(Clone, Default)]
pub struct SharedSession(pub Arc<Mutex<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// Every handle the Bevy thread shares with the Tauri side
#[derive(Clone, Default)]
pub struct GlobeLink {
    pub frames: SharedFrameBuffer,
    pub pointer: SharedPointerQueue,
    pub viewport: SharedViewport,
    pub markers: SharedMarkerBoard,
    pub status: SharedGlobeStatus,
}
