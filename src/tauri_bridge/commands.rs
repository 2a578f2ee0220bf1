//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript/TypeScript code.

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;
use tracing::debug;

use super::error::{lock, BridgeError};
use super::protocol::encode_jpeg;
use super::shared_state::{
    FrameResponse, GlobeStatus, SharedFrameBuffer, SharedGlobeStatus, SharedMarkerBoard,
    SharedPointerQueue, SharedSession, SharedViewport, ViewportRequest,
};
use crate::bevy::systems::render_target::render_size_for;
use crate::catalog::Destination;
use crate::globe::{MarkerFrame, PointerEvent, Viewport};
use crate::itinerary::{Tab, ViewModel, ViewPatch};

fn ensure_available(status: &SharedGlobeStatus) -> Result<(), BridgeError> {
    match status.get() {
        GlobeStatus::Unavailable => Err(BridgeError::GlobeUnavailable),
        _ => Ok(()),
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Every destination, in display order
#[tauri::command]
pub fn get_catalog(session: State<SharedSession>) -> Result<Vec<&'static Destination>, BridgeError> {
    let guard = lock(&session.0, "session")?;
    Ok(guard.catalog().iter().collect())
}

/// Full view model, used for the initial paint
#[tauri::command]
pub fn get_view(session: State<SharedSession>) -> Result<ViewModel, BridgeError> {
    let guard = lock(&session.0, "session")?;
    Ok(guard.view().clone())
}

/// Marker click
#[tauri::command]
pub fn toggle_pin(session: State<SharedSession>, id: String) -> Result<Vec<ViewPatch>, BridgeError> {
    let mut guard = lock(&session.0, "session")?;
    let patches = guard.toggle_pin(&id);
    debug!("[Tauri] toggle_pin({}) -> {} patches", id, patches.len());
    Ok(patches)
}

/// Itinerary entry remove control
#[tauri::command]
pub fn remove_pin(session: State<SharedSession>, id: String) -> Result<Vec<ViewPatch>, BridgeError> {
    let mut guard = lock(&session.0, "session")?;
    Ok(guard.remove_pin(&id))
}

/// Destination card click
#[tauri::command]
pub fn choose_card(session: State<SharedSession>, id: String) -> Result<Vec<ViewPatch>, BridgeError> {
    let mut guard = lock(&session.0, "session")?;
    let patches = guard.choose_card(&id);
    debug!("[Tauri] choose_card({}) -> {} patches", id, patches.len());
    Ok(patches)
}

#[tauri::command]
pub fn show_tab(session: State<SharedSession>, tab: Tab) -> Result<Vec<ViewPatch>, BridgeError> {
    let mut guard = lock(&session.0, "session")?;
    Ok(guard.show_tab(tab))
}

// =============================================================================
// Globe input
// =============================================================================

/// Queue a pointer event for the next frame
#[tauri::command]
pub fn send_pointer_event(
    queue: State<SharedPointerQueue>,
    status: State<SharedGlobeStatus>,
    event: PointerEvent,
) -> Result<(), BridgeError> {
    ensure_available(&status)?;
    lock(&queue.0, "pointer queue")?.push(event);
    Ok(())
}

/// Report the globe container size; applied at the start of the next frame
#[tauri::command]
pub fn resize_viewport(
    viewport: State<SharedViewport>,
    width: f32,
    height: f32,
) -> Result<(), BridgeError> {
    // Ignored while collapsed; the last good size stays in effect
    if Viewport::new(width, height).is_none() {
        return Ok(());
    }
    *lock(&viewport.0, "viewport")? = Some(ViewportRequest { width, height });
    Ok(())
}

// =============================================================================
// Globe output
// =============================================================================

/// Marker placements from the most recent frame
#[tauri::command]
pub fn get_marker_positions(
    board: State<SharedMarkerBoard>,
    status: State<SharedGlobeStatus>,
) -> Result<Option<MarkerFrame>, BridgeError> {
    ensure_available(&status)?;
    Ok(lock(&board.0, "marker board")?.clone())
}

#[tauri::command]
pub fn get_globe_status(status: State<SharedGlobeStatus>) -> GlobeStatus {
    status.get()
}

/// Get the current rendered frame as a Base64-encoded JPEG
///
/// Fallback for webviews where the `frame://` protocol is unavailable.
#[tauri::command]
pub fn get_frame(
    frames: State<SharedFrameBuffer>,
    status: State<SharedGlobeStatus>,
) -> Result<FrameResponse, BridgeError> {
    ensure_available(&status)?;
    let guard = lock(&frames.0, "frame buffer")?;
    let frame = guard.as_ref().ok_or(BridgeError::NotReady)?;

    let encode_start = std::time::Instant::now();
    let jpeg = encode_jpeg(frame)?;
    let data = STANDARD.encode(&jpeg);
    debug!(
        "[Tauri] get_frame encoded {}x{} in {:.2}ms",
        frame.width,
        frame.height,
        encode_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(FrameResponse {
        data,
        width: frame.width,
        height: frame.height,
    })
}

/// Size of the latest frame, or the size the next one will have
#[tauri::command]
pub fn get_render_size(
    frames: State<SharedFrameBuffer>,
    viewport: State<SharedViewport>,
) -> Result<(u32, u32), BridgeError> {
    if let Some(frame) = lock(&frames.0, "frame buffer")?.as_ref() {
        return Ok((frame.width, frame.height));
    }
    let requested = lock(&viewport.0, "viewport")?
        .and_then(|request| Viewport::new(request.width, request.height))
        .unwrap_or_default();
    let size = render_size_for(requested);
    Ok((size.x, size.y))
}
