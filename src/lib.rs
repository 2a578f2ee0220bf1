//! Travel Globe: destination browser with a headless Bevy globe
//!
//! Destinations are pinned from markers on a rotating 3D globe or from a card
//! grid; pinned places form an itinerary with a detail panel for the active
//! one. The globe is rendered by Bevy in a background thread and streamed to
//! the Tauri webview, which overlays clickable markers at the pixel positions
//! computed each frame.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - Each frame applies queued pointer input, advances the globe motion and
//!   publishes marker placements next to the rendered image
//! - GPU texture -> Buffer -> CPU channel -> `frame://` protocol (JPEG)
//! - Selection state lives on the Tauri side and answers with view patches
//!
//! # Module Structure
//!
//! - `catalog`: Built-in destination table
//! - `itinerary`: Selection state, view model and patches
//! - `globe`: Geo projection, motion state machine and marker placement
//! - `config`: Configuration constants and launch options
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Custom plugins
//!   - `systems`: Game systems
//!   - `app`: Application setup

pub mod bevy;
pub mod catalog;
pub mod config;
pub mod globe;
pub mod itinerary;
pub mod tauri_bridge;

#[cfg(feature = "desktop")]
use tracing::info;
#[cfg(feature = "desktop")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "desktop")]
use catalog::Catalog;
#[cfg(feature = "desktop")]
use config::{LaunchOptions, DEFAULT_LOG_FILTER};
#[cfg(feature = "desktop")]
use itinerary::Session;
#[cfg(feature = "desktop")]
use tauri_bridge::{GlobeLink, GlobeStatus, SharedSession};

/// Main entry point for the Tauri application
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!("[Tauri] Starting...");
    let options = LaunchOptions::from_env();
    let catalog = Catalog::builtin();

    // Create shared state
    let session = SharedSession::new(Session::new(catalog));
    let link = GlobeLink::default();

    if options.globe_enabled {
        // Start Bevy in background thread; the webview polls its status
        crate::bevy::start_globe(catalog, link.clone());
    } else {
        info!("[Tauri] Globe disabled by environment");
        link.status.set(GlobeStatus::Unavailable);
    }

    // Clone for the custom protocol handler
    let protocol_link = link.clone();

    // Build and run Tauri application
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(session)
        .manage(link.frames)
        .manage(link.pointer)
        .manage(link.viewport)
        .manage(link.markers)
        .manage(link.status)
        // Register custom protocol "frame://" for direct binary transfer
        // This bypasses Tauri IPC JSON serialization completely!
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let link = protocol_link.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                let uri = request.uri();
                tracing::debug!("[Protocol] Request URI: {}", uri);

                // For Tauri v2, URL format is: http://frame.localhost/path
                let response = tauri_bridge::protocol::handle_frame_protocol(uri.path(), &link);
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_catalog,
            tauri_bridge::commands::get_view,
            tauri_bridge::commands::toggle_pin,
            tauri_bridge::commands::remove_pin,
            tauri_bridge::commands::choose_card,
            tauri_bridge::commands::show_tab,
            tauri_bridge::commands::send_pointer_event,
            tauri_bridge::commands::resize_viewport,
            tauri_bridge::commands::get_marker_positions,
            tauri_bridge::commands::get_globe_status,
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size
        ])
        .run(tauri::generate_context!())
        .expect("Tauri error");
}
