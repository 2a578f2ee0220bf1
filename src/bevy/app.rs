//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::catalog::Catalog;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::globe::GlobeRig;
use crate::tauri_bridge::shared_state::{GlobeLink, GlobeStatus};

/// Create and configure the Bevy application
pub fn create_app(catalog: &Catalog, link: GlobeLink) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    // Add custom plugins
    app.add_plugins(ImageCopyPlugin);

    // Register systems
    app.add_systems(Startup, setup_globe);
    app.add_systems(
        Update,
        (apply_frontend_input, resize_render_target, advance_globe).chain(),
    );
    app.add_systems(Last, extract_and_process_frame);

    // Insert resources
    app.insert_resource(GlobeRigRes(GlobeRig::new(catalog)));
    app.insert_resource(FrameBufferRes(link.frames));
    app.insert_resource(PointerQueueRes(link.pointer));
    app.insert_resource(ViewportRes(link.viewport));
    app.insert_resource(MarkerBoardRes(link.markers));
    app.insert_resource(GlobeStatusRes(link.status));
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::default());

    info!("[Bevy] App configured (headless globe renderer)");
    app
}

/// Start Bevy in a background thread
///
/// Any failure to bring the renderer up (no GPU adapter, a panic inside
/// Bevy) marks the globe unavailable; the rest of the UI keeps working.
pub fn start_globe(catalog: Catalog, link: GlobeLink) {
    let status = link.status.clone();
    status.set(GlobeStatus::Starting);

    let spawned = thread::Builder::new()
        .name("bevy-globe".into())
        .spawn(move || {
            info!("[Bevy] Thread started");
            let thread_status = link.status.clone();
            let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
                let mut app = create_app(&catalog, link);
                info!("[Bevy] Running render loop...");
                app.run()
            }));
            match outcome {
                Ok(exit) => info!("[Bevy] Render loop exited: {exit:?}"),
                Err(_) => {
                    warn!("[Bevy] Renderer failed; globe disabled");
                    thread_status.set(GlobeStatus::Unavailable);
                }
            }
        });

    if let Err(err) = spawned {
        warn!("[Bevy] Could not spawn render thread: {err}");
        status.set(GlobeStatus::Unavailable);
    }
}
