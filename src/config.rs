//! Configuration constants and settings for the travel globe
//!
//! This module contains all tunable parameters: globe geometry, camera lens,
//! drag/inertia behaviour, render target sizing and frame loop timing.
//! Runtime switches read from the environment live in [`LaunchOptions`].

/// Width of the offscreen render target before the frontend reports a viewport
pub const RENDER_WIDTH: u32 = 800;

/// Height of the offscreen render target before the frontend reports a viewport
pub const RENDER_HEIGHT: u32 = 600;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Globe geometry
pub mod globe {
    /// Radius of the globe sphere in world units
    pub const RADIUS: f32 = 1.0;

    /// Radius of the small dot rendered at each anchor
    pub const ANCHOR_DOT_RADIUS: f32 = 0.025;

    /// Sphere tessellation (sectors, stacks)
    pub const SPHERE_SECTORS: u32 = 64;
    pub const SPHERE_STACKS: u32 = 32;
}

/// Camera lens settings
pub mod camera {
    /// Vertical field of view in degrees
    pub const FOV_Y_DEGREES: f32 = 45.0;

    /// Near clipping plane
    pub const NEAR: f32 = 0.1;

    /// Far clipping plane
    pub const FAR: f32 = 100.0;

    /// Distance from the camera to the globe centre along +Z
    pub const DISTANCE: f32 = 3.2;
}

/// Drag and auto-rotation settings
pub mod motion {
    /// Yaw added every frame while idle (radians)
    pub const AUTO_ROTATE_PER_FRAME: f32 = 0.0015;

    /// Rotation per pixel of pointer movement
    pub const DRAG_SENSITIVITY: f32 = 0.005;

    /// Maximum pitch (radians) to prevent flipping past the poles
    pub const MAX_TILT: f32 = 0.9;

    /// Inertia multiplier applied every frame after a drag ends
    pub const INERTIA_DECAY: f32 = 0.92;

    /// Inertia below this magnitude is treated as rest
    pub const INERTIA_REST_THRESHOLD: f32 = 1e-5;
}

/// Render target sizing
pub mod render {
    /// Larger side of the offscreen render target, in pixels
    pub const MAX_RENDER_DIMENSION: u32 = 1024;

    /// Smallest accepted side, in pixels
    pub const MIN_RENDER_DIMENSION: u32 = 16;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for logging frame stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}

/// Environment variable that turns the globe renderer off
pub const DISABLE_GLOBE_ENV: &str = "TRAVEL_GLOBE_DISABLE_GLOBE";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Switches read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Whether to start the Bevy renderer at all
    pub globe_enabled: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            globe_enabled: true,
        }
    }
}

impl LaunchOptions {
    /// Read options from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let disabled = lookup(DISABLE_GLOBE_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self {
            globe_enabled: !disabled,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
