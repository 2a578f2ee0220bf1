//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod scene;
pub mod globe;
pub mod render_target;
pub mod frame_extraction;

pub use scene::setup_globe;
pub use globe::{advance_globe, apply_frontend_input};
pub use render_target::resize_render_target;
pub use frame_extraction::extract_and_process_frame;
