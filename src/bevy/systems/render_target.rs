//! Offscreen render target that follows the frontend viewport
//!
//! The target keeps the viewport's aspect ratio so the camera's projection
//! (which Bevy derives from the target size) matches the lens used for
//! marker placement.

use bevy::{
    camera::RenderTarget,
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};
use tracing::debug;

use crate::bevy::components::GlobeCamera;
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::{GlobeRenderTarget, GlobeRigRes};
use crate::config::render::{MAX_RENDER_DIMENSION, MIN_RENDER_DIMENSION};
use crate::globe::Viewport;

/// Pixel size of the render target for a viewport
///
/// Scaled down so the longer side fits `MAX_RENDER_DIMENSION`; never upscaled.
pub fn render_size_for(viewport: Viewport) -> UVec2 {
    let longest = viewport.width.max(viewport.height);
    let scale = (MAX_RENDER_DIMENSION as f32 / longest).min(1.0);
    let side = |v: f32| ((v * scale).round() as u32).max(MIN_RENDER_DIMENSION);
    UVec2::new(side(viewport.width), side(viewport.height))
}

/// Create a render target image and the copier that reads it back
pub fn create_render_target(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    render_device: &RenderDevice,
    size: UVec2,
) -> GlobeRenderTarget {
    let extent = Extent3d {
        width: size.x,
        height: size.y,
        depth_or_array_layers: 1,
    };

    let mut image = Image::new_target_texture(extent.width, extent.height, TextureFormat::bevy_default());
    image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let handle = images.add(image);

    let copier = commands
        .spawn(ImageCopier::new(handle.clone(), extent, render_device))
        .id();

    GlobeRenderTarget {
        image: handle,
        size,
        copier,
    }
}

/// Swap in a new render target when the viewport changed size
pub fn resize_render_target(
    mut commands: Commands,
    rig: Res<GlobeRigRes>,
    target: Option<ResMut<GlobeRenderTarget>>,
    render_device: Option<Res<RenderDevice>>,
    mut images: ResMut<Assets<Image>>,
    mut cameras: Query<&mut Camera, With<GlobeCamera>>,
) {
    let (Some(mut target), Some(render_device)) = (target, render_device) else {
        return;
    };

    let size = render_size_for(rig.viewport());
    if size == target.size {
        return;
    }

    commands.entity(target.copier).despawn();
    images.remove(&target.image);
    let next = create_render_target(&mut commands, &mut images, &render_device, size);
    for mut camera in cameras.iter_mut() {
        camera.target = RenderTarget::Image(next.image.clone().into());
    }

    debug!(
        "[Bevy] Render target resized {}x{} -> {}x{}",
        target.size.x, target.size.y, size.x, size.y
    );
    *target = next;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f32, height: f32) -> Viewport {
        Viewport::new(width, height).unwrap()
    }

    #[test]
    fn small_viewports_render_at_native_size() {
        assert_eq!(render_size_for(viewport(800.0, 600.0)), UVec2::new(800, 600));
    }

    #[test]
    fn large_viewports_are_scaled_keeping_aspect() {
        let size = render_size_for(viewport(2048.0, 1024.0));
        assert_eq!(size, UVec2::new(MAX_RENDER_DIMENSION, MAX_RENDER_DIMENSION / 2));
    }

    #[test]
    fn tiny_sides_are_floored() {
        let size = render_size_for(viewport(4.0, 2.0));
        assert_eq!(size, UVec2::new(MIN_RENDER_DIMENSION, MIN_RENDER_DIMENSION));
    }
}
