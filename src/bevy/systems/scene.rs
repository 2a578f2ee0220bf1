//! Scene setup system
//!
//! Spawns the globe (sphere mesh with one child per anchor), the offscreen
//! camera and the lights.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{primitives::Sphere, Quat, Vec3},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::renderer::RenderDevice,
};
use tracing::info;

use crate::bevy::components::{AnchorPoint, Globe, GlobeCamera};
use crate::bevy::resources::{GlobeRigRes, GlobeStatusRes};
use crate::bevy::systems::render_target::{create_render_target, render_size_for};
use crate::config::globe::{ANCHOR_DOT_RADIUS, RADIUS, SPHERE_SECTORS, SPHERE_STACKS};
use crate::tauri_bridge::shared_state::GlobeStatus;

/// Setup the globe scene with camera, anchors, and lights
pub fn setup_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    rig: Res<GlobeRigRes>,
    status: Option<Res<GlobeStatusRes>>,
) {
    info!("[Bevy] Setting up globe scene...");

    let target = create_render_target(
        &mut commands,
        &mut images,
        &render_device,
        render_size_for(rig.viewport()),
    );

    let lens = *rig.lens();
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(target.image.clone().into()),
            clear_color: ClearColorConfig::Custom(Color::srgb(0.03, 0.05, 0.1)),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: lens.fov_y,
            near: lens.near,
            far: lens.far,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(lens.eye).looking_at(lens.target, Vec3::Y),
        GlobeCamera,
    ));
    commands.insert_resource(target);

    let anchor_mesh = meshes.add(Sphere::new(ANCHOR_DOT_RADIUS).mesh().uv(12, 8));
    let anchor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.45, 0.3),
        emissive: LinearRgba::rgb(0.8, 0.25, 0.1),
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(RADIUS).mesh().uv(SPHERE_SECTORS, SPHERE_STACKS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.12, 0.36, 0.62),
                metallic: 0.1,
                perceptual_roughness: 0.6,
                ..default()
            })),
            Transform::from_rotation(rig.motion().orientation().rotation()),
            Globe,
        ))
        .with_children(|globe| {
            for anchor in rig.anchors() {
                globe.spawn((
                    Mesh3d(anchor_mesh.clone()),
                    MeshMaterial3d(anchor_material.clone()),
                    Transform::from_translation(anchor.local),
                    AnchorPoint { id: anchor.id },
                ));
            }
        });

    // Key light
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            color: Color::srgb(1.0, 0.95, 0.85),
            ..default()
        },
        Transform::from_xyz(4.0, 5.0, 6.0),
    ));

    // Rim light (blue tint)
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            color: Color::srgb(0.4, 0.6, 1.0),
            ..default()
        },
        Transform::from_xyz(-4.0, 2.0, -3.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(bevy::math::EulerRot::XYZ, -0.5, 0.5, 0.0)),
    ));

    if let Some(status) = status {
        status.0.set(GlobeStatus::Running);
    }
    info!(
        "[Bevy] Globe scene ready with {} anchors",
        rig.anchors().len()
    );
}
