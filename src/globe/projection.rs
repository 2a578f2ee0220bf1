//! Geographic and screen projections
//!
//! Everything here is plain math on `bevy::math` types so it runs the same
//! inside the Bevy frame loop and in unit tests.

use bevy::math::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};
use serde::Serialize;

use crate::catalog::GeoCoord;
use crate::config::{camera, RENDER_HEIGHT, RENDER_WIDTH};

/// Point on a sphere of `radius` for a geographic coordinate
///
/// Polar angle is measured from +Y; the azimuth is offset by 180° so the
/// prime meridian lands on a fixed seam. Longitude wraps, latitude is
/// clamped to the poles.
pub fn geo_to_anchor(coord: GeoCoord, radius: f32) -> Vec3 {
    let lat = coord.lat.clamp(-90.0, 90.0);
    let polar = (90.0 - lat).to_radians();
    let azimuth = (coord.lng + 180.0).rem_euclid(360.0).to_radians();

    let ring = radius * polar.sin();
    Vec3::new(
        ring * azimuth.sin(),
        radius * polar.cos(),
        ring * azimuth.cos(),
    )
}

/// Size of the globe container in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Initial size, used until the frontend reports its container
impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: RENDER_WIDTH as f32,
            height: RENDER_HEIGHT as f32,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map normalized device coordinates to pixels, Y pointing down
    pub fn ndc_to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x / 2.0 + 0.5) * self.width,
            (-ndc.y / 2.0 + 0.5) * self.height,
        )
    }
}

/// Perspective camera looking at the globe centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y: camera::FOV_Y_DEGREES.to_radians(),
            aspect: 1.0,
            near: camera::NEAR,
            far: camera::FAR,
            eye: Vec3::new(0.0, 0.0, camera::DISTANCE),
            target: Vec3::ZERO,
        }
    }
}

/// A world point seen through a [`Lens`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Distance in front of the camera along its view axis
    pub depth: f32,
    pub ndc: Vec2,
}

impl Lens {
    pub fn view_from_world(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn clip_from_view(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Update the projection after the viewport changed shape
    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Camera-space depth of a world point (positive in front)
    pub fn depth_of(&self, world: Vec3) -> f32 {
        -self.view_from_world().transform_point3(world).z
    }

    pub fn project(&self, world: Vec3) -> Projected {
        let view = self.view_from_world().transform_point3(world);
        let clip = self.clip_from_view() * view.extend(1.0);
        Projected {
            depth: -view.z,
            ndc: clip.xy() / clip.w,
        }
    }
}

/// Where a marker sits on screen this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPlacement {
    pub id: &'static str,
    pub x: f32,
    pub y: f32,
    /// False when the anchor is on the far side of the globe
    pub visible: bool,
}

impl MarkerPlacement {
    pub fn hidden(id: &'static str) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            visible: false,
        }
    }
}

/// Recompute `placement` for an anchor under the current rotation
///
/// Non-finite projections leave the placement untouched.
pub fn place_anchor(
    placement: &mut MarkerPlacement,
    local: Vec3,
    rotation: Quat,
    radius: f32,
    lens: &Lens,
    viewport: Viewport,
) {
    let world = rotation * local;
    let projected = lens.project(world);
    if !projected.depth.is_finite() || !projected.ndc.is_finite() {
        return;
    }

    let pixels = viewport.ndc_to_pixels(projected.ndc);
    placement.x = pixels.x;
    placement.y = pixels.y;
    placement.visible = faces_camera(projected.depth, radius, lens);
}

/// Whether a point at `depth` lies on the camera side of the globe horizon
fn faces_camera(depth: f32, radius: f32, lens: &Lens) -> bool {
    let centre_depth = lens.depth_of(Vec3::ZERO);
    if centre_depth <= radius {
        // Camera inside the globe; nothing sensible to show.
        return false;
    }
    let horizon_depth = centre_depth - radius * radius / centre_depth;
    depth > lens.near && depth <= horizon_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lens() -> Lens {
        Lens {
            aspect: 4.0 / 3.0,
            ..Lens::default()
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn anchors_lie_on_the_sphere() {
        for lat in (-90..=90).step_by(15) {
            for lng in (-180..=180).step_by(20) {
                let point = geo_to_anchor(GeoCoord::new(lat as f32, lng as f32), 2.5);
                assert_relative_eq!(point.length(), 2.5, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn poles_map_to_y_axis() {
        let north = geo_to_anchor(GeoCoord::new(90.0, 37.0), 1.0);
        assert_relative_eq!(north.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-6);
        let south = geo_to_anchor(GeoCoord::new(-90.0, -120.0), 1.0);
        assert_relative_eq!(south.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn prime_meridian_faces_negative_z() {
        let point = geo_to_anchor(GeoCoord::new(0.0, 0.0), 1.0);
        assert_relative_eq!(point.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn longitude_wraps() {
        let a = geo_to_anchor(GeoCoord::new(12.0, 190.0), 1.0);
        let b = geo_to_anchor(GeoCoord::new(12.0, -170.0), 1.0);
        let c = geo_to_anchor(GeoCoord::new(12.0, 550.0), 1.0);
        assert!(a.distance(b) < 1e-5);
        assert!(a.distance(c) < 1e-5);
    }

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(0.0, 10.0).is_none());
        assert!(Viewport::new(10.0, f32::NAN).is_none());
        assert!(Viewport::new(-1.0, 10.0).is_none());
    }

    #[test]
    fn ndc_maps_to_pixels_with_flipped_y() {
        let vp = viewport();
        assert_eq!(vp.ndc_to_pixels(Vec2::ZERO), Vec2::new(400.0, 300.0));
        assert_eq!(vp.ndc_to_pixels(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_pixels(Vec2::new(1.0, -1.0)), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn facing_point_projects_to_centre() {
        let mut placement = MarkerPlacement::hidden("front");
        place_anchor(
            &mut placement,
            Vec3::Z,
            Quat::IDENTITY,
            1.0,
            &lens(),
            viewport(),
        );
        assert!(placement.visible);
        assert_relative_eq!(placement.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(placement.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn far_side_point_is_hidden() {
        let mut placement = MarkerPlacement::hidden("back");
        place_anchor(
            &mut placement,
            Vec3::NEG_Z,
            Quat::IDENTITY,
            1.0,
            &lens(),
            viewport(),
        );
        assert!(!placement.visible);
    }

    #[test]
    fn limb_point_is_hidden_but_near_cap_is_shown() {
        // On the silhouette plane through the centre: behind the horizon.
        let mut limb = MarkerPlacement::hidden("limb");
        place_anchor(&mut limb, Vec3::X, Quat::IDENTITY, 1.0, &lens(), viewport());
        assert!(!limb.visible);

        let mut cap = MarkerPlacement::hidden("cap");
        let near_cap = Vec3::new(0.5, 0.0, 0.75_f32.sqrt());
        place_anchor(&mut cap, near_cap, Quat::IDENTITY, 1.0, &lens(), viewport());
        assert!(cap.visible);
        assert!(cap.x > 400.0);
    }

    #[test]
    fn rotation_brings_back_point_to_front() {
        let mut placement = MarkerPlacement::hidden("spun");
        let half_turn = Quat::from_rotation_y(std::f32::consts::PI);
        place_anchor(
            &mut placement,
            Vec3::NEG_Z,
            half_turn,
            1.0,
            &lens(),
            viewport(),
        );
        assert!(placement.visible);
    }

    #[test]
    fn non_finite_projection_keeps_last_position() {
        let mut placement = MarkerPlacement {
            id: "stuck",
            x: 12.0,
            y: 34.0,
            visible: true,
        };
        let mut degenerate = lens();
        degenerate.eye = Vec3::Z;
        // Anchor exactly at the camera position.
        place_anchor(
            &mut placement,
            Vec3::Z,
            Quat::IDENTITY,
            1.0,
            &degenerate,
            viewport(),
        );
        assert_eq!(placement.x, 12.0);
        assert_eq!(placement.y, 34.0);
    }
}
