//! Globe orientation driven by auto-rotation, pointer drags and inertia
//!
//! One pointer at a time may drag the globe. While dragging, pointer deltas
//! set yaw/pitch directly; after release the last delta keeps spinning the
//! globe and decays every frame until it is indistinguishable from the idle
//! auto-rotation.

use std::f32::consts::TAU;

use bevy::math::{Quat, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::motion;

/// Identifier of a pointer as reported by the browser
pub type PointerId = i64;

/// Pointer input forwarded from the frontend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PointerEvent {
    Down { pointer_id: PointerId, x: f32, y: f32 },
    Move { pointer_id: PointerId, x: f32, y: f32 },
    Up { pointer_id: PointerId },
    Cancel { pointer_id: PointerId },
    Leave { pointer_id: PointerId },
}

/// Observable phase of the motion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionPhase {
    IdleRotating,
    Dragging,
    Decelerating,
}

/// Yaw and pitch of the globe in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    /// Spin about the globe's own axis, then tilt toward the viewer
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }
}

/// Constants governing the motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTuning {
    pub auto_rotate: f32,
    pub sensitivity: f32,
    pub max_tilt: f32,
    pub decay: f32,
    pub rest_threshold: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            auto_rotate: motion::AUTO_ROTATE_PER_FRAME,
            sensitivity: motion::DRAG_SENSITIVITY,
            max_tilt: motion::MAX_TILT,
            decay: motion::INERTIA_DECAY,
            rest_threshold: motion::INERTIA_REST_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    pointer_id: PointerId,
    last: Vec2,
}

/// Orientation plus the drag/inertia state feeding it
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeMotion {
    orientation: Orientation,
    /// Angular velocity (yaw, pitch) per frame
    inertia: Vec2,
    drag: Option<DragSession>,
    tuning: MotionTuning,
}

impl Default for GlobeMotion {
    fn default() -> Self {
        Self::new(MotionTuning::default())
    }
}

impl GlobeMotion {
    pub fn new(tuning: MotionTuning) -> Self {
        Self {
            orientation: Orientation::default(),
            inertia: Vec2::ZERO,
            drag: None,
            tuning,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn inertia(&self) -> Vec2 {
        self.inertia
    }

    pub fn phase(&self) -> MotionPhase {
        if self.drag.is_some() {
            MotionPhase::Dragging
        } else if self.inertia != Vec2::ZERO {
            MotionPhase::Decelerating
        } else {
            MotionPhase::IdleRotating
        }
    }

    /// Apply one pointer event; returns whether it was consumed
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { pointer_id, x, y } => self.pointer_down(pointer_id, Vec2::new(x, y)),
            PointerEvent::Move { pointer_id, x, y } => self.pointer_move(pointer_id, Vec2::new(x, y)),
            PointerEvent::Up { pointer_id }
            | PointerEvent::Cancel { pointer_id }
            | PointerEvent::Leave { pointer_id } => self.pointer_up(pointer_id),
        }
    }

    /// Start a drag; ignored while another pointer holds the globe
    pub fn pointer_down(&mut self, pointer_id: PointerId, position: Vec2) -> bool {
        if self.drag.is_some() || !position.is_finite() {
            return false;
        }
        self.drag = Some(DragSession {
            pointer_id,
            last: position,
        });
        self.inertia = Vec2::ZERO;
        true
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, position: Vec2) -> bool {
        let Some(drag) = self.drag.as_mut().filter(|d| d.pointer_id == pointer_id) else {
            return false;
        };
        if !position.is_finite() {
            return false;
        }

        let delta = (position - drag.last) * self.tuning.sensitivity;
        drag.last = position;

        self.inertia = delta;
        self.rotate_by(delta);
        true
    }

    /// End the drag (pointer up, cancel or leave) and let inertia take over
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> bool {
        if self.drag.is_some_and(|d| d.pointer_id == pointer_id) {
            self.drag = None;
            true
        } else {
            false
        }
    }

    /// Advance one rendered frame
    pub fn tick(&mut self) {
        if self.drag.is_some() {
            return;
        }

        let step = self.inertia + Vec2::new(self.tuning.auto_rotate, 0.0);
        self.rotate_by(step);

        self.inertia *= self.tuning.decay;
        if self.inertia.length() < self.tuning.rest_threshold {
            self.inertia = Vec2::ZERO;
        }
    }

    fn rotate_by(&mut self, delta: Vec2) {
        let max_tilt = self.tuning.max_tilt;
        self.orientation.yaw = (self.orientation.yaw + delta.x).rem_euclid(TAU);
        self.orientation.pitch = (self.orientation.pitch + delta.y).clamp(-max_tilt, max_tilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tuning() -> MotionTuning {
        MotionTuning::default()
    }

    #[test]
    fn idle_rotation_advances_yaw_only() {
        let mut motion = GlobeMotion::default();
        for _ in 0..10 {
            motion.tick();
        }
        assert_eq!(motion.phase(), MotionPhase::IdleRotating);
        assert_relative_eq!(
            motion.orientation().yaw,
            10.0 * tuning().auto_rotate,
            epsilon = 1e-6
        );
        assert_eq!(motion.orientation().pitch, 0.0);
    }

    #[test]
    fn drag_drives_orientation_and_pauses_spin() {
        let mut motion = GlobeMotion::default();
        assert!(motion.pointer_down(1, Vec2::new(100.0, 100.0)));
        assert!(motion.pointer_move(1, Vec2::new(120.0, 110.0)));
        assert_eq!(motion.phase(), MotionPhase::Dragging);

        let after_move = motion.orientation();
        assert_relative_eq!(after_move.yaw, 20.0 * tuning().sensitivity, epsilon = 1e-6);
        assert_relative_eq!(after_move.pitch, 10.0 * tuning().sensitivity, epsilon = 1e-6);

        motion.tick();
        assert_eq!(motion.orientation(), after_move);
    }

    #[test]
    fn release_decelerates_then_rests() {
        let mut motion = GlobeMotion::default();
        motion.pointer_down(7, Vec2::ZERO);
        motion.pointer_move(7, Vec2::new(30.0, 0.0));
        assert!(motion.pointer_up(7));
        assert_eq!(motion.phase(), MotionPhase::Decelerating);

        let first = motion.inertia().x;
        motion.tick();
        assert_relative_eq!(motion.inertia().x, first * tuning().decay, epsilon = 1e-7);

        for _ in 0..1_000 {
            motion.tick();
        }
        assert_eq!(motion.inertia(), Vec2::ZERO);
        assert_eq!(motion.phase(), MotionPhase::IdleRotating);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut motion = GlobeMotion::default();
        motion.pointer_down(1, Vec2::ZERO);
        assert!(!motion.pointer_down(2, Vec2::new(5.0, 5.0)));
        assert!(!motion.pointer_move(2, Vec2::new(50.0, 50.0)));
        assert_eq!(motion.orientation(), Orientation::default());
        assert!(!motion.pointer_up(2));
        assert_eq!(motion.phase(), MotionPhase::Dragging);
        assert!(motion.pointer_up(1));
    }

    #[test]
    fn new_drag_discards_inertia() {
        let mut motion = GlobeMotion::default();
        motion.pointer_down(1, Vec2::ZERO);
        motion.pointer_move(1, Vec2::new(40.0, 40.0));
        motion.pointer_up(1);
        motion.pointer_down(1, Vec2::ZERO);
        assert_eq!(motion.inertia(), Vec2::ZERO);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut motion = GlobeMotion::default();
        let max_tilt = tuning().max_tilt;
        motion.pointer_down(3, Vec2::ZERO);
        for step in 1..=50 {
            motion.pointer_move(3, Vec2::new(0.0, step as f32 * 80.0));
            assert!(motion.orientation().pitch.abs() <= max_tilt);
        }
        motion.pointer_up(3);
        for _ in 0..200 {
            motion.tick();
            assert!(motion.orientation().pitch.abs() <= max_tilt);
        }
        assert_relative_eq!(motion.orientation().pitch, max_tilt);

        motion.pointer_down(3, Vec2::ZERO);
        motion.pointer_move(3, Vec2::new(0.0, -1.0e6));
        assert_relative_eq!(motion.orientation().pitch, -max_tilt);
    }

    #[test]
    fn events_deserialize_from_frontend_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"move","pointerId":4,"x":1.5,"y":2.0}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Move {
                pointer_id: 4,
                x: 1.5,
                y: 2.0
            }
        );
        let mut motion = GlobeMotion::default();
        assert!(!motion.handle(event));
        assert!(motion.handle(PointerEvent::Down {
            pointer_id: 4,
            x: 0.0,
            y: 0.0
        }));
        assert!(motion.handle(PointerEvent::Leave { pointer_id: 4 }));
    }
}
