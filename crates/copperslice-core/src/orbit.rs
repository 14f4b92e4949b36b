/// Orbit state machine for pointer-driven model rotation
///
/// This is the SINGLE source of truth for drag state.
/// Every pointer event goes through this state machine.
use crate::camera::ModelTransform;

/// Pointer coordinate in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitState {
    /// No button held over the surface
    Idle,

    /// Button held; `last` is the pointer coordinate of the previous event
    Dragging { last: PointerPos },
}

#[derive(Debug, PartialEq)]
pub enum OrbitTransition {
    None,                                         // Event ignored in this state
    Started,                                      // Idle -> Dragging
    Rotated { delta_yaw: f32, delta_pitch: f32 }, // Rotation applied to the model
    Ended,                                        // Dragging -> Idle
}

pub struct OrbitController {
    state: OrbitState,
    sensitivity: f32,
}

impl OrbitController {
    /// `sensitivity` is radians of rotation per pixel of pointer travel
    pub fn new(sensitivity: f32) -> Self {
        Self {
            state: OrbitState::Idle,
            sensitivity,
        }
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, OrbitState::Dragging { .. })
    }

    /// Pointer pressed on the surface; also re-captures while dragging
    pub fn pointer_down(&mut self, pos: PointerPos) -> OrbitTransition {
        let was_idle = !self.is_dragging();
        self.state = OrbitState::Dragging { last: pos };
        if was_idle {
            OrbitTransition::Started
        } else {
            OrbitTransition::None
        }
    }

    /// Pointer moved; rotates `model` only while dragging.
    ///
    /// Horizontal travel turns into yaw, vertical travel into pitch. No
    /// clamping, so the model can spin freely.
    pub fn pointer_move(&mut self, pos: PointerPos, model: &mut ModelTransform) -> OrbitTransition {
        match self.state {
            OrbitState::Idle => OrbitTransition::None,
            OrbitState::Dragging { last } => {
                let delta_yaw = (pos.x - last.x) * self.sensitivity;
                let delta_pitch = (pos.y - last.y) * self.sensitivity;
                model.rotate(delta_yaw, delta_pitch);
                self.state = OrbitState::Dragging { last: pos };
                OrbitTransition::Rotated { delta_yaw, delta_pitch }
            }
        }
    }

    pub fn pointer_up(&mut self) -> OrbitTransition {
        self.release()
    }

    /// Pointer left the rendering surface
    pub fn pointer_leave(&mut self) -> OrbitTransition {
        self.release()
    }

    fn release(&mut self) -> OrbitTransition {
        match self.state {
            OrbitState::Idle => OrbitTransition::None,
            OrbitState::Dragging { .. } => {
                self.state = OrbitState::Idle;
                OrbitTransition::Ended
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_cycle() {
        let mut orbit = OrbitController::new(0.01);
        let mut model = ModelTransform::default();

        assert_eq!(orbit.pointer_down(PointerPos::new(100.0, 100.0)), OrbitTransition::Started);
        assert!(orbit.is_dragging());

        match orbit.pointer_move(PointerPos::new(150.0, 80.0), &mut model) {
            OrbitTransition::Rotated { delta_yaw, delta_pitch } => {
                assert!((delta_yaw - 0.5).abs() < 1e-6);
                assert!((delta_pitch + 0.2).abs() < 1e-6);
            }
            other => panic!("expected rotation, got {:?}", other),
        }
        assert!((model.yaw - 0.5).abs() < 1e-6);
        assert!((model.pitch + 0.2).abs() < 1e-6);

        // deltas are measured from the previous move, not from pointer-down
        orbit.pointer_move(PointerPos::new(160.0, 80.0), &mut model);
        assert!((model.yaw - 0.6).abs() < 1e-6);

        assert_eq!(orbit.pointer_up(), OrbitTransition::Ended);
        assert_eq!(orbit.state(), OrbitState::Idle);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut orbit = OrbitController::new(0.01);
        let mut model = ModelTransform::default();
        assert_eq!(
            orbit.pointer_move(PointerPos::new(40.0, 40.0), &mut model),
            OrbitTransition::None
        );
        assert_eq!(model, ModelTransform::default());
    }

    #[test]
    fn test_leaving_surface_ends_drag() {
        let mut orbit = OrbitController::new(0.01);
        let mut model = ModelTransform::default();
        orbit.pointer_down(PointerPos::new(0.0, 0.0));
        assert_eq!(orbit.pointer_leave(), OrbitTransition::Ended);

        orbit.pointer_move(PointerPos::new(300.0, 300.0), &mut model);
        assert_eq!(model, ModelTransform::default());
        assert_eq!(orbit.pointer_leave(), OrbitTransition::None);
    }

    #[test]
    fn test_second_press_recaptures() {
        let mut orbit = OrbitController::new(0.01);
        let mut model = ModelTransform::default();
        orbit.pointer_down(PointerPos::new(0.0, 0.0));
        assert_eq!(orbit.pointer_down(PointerPos::new(50.0, 0.0)), OrbitTransition::None);
        orbit.pointer_move(PointerPos::new(60.0, 0.0), &mut model);
        assert!((model.yaw - 0.1).abs() < 1e-6);
    }
}
