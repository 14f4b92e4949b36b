//! Camera and model transform
//!
//! The camera always looks at the origin from a mode-specific pose. Orbiting
//! rotates the model, not the camera; zooming scales the camera position.

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

use crate::config::ViewerConfig;
use crate::view_mode::ViewMode;

/// Perspective camera looking at a target
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Default pose for `mode`
    pub fn for_mode(mode: ViewMode, config: &ViewerConfig) -> Self {
        Self {
            eye: mode.default_eye(config),
            target: Point3::origin(),
            up: Vector3::y(),
            fovy: config.fovy_degrees,
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    /// Move back to the default pose for `mode`, keeping projection settings
    pub fn reset_to(&mut self, mode: ViewMode, config: &ViewerConfig) {
        self.eye = mode.default_eye(config);
        self.target = Point3::origin();
        self.up = Vector3::y();
    }

    /// Distance of the camera from the origin
    pub fn distance(&self) -> f32 {
        self.eye.coords.magnitude()
    }

    /// Scale the camera position vector by `factor`.
    ///
    /// Geometric: n zooms by f from distance d end at d * f^n, so repeated
    /// zoom-in approaches but never reaches the origin.
    pub fn zoom(&mut self, factor: f32) {
        self.eye.coords *= factor;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        // keep `up` usable when the eye sits on the up axis
        let forward = (self.target - self.eye).normalize();
        let up = if forward.cross(&self.up).norm_squared() < 1e-8 {
            Vector3::z()
        } else {
            self.up
        };
        Matrix4::look_at_rh(&self.eye, &self.target, &up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, self.fovy.to_radians(), self.znear, self.zfar)
    }

    /// Build the view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Matrix4<f32> {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Accumulated orientation of the assembled model
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelTransform {
    /// Rotation about the x axis, radians, unbounded
    pub pitch: f32,
    /// Rotation about the y axis, radians, unbounded
    pub yaw: f32,
}

impl ModelTransform {
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Model matrix, pitch applied after yaw
    pub fn matrix(&self) -> Matrix4<f32> {
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw);
        (pitch * yaw).to_homogeneous()
    }
}

/// Direction of a wheel step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Direction for a vertical scroll delta, positive when the wheel turns
    /// away from the user. Wheel up backs the camera off, wheel down moves it
    /// closer; zero is no step.
    pub fn from_scroll(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else {
            None
        }
    }

    pub fn factor(&self, config: &ViewerConfig) -> f32 {
        match self {
            ZoomDirection::In => config.zoom_in_factor,
            ZoomDirection::Out => config.zoom_out_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_geometric() {
        let config = ViewerConfig::default();
        let mut camera = Camera::for_mode(ViewMode::Isometric, &config);
        let d = camera.distance();

        for _ in 0..10 {
            camera.zoom(0.9);
        }
        let expected = d * 0.9f32.powi(10);
        assert!((camera.distance() - expected).abs() < 1e-3);
        assert!(camera.distance() > 0.0);
    }

    #[test]
    fn test_zoom_keeps_direction() {
        let config = ViewerConfig::default();
        let mut camera = Camera::for_mode(ViewMode::Isometric, &config);
        let before = camera.eye.coords.normalize();
        camera.zoom(ZoomDirection::Out.factor(&config));
        assert!((camera.eye.coords.normalize() - before).norm() < 1e-6);
        assert!((camera.distance() - 10.0 * 3f32.sqrt() * 1.1).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_down_moves_closer() {
        let config = ViewerConfig::default();
        assert_eq!(ZoomDirection::from_scroll(-40.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(40.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
        assert_eq!(ZoomDirection::from_scroll(f32::NAN), None);

        let mut camera = Camera::for_mode(ViewMode::Isometric, &config);
        let start = camera.distance();
        if let Some(direction) = ZoomDirection::from_scroll(-1.0) {
            camera.zoom(direction.factor(&config));
        }
        assert!((camera.distance() - start * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_reset_keeps_projection() {
        let config = ViewerConfig::default();
        let mut camera = Camera::for_mode(ViewMode::Isometric, &config);
        camera.zoom(0.5);
        camera.fovy = 60.0;
        camera.reset_to(ViewMode::Layered, &config);
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 20.0));
        assert_eq!(camera.fovy, 60.0);
    }

    #[test]
    fn test_view_projection_maps_target_to_center() {
        let config = ViewerConfig::default();
        let camera = Camera::for_mode(ViewMode::Layered, &config);
        let clip = camera.view_projection(1.0) * Point3::origin().to_homogeneous();
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
    }

    #[test]
    fn test_model_rotation_accumulates_unbounded() {
        let mut model = ModelTransform::default();
        for _ in 0..1000 {
            model.rotate(0.01, -0.02);
        }
        assert!((model.yaw - 10.0).abs() < 1e-3);
        assert!((model.pitch + 20.0).abs() < 1e-3);
        model.reset();
        assert_eq!(model, ModelTransform::default());
        assert_eq!(model.matrix(), Matrix4::identity());
    }

    #[test]
    fn test_yaw_turns_x_toward_minus_z() {
        let model = ModelTransform {
            pitch: 0.0,
            yaw: std::f32::consts::FRAC_PI_2,
        };
        let p = model.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }
}
