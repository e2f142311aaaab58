//! Globe orientation and camera state driven by pointer, wheel and slider
//! input plus a fixed per-frame auto-rotation.

use foundation::math::{Mat4, Vec3, mat4_rotation_xyz};

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;

/// Euler angles in radians, applied in XYZ order.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
enum Drag {
    #[default]
    Idle,
    Active {
        last_px: [f64; 2],
    },
}

/// Owns the camera, the globe rotation and the drag state.
#[derive(Debug, Clone)]
pub struct SceneController {
    camera: PerspectiveCamera,
    rotation: Euler,
    rotation_speed: f64,
    drag: Drag,

    default_camera_position: Vec3,
    drag_sensitivity: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    altitude_scale: f64,
}

impl SceneController {
    pub fn new(config: &SceneConfig) -> Self {
        let default_camera_position = Vec3::new(0.0, 0.0, config.camera_distance);
        Self {
            camera: PerspectiveCamera::new(
                default_camera_position,
                config.fov_y_deg,
                config.near,
                config.far,
            ),
            rotation: Euler::ZERO,
            rotation_speed: config.rotation_speed,
            drag: Drag::Idle,
            default_camera_position,
            drag_sensitivity: config.drag_sensitivity,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            altitude_scale: config.altitude_scale,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Active { .. })
    }

    /// Advances auto-rotation by one frame.
    pub fn tick(&mut self) {
        self.rotation.y += self.rotation_speed;
    }

    pub fn pointer_down(&mut self, x_px: f64, y_px: f64) {
        self.drag = Drag::Active {
            last_px: [x_px, y_px],
        };
    }

    pub fn pointer_move(&mut self, x_px: f64, y_px: f64) {
        let Drag::Active { last_px } = self.drag else {
            return;
        };

        let dx = x_px - last_px[0];
        let dy = y_px - last_px[1];
        self.rotation.y += dx * self.drag_sensitivity;
        self.rotation.x += dy * self.drag_sensitivity;

        self.drag = Drag::Active {
            last_px: [x_px, y_px],
        };
    }

    pub fn pointer_up(&mut self) {
        self.drag = Drag::Idle;
    }

    /// One wheel event: positive `delta_y` moves the camera away.
    pub fn wheel(&mut self, delta_y: f64) {
        let scale = if delta_y > 0.0 {
            self.zoom_out_factor
        } else {
            self.zoom_in_factor
        };
        self.camera.position = self.camera.position * scale;
    }

    pub fn set_rotation_speed(&mut self, speed: f64) {
        if !speed.is_finite() {
            return;
        }
        self.rotation_speed = speed;
    }

    /// Places the camera at `altitude * altitude_scale` from the globe
    /// center, keeping its direction.
    pub fn set_altitude(&mut self, altitude: f64) {
        if !altitude.is_finite() || altitude <= 0.0 {
            return;
        }
        let direction = if self.camera.position.length() > 1e-10 {
            self.camera.position
        } else {
            self.default_camera_position
        };
        self.camera.position = direction.with_length(altitude * self.altitude_scale);
    }

    /// Restores the default camera position and zero globe rotation.
    pub fn reset(&mut self) {
        self.camera.position = self.default_camera_position;
        self.rotation = Euler::ZERO;
        self.drag = Drag::Idle;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn view_proj(&self) -> Mat4 {
        self.camera.view_proj()
    }

    pub fn globe_model(&self) -> Mat4 {
        mat4_rotation_xyz(self.rotation.x, self.rotation.y, self.rotation.z)
    }
}
