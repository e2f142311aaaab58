use foundation::math::{Mat4, Vec3, mat4_look_at_rh, mat4_mul, mat4_perspective_rh_z0};

/// Perspective camera that always looks at the scene origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, fov_y_deg: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            fov_y_deg,
            aspect: 1.0,
            near,
            far,
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.aspect = if height <= 0.0 || width <= 0.0 {
            1.0
        } else {
            (width / height).max(1e-6)
        };
    }

    pub fn distance(&self) -> f64 {
        self.position.length()
    }

    pub fn view(&self) -> Mat4 {
        mat4_look_at_rh(self.position, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0))
    }

    pub fn projection(&self) -> Mat4 {
        mat4_perspective_rh_z0(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        mat4_mul(self.projection(), self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::PerspectiveCamera;
    use foundation::math::Vec3;

    #[test]
    fn degenerate_viewport_keeps_square_aspect() {
        let mut cam = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 300.0), 75.0, 0.1, 1000.0);
        cam.set_viewport(1280.0, 0.0);
        assert_eq!(cam.aspect, 1.0);
        cam.set_viewport(1600.0, 800.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let mut cam = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 300.0), 75.0, 0.1, 1000.0);
        cam.set_viewport(1280.0, 720.0);
        let m = cam.view_proj();
        // Clip-space x/y of the origin are the translation column.
        let w = m[3][3];
        assert!((m[3][0] / w).abs() < 1e-6);
        assert!((m[3][1] / w).abs() < 1e-6);
        let depth = m[3][2] / w;
        assert!((0.0..1.0).contains(&depth));
    }
}
