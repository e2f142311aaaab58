//! Column-major 4x4 matrices laid out the way WGSL expects them
//! (`m[col][row]`), computed in f64 and stored as f32.

use super::Vec3;

pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Column-major matrix multiply: c = a * b
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

/// Right-handed perspective projection with depth range [0, 1].
pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

/// Rotation from Euler angles applied in XYZ order (`Rx * Ry * Rz`).
pub fn mat4_rotation_xyz(x_rad: f64, y_rad: f64, z_rad: f64) -> Mat4 {
    let (b, a) = x_rad.sin_cos();
    let (d, c) = y_rad.sin_cos();
    let (f, e) = z_rad.sin_cos();

    let ae = a * e;
    let af = a * f;
    let be = b * e;
    let bf = b * f;

    [
        [(c * e) as f32, (af + be * d) as f32, (bf - ae * d) as f32, 0.0],
        [(-c * f) as f32, (ae - bf * d) as f32, (be + af * d) as f32, 0.0],
        [d as f32, (-b * c) as f32, (a * c) as f32, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Applies `m` to a point (w = 1) and returns the xyz part.
pub fn mat4_transform_point(m: Mat4, p: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (row, o) in out.iter_mut().enumerate() {
        *o = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close3(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "expected {b:?}, got {a:?}");
        }
    }

    #[test]
    fn identity_is_neutral() {
        let m = mat4_rotation_xyz(0.3, -1.2, 0.7);
        assert_eq!(mat4_mul(MAT4_IDENTITY, m), m);
        assert_eq!(mat4_mul(m, MAT4_IDENTITY), m);
    }

    #[test]
    fn yaw_quarter_turn_maps_x_to_negative_z() {
        let m = mat4_rotation_xyz(0.0, std::f64::consts::FRAC_PI_2, 0.0);
        assert_close3(mat4_transform_point(m, [1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn pitch_quarter_turn_maps_y_to_z() {
        let m = mat4_rotation_xyz(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        assert_close3(mat4_transform_point(m, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn look_at_moves_target_in_front_of_camera() {
        let view = mat4_look_at_rh(
            Vec3::new(0.0, 0.0, 300.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_close3(mat4_transform_point(view, [0.0, 0.0, 0.0]), [0.0, 0.0, -300.0]);
    }
}
