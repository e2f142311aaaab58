use super::Vec3;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    /// Equirectangular texture coordinate: u grows eastward from the
    /// antimeridian, v grows southward from the north pole.
    pub fn to_uv(self) -> [f64; 2] {
        [(self.lng_deg + 180.0) / 360.0, (90.0 - self.lat_deg) / 180.0]
    }
}

/// Maps a point on a sphere of `radius` to scene space.
///
/// Y is up (north pole), lat/lng (0, 0) faces +Z and lng +90 faces +X.
pub fn polar_to_cartesian(at: LatLng, radius: f64) -> Vec3 {
    let phi = (90.0 - at.lat_deg).to_radians();
    let theta = (90.0 - at.lng_deg).to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::{LatLng, polar_to_cartesian};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn null_island_faces_positive_z() {
        let p = polar_to_cartesian(LatLng::new(0.0, 0.0), 100.0);
        assert_close(p.x, 0.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
        assert_close(p.z, 100.0, 1e-9);
    }

    #[test]
    fn north_pole_is_up() {
        let p = polar_to_cartesian(LatLng::new(90.0, 45.0), 2.0);
        assert_close(p.y, 2.0, 1e-9);
        assert_close(p.x, 0.0, 1e-9);
    }

    #[test]
    fn ninety_east_faces_positive_x() {
        let p = polar_to_cartesian(LatLng::new(0.0, 90.0), 1.0);
        assert_close(p.x, 1.0, 1e-9);
        assert_close(p.z, 0.0, 1e-9);
    }

    #[test]
    fn points_lie_on_sphere() {
        for (lat, lng) in [(12.5, -170.0), (-45.0, 33.3), (89.0, 179.9)] {
            let p = polar_to_cartesian(LatLng::new(lat, lng), 100.0);
            assert_close(p.length(), 100.0, 1e-9);
        }
    }

    #[test]
    fn uv_spans_unit_square() {
        assert_eq!(LatLng::new(90.0, -180.0).to_uv(), [0.0, 0.0]);
        assert_eq!(LatLng::new(-90.0, 180.0).to_uv(), [1.0, 1.0]);
    }
}
