//! Randomly placed point markers and their column geometry.

use foundation::Rgba;
use foundation::math::{LatLng, Vec3, polar_to_cartesian};
use rand::Rng;

use crate::mesh::{Mesh, MarkerVertex};

pub const MARKER_PALETTE: [u32; 5] = [0xff6b6b, 0x4ecdc4, 0x45b7d1, 0x96ceb4, 0xfeca57];

/// Sides of the prism drawn for each marker.
const COLUMN_SIDES: usize = 6;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointMarker {
    pub lat: f64,
    pub lng: f64,
    /// Column height in globe radii.
    pub size: f64,
    pub color: Rgba,
}

/// Uniform random markers: lat in [-90, 90), lng in [-180, 180),
/// size in [0.1, 0.6), colour from [`MARKER_PALETTE`].
pub fn generate_markers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<PointMarker> {
    (0..count)
        .map(|_| {
            let lat = (rng.random::<f64>() - 0.5) * 180.0;
            let lng = (rng.random::<f64>() - 0.5) * 360.0;
            let size = rng.random::<f64>() * 0.5 + 0.1;
            let color = MARKER_PALETTE[rng.random_range(0..MARKER_PALETTE.len())];
            PointMarker {
                lat,
                lng,
                size,
                color: Rgba::from_hex_u32(color),
            }
        })
        .collect()
}

/// Builds one open-bottom prism per marker, standing on a sphere of
/// `globe_radius` with angular radius `radius_deg`.
pub fn marker_mesh(markers: &[PointMarker], globe_radius: f64, radius_deg: f64) -> Mesh<MarkerVertex> {
    let mut mesh = Mesh::new();
    let spread = radius_deg.to_radians();

    for marker in markers {
        let up = polar_to_cartesian(LatLng::new(marker.lat, marker.lng), 1.0);
        let (east, north) = tangent_frame(up);
        let color = marker.color.0;
        let top_radius = globe_radius * (1.0 + marker.size);

        let ring: Vec<(Vec3, Vec3)> = (0..COLUMN_SIDES)
            .map(|i| {
                let a = i as f64 / COLUMN_SIDES as f64 * std::f64::consts::TAU;
                let side = east * a.cos() + north * a.sin();
                let dir = (up * spread.cos() + side * spread.sin()).normalize();
                (dir, side)
            })
            .collect();

        // Side walls: one quad per edge with a flat outward normal.
        for i in 0..COLUMN_SIDES {
            let (d0, s0) = ring[i];
            let (d1, s1) = ring[(i + 1) % COLUMN_SIDES];
            let normal = (s0 + s1).normalize().to_f32();
            let quad = [
                d0 * globe_radius,
                d1 * globe_radius,
                d1 * top_radius,
                d0 * top_radius,
            ]
            .map(|p| MarkerVertex {
                position: p.to_f32(),
                normal,
                color,
            });
            mesh.append(quad, &[0, 1, 2, 0, 2, 3]);
        }

        // Top cap as a fan around the column axis.
        let mut cap = Vec::with_capacity(COLUMN_SIDES + 1);
        cap.push(MarkerVertex {
            position: (up * top_radius).to_f32(),
            normal: up.to_f32(),
            color,
        });
        cap.extend(ring.iter().map(|(dir, _)| MarkerVertex {
            position: (*dir * top_radius).to_f32(),
            normal: up.to_f32(),
            color,
        }));
        let fan: Vec<u32> = (0..COLUMN_SIDES as u32)
            .flat_map(|i| [0, 1 + i, 1 + (i + 1) % COLUMN_SIDES as u32])
            .collect();
        mesh.append(cap, &fan);
    }

    mesh
}

/// East/north unit vectors tangent to the sphere at `up`.
fn tangent_frame(up: Vec3) -> (Vec3, Vec3) {
    let pole = Vec3::new(0.0, 1.0, 0.0);
    let east = if pole.cross(up).length() < 1e-6 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        pole.cross(up).normalize()
    };
    let north = up.cross(east).normalize();
    (east, north)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_requested_count_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let markers = generate_markers(&mut rng, 100);
        assert_eq!(markers.len(), 100);
        for m in &markers {
            assert!((-90.0..90.0).contains(&m.lat), "lat {}", m.lat);
            assert!((-180.0..180.0).contains(&m.lng), "lng {}", m.lng);
            assert!((0.1..0.6).contains(&m.size), "size {}", m.size);
        }
    }

    #[test]
    fn colors_come_from_palette() {
        let palette: Vec<Rgba> = MARKER_PALETTE.iter().map(|&c| Rgba::from_hex_u32(c)).collect();
        let mut rng = StdRng::seed_from_u64(99);
        for m in generate_markers(&mut rng, 500) {
            assert!(palette.contains(&m.color));
        }
    }

    #[test]
    fn same_seed_same_markers() {
        let a = generate_markers(&mut StdRng::seed_from_u64(3), 10);
        let b = generate_markers(&mut StdRng::seed_from_u64(3), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn column_rises_from_surface_to_size() {
        let marker = PointMarker {
            lat: 10.0,
            lng: 20.0,
            size: 0.5,
            color: Rgba::WHITE,
        };
        let mesh = marker_mesh(&[marker], 100.0, 0.5);
        assert_eq!(mesh.vertices.len(), COLUMN_SIDES * 4 + COLUMN_SIDES + 1);
        assert_eq!(mesh.indices.len(), COLUMN_SIDES * 6 + COLUMN_SIDES * 3);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

        let radii: Vec<f32> = mesh
            .vertices
            .iter()
            .map(|v| {
                let [x, y, z] = v.position;
                (x * x + y * y + z * z).sqrt()
            })
            .collect();
        let min = radii.iter().cloned().fold(f32::MAX, f32::min);
        let max = radii.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - 100.0).abs() < 1e-3);
        assert!((max - 150.0).abs() < 1e-3);
    }

    #[test]
    fn pole_marker_has_valid_frame() {
        let marker = PointMarker {
            lat: 90.0,
            lng: 0.0,
            size: 0.2,
            color: Rgba::WHITE,
        };
        let mesh = marker_mesh(&[marker], 1.0, 0.5);
        assert!(mesh.vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
    }
}
