use foundation::math::Vec3;
use rand::Rng;

use crate::mesh::StarVertex;

/// Decorative background stars, generated once.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    points: Vec<Vec3>,
}

impl Starfield {
    /// `count` points uniformly spread over the cube [-extent, extent)³.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f64) -> Self {
        let mut coord = || (rng.random::<f64>() - 0.5) * 2.0 * extent;
        let points = (0..count)
            .map(|_| {
                let x = coord();
                let y = coord();
                let z = coord();
                Vec3::new(x, y, z)
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn vertices(&self) -> Vec<StarVertex> {
        self.points
            .iter()
            .map(|p| StarVertex {
                position: p.to_f32(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Starfield;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exactly_ten_thousand_stars_inside_the_cube() {
        let mut rng = StdRng::seed_from_u64(42);
        let stars = Starfield::generate(&mut rng, 10_000, 1000.0);
        assert_eq!(stars.len(), 10_000);
        for p in stars.points() {
            for c in p.as_array() {
                assert!((-1000.0..1000.0).contains(&c), "component {c}");
            }
        }
    }

    #[test]
    fn vertices_mirror_points() {
        let mut rng = StdRng::seed_from_u64(1);
        let stars = Starfield::generate(&mut rng, 16, 10.0);
        let verts = stars.vertices();
        assert_eq!(verts.len(), 16);
        assert_eq!(verts[3].position, stars.points()[3].to_f32());
    }
}
