use foundation::Rgba;
use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgba,
    pub intensity: f32,
    /// Light shines from this position toward the origin.
    pub position: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Rgba,
    pub intensity: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub color: Rgba,
    pub intensity: f32,
    pub position: Vec3,
    /// Contribution fades linearly to zero at this distance.
    pub range: f64,
}

/// Sun, ambient fill and a tinted point light behind the globe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightRig {
    pub sun: DirectionalLight,
    pub ambient: AmbientLight,
    pub fill: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            sun: DirectionalLight {
                color: Rgba::WHITE,
                intensity: 1.0,
                position: Vec3::new(5.0, 3.0, 5.0),
            },
            ambient: AmbientLight {
                color: Rgba::from_hex_u32(0x404040),
                intensity: 0.4,
            },
            fill: PointLight {
                color: Rgba::from_hex_u32(0x4ecdc4),
                intensity: 0.5,
                position: Vec3::new(-200.0, -200.0, -200.0),
                range: 1000.0,
            },
        }
    }
}

impl LightRig {
    /// Unit vector pointing from the scene toward the sun.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun.position.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::LightRig;

    #[test]
    fn sun_direction_is_unit() {
        let rig = LightRig::default();
        assert!((rig.sun_direction().length() - 1.0).abs() < 1e-12);
        assert!(rig.sun_direction().x > 0.0);
    }

    #[test]
    fn fill_light_sits_opposite_the_sun() {
        let rig = LightRig::default();
        assert!(rig.sun_direction().dot(rig.fill.position) < 0.0);
    }
}
