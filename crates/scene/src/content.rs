use foundation::{Rgba, parse_hex_color};
use rand::Rng;

use crate::config::SceneConfig;
use crate::globe::{GlobeMaterial, GlobeSurface, sphere_mesh};
use crate::lighting::LightRig;
use crate::markers::{PointMarker, generate_markers, marker_mesh};
use crate::mesh::{GlobeVertex, MarkerVertex, Mesh};
use crate::starfield::Starfield;

const FALLBACK_BACKGROUND: Rgba = Rgba([0.039, 0.039, 0.039, 1.0]);

/// Everything the renderer draws, built once at startup.
#[derive(Debug, Clone)]
pub struct SceneContent {
    pub background: Rgba,
    pub lights: LightRig,
    pub surface: GlobeSurface,
    pub material: GlobeMaterial,
    pub globe_mesh: Mesh<GlobeVertex>,
    pub markers: Vec<PointMarker>,
    pub marker_mesh: Mesh<MarkerVertex>,
    pub starfield: Starfield,
}

impl SceneContent {
    pub fn assemble<R: Rng + ?Sized>(
        config: &SceneConfig,
        surface: GlobeSurface,
        rng: &mut R,
    ) -> Self {
        let background = parse_hex_color(&config.background).unwrap_or_else(|| {
            log::warn!("invalid background colour {:?}", config.background);
            FALLBACK_BACKGROUND
        });

        let markers = generate_markers(rng, config.marker_count);
        let marker_mesh = marker_mesh(&markers, config.globe_radius, config.marker_radius_deg);
        let starfield = Starfield::generate(rng, config.star_count, config.star_extent);

        log::debug!(
            "scene assembled: {} markers, {} stars, fallback globe: {}",
            markers.len(),
            starfield.len(),
            surface.is_fallback()
        );

        Self {
            background,
            lights: LightRig::default(),
            surface,
            material: GlobeMaterial {
                shininess: config.globe_shininess,
                opacity: config.globe_opacity.clamp(0.0, 1.0),
                ..GlobeMaterial::default()
            },
            globe_mesh: sphere_mesh(
                config.globe_radius,
                config.globe_lat_segments,
                config.globe_lon_segments,
            ),
            markers,
            marker_mesh,
            starfield,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_config_builds_full_scene() {
        let mut rng = StdRng::seed_from_u64(5);
        let content = SceneContent::assemble(&SceneConfig::default(), GlobeSurface::Plain, &mut rng);
        assert_eq!(content.markers.len(), 100);
        assert_eq!(content.starfield.len(), 10_000);
        assert!(!content.globe_mesh.is_empty());
        assert!(!content.marker_mesh.is_empty());
        assert_eq!(content.material.opacity, 0.9);
        assert!(content.surface.is_fallback());
    }

    #[test]
    fn bad_background_uses_fallback() {
        let config = SceneConfig {
            background: "black".to_string(),
            star_count: 0,
            marker_count: 0,
            ..SceneConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let content = SceneContent::assemble(&config, GlobeSurface::Plain, &mut rng);
        assert_eq!(content.background, FALLBACK_BACKGROUND);
        assert!(content.marker_mesh.is_empty());
        assert!(content.starfield.is_empty());
    }
}
