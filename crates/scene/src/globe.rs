use std::fmt::Display;

use foundation::Rgba;
use foundation::math::{LatLng, polar_to_cartesian};

use crate::mesh::{GlobeVertex, Mesh};

/// Decoded RGBA8 image.
#[derive(Clone, PartialEq)]
pub struct SurfaceImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for SurfaceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl SurfaceImage {
    /// Returns `None` unless `rgba` holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    /// 1x1 mid-grey height map, i.e. no bump.
    pub fn flat_bump() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![128, 128, 128, 255],
        }
    }
}

/// What the globe's surface is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobeSurface {
    Textured {
        color: SurfaceImage,
        bump: SurfaceImage,
    },
    /// Plain shaded sphere used when the textures cannot be loaded.
    Plain,
}

impl GlobeSurface {
    /// Degrades a failed texture load to [`GlobeSurface::Plain`].
    pub fn from_load<E: Display>(loaded: Result<(SurfaceImage, Option<SurfaceImage>), E>) -> Self {
        match loaded {
            Ok((color, bump)) => GlobeSurface::Textured {
                color,
                bump: bump.unwrap_or_else(SurfaceImage::flat_bump),
            },
            Err(err) => {
                log::warn!("globe textures unavailable, using plain sphere: {err}");
                GlobeSurface::Plain
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GlobeSurface::Plain)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeMaterial {
    pub shininess: f32,
    pub opacity: f32,
    /// Base colour of the plain fallback sphere.
    pub plain_color: Rgba,
}

impl Default for GlobeMaterial {
    fn default() -> Self {
        Self {
            shininess: 0.8,
            opacity: 0.9,
            plain_color: Rgba([0.10, 0.55, 0.85, 1.0]),
        }
    }
}

/// Upper bound on either segment count of [`sphere_mesh`]; keeps the vertex
/// count well inside `u32` indices.
pub const MAX_SPHERE_SEGMENTS: u32 = 1024;

/// UV sphere whose texture coordinates follow [`LatLng::to_uv`].
///
/// Rows run from the north pole southward, columns from lng -180 eastward;
/// the seam column is duplicated so u reaches 1.0.
pub fn sphere_mesh(radius: f64, lat_segments: u32, lon_segments: u32) -> Mesh<GlobeVertex> {
    let lat_segments = lat_segments.clamp(3, MAX_SPHERE_SEGMENTS);
    let lon_segments = lon_segments.clamp(3, MAX_SPHERE_SEGMENTS);

    let mut mesh = Mesh::new();
    mesh.vertices
        .reserve((lat_segments as usize + 1) * (lon_segments as usize + 1));
    for row in 0..=lat_segments {
        let lat = 90.0 - 180.0 * row as f64 / lat_segments as f64;
        for col in 0..=lon_segments {
            let lng = -180.0 + 360.0 * col as f64 / lon_segments as f64;
            let at = LatLng::new(lat, lng);
            let p = polar_to_cartesian(at, radius);
            let [u, v] = at.to_uv();
            mesh.vertices.push(GlobeVertex {
                position: p.to_f32(),
                normal: p.normalize().to_f32(),
                uv: [u as f32, v as f32],
            });
        }
    }

    let stride = lon_segments + 1;
    mesh.indices
        .reserve(lat_segments as usize * lon_segments as usize * 6);
    for row in 0..lat_segments {
        for col in 0..lon_segments {
            let i0 = row * stride + col;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_image_validates_length() {
        assert!(SurfaceImage::new(2, 2, vec![0; 16]).is_some());
        assert!(SurfaceImage::new(2, 2, vec![0; 15]).is_none());
        assert!(SurfaceImage::new(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn failed_load_falls_back_to_plain() {
        let surface = GlobeSurface::from_load::<&str>(Err("404"));
        assert!(surface.is_fallback());
    }

    #[test]
    fn missing_bump_gets_flat_map() {
        let color = SurfaceImage::new(1, 1, vec![1, 2, 3, 255]).unwrap();
        let surface = GlobeSurface::from_load::<&str>(Ok((color, None)));
        match surface {
            GlobeSurface::Textured { bump, .. } => assert_eq!(bump, SurfaceImage::flat_bump()),
            GlobeSurface::Plain => panic!("expected textured surface"),
        }
    }

    #[test]
    fn oversized_segment_counts_are_clamped() {
        let mesh = sphere_mesh(1.0, u32::MAX, 3);
        let rows = MAX_SPHERE_SEGMENTS as usize + 1;
        assert_eq!(mesh.vertices.len(), rows * 4);
        assert_eq!(mesh.indices.len(), MAX_SPHERE_SEGMENTS as usize * 3 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn sphere_vertices_on_radius_and_indices_in_bounds() {
        let mesh = sphere_mesh(100.0, 8, 16);
        assert_eq!(mesh.vertices.len(), 9 * 17);
        assert_eq!(mesh.indices.len(), 8 * 16 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 100.0).abs() < 1e-3);
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn first_row_is_north_pole() {
        let mesh = sphere_mesh(1.0, 4, 4);
        assert!((mesh.vertices[0].position[1] - 1.0).abs() < 1e-6);
        assert_eq!(mesh.vertices[0].uv[1], 0.0);
    }
}
