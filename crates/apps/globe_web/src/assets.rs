//! Globe texture download and decoding.

use gloo_net::http::Request;
use image::imageops::FilterType;
use scene::{GlobeSurface, SceneConfig, SurfaceImage};

use crate::error::AssetError;

/// Largest texture edge WebGL2 guarantees.
pub const MAX_TEXTURE_DIMENSION: u32 = 2048;

/// Decodes a JPEG/PNG into RGBA8, downscaling so neither edge exceeds
/// `max_dimension`.
pub fn decode_surface_image(bytes: &[u8], max_dimension: u32) -> Result<SurfaceImage, AssetError> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width() > max_dimension || img.height() > max_dimension {
        img = img.resize(max_dimension, max_dimension, FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SurfaceImage::new(width, height, rgba.into_raw())
        .ok_or_else(|| AssetError::Decode(format!("empty image {width}x{height}")))
}

pub async fn fetch_surface_image(url: &str) -> Result<SurfaceImage, AssetError> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        return Err(AssetError::Status(resp.status()));
    }
    let bytes = resp.binary().await?;
    log::debug!("fetched {url} ({} bytes)", bytes.len());
    decode_surface_image(&bytes, MAX_TEXTURE_DIMENSION)
}

/// Colour map is required; a missing bump map only flattens the shading.
pub async fn load_globe_surface(config: &SceneConfig) -> GlobeSurface {
    let color = fetch_surface_image(&config.globe_image_url).await;
    if color.is_err() {
        return GlobeSurface::from_load(color.map(|c| (c, None)));
    }
    let bump = match fetch_surface_image(&config.bump_image_url).await {
        Ok(bump) => Some(bump),
        Err(err) => {
            log::warn!("bump map unavailable: {err}");
            None
        }
    };
    GlobeSurface::from_load(color.map(|c| (c, bump)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let img = decode_surface_image(&png(4, 2), MAX_TEXTURE_DIMENSION).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(&img.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn oversized_images_are_downscaled_keeping_aspect() {
        let img = decode_surface_image(&png(64, 32), 16).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_surface_image(b"definitely not an image", 16).unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }
}
