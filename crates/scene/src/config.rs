use serde::Deserialize;

pub const DEFAULT_GLOBE_IMAGE_URL: &str =
    "https://unpkg.com/three-globe/example/img/earth-blue-marble.jpg";
pub const DEFAULT_BUMP_IMAGE_URL: &str =
    "https://unpkg.com/three-globe/example/img/earth-topology.png";

/// Scene tunables. Every field has a default, so a partial JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // ── Camera ───────────────────────────────────────────────
    /// Distance of the default camera position along +Z.
    pub camera_distance: f64,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,

    // ── Interaction ──────────────────────────────────────────
    /// Automatic Y rotation applied every frame (radians per frame).
    pub rotation_speed: f64,
    /// Radians of globe rotation per pixel of drag.
    pub drag_sensitivity: f64,
    /// Camera distance multiplier for a wheel step away from the user.
    pub zoom_out_factor: f64,
    /// Camera distance multiplier for a wheel step toward the user.
    pub zoom_in_factor: f64,
    /// Altitude slider value to camera distance.
    pub altitude_scale: f64,

    // ── Content ──────────────────────────────────────────────
    pub globe_radius: f64,
    pub globe_lat_segments: u32,
    pub globe_lon_segments: u32,
    pub globe_shininess: f32,
    pub globe_opacity: f32,
    pub globe_image_url: String,
    pub bump_image_url: String,
    pub marker_count: usize,
    /// Angular radius of a marker column in degrees.
    pub marker_radius_deg: f64,
    pub star_count: usize,
    /// Stars are spread over [-extent, extent) on every axis.
    pub star_extent: f64,
    pub background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_distance: 300.0,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,

            rotation_speed: 0.005,
            drag_sensitivity: 0.005,
            zoom_out_factor: 1.1,
            zoom_in_factor: 0.9,
            altitude_scale: 100.0,

            globe_radius: 100.0,
            globe_lat_segments: 64,
            globe_lon_segments: 128,
            globe_shininess: 0.8,
            globe_opacity: 0.9,
            globe_image_url: DEFAULT_GLOBE_IMAGE_URL.to_string(),
            bump_image_url: DEFAULT_BUMP_IMAGE_URL.to_string(),
            marker_count: 100,
            marker_radius_deg: 0.5,
            star_count: 10_000,
            star_extent: 1000.0,
            background: "#0a0a0a".to_string(),
        }
    }
}
