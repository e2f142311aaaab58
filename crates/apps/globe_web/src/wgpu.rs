use foundation::math::Mat4;
use scene::{GlobeMaterial, LightRig};

/// Per-frame uniform block shared by every pipeline. vec4-aligned so the
/// same layout works for WebGL2 uniform buffers.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub camera_pos: [f32; 4],
    /// xyz: direction toward the sun.
    pub sun_dir: [f32; 4],
    /// rgb premultiplied by intensity.
    pub sun_color: [f32; 4],
    pub ambient: [f32; 4],
    /// xyz: position, w: range.
    pub fill_pos: [f32; 4],
    pub fill_color: [f32; 4],
    /// x: shininess, y: opacity, z: 1 when textured, w: bump strength.
    pub material: [f32; 4],
    pub plain_color: [f32; 4],
}

const BUMP_STRENGTH: f32 = 0.6;

impl Globals {
    pub fn new(
        view_proj: Mat4,
        model: Mat4,
        camera_pos: [f32; 3],
        lights: &LightRig,
        material: &GlobeMaterial,
        textured: bool,
    ) -> Self {
        let [sx, sy, sz] = lights.sun_direction().to_f32();
        let [fx, fy, fz] = lights.fill.position.to_f32();
        let [cx, cy, cz] = camera_pos;
        Self {
            view_proj,
            model,
            camera_pos: [cx, cy, cz, 1.0],
            sun_dir: [sx, sy, sz, 0.0],
            sun_color: lights.sun.color.scaled(lights.sun.intensity).0,
            ambient: lights.ambient.color.scaled(lights.ambient.intensity).0,
            fill_pos: [fx, fy, fz, lights.fill.range as f32],
            fill_color: lights.fill.color.scaled(lights.fill.intensity).0,
            material: [
                material.shininess,
                material.opacity,
                if textured { 1.0 } else { 0.0 },
                BUMP_STRENGTH,
            ],
            plain_color: material.plain_color.0,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const GLOBALS_WGSL: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_pos: vec4<f32>,
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    ambient: vec4<f32>,
    fill_pos: vec4<f32>,
    fill_color: vec4<f32>,
    material: vec4<f32>,
    plain_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

// Blinn-Phong with the sun, ambient fill and a range-limited point light.
fn shade(base: vec3<f32>, n: vec3<f32>, world_pos: vec3<f32>) -> vec3<f32> {
    let v = normalize(globals.camera_pos.xyz - world_pos);
    let shininess = max(globals.material.x, 0.0001);

    let l = normalize(globals.sun_dir.xyz);
    let sun_ndl = max(dot(n, l), 0.0);
    let sun_spec = pow(max(dot(n, normalize(l + v)), 0.0001), shininess) * sun_ndl;

    let to_fill = globals.fill_pos.xyz - world_pos;
    let dist = length(to_fill);
    let atten = clamp(1.0 - dist / globals.fill_pos.w, 0.0, 1.0);
    let lp = to_fill / max(dist, 0.0001);
    let fill_ndl = max(dot(n, lp), 0.0) * atten;

    let diffuse = globals.ambient.rgb
        + globals.sun_color.rgb * sun_ndl
        + globals.fill_color.rgb * fill_ndl;
    let specular = vec3<f32>(0.067) * (globals.sun_color.rgb * sun_spec);
    return base * diffuse + specular;
}
"#;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const GLOBE_WGSL: &str = r#"
@group(1) @binding(0) var color_tex: texture_2d<f32>;
@group(1) @binding(1) var bump_tex: texture_2d<f32>;
@group(1) @binding(2) var surface_sampler: sampler;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) local_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VsOut {
    let world = globals.model * vec4<f32>(position, 1.0);
    return VsOut(globals.view_proj * world, world.xyz, normal, uv);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let texel = 1.0 / vec2<f32>(textureDimensions(bump_tex));
    let h0 = textureSample(bump_tex, surface_sampler, in.uv).r;
    let hu = textureSample(bump_tex, surface_sampler, in.uv + vec2<f32>(texel.x, 0.0)).r;
    let hv = textureSample(bump_tex, surface_sampler, in.uv + vec2<f32>(0.0, texel.y)).r;
    let albedo = textureSample(color_tex, surface_sampler, in.uv).rgb;

    // Tilt the sphere normal along the height gradient (v grows southward).
    let n0 = normalize(in.local_normal);
    var east = cross(vec3<f32>(0.0, 1.0, 0.0), n0);
    if (length(east) < 0.0001) {
        east = vec3<f32>(1.0, 0.0, 0.0);
    }
    east = normalize(east);
    let north = cross(n0, east);
    let strength = globals.material.w * globals.material.z;
    let bumped = normalize(n0 - strength * ((hu - h0) * east - (hv - h0) * north));

    let n = normalize((globals.model * vec4<f32>(bumped, 0.0)).xyz);
    let base = select(globals.plain_color.rgb, albedo, globals.material.z > 0.5);
    return vec4<f32>(shade(base, n, in.world_pos), globals.material.y);
}
"#;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const MARKER_WGSL: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
) -> VsOut {
    let world = globals.model * vec4<f32>(position, 1.0);
    let n = (globals.model * vec4<f32>(normal, 0.0)).xyz;
    return VsOut(globals.view_proj * world, world.xyz, n, color);
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(shade(in.color.rgb, normalize(in.normal), in.world_pos), in.color.a);
}
"#;

// Stars sit in scene space and do not follow the globe rotation.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const STARS_WGSL: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.view_proj * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 0.8);
}
"#;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn shader_source(body: &str) -> String {
    format!("{GLOBALS_WGSL}{body}")
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use scene::{GlobeSurface, GlobeVertex, MarkerVertex, SceneContent, StarVertex, SurfaceImage};
    use std::borrow::Cow;

    use super::{GLOBE_WGSL, Globals, MARKER_WGSL, STARS_WGSL, shader_source};
    use crate::error::ViewerError;

    const GLOBE_ATTRS: [::wgpu::VertexAttribute; 3] =
        ::wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
    const MARKER_ATTRS: [::wgpu::VertexAttribute; 3] =
        ::wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];
    const STAR_ATTRS: [::wgpu::VertexAttribute; 1] =
        ::wgpu::vertex_attr_array![0 => Float32x3];

    const DEPTH_FORMAT: ::wgpu::TextureFormat = ::wgpu::TextureFormat::Depth24Plus;

    struct DrawBuffers {
        vertices: ::wgpu::Buffer,
        indices: Option<::wgpu::Buffer>,
        count: u32,
    }

    #[derive(Debug)]
    pub struct WgpuContext {
        surface: ::wgpu::Surface<'static>,
        device: ::wgpu::Device,
        queue: ::wgpu::Queue,
        config: ::wgpu::SurfaceConfiguration,
        clear_color: ::wgpu::Color,
        textured: bool,
        uniform_buffer: ::wgpu::Buffer,
        globals_bind_group: ::wgpu::BindGroup,
        surface_bind_group: ::wgpu::BindGroup,
        depth_view: ::wgpu::TextureView,
        stars_pipeline: ::wgpu::RenderPipeline,
        markers_pipeline: ::wgpu::RenderPipeline,
        globe_pipeline: ::wgpu::RenderPipeline,
        stars: DrawBuffers,
        markers: DrawBuffers,
        globe: DrawBuffers,
        // Declared last so it drops after the surface and device.
        _instance: ::wgpu::Instance,
    }

    impl std::fmt::Debug for DrawBuffers {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DrawBuffers")
                .field("count", &self.count)
                .finish()
        }
    }

    impl WgpuContext {
        pub fn is_textured(&self) -> bool {
            self.textured
        }
    }

    fn create_depth_view(
        device: &::wgpu::Device,
        config: &::wgpu::SurfaceConfiguration,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture(&::wgpu::TextureDescriptor {
            label: Some("globe-depth"),
            size: ::wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: ::wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn upload_texture(
        device: &::wgpu::Device,
        queue: &::wgpu::Queue,
        label: &str,
        image: &SurfaceImage,
        format: ::wgpu::TextureFormat,
    ) -> ::wgpu::TextureView {
        let tex = device.create_texture_with_data(
            queue,
            &::wgpu::TextureDescriptor {
                label: Some(label),
                size: ::wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: ::wgpu::TextureDimension::D2,
                format,
                usage: ::wgpu::TextureUsages::TEXTURE_BINDING | ::wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            ::wgpu::util::TextureDataOrder::LayerMajor,
            &image.rgba,
        );
        tex.create_view(&::wgpu::TextureViewDescriptor::default())
    }

    fn vertex_buffer<V: bytemuck::Pod>(
        device: &::wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) -> DrawBuffers {
        let vertex_buf = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: ::wgpu::BufferUsages::VERTEX,
        });
        let index_buf = indices.map(|indices| {
            device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: ::wgpu::BufferUsages::INDEX,
            })
        });
        DrawBuffers {
            vertices: vertex_buf,
            count: indices.map_or(vertices.len(), <[u32]>::len) as u32,
            indices: index_buf,
        }
    }

    struct PipelineSpec<'a> {
        label: &'a str,
        layout: &'a ::wgpu::PipelineLayout,
        shader: &'a ::wgpu::ShaderModule,
        buffer: ::wgpu::VertexBufferLayout<'a>,
        topology: ::wgpu::PrimitiveTopology,
        blend: ::wgpu::BlendState,
        depth_write: bool,
    }

    fn create_pipeline(
        device: &::wgpu::Device,
        format: ::wgpu::TextureFormat,
        spec: PipelineSpec<'_>,
    ) -> ::wgpu::RenderPipeline {
        device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some(spec.label),
            layout: Some(spec.layout),
            vertex: ::wgpu::VertexState {
                module: spec.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[spec.buffer],
            },
            fragment: Some(::wgpu::FragmentState {
                module: spec.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(::wgpu::ColorTargetState {
                    format,
                    blend: Some(spec.blend),
                    write_mask: ::wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: ::wgpu::PrimitiveState {
                topology: spec.topology,
                strip_index_format: None,
                front_face: ::wgpu::FrontFace::Ccw,
                // Globe winding flips with the seam duplicate; leave culling off.
                cull_mode: None,
                polygon_mode: ::wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(::wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: spec.depth_write,
                depth_compare: ::wgpu::CompareFunction::LessEqual,
                stencil: ::wgpu::StencilState::default(),
                bias: ::wgpu::DepthBiasState::default(),
            }),
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    pub async fn init_wgpu(
        canvas: web_sys::HtmlCanvasElement,
        content: &SceneContent,
    ) -> Result<WgpuContext, ViewerError> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = ::wgpu::Instance::new(&::wgpu::InstanceDescriptor {
            backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| ViewerError::Gpu(format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ViewerError::Gpu(format!("adapter: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("globe-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| ViewerError::Gpu(format!("device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| ViewerError::Gpu("surface reports no formats".to_string()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let uniform_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("globe-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("globe-globals-bgl"),
            entries: &[::wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: ::wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: ::wgpu::BindingType::Buffer {
                    ty: ::wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("globe-globals-bg"),
            layout: &globals_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_entry = |binding| ::wgpu::BindGroupLayoutEntry {
            binding,
            visibility: ::wgpu::ShaderStages::FRAGMENT,
            ty: ::wgpu::BindingType::Texture {
                sample_type: ::wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: ::wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let surface_layout = device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
            label: Some("globe-surface-bgl"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                ::wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ::wgpu::ShaderStages::FRAGMENT,
                    ty: ::wgpu::BindingType::Sampler(::wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // The plain fallback still binds 1x1 textures; the shader ignores them.
        let (color_image, bump_image, textured) = match &content.surface {
            GlobeSurface::Textured { color, bump } => (color.clone(), bump.clone(), true),
            GlobeSurface::Plain => (
                SurfaceImage::flat_bump(),
                SurfaceImage::flat_bump(),
                false,
            ),
        };
        let color_view = upload_texture(
            &device,
            &queue,
            "globe-color",
            &color_image,
            ::wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let bump_view = upload_texture(
            &device,
            &queue,
            "globe-bump",
            &bump_image,
            ::wgpu::TextureFormat::Rgba8Unorm,
        );
        let sampler = device.create_sampler(&::wgpu::SamplerDescriptor {
            label: Some("globe-sampler"),
            address_mode_u: ::wgpu::AddressMode::Repeat,
            address_mode_v: ::wgpu::AddressMode::ClampToEdge,
            mag_filter: ::wgpu::FilterMode::Linear,
            min_filter: ::wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let surface_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("globe-surface-bg"),
            layout: &surface_layout,
            entries: &[
                ::wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ::wgpu::BindingResource::TextureView(&color_view),
                },
                ::wgpu::BindGroupEntry {
                    binding: 1,
                    resource: ::wgpu::BindingResource::TextureView(&bump_view),
                },
                ::wgpu::BindGroupEntry {
                    binding: 2,
                    resource: ::wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let lit_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("globe-lit-layout"),
            bind_group_layouts: &[&globals_layout],
            immediate_size: 0,
        });
        let globe_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("globe-surface-layout"),
            bind_group_layouts: &[&globals_layout, &surface_layout],
            immediate_size: 0,
        });

        let module = |label: &str, body: &str| {
            device.create_shader_module(::wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: ::wgpu::ShaderSource::Wgsl(Cow::Owned(shader_source(body))),
            })
        };
        let stars_shader = module("globe-stars-shader", STARS_WGSL);
        let markers_shader = module("globe-markers-shader", MARKER_WGSL);
        let globe_shader = module("globe-surface-shader", GLOBE_WGSL);

        let stars_pipeline = create_pipeline(
            &device,
            format,
            PipelineSpec {
                label: "globe-stars-pipeline",
                layout: &lit_layout,
                shader: &stars_shader,
                buffer: ::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StarVertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &STAR_ATTRS,
                },
                topology: ::wgpu::PrimitiveTopology::PointList,
                blend: ::wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let markers_pipeline = create_pipeline(
            &device,
            format,
            PipelineSpec {
                label: "globe-markers-pipeline",
                layout: &lit_layout,
                shader: &markers_shader,
                buffer: ::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MarkerVertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &MARKER_ATTRS,
                },
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                blend: ::wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let globe_pipeline = create_pipeline(
            &device,
            format,
            PipelineSpec {
                label: "globe-surface-pipeline",
                layout: &globe_layout,
                shader: &globe_shader,
                buffer: ::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GlobeVertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &GLOBE_ATTRS,
                },
                topology: ::wgpu::PrimitiveTopology::TriangleList,
                blend: ::wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );

        let stars = vertex_buffer(&device, "globe-stars", &content.starfield.vertices(), None);
        let markers = vertex_buffer(
            &device,
            "globe-markers",
            &content.marker_mesh.vertices,
            Some(&content.marker_mesh.indices),
        );
        let globe = vertex_buffer(
            &device,
            "globe-surface",
            &content.globe_mesh.vertices,
            Some(&content.globe_mesh.indices),
        );

        let [r, g, b, a] = content.background.0;
        log::info!(
            "renderer ready: {}x{} {:?}, textured globe: {textured}",
            config.width,
            config.height,
            format
        );

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            clear_color: ::wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            textured,
            uniform_buffer,
            globals_bind_group,
            surface_bind_group,
            depth_view,
            stars_pipeline,
            markers_pipeline,
            globe_pipeline,
            stars,
            markers,
            globe,
        })
    }

    pub fn resize_wgpu(ctx: &mut WgpuContext, width: u32, height: u32) {
        ctx.config.width = width.max(1);
        ctx.config.height = height.max(1);
        ctx.surface.configure(&ctx.device, &ctx.config);
        ctx.depth_view = create_depth_view(&ctx.device, &ctx.config);
    }

    fn draw(rpass: &mut ::wgpu::RenderPass<'_>, buffers: &DrawBuffers) {
        if buffers.count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, buffers.vertices.slice(..));
        match &buffers.indices {
            Some(indices) => {
                rpass.set_index_buffer(indices.slice(..), ::wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..buffers.count, 0, 0..1);
            }
            None => rpass.draw(0..buffers.count, 0..1),
        }
    }

    pub fn render_frame(ctx: &WgpuContext, globals: &Globals) -> Result<(), ViewerError> {
        let frame = match ctx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                // Lost or outdated surfaces recover on the next frame.
                ctx.surface.configure(&ctx.device, &ctx.config);
                return Err(ViewerError::Gpu(format!("surface acquire failed: {err}")));
            }
        };
        let view = frame
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        ctx.queue
            .write_buffer(&ctx.uniform_buffer, 0, bytemuck::bytes_of(globals));

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("globe-frame-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("globe-scene-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(ctx.clear_color),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(::wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(1.0),
                        store: ::wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });
            rpass.set_bind_group(0, &ctx.globals_bind_group, &[]);

            // Opaque markers first, then the translucent stars and globe.
            rpass.set_pipeline(&ctx.markers_pipeline);
            draw(&mut rpass, &ctx.markers);

            rpass.set_pipeline(&ctx.stars_pipeline);
            draw(&mut rpass, &ctx.stars);

            rpass.set_pipeline(&ctx.globe_pipeline);
            rpass.set_bind_group(1, &ctx.surface_bind_group, &[]);
            draw(&mut rpass, &ctx.globe);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use scene::SceneContent;

    use super::Globals;
    use crate::error::ViewerError;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    impl WgpuContext {
        pub fn is_textured(&self) -> bool {
            false
        }
    }

    pub async fn init_wgpu(
        _canvas: web_sys::HtmlCanvasElement,
        _content: &SceneContent,
    ) -> Result<WgpuContext, ViewerError> {
        Err(ViewerError::Gpu(
            "wgpu initialization is only available on wasm32 targets".to_string(),
        ))
    }

    pub fn resize_wgpu(_ctx: &mut WgpuContext, _width: u32, _height: u32) {}

    pub fn render_frame(_ctx: &WgpuContext, _globals: &Globals) -> Result<(), ViewerError> {
        Err(ViewerError::Gpu(
            "wgpu rendering is only available on wasm32 targets".to_string(),
        ))
    }
}

pub use imp::{WgpuContext, init_wgpu, render_frame, resize_wgpu};

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::math::MAT4_IDENTITY;

    #[test]
    fn globals_block_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<Globals>(), 256);
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    }

    #[test]
    fn globals_fold_intensity_into_colors() {
        let lights = LightRig::default();
        let g = Globals::new(
            MAT4_IDENTITY,
            MAT4_IDENTITY,
            [0.0, 0.0, 300.0],
            &lights,
            &GlobeMaterial::default(),
            true,
        );
        assert_eq!(g.fill_pos, [-200.0, -200.0, -200.0, 1000.0]);
        assert!((g.ambient[0] - 0x40 as f32 / 255.0 * 0.4).abs() < 1e-6);
        assert_eq!(g.material[..3], [0.8, 0.9, 1.0]);
        assert_eq!(g.camera_pos, [0.0, 0.0, 300.0, 1.0]);
    }

    #[test]
    fn plain_surface_clears_texture_flag() {
        let g = Globals::new(
            MAT4_IDENTITY,
            MAT4_IDENTITY,
            [0.0; 3],
            &LightRig::default(),
            &GlobeMaterial::default(),
            false,
        );
        assert_eq!(g.material[2], 0.0);
    }

    #[test]
    fn every_shader_gets_the_globals_block() {
        for body in [GLOBE_WGSL, MARKER_WGSL, STARS_WGSL] {
            let src = shader_source(body);
            assert!(src.contains("var<uniform> globals: Globals;"));
            assert!(src.contains("fn vs_main"));
        }
    }
}
