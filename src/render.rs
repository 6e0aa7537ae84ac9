use crate::constants::*;
use crate::input;
use folio_core::geometry::Mesh;
use folio_core::{CameraFrame, MoodFrame, Primitive, SceneFrame};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod meshes;
mod post;
mod targets;

pub(crate) use meshes::hero_mesh;
use meshes::{MeshSet, Vertex};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::RenderTargets;

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye_time: [f32; 4],
    key_dir: [f32; 4],
    // roughness, clearcoat roughness, hover pull, unused
    mood: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: follows the section mood, y: emissive
    params: [f32; 4],
}

fn material_params(primitive: Primitive) -> [f32; 4] {
    match primitive {
        Primitive::Hero => [1.0, 0.0, 0.0, 0.0],
        Primitive::Halo => [0.0, 0.9, 0.0, 0.0],
        Primitive::RibbonTorus | Primitive::Capsule => [0.0, 0.25, 0.0, 0.0],
        Primitive::Box | Primitive::Panel => [0.0, 0.08, 0.0, 0.0],
    }
}

/// Everything one frame draws.
pub struct SceneDraw<'s> {
    pub camera: CameraFrame,
    pub mood: MoodFrame,
    pub hero_positions: &'s [Vec3],
    pub hero_normals: &'s [Vec3],
    pub frame: &'s SceneFrame,
    pub inspecting: bool,
    pub time: f32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_bg: wgpu::BindGroup,
    instance_stride: u64,
    instance_staging: Vec<u8>,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    line_buffer: wgpu::Buffer,
    line_scratch: Vec<[f32; 3]>,
    meshes: MeshSet,

    targets: RenderTargets,
    post: PostResources,
    post_bgs: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, hero: &Mesh) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Scene: globals at group 0, one dynamic-offset uniform per instance at group 1
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let instance_size = std::mem::size_of::<InstanceUniforms>() as u64;
        let instance_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("instance_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(instance_size),
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let instance_stride = helpers::align_up(
            instance_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: instance_stride * MAX_INSTANCES as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let instance_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("instance_bg"),
            layout: &instance_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &instance_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(instance_size),
                }),
            }],
        });

        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&globals_bgl, &instance_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pipeline = helpers::make_scene_pipeline(
            &device,
            "mesh_pipeline",
            &mesh_pl,
            &scene_shader,
            ("vs_mesh", "fs_mesh"),
            Vertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            true,
        );
        let line_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let line_attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            "line_pipeline",
            &line_pl,
            &scene_shader,
            ("vs_line", "fs_line"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &line_attrs,
            },
            wgpu::PrimitiveTopology::LineList,
            false,
        );
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("connector_lines"),
            size: (std::mem::size_of::<[f32; 3]>() * MAX_LINE_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let meshes = MeshSet::new(&device, hero);

        // Offscreen HDR targets and the bloom chain
        let targets = RenderTargets::new(&device, width, height);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_bgs = post.bind_groups(&device, &targets);

        log::info!("[render] WebGPU ready {}x{} {:?}", width, height, format);
        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bg,
            instance_buffer,
            instance_bg,
            instance_stride,
            instance_staging: Vec::new(),
            mesh_pipeline,
            line_pipeline,
            line_buffer,
            line_scratch: Vec::with_capacity(MAX_LINE_VERTICES),
            meshes,
            targets,
            post,
            post_bgs,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.reconfigure();
        self.targets.recreate(&self.device, width, height);
        self.post_bgs = self.post.bind_groups(&self.device, &self.targets);
    }

    /// Lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn upload(&mut self, scene: &SceneDraw) -> usize {
        let eye = scene.camera.eye;
        let key = Vec3::from(KEY_LIGHT_DIR).normalize();
        let globals = Globals {
            view_proj: scene
                .camera
                .view_proj(input::aspect(self.width, self.height))
                .to_cols_array_2d(),
            eye_time: [eye.x, eye.y, eye.z, scene.time],
            key_dir: [key.x, key.y, key.z, 0.0],
            mood: [
                scene.mood.mood.roughness,
                scene.mood.mood.clearcoat_roughness,
                scene.mood.hover_pull,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let hero = meshes::interleave(scene.hero_positions, scene.hero_normals);
        self.queue
            .write_buffer(&self.meshes.hero.vertex_buffer, 0, bytemuck::cast_slice(&hero));

        let instances = &scene.frame.instances;
        if instances.len() > MAX_INSTANCES {
            log::warn!("[render] {} instances, drawing {}", instances.len(), MAX_INSTANCES);
        }
        let count = instances.len().min(MAX_INSTANCES);
        let stride = self.instance_stride as usize;
        self.instance_staging.clear();
        self.instance_staging.resize(count * stride, 0);
        for (i, inst) in instances.iter().take(count).enumerate() {
            let u = InstanceUniforms {
                model: inst.transform.to_cols_array_2d(),
                color: inst.color,
                params: material_params(inst.primitive),
            };
            let bytes = bytemuck::bytes_of(&u);
            self.instance_staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if count > 0 {
            self.queue
                .write_buffer(&self.instance_buffer, 0, &self.instance_staging);
        }

        self.line_scratch.clear();
        for c in &scene.frame.connectors {
            for seg in c.points.windows(2) {
                self.line_scratch.push(seg[0].to_array());
                self.line_scratch.push(seg[1].to_array());
            }
        }
        self.line_scratch.truncate(MAX_LINE_VERTICES);
        if !self.line_scratch.is_empty() {
            self.queue
                .write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&self.line_scratch));
        }
        count
    }

    pub fn render(&mut self, scene: &SceneDraw) -> Result<(), wgpu::SurfaceError> {
        let count = self.upload(scene);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (i, inst) in scene.frame.instances.iter().take(count).enumerate() {
                let offset = (i as u64 * self.instance_stride) as u32;
                rpass.set_bind_group(1, &self.instance_bg, &[offset]);
                self.meshes.get(inst.primitive).draw(&mut rpass);
            }
            if !self.line_scratch.is_empty() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_vertex_buffer(0, self.line_buffer.slice(..));
                rpass.draw(0..self.line_scratch.len() as u32, 0..1);
            }
        }

        let boost = if scene.inspecting { BLOOM_INSPECT_BOOST } else { 0.0 };
        self.post.write_uniforms(
            &self.queue,
            PostUniforms {
                resolution: [self.width as f32 / 2.0, self.height as f32 / 2.0],
                time: scene.time,
                exposure: 1.0,
                blur_dir: [0.0, 0.0],
                bloom_strength: BLOOM_STRENGTH + boost,
                threshold: BLOOM_THRESHOLD,
            },
        );

        // Bright pass -> bloom_a, blur H -> bloom_b, blur V -> bloom_a, composite
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_bgs.hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bgs.from_bloom_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bgs.from_bloom_b,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_bgs.hdr,
            Some(&self.post_bgs.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
