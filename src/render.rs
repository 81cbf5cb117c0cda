use fnv::FnvHashMap;
use glam::Mat4;
use scene_core::geometry::Geometry;
use scene_core::material::{MaterialSkin, SceneLights};
use scene_core::{FrameView, MaterialId, SceneError, SceneRenderer, ShapeId};
use web_sys as web;
use wgpu::util::DeviceExt;

use crate::constants::{CLEAR_COLOR, SHAPE_WGSL};

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    rim_dir: [f32; 4],
    rim_color: [f32; 4],
}

impl Globals {
    fn new(view_proj: Mat4, lights: Option<&SceneLights>) -> Self {
        let mut g = Self {
            view_proj: view_proj.to_cols_array_2d(),
            ambient: [0.0; 4],
            key_dir: [0.0, 0.0, -1.0, 0.0],
            key_color: [0.0; 4],
            rim_dir: [0.0, 0.0, -1.0, 0.0],
            rim_color: [0.0; 4],
        };
        if let Some(l) = lights {
            g.ambient = (l.ambient.color * l.ambient.intensity).extend(1.0).to_array();
            g.key_dir = l.key.direction.normalize_or_zero().extend(0.0).to_array();
            g.key_color = (l.key.color * l.key.intensity).extend(1.0).to_array();
            g.rim_dir = l.rim.direction.normalize_or_zero().extend(0.0).to_array();
            g.rim_color = (l.rim.color * l.rim.intensity).extend(1.0).to_array();
        }
        g
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    base: [f32; 4],
    surface: [f32; 4],
    sheen: [f32; 4],
    emissive: [f32; 4],
    skin: [f32; 4],
}

impl DrawUniforms {
    fn new(model: Mat4, skin: &MaterialSkin) -> Self {
        match skin {
            MaterialSkin::Flat(m) => Self {
                model: model.to_cols_array_2d(),
                base: [1.0, 1.0, 1.0, m.opacity],
                surface: [1.0, 0.0, 0.0, 1.0],
                sheen: [0.0; 4],
                emissive: [0.0; 4],
                skin: [0.0; 4],
            },
            MaterialSkin::Physical(m) => Self {
                model: model.to_cols_array_2d(),
                base: m.color.extend(m.opacity).to_array(),
                surface: [m.roughness, m.metalness, m.clearcoat, m.clearcoat_roughness],
                sheen: m.sheen_color.extend(m.sheen).to_array(),
                emissive: (m.emissive * m.emissive_intensity)
                    .extend(m.specular_intensity)
                    .to_array(),
                skin: [1.0, 0.0, 0.0, 0.0],
            },
        }
    }
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

struct MaterialSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu backend for the scene: one surface, one depth target, two pipelines
/// (opaque and transparent), per-shape buffers and per-material uniforms.
pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    meshes: FnvHashMap<ShapeId, MeshBuffers>,
    materials: FnvHashMap<MaterialId, MaterialSlot>,
    lights_live: bool,
    disposed: bool,
}

impl GpuRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> Result<Self, SceneError> {
        Self::create(canvas)
            .await
            .map_err(|e| match e.downcast::<SceneError>() {
                Ok(scene) => scene,
                Err(other) => SceneError::ContextUnavailable(format!("{other:#}")),
            })
    }

    async fn create(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow::anyhow!("no graphics adapter available"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("scene_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

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
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shape_shader"),
            source: wgpu::ShaderSource::Wgsl(SHAPE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shape_pl"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = helpers::make_shape_pipeline(&device, &layout, &shader, format, true);
        let transparent_pipeline =
            helpers::make_shape_pipeline(&device, &layout, &shader, format, false);
        if let Some(err) = device.pop_error_scope().await {
            return Err(SceneError::ShaderCompile(err.to_string()).into());
        }

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "[gpu] adapter={:?} format={:?} alpha={:?} size={}x{}",
            adapter.get_info().backend,
            format,
            alpha_mode,
            width,
            height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            opaque_pipeline,
            transparent_pipeline,
            globals_buffer,
            globals_bind_group,
            draw_bgl,
            meshes: FnvHashMap::default(),
            materials: FnvHashMap::default(),
            lights_live: true,
            disposed: false,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        let (_tex, view) =
            helpers::create_depth_texture(&self.device, self.config.width, self.config.height);
        self.depth_view = view;
    }

    fn material_slot<'m>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        materials: &'m mut FnvHashMap<MaterialId, MaterialSlot>,
        id: MaterialId,
    ) -> &'m MaterialSlot {
        materials.entry(id).or_insert_with(|| {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("draw_uniforms"),
                size: std::mem::size_of::<DrawUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("draw_bg"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            MaterialSlot { buffer, bind_group }
        })
    }
}

impl SceneRenderer for GpuRenderer {
    fn upload_mesh(&mut self, id: ShapeId, geometry: &Geometry) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        let vertices = geometry.vertices();
        let vertex = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(id.name()),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(id.name()),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.meshes.insert(
            id,
            MeshBuffers {
                vertex,
                index,
                index_count: geometry.indices.len() as u32,
            },
        );
        Ok(())
    }

    fn release_mesh(&mut self, id: ShapeId) {
        if let Some(buffers) = self.meshes.remove(&id) {
            buffers.vertex.destroy();
            buffers.index.destroy();
        }
    }

    fn release_material(&mut self, material: MaterialId) {
        if let Some(slot) = self.materials.remove(&material) {
            slot.buffer.destroy();
        }
    }

    fn release_lights(&mut self) {
        self.lights_live = false;
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        let max = self.device.limits().max_texture_dimension_2d;
        let (width, height) = (width.min(max), height.min(max));
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Disposed);
        }
        let lights = if self.lights_live {
            frame.bundle.lights()
        } else {
            None
        };
        let globals = Globals::new(frame.camera.view_projection(), lights);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let group = frame.bundle.group.matrix();
        let mut opaque = Vec::with_capacity(ShapeId::COUNT);
        let mut transparent = Vec::with_capacity(ShapeId::COUNT);
        for (id, mesh) in frame.bundle.meshes().iter() {
            let skin = mesh.materials.active();
            if skin.opacity() <= 0.0 || !self.meshes.contains_key(&id) {
                continue;
            }
            let material = mesh.materials.active_id();
            let uniforms = DrawUniforms::new(group * mesh.model_matrix(), &skin);
            let slot =
                Self::material_slot(&self.device, &self.draw_bgl, &mut self.materials, material);
            self.queue
                .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&uniforms));
            if skin.transparent() {
                transparent.push((id, material));
            } else {
                opaque.push((id, material));
            }
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost or outdated; reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(SceneError::ContextLost),
            Err(e) => return Err(SceneError::Surface(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (pipeline, draws) in [
                (&self.opaque_pipeline, &opaque),
                (&self.transparent_pipeline, &transparent),
            ] {
                if draws.is_empty() {
                    continue;
                }
                rpass.set_pipeline(pipeline);
                for (id, material) in draws.iter() {
                    let (Some(mesh), Some(slot)) =
                        (self.meshes.get(id), self.materials.get(material))
                    else {
                        continue;
                    };
                    rpass.set_bind_group(1, &slot.bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
                    rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for (_, buffers) in self.meshes.drain() {
            buffers.vertex.destroy();
            buffers.index.destroy();
        }
        for (_, slot) in self.materials.drain() {
            slot.buffer.destroy();
        }
        self.globals_buffer.destroy();
        self.device.destroy();
        log::info!("[gpu] renderer disposed");
    }
}
