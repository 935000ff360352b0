//! wgpu resources for the glass pass: a headless device, the pool of
//! offscreen colour targets and the material uniform buffer.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use wgpu::{Device, Extent3d, Instance, Queue, TextureDimension, TextureFormat, TextureUsages};

use super::backend::{Camera, GlassDraw, MeshRef, RenderBackend, RenderTarget, TargetId, WorldViewport};
use super::material::GlassUniforms;
use crate::math::Color;
use crate::scene::SceneTree;

/// Colour format of offscreen targets.
pub const TARGET_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

pub struct GpuContext {
    pub instance: Instance,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuContext {
    /// Request a device without a surface. Returns `None` when no adapter
    /// or device is available, so callers can fall back to a software path.
    pub fn headless() -> Option<Self> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = match pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        })) {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("no GPU adapter: {}", e);
                return None;
            }
        };

        let (device, queue) = match pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Glassfolio Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        })) {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("failed to create GPU device: {}", e);
                return None;
            }
        };

        log::info!("GPU adapter: {:?}", adapter.get_info().name);

        Some(Self {
            instance,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}

/// A colour texture the content scene renders into.
pub struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl OffscreenTarget {
    fn new(device: &Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glass Offscreen Target"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT
                | TextureUsages::TEXTURE_BINDING
                | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }
}

/// Offscreen targets keyed by [`TargetId`].
pub struct OffscreenTargets {
    device: Arc<Device>,
    queue: Arc<Queue>,
    targets: HashMap<TargetId, OffscreenTarget>,
    next_id: u64,
}

impl OffscreenTargets {
    pub fn new(gpu: &GpuContext) -> Self {
        Self {
            device: gpu.device.clone(),
            queue: gpu.queue.clone(),
            targets: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn create(&mut self, width: u32, height: u32) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets
            .insert(id, OffscreenTarget::new(&self.device, width, height));
        id
    }

    /// Recreate the texture at the new size. Unknown ids are ignored.
    pub fn resize(&mut self, id: TargetId, width: u32, height: u32) {
        let Some(target) = self.targets.get_mut(&id) else {
            return;
        };
        if target.width == width.max(1) && target.height == height.max(1) {
            return;
        }
        *target = OffscreenTarget::new(&self.device, width, height);
    }

    pub fn release(&mut self, id: TargetId) {
        if let Some(target) = self.targets.remove(&id) {
            target.texture.destroy();
        }
    }

    pub fn get(&self, id: TargetId) -> Option<&OffscreenTarget> {
        self.targets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Clear a target to `color` in its own render pass.
    pub fn clear(&self, id: TargetId, color: Color) {
        let Some(target) = self.targets.get(&id) else {
            return;
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Glass Clear Encoder"),
            });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Glass Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color.r as f64,
                            g: color.g as f64,
                            b: color.b as f64,
                            a: color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl Drop for OffscreenTargets {
    fn drop(&mut self) {
        for (_, target) in self.targets.drain() {
            target.texture.destroy();
        }
    }
}

/// GPU copy of [`GlassUniforms`].
pub struct GlassUniformBuffer {
    pub buffer: wgpu::Buffer,
    queue: Arc<Queue>,
}

impl GlassUniformBuffer {
    pub fn new(gpu: &GpuContext, uniforms: &GlassUniforms) -> Self {
        let buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Glass Uniform Buffer"),
                contents: bytemuck::bytes_of(uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        Self {
            buffer,
            queue: gpu.queue.clone(),
        }
    }

    pub fn write(&self, uniforms: &GlassUniforms) {
        self.queue
            .write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

/// [`RenderBackend`] over real wgpu targets.
///
/// Owns the offscreen pool and the material uniforms. Scene meshes and the
/// glass geometry belong to the host engine, so `render_scene` only clears
/// the bound target and `geometry_width` reports nothing.
pub struct GpuBackend {
    targets: OffscreenTargets,
    uniforms: Option<GlassUniformBuffer>,
    gpu: GpuContext,
    bound: RenderTarget,
    clear_color: Color,
}

impl GpuBackend {
    pub fn new(gpu: GpuContext) -> Self {
        Self {
            targets: OffscreenTargets::new(&gpu),
            uniforms: None,
            gpu,
            bound: RenderTarget::Surface,
            clear_color: Color::BLACK,
        }
    }

    pub fn targets(&self) -> &OffscreenTargets {
        &self.targets
    }

    pub fn uniforms(&self) -> Option<&GlassUniformBuffer> {
        self.uniforms.as_ref()
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }
}

impl RenderBackend for GpuBackend {
    fn create_target(&mut self, width: u32, height: u32) -> TargetId {
        self.targets.create(width, height)
    }

    fn resize_target(&mut self, target: TargetId, width: u32, height: u32) {
        self.targets.resize(target, width, height);
    }

    fn release_target(&mut self, target: TargetId) {
        self.targets.release(target);
    }

    fn set_target(&mut self, target: RenderTarget) {
        self.bound = target;
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn render_scene(&mut self, scene: &SceneTree, _camera: &Camera) {
        if let RenderTarget::Offscreen(id) = self.bound {
            self.targets.clear(id, self.clear_color);
            log::trace!("offscreen pass over {} nodes", scene.len());
        }
    }

    fn draw_background(&mut self, source: TargetId, size: WorldViewport) {
        log::trace!("background plane {:?} at {}x{}", source, size.width, size.height);
    }

    fn draw_glass(&mut self, glass: &GlassDraw) {
        if let Some(buffer) = &self.uniforms {
            buffer.write(&glass.uniforms);
            return;
        }
        self.uniforms = Some(GlassUniformBuffer::new(&self.gpu, &glass.uniforms));
    }

    fn geometry_width(&mut self, _mesh: &MeshRef) -> Option<f32> {
        None
    }
}
