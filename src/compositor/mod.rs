//! Render-to-texture glass compositing.
//!
//! Every frame the content scene is drawn into an offscreen buffer, the
//! buffer is laid over the visible surface as a full-viewport plane, and a
//! refractive mesh sampling that same buffer is drawn on top. The mesh
//! either chases the pointer or stays pinned to an edge.

mod backend;
pub mod gpu;
mod material;

pub use backend::{
    Camera, GlassDraw, MeshRef, RecordingBackend, RenderBackend, RenderCommand, RenderTarget,
    TargetId, WorldViewport,
};
pub use material::{GlassMaterial, GlassUniforms, MaterialValue};

use crate::animation::{DampedVec3, POINTER_FOLLOW_SMOOTHING};
use crate::animator::Pointer;
use crate::math::{Color, Vec3};
use crate::scene::SceneTree;
use crate::time::FrameTime;

/// World z of the glass mesh.
pub const GLASS_DEPTH: f32 = 15.0;
/// Largest automatic mesh scale.
pub const MAX_AUTO_SCALE: f32 = 0.15;
/// Share of the visible width the mesh may span when auto-scaled.
const AUTO_SCALE_FILL: f32 = 0.9;

const TOP_INSET: f32 = 0.1;
const BOTTOM_INSET: f32 = 0.2;

/// How the glass mesh picks its target position. A mesh either chases
/// the pointer or sits pinned to an edge, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlassAnchor {
    /// Track the pointer on both axes
    #[default]
    FollowPointer,
    /// Centered under the top edge
    PinnedTop,
    /// Centered above the bottom edge
    PinnedBottom,
}

impl GlassAnchor {
    /// Target position on the glass plane for the current pointer.
    pub fn target(self, pointer: Pointer, viewport: WorldViewport) -> Vec3 {
        let (x, y) = match self {
            GlassAnchor::FollowPointer => (
                pointer.x * viewport.width / 2.0,
                pointer.y * viewport.height / 2.0,
            ),
            GlassAnchor::PinnedTop => (0.0, viewport.height / 2.0 - TOP_INSET),
            GlassAnchor::PinnedBottom => (0.0, -viewport.height / 2.0 + BOTTOM_INSET),
        };
        Vec3::new(x, y, GLASS_DEPTH)
    }
}

/// Glass mesh variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlassShape {
    #[default]
    Lens,
    Cube,
    Bar,
}

impl GlassShape {
    pub fn mesh(self) -> MeshRef {
        match self {
            GlassShape::Lens => MeshRef::new("assets/3d/lens.glb", "Cylinder"),
            GlassShape::Cube => MeshRef::new("assets/3d/cube.glb", "Cube"),
            GlassShape::Bar => MeshRef::new("assets/3d/bar.glb", "Cube"),
        }
    }

    pub fn anchor(self) -> GlassAnchor {
        match self {
            GlassShape::Lens | GlassShape::Cube => GlassAnchor::FollowPointer,
            GlassShape::Bar => GlassAnchor::PinnedTop,
        }
    }

    /// Shape-specific material before user overrides.
    pub fn base_material(self) -> GlassMaterial {
        match self {
            GlassShape::Lens | GlassShape::Cube => GlassMaterial::default(),
            GlassShape::Bar => GlassMaterial::default()
                .with("transmission", 1.0f32)
                .with("roughness", 0.0f32)
                .with("thickness", 10.0f32)
                .with("ior", 1.15f32)
                .with("color", Color::WHITE)
                .with("attenuationColor", Color::WHITE)
                .with("attenuationDistance", 0.25f32),
        }
    }

    /// Whether the nav bar is shown with this shape.
    pub fn has_nav(self) -> bool {
        self == GlassShape::Bar
    }
}

/// Compositor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassConfig {
    pub shape: GlassShape,
    pub material: GlassMaterial,
    pub anchor: GlassAnchor,
    pub camera: Camera,
    pub clear_color: Color,
    pub smoothing: f32,
}

impl GlassConfig {
    pub fn new(shape: GlassShape) -> Self {
        Self {
            shape,
            material: shape.base_material(),
            anchor: shape.anchor(),
            camera: Camera::default(),
            clear_color: Color::ACCENT,
            smoothing: POINTER_FOLLOW_SMOOTHING,
        }
    }

    /// Material overrides on top of the shape's defaults.
    pub fn material<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<MaterialValue>,
    {
        self.material = self.material.merge(overrides);
        self
    }

    pub fn anchor(mut self, anchor: GlassAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self::new(GlassShape::default())
    }
}

/// Automatic mesh scale: fill most of the visible width, capped.
pub fn auto_scale(viewport_width: f32, geometry_width: f32) -> f32 {
    let geometry_width = if geometry_width > 0.0 { geometry_width } else { 1.0 };
    MAX_AUTO_SCALE.min(AUTO_SCALE_FILL * viewport_width / geometry_width)
}

/// Owns the backend, the offscreen buffer and the glass mesh state.
///
/// The buffer is created on construction, follows surface resizes and is
/// released when the compositor is dropped.
pub struct GlassCompositor<B: RenderBackend> {
    backend: B,
    config: GlassConfig,
    mesh: MeshRef,
    buffer: TargetId,
    surface_size: (u32, u32),
    geometry_width: Option<f32>,
    position: DampedVec3,
    scale: f32,
}

impl<B: RenderBackend> GlassCompositor<B> {
    pub fn new(mut backend: B, mut config: GlassConfig, width: u32, height: u32) -> Self {
        config.camera.set_aspect(width, height);
        backend.set_clear_color(config.clear_color);
        let buffer = backend.create_target(width.max(1), height.max(1));
        let mesh = config.shape.mesh();
        let start = config.anchor.target(
            Pointer::CENTER,
            backend.viewport_at_depth(&config.camera, GLASS_DEPTH),
        );
        log::info!(
            "glass compositor: {:?} mesh, {}x{} buffer",
            config.shape,
            width,
            height
        );

        Self {
            position: DampedVec3::new(start, config.smoothing),
            scale: config.material.scale.unwrap_or(MAX_AUTO_SCALE),
            backend,
            config,
            mesh,
            buffer,
            surface_size: (width, height),
            geometry_width: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &GlassConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.config.camera
    }

    pub fn buffer(&self) -> TargetId {
        self.buffer
    }

    pub fn position(&self) -> Vec3 {
        self.position.current()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Visible size of the glass plane.
    pub fn glass_viewport(&self) -> WorldViewport {
        self.backend.viewport_at_depth(&self.config.camera, GLASS_DEPTH)
    }

    /// Visible size of the z = 0 plane.
    pub fn content_viewport(&self) -> WorldViewport {
        self.backend.viewport_at_depth(&self.config.camera, 0.0)
    }

    /// Follow a surface resize. A same-size call is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.surface_size {
            return;
        }
        self.surface_size = (width, height);
        self.config.camera.set_aspect(width, height);
        self.backend
            .resize_target(self.buffer, width.max(1), height.max(1));
        log::debug!("glass buffer resized to {}x{}", width, height);
    }

    /// Composite one frame. Steps run in a fixed order: offscreen render,
    /// bind surface, background plane, glass mesh.
    pub fn render_frame(&mut self, scene: &SceneTree, frame: &FrameTime, pointer: Pointer) {
        let glass_view = self.glass_viewport();

        self.position
            .set_target(self.config.anchor.target(pointer, glass_view));
        let position = self.position.advance(frame.delta);

        if self.geometry_width.is_none() {
            self.geometry_width = self.backend.geometry_width(&self.mesh);
        }
        self.scale = match self.config.material.scale {
            Some(scale) => scale,
            None => auto_scale(glass_view.width, self.geometry_width.unwrap_or(1.0)),
        };

        let camera = self.config.camera;
        // The offscreen pass clears with the configured colour too
        self.backend.set_clear_color(self.config.clear_color);
        self.backend.set_target(RenderTarget::Offscreen(self.buffer));
        self.backend.render_scene(scene, &camera);

        self.backend.set_target(RenderTarget::Surface);

        let content_view = self.content_viewport();
        self.backend.draw_background(self.buffer, content_view);

        let (w, h) = self.surface_size;
        let glass = GlassDraw {
            mesh: self.mesh.clone(),
            position,
            scale: self.scale,
            rotation_x: std::f32::consts::FRAC_PI_2,
            buffer: self.buffer,
            uniforms: self.config.material.uniforms([w as f32, h as f32]),
        };
        self.backend.draw_glass(&glass);
    }
}

impl<B: RenderBackend> Drop for GlassCompositor<B> {
    fn drop(&mut self) {
        self.backend.release_target(self.buffer);
        log::debug!("glass buffer released");
    }
}
