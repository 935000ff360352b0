//! The seam between the compositor and whatever actually draws.

use std::collections::HashMap;

use super::material::GlassUniforms;
use crate::math::{Color, Vec3};
use crate::scene::SceneTree;

/// Handle to an offscreen render target owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub(crate) u64);

/// Where draw calls go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Offscreen(TargetId),
    /// The visible surface
    Surface,
}

/// A mesh inside a model asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshRef {
    pub asset: String,
    pub node: String,
}

impl MeshRef {
    pub fn new(asset: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            node: node.into(),
        }
    }
}

/// Perspective camera looking down -z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(position: Vec3, fov: f32, aspect: f32) -> Self {
        Self {
            position,
            fov,
            aspect,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Visible world-space size of the plane at `depth` (z).
    pub fn viewport_at_depth(&self, depth: f32) -> WorldViewport {
        let distance = (self.position.z - depth).abs();
        let height = 2.0 * (self.fov.to_radians() / 2.0).tan() * distance;
        WorldViewport {
            width: height * self.aspect,
            height,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 20.0), 15.0, 16.0 / 9.0)
    }
}

/// Width and height of the visible area at some depth, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldViewport {
    pub width: f32,
    pub height: f32,
}

/// Everything needed to draw the glass mesh for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassDraw {
    pub mesh: MeshRef,
    pub position: Vec3,
    pub scale: f32,
    /// Rotation around x in radians; the model assets lie flat.
    pub rotation_x: f32,
    /// Offscreen buffer sampled by the material
    pub buffer: TargetId,
    pub uniforms: GlassUniforms,
}

/// The rendering engine, as seen by the compositor.
pub trait RenderBackend {
    fn create_target(&mut self, width: u32, height: u32) -> TargetId;
    fn resize_target(&mut self, target: TargetId, width: u32, height: u32);
    fn release_target(&mut self, target: TargetId);

    fn set_target(&mut self, target: RenderTarget);
    fn set_clear_color(&mut self, color: Color);

    /// Draw the content scene from `camera` into the bound target.
    fn render_scene(&mut self, scene: &SceneTree, camera: &Camera);
    /// Full-viewport plane textured with `source`.
    fn draw_background(&mut self, source: TargetId, size: WorldViewport);
    fn draw_glass(&mut self, glass: &GlassDraw);

    /// Bounding-box width of a mesh, if the asset is loaded.
    fn geometry_width(&mut self, mesh: &MeshRef) -> Option<f32>;

    fn viewport_at_depth(&self, camera: &Camera, depth: f32) -> WorldViewport {
        camera.viewport_at_depth(depth)
    }
}

/// Command captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    CreateTarget { target: TargetId, width: u32, height: u32 },
    ResizeTarget { target: TargetId, width: u32, height: u32 },
    ReleaseTarget(TargetId),
    SetTarget(RenderTarget),
    ClearColor(Color),
    RenderScene { nodes: usize },
    DrawBackground { source: TargetId, size: WorldViewport },
    DrawGlass(GlassDraw),
}

/// Backend that draws nothing and records every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RenderCommand>,
    targets: HashMap<TargetId, (u32, u32)>,
    geometry: HashMap<MeshRef, f32>,
    next_target: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `mesh` is loaded with the given bounding-box width.
    pub fn with_geometry(mut self, mesh: MeshRef, width: f32) -> Self {
        self.geometry.insert(mesh, width);
        self
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Live targets and their sizes.
    pub fn target_size(&self, target: TargetId) -> Option<(u32, u32)> {
        self.targets.get(&target).copied()
    }

    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_target(&mut self, width: u32, height: u32) -> TargetId {
        let target = TargetId(self.next_target);
        self.next_target += 1;
        self.targets.insert(target, (width, height));
        self.commands.push(RenderCommand::CreateTarget {
            target,
            width,
            height,
        });
        target
    }

    fn resize_target(&mut self, target: TargetId, width: u32, height: u32) {
        if let Some(size) = self.targets.get_mut(&target) {
            *size = (width, height);
        }
        self.commands.push(RenderCommand::ResizeTarget {
            target,
            width,
            height,
        });
    }

    fn release_target(&mut self, target: TargetId) {
        self.targets.remove(&target);
        self.commands.push(RenderCommand::ReleaseTarget(target));
    }

    fn set_target(&mut self, target: RenderTarget) {
        self.commands.push(RenderCommand::SetTarget(target));
    }

    fn set_clear_color(&mut self, color: Color) {
        self.commands.push(RenderCommand::ClearColor(color));
    }

    fn render_scene(&mut self, scene: &SceneTree, _camera: &Camera) {
        self.commands.push(RenderCommand::RenderScene { nodes: scene.len() });
    }

    fn draw_background(&mut self, source: TargetId, size: WorldViewport) {
        self.commands.push(RenderCommand::DrawBackground { source, size });
    }

    fn draw_glass(&mut self, glass: &GlassDraw) {
        self.commands.push(RenderCommand::DrawGlass(glass.clone()));
    }

    fn geometry_width(&mut self, mesh: &MeshRef) -> Option<f32> {
        self.geometry.get(mesh).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_at_glass_depth() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), 15.0, 2.0);
        let v = camera.viewport_at_depth(15.0);
        // 2 * tan(7.5deg) * 5
        assert!((v.height - 1.316_525).abs() < 1e-4);
        assert!((v.width - 2.0 * v.height).abs() < 1e-6);
    }

    #[test]
    fn test_recording_targets() {
        let mut backend = RecordingBackend::new();
        let t = backend.create_target(800, 600);
        backend.resize_target(t, 1024, 768);
        assert_eq!(backend.target_size(t), Some((1024, 768)));
        backend.release_target(t);
        assert_eq!(backend.live_targets(), 0);
        assert_eq!(backend.commands().len(), 3);
    }
}
