use crate::math::{Color, Vec3};

/// Position, scale and rotation (Euler radians) of a scene node.
///
/// Owned by the node it decorates; the animator mutates it in place every
/// frame toward whatever target the owning section currently wants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedTransform {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl AnimatedTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
        rotation: Vec3::ZERO,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale, read from the x axis.
    pub fn uniform_scale(&self) -> f32 {
        self.scale.x
    }
}

impl Default for AnimatedTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Text outline parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub width: f32,
    /// Blur as a fraction of the font size
    pub blur: f32,
    pub color: Color,
    pub opacity: f32,
}

impl Outline {
    pub const NONE: Outline = Outline {
        width: 0.0,
        blur: 0.2,
        color: Color::BLACK,
        opacity: 0.5,
    };
}

impl Default for Outline {
    fn default() -> Self {
        Self::NONE
    }
}

/// What the rendering engine should draw for a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeKind {
    /// Pure transform group
    #[default]
    Group,
    /// Box or rounded box of the given size
    Panel { width: f32, height: f32, depth: f32 },
    /// Flat quad showing a texture slot
    Image { width: f32, height: f32 },
    /// Text mesh laid out by the engine
    Text { content: String, font_size: f32 },
}

/// A renderable node of the retained scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub label: String,
    pub kind: NodeKind,
    pub transform: AnimatedTransform,
    pub color: Color,
    pub opacity: f32,
    pub emissive_intensity: f32,
    pub outline: Outline,
    pub render_order: i32,
    pub visible: bool,
}

impl SceneNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Group,
            transform: AnimatedTransform::IDENTITY,
            color: Color::WHITE,
            opacity: 1.0,
            emissive_intensity: 0.0,
            outline: Outline::NONE,
            render_order: 0,
            visible: true,
        }
    }

    pub fn panel(label: impl Into<String>, width: f32, height: f32, depth: f32) -> Self {
        Self::new(label).kind(NodeKind::Panel {
            width,
            height,
            depth,
        })
    }

    pub fn text(label: impl Into<String>, content: impl Into<String>, font_size: f32) -> Self {
        Self::new(label).kind(NodeKind::Text {
            content: content.into(),
            font_size,
        })
    }

    pub fn image(label: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(label).kind(NodeKind::Image { width, height })
    }

    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn emissive(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    pub fn render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.transform.scale = Vec3::splat(scale);
        self
    }
}
