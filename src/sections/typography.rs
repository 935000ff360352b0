use super::{Section, SectionContext, TEXT_OUTLINE};
use crate::animator::Animator;
use crate::device::{line_step, SizeClass, ViewportTier};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, NodeKind, SceneNode, SceneTree};

/// The about-me paragraph, pre-broken into lines.
pub fn about_lines() -> Vec<String> {
    [
        "I'm an undergraduate student at the University",
        " of Illinois Urbana Champaign, pursuing a B.S. in",
        "Computer Science and a certificate in data science.",
        "I love finding problems and learning while trying to solve them.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Centered heading or paragraph whose font size follows the viewport tier.
///
/// Each line is its own text node so it centers independently; line `i`
/// sits `i * font_size * 1.2` below the first.
#[derive(Debug)]
pub struct SectionText {
    lines: Vec<String>,
    position: Vec3,
    size: SizeClass,
    color: Color,
    nodes: Vec<NodeId>,
    tier: Option<ViewportTier>,
}

impl SectionText {
    pub fn new(lines: Vec<String>, position: Vec3, size: SizeClass) -> Self {
        Self {
            lines,
            position,
            size,
            color: Color::WHITE,
            nodes: Vec::new(),
            tier: None,
        }
    }

    pub fn heading(text: impl Into<String>, position: Vec3) -> Self {
        Self::new(vec![text.into()], position, SizeClass::Medium)
    }

    pub fn title(text: impl Into<String>, position: Vec3) -> Self {
        Self::new(vec![text.into()], position, SizeClass::Large)
    }

    pub fn paragraph(lines: Vec<String>, position: Vec3) -> Self {
        Self::new(lines, position, SizeClass::Small)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn apply_tier(&mut self, tree: &mut SceneTree, tier: ViewportTier) {
        let font_size = self.size.font_size(tier);
        let step = line_step(font_size);
        for (i, id) in self.nodes.iter().enumerate() {
            let Some(node) = tree.get_mut(*id) else {
                continue;
            };
            node.transform.position = Vec3::new(
                self.position.x,
                self.position.y - i as f32 * step,
                self.position.z,
            );
            if let NodeKind::Text { font_size: fs, .. } = &mut node.kind {
                *fs = font_size;
            }
        }
        self.tier = Some(tier);
    }
}

impl Section for SectionText {
    fn name(&self) -> &'static str {
        "text"
    }

    fn mount(&mut self, tree: &mut SceneTree, _animator: &mut Animator, parent: NodeId) {
        let font_size = self.size.font_size(ViewportTier::Desktop);
        self.nodes = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let mut node = SceneNode::text(format!("text:{}", i), line.clone(), font_size)
                    .color(self.color)
                    .at(Vec3::new(
                        self.position.x,
                        self.position.y - i as f32 * line_step(font_size),
                        self.position.z,
                    ));
                node.outline = TEXT_OUTLINE;
                tree.insert_child(parent, node)
            })
            .collect();
    }

    fn update(&mut self, cx: &mut SectionContext, tier: ViewportTier) {
        if self.tier != Some(tier) {
            self.apply_tier(cx.tree, tier);
        }
    }
}
