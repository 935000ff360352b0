//! Navigation bar pinned under the top edge of the glass bar.

use crate::device::{NavMetrics, ViewportTier};
use crate::interaction::{CursorHint, InteractionGroup, ItemId, VisualStyle};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, NodeKind, Outline, SceneNode, SceneTree};
use crate::scroll::{ScrollCommand, ScrollController};

/// Nav entry. `link` is kept for callers that route by URL; scrolling goes
/// by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub link: String,
}

impl NavItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: String::new(),
        }
    }
}

pub fn default_nav_items() -> Vec<NavItem> {
    ["About Me", "Experience", "Skills", "Projects"]
        .into_iter()
        .map(NavItem::new)
        .collect()
}

/// Distance of the nav row below the top edge of the glass plane.
const TOP_INSET: f32 = 0.112;
/// Nav text sits just in front of the glass.
pub const NAV_DEPTH: f32 = 15.1;
pub const NAV_RENDER_ORDER: i32 = 10;

pub const NAV_CLICK_OUTLINE: Outline = Outline {
    width: 0.015,
    blur: 0.3,
    color: Color::ACCENT,
    opacity: 0.8,
};

pub const NAV_STYLE: VisualStyle = VisualStyle::PLAIN
    .hover_scale(1.01)
    .clicked_outline(NAV_CLICK_OUTLINE);

/// x of item `index` of `count`, centered on the bar.
pub fn item_x(index: usize, count: usize, spacing: f32) -> f32 {
    (index as f32 - count.saturating_sub(1) as f32 / 2.0) * spacing
}

/// Row of nav labels with hover and click feedback.
pub struct NavBar {
    items: Vec<NavItem>,
    interaction: InteractionGroup,
    group: Option<NodeId>,
    labels: Vec<NodeId>,
    highlighted: Option<ItemId>,
}

impl NavBar {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self {
            items,
            interaction: InteractionGroup::new(NAV_STYLE),
            group: None,
            labels: Vec::new(),
            highlighted: None,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn interaction(&self) -> &InteractionGroup {
        &self.interaction
    }

    pub fn mount(&mut self, tree: &mut SceneTree) {
        let group = tree.insert(SceneNode::new("nav").render_order(NAV_RENDER_ORDER));
        self.labels = self
            .items
            .iter()
            .map(|item| {
                tree.insert_child(
                    group,
                    SceneNode::text(format!("nav:{}", item.label), item.label.clone(), 0.045)
                        .color(Color::WHITE)
                        .render_order(NAV_RENDER_ORDER),
                )
            })
            .collect();
        self.group = Some(group);
    }

    pub fn label_node(&self, index: usize) -> Option<NodeId> {
        self.labels.get(index).copied()
    }

    /// Which item a scene node belongs to.
    pub fn item_for(&self, node: NodeId) -> Option<ItemId> {
        self.labels.iter().position(|&id| id == node)
    }

    pub fn pointer_enter(&mut self, index: ItemId) {
        self.interaction.pointer_enter(index);
    }

    pub fn pointer_leave(&mut self, index: ItemId) {
        self.interaction.pointer_leave(index);
    }

    /// Flash the item and produce the scroll command for its section.
    pub fn click(&mut self, index: ItemId, now: f32, scroll: &ScrollController) -> Option<ScrollCommand> {
        let item = self.items.get(index)?;
        self.interaction.click(index, now);
        scroll.navigate(&item.label)
    }

    pub fn take_cursor_change(&mut self) -> Option<CursorHint> {
        self.interaction.take_cursor_change()
    }

    /// Item marked as the section currently in view.
    pub fn highlighted(&self) -> Option<ItemId> {
        self.highlighted
    }

    /// Pin the row to the top of the visible plane and apply per-item
    /// hover and click visuals. The item labelled `active_section` carries
    /// the click outline for as long as its section is in view.
    pub fn sync(
        &mut self,
        tree: &mut SceneTree,
        tier: ViewportTier,
        viewport_height: f32,
        active_section: Option<&str>,
        now: f32,
    ) {
        self.interaction.tick(now);
        let metrics = NavMetrics::for_tier(tier);

        let highlighted = active_section.and_then(|label| self.items.iter().position(|i| i.label == label));
        if highlighted != self.highlighted {
            log::debug!("nav highlight {:?} -> {:?}", self.highlighted, highlighted);
            self.highlighted = highlighted;
        }

        if let Some(group) = self.group {
            if let Some(node) = tree.get_mut(group) {
                node.transform.position = Vec3::new(0.0, viewport_height / 2.0 - TOP_INSET, NAV_DEPTH);
            }
        }

        let count = self.labels.len();
        for (i, id) in self.labels.iter().enumerate() {
            let Some(node) = tree.get_mut(*id) else {
                continue;
            };
            let visual = self.interaction.visual(i);
            node.transform.position.x = item_x(i, count, metrics.spacing);
            if let NodeKind::Text { font_size, .. } = &mut node.kind {
                *font_size = metrics.font_size * visual.scale;
            }
            node.outline = if highlighted == Some(i) {
                NAV_CLICK_OUTLINE
            } else {
                visual.outline
            };
        }
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::new(default_nav_items())
    }
}
