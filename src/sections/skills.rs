//! Endless horizontal strip of skill tiles.

use super::{EventResponse, Section, SectionContext, SectionEvent, TextureRequest};
use crate::animation::{duplicated_positions, LoopingScroll};
use crate::animator::Animator;
use crate::interaction::{CursorHint, InteractionGroup, ItemId};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, SceneNode, SceneTree};
use crate::scroll::depths;

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    /// Site-relative icon shown on the tile
    pub icon_path: Option<String>,
    /// Tile colour; accent violet when unset
    pub color: Option<Color>,
    /// Opened when the tile is clicked
    pub url: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_path: None,
            color: None,
            url: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

pub fn default_skills() -> Vec<Skill> {
    [
        ("React", 0x61DAFB),
        ("TypeScript", 0x3178C6),
        ("JavaScript", 0xF7DF1E),
        ("Python", 0x3776AB),
        ("Django", 0x092E20),
        ("Node.js", 0x339933),
        ("Three.js", 0x000000),
        ("PostgreSQL", 0x336791),
        ("GraphQL", 0xE10098),
        ("Docker", 0x2496ED),
        ("AWS", 0xFF9900),
        ("Git", 0xF05032),
    ]
    .into_iter()
    .map(|(name, hex)| Skill::new(name).color(Color::from_hex(hex)))
    .collect()
}

pub const SKILL_SPACING: f32 = 1.5;
/// The first tile starts this far left of the strip center.
const LEAD_IN: f32 = 6.0;
pub const DEFAULT_SKILL_SPEED: f32 = 0.5;
const BACKING_COLOR: Color = Color::rgb(0.08, 0.08, 0.12);

struct Tile {
    panel: NodeId,
    label: NodeId,
    icon: Option<NodeId>,
}

/// Tiles are mounted twice back to back; the strip group scrolls left and
/// wraps after one full copy.
pub struct SkillsCarousel {
    skills: Vec<Skill>,
    position: Vec3,
    speed: f32,
    strip: Option<NodeId>,
    tiles: Vec<Tile>,
    interaction: InteractionGroup,
}

impl SkillsCarousel {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self {
            skills,
            position: depths::SKILLS,
            speed: DEFAULT_SKILL_SPEED,
            strip: None,
            tiles: Vec::new(),
            interaction: InteractionGroup::default(),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Width of one copy of the content.
    pub fn content_width(&self) -> f32 {
        self.skills.len() as f32 * SKILL_SPACING
    }

    fn url(&self, item: ItemId) -> Option<&str> {
        self.skills.get(item).and_then(|s| s.url.as_deref())
    }

    pub fn strip(&self) -> Option<NodeId> {
        self.strip
    }

    /// Panel of tile `slot` (0..2N).
    pub fn tile_panel(&self, slot: usize) -> Option<NodeId> {
        self.tiles.get(slot).map(|t| t.panel)
    }
}

impl Default for SkillsCarousel {
    fn default() -> Self {
        Self::new(default_skills())
    }
}

impl Section for SkillsCarousel {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn mount(&mut self, tree: &mut SceneTree, animator: &mut Animator, parent: NodeId) {
        let root = tree.insert_child(parent, SceneNode::new("skills").at(self.position));
        tree.insert_child(
            root,
            SceneNode::panel("skills:backing", 12.0, 2.0, 0.0)
                .at(Vec3::new(0.0, 0.0, -0.2))
                .color(BACKING_COLOR)
                .opacity(0.6),
        );

        let strip = tree.insert_child(root, SceneNode::new("skills:strip"));
        let count = self.skills.len();
        self.tiles = duplicated_positions(count, SKILL_SPACING, LEAD_IN)
            .into_iter()
            .enumerate()
            .map(|(slot, x)| {
                let skill = &self.skills[slot % count];
                let tile = tree.insert_child(
                    strip,
                    SceneNode::new(format!("skills:{}", skill.name)).at(Vec3::new(x, 0.0, 0.0)),
                );
                let panel = tree.insert_child(
                    tile,
                    SceneNode::panel("skills:tile", 1.0, 1.0, 0.1)
                        .color(skill.color.unwrap_or(Color::ACCENT))
                        .opacity(0.8),
                );
                let label = tree.insert_child(
                    tile,
                    SceneNode::text("skills:name", skill.name.clone(), 0.15)
                        .at(Vec3::new(0.0, -0.7, 0.1)),
                );
                let icon = skill.icon_path.as_ref().map(|_| {
                    tree.insert_child(
                        tile,
                        SceneNode::image("skills:icon", 0.6, 0.6).at(Vec3::new(0.0, 0.0, 0.06)),
                    )
                });
                Tile { panel, label, icon }
            })
            .collect();

        animator.marquee(strip, LoopingScroll::new(self.content_width(), self.speed));
        self.strip = Some(strip);
        log::debug!("skills strip mounted with {} tiles", self.tiles.len());
    }

    /// Both copies of a skill resolve to the same item.
    fn hit(&self, node: NodeId) -> Option<ItemId> {
        let count = self.skills.len();
        self.tiles
            .iter()
            .position(|t| t.panel == node || t.label == node || t.icon == Some(node))
            .map(|slot| slot % count)
    }

    fn event(&mut self, cx: &mut SectionContext, event: SectionEvent) -> EventResponse {
        match event {
            SectionEvent::PointerEnter(i) => {
                if self.url(i).is_none() {
                    return EventResponse::Ignored;
                }
                self.interaction.pointer_enter(i);
            }
            SectionEvent::PointerLeave(i) => self.interaction.pointer_leave(i),
            SectionEvent::Click(i) => match self.url(i) {
                Some(url) => cx.links.open(url),
                None => return EventResponse::Ignored,
            },
        }
        EventResponse::Handled
    }

    fn textures(&self) -> Vec<TextureRequest> {
        let count = self.skills.len();
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(slot, tile)| {
                let node = tile.icon?;
                let path = self.skills[slot % count].icon_path.clone()?;
                Some(TextureRequest {
                    node,
                    path: Some(path),
                    placeholder: None,
                })
            })
            .collect()
    }

    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        self.interaction.take_cursor_change()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::Pointer;
    use crate::links::RecordingOpener;
    use crate::time::FrameTime;

    fn mounted(carousel: &mut SkillsCarousel) -> (SceneTree, Animator) {
        let mut tree = SceneTree::new();
        let mut animator = Animator::new();
        let root = tree.insert(SceneNode::new("content"));
        carousel.mount(&mut tree, &mut animator, root);
        (tree, animator)
    }

    #[test]
    fn test_tiles_duplicated() {
        let mut carousel = SkillsCarousel::default();
        let (tree, _) = mounted(&mut carousel);
        assert_eq!(carousel.tiles.len(), 24);
        assert!((carousel.content_width() - 18.0).abs() < 1e-6);

        let first = carousel.tile_panel(0).and_then(|id| tree.world_position(id));
        let copy = carousel.tile_panel(12).and_then(|id| tree.world_position(id));
        let (first, copy) = (first.expect("tile"), copy.expect("tile"));
        assert!((first.x + 6.0).abs() < 1e-5);
        assert!((copy.x - first.x - 18.0).abs() < 1e-4);
        assert_eq!(first.y, -10.8);
    }

    #[test]
    fn test_strip_wraps_after_one_copy() {
        let mut carousel = SkillsCarousel::default();
        let (mut tree, mut animator) = mounted(&mut carousel);
        let strip = carousel.strip().expect("strip");

        // 18 units at 0.5/s wraps after 36 s; run 40 s
        for frame in FrameTime::fixed_steps(0.0, 60.0, 2400) {
            animator.update(&mut tree, &frame, Pointer::CENTER);
            let x = tree.get(strip).map(|n| n.transform.position.x).unwrap_or(1.0);
            assert!(x <= 0.0 && x > -18.0);
        }
        let x = tree.get(strip).map(|n| n.transform.position.x).unwrap_or(0.0);
        assert!((x + 2.0).abs() < 0.05);
    }

    #[test]
    fn test_click_opens_only_linked_skills() {
        let skills = vec![
            Skill::new("Rust").url("https://www.rust-lang.org"),
            Skill::new("Git"),
        ];
        let mut carousel = SkillsCarousel::new(skills);
        let (mut tree, mut animator) = mounted(&mut carousel);
        let mut links = RecordingOpener::new();

        let copy_of_rust = carousel.tile_panel(2).expect("tile");
        assert_eq!(carousel.hit(copy_of_rust), Some(0));

        let mut cx = SectionContext {
            tree: &mut tree,
            animator: &mut animator,
            links: &mut links,
            now: 0.0,
        };
        assert_eq!(carousel.event(&mut cx, SectionEvent::Click(1)), EventResponse::Ignored);
        assert_eq!(carousel.event(&mut cx, SectionEvent::PointerEnter(0)), EventResponse::Handled);
        carousel.event(&mut cx, SectionEvent::Click(0));
        assert_eq!(links.opened(), vec!["https://www.rust-lang.org".to_string()]);
        assert_eq!(carousel.take_cursor_change(), Some(CursorHint::Pointer));
    }

    #[test]
    fn test_icon_textures_requested_per_slot() {
        let mut carousel = SkillsCarousel::new(vec![Skill::new("Rust").icon("/assets/icons/rust.svg")]);
        let _ = mounted(&mut carousel);
        let requests = carousel.textures();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path.as_deref(), Some("/assets/icons/rust.svg"));
    }
}
