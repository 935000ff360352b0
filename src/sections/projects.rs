//! Gallery of project cards.
//!
//! The whole gallery bobs and tilts toward the pointer; each card floats on
//! its own phase and grows and wobbles while hovered. Card heights come from
//! [`ProjectCardLayout`] so long descriptions get taller cards.

use super::{
    EventResponse, PlaceholderText, Section, SectionContext, SectionEvent, TextureRequest, TEXT_OUTLINE,
};
use crate::animation::{IdleFloat, HOVER_SCALE_RATE};
use crate::animator::{Animator, RotationChannel};
use crate::assets::DecodedImage;
use crate::device::ViewportTier;
use crate::interaction::{CursorHint, InteractionGroup, ItemId, VisualStyle};
use crate::layout::{fit_image, gallery_position, tag_offset, ProjectCardLayout, DEFAULT_IMAGE_ASPECT};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, NodeKind, SceneNode, SceneTree};
use crate::scroll::depths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image_url: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

impl Project {
    /// Where a click on the card body goes: the live site first, then the
    /// repository.
    pub fn primary_url(&self) -> Option<&str> {
        self.live_url.as_deref().or(self.github_url.as_deref())
    }
}

pub fn default_projects() -> Vec<Project> {
    let project = |title: &str, description: &str, technologies: &[&str], image_url: &str| Project {
        title: title.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        image_url: image_url.to_string(),
        github_url: None,
        live_url: None,
        featured: false,
    };
    vec![
        project(
            "Snipiddy",
            "Sign in and enter your dietary restrictions, such as food allergies or irritating ingredients, along with any diets or price restrictions. Then, snap a photo of your menu and let an AI-powered scanner take over. Within seconds, it identifies potential allergens and offers dietary recommendations tailored to your needs, helping you make confident, informed food choices!",
            &["Typescript", "SQL", "NextJS", "Tailwind", "PostgreSQL"],
            "/assets/projects/snippidy.png",
        ),
        project(
            "Mileage Masters",
            "My team's entry for the Business Professionals of America 2023 Website Design Team competition. A used car marketplace with cross-platform functionality, advanced payment calculators, and a contact form. This earned us first place nationally.",
            &["JavaScript", "Bootstrap", "HTML", "CSS", "Sass", "PHPMailer"],
            "/assets/projects/mileagemasters.png",
        ),
        project(
            "QLearning Snake Agent",
            "An agent trained using Q-Learning with Temporal Difference to learn how to play the classic Snake game. Also allows the user to customize the training parameters and play the game themselves.",
            &["Python", "Numpy"],
            "/assets/projects/snake.png",
        ),
    ]
}

const CARD_STYLE: VisualStyle = VisualStyle::PLAIN.hover_scale(1.05);
const FEATURED_SCALE: f32 = 1.02;
const IMAGE_OPACITY_RATE: f32 = 6.0;
const GALLERY_FLOAT: IdleFloat = IdleFloat::new(0.05, 0.5, 0.0);
const CARD_FLOAT: IdleFloat = IdleFloat::new(0.02, 2.0, 0.0);
const BACKING_COLOR: Color = Color::rgb(0.08, 0.08, 0.15);
const BADGE_COLOR: Color = Color::from_hex(0xffaa00);
const GITHUB_COLOR: Color = Color::from_hex(0x333333);
const LIVE_COLOR: Color = Color::from_hex(0x00aa00);

/// Parts of a card that route clicks differently. Items are numbered
/// `card * 2 + part`.
const PARTS_PER_CARD: usize = 2;
const PART_BODY: usize = 0;
const PART_GITHUB: usize = 1;

struct Card {
    group: NodeId,
    panel: NodeId,
    image: NodeId,
    /// Everything else on the card that counts as the body for clicks
    body: Vec<NodeId>,
    github: Vec<NodeId>,
}

pub struct ProjectsGallery {
    projects: Vec<Project>,
    position: Vec3,
    root: Option<NodeId>,
    cards: Vec<Card>,
    interaction: InteractionGroup,
}

impl ProjectsGallery {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            position: depths::PROJECTS,
            root: None,
            cards: Vec::new(),
            interaction: InteractionGroup::new(CARD_STYLE),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn card(&self, index: usize) -> Option<NodeId> {
        self.cards.get(index).map(|c| c.group)
    }

    pub fn image(&self, index: usize) -> Option<NodeId> {
        self.cards.get(index).map(|c| c.image)
    }

    /// Item id of the repository button on card `index`.
    pub fn github_item(index: usize) -> ItemId {
        index * PARTS_PER_CARD + PART_GITHUB
    }

    pub fn body_item(index: usize) -> ItemId {
        index * PARTS_PER_CARD + PART_BODY
    }

    fn rest_scale(&self, index: usize) -> f32 {
        if self.projects.get(index).is_some_and(|p| p.featured) {
            FEATURED_SCALE
        } else {
            1.0
        }
    }

    fn mount_card(&self, tree: &mut SceneTree, animator: &mut Animator, root: NodeId, index: usize) -> Card {
        let project = &self.projects[index];
        let layout = ProjectCardLayout::compute(&project.description, project.technologies.len());
        let rest = gallery_position(index, self.projects.len(), project.featured);
        let h = layout.height / 2.0;

        let group = tree.insert_child(
            root,
            SceneNode::new(format!("projects:{}", project.title)).at(rest),
        );
        animator.bob(group, rest.y, CARD_FLOAT.with_phase(rest.x));
        animator.rotate(group, RotationChannel::wobble());
        animator.approach_scale(group, self.rest_scale(index), HOVER_SCALE_RATE);

        let panel = tree.insert_child(
            group,
            SceneNode::panel("projects:card", layout.width, layout.height, 0.1)
                .color(Color::SLATE)
                .opacity(0.9)
                .emissive(0.03),
        );

        let (w, hgt) = fit_image(DEFAULT_IMAGE_ASPECT);
        let image = tree.insert_child(
            group,
            SceneNode::image("projects:image", w, hgt)
                .at(Vec3::new(0.0, layout.image_y(), 0.06))
                .opacity(0.8),
        );
        animator.approach_opacity(image, 0.8, IMAGE_OPACITY_RATE);

        let mut body = Vec::new();
        if project.featured {
            body.push(tree.insert_child(
                group,
                SceneNode::panel("projects:badge", 0.4, 0.15, 0.02)
                    .at(Vec3::new(0.7, h - 0.2, 0.07))
                    .color(BADGE_COLOR),
            ));
            body.push(tree.insert_child(
                group,
                SceneNode::text("projects:badge:label", "FEATURED", 0.06).at(Vec3::new(0.7, h - 0.2, 0.09)),
            ));
        }

        let mut title = SceneNode::text("projects:title", project.title.clone(), 0.12)
            .color(Color::ACCENT)
            .at(Vec3::new(0.0, layout.title_y(), 0.08));
        title.outline = TEXT_OUTLINE;
        body.push(tree.insert_child(group, title));
        body.push(tree.insert_child(
            group,
            SceneNode::text("projects:description", project.description.clone(), 0.07)
                .at(Vec3::new(0.0, layout.description_y(), 0.08)),
        ));

        let tags = tree.insert_child(
            group,
            SceneNode::new("projects:tags").at(Vec3::new(0.0, layout.tags_y(), 0.12)),
        );
        let count = project.technologies.len();
        for (t, tech) in project.technologies.iter().enumerate() {
            let (x, y) = tag_offset(t, count);
            let tag = tree.insert_child(tags, SceneNode::new("projects:tag").at(Vec3::new(x, y, 0.0)));
            body.push(tree.insert_child(
                tag,
                SceneNode::panel("projects:tag:chip", 0.5, 0.15, 0.02)
                    .color(Color::ACCENT)
                    .opacity(0.7),
            ));
            body.push(tree.insert_child(
                tag,
                SceneNode::text("projects:tag:label", tech.clone(), 0.05).at(Vec3::new(0.0, 0.0, 0.02)),
            ));
        }

        let mut github = Vec::new();
        if project.github_url.is_some() {
            github.push(tree.insert_child(
                group,
                SceneNode::panel("projects:github", 0.3, 0.12, 0.02)
                    .at(Vec3::new(-0.4, layout.actions_y(), 0.06))
                    .color(GITHUB_COLOR),
            ));
            github.push(tree.insert_child(
                group,
                SceneNode::text("projects:github:label", "GitHub", 0.05)
                    .at(Vec3::new(-0.4, layout.actions_y(), 0.09)),
            ));
        }
        if project.live_url.is_some() {
            body.push(tree.insert_child(
                group,
                SceneNode::panel("projects:live", 0.3, 0.12, 0.02)
                    .at(Vec3::new(0.4, layout.actions_y(), 0.07))
                    .color(LIVE_COLOR),
            ));
            body.push(tree.insert_child(
                group,
                SceneNode::text("projects:live:label", "Live", 0.05)
                    .at(Vec3::new(0.4, layout.actions_y(), 0.09)),
            ));
        }

        Card {
            group,
            panel,
            image,
            body,
            github,
        }
    }
}

impl Default for ProjectsGallery {
    fn default() -> Self {
        Self::new(default_projects())
    }
}

impl Section for ProjectsGallery {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn mount(&mut self, tree: &mut SceneTree, animator: &mut Animator, parent: NodeId) {
        let root = tree.insert_child(parent, SceneNode::new("projects").at(self.position));
        animator.bob(root, self.position.y, GALLERY_FLOAT);
        animator.rotate(root, RotationChannel::GALLERY_TILT);

        tree.insert_child(
            root,
            SceneNode::panel("projects:backing", self.projects.len() as f32 * 3.0, 4.0, 0.0)
                .at(Vec3::new(0.0, 0.0, -0.5))
                .color(BACKING_COLOR)
                .opacity(0.3),
        );

        self.cards = (0..self.projects.len())
            .map(|i| self.mount_card(tree, animator, root, i))
            .collect();
        self.root = Some(root);
    }

    fn hit(&self, node: NodeId) -> Option<ItemId> {
        self.cards.iter().enumerate().find_map(|(i, card)| {
            if card.github.contains(&node) {
                Some(Self::github_item(i))
            } else if card.group == node || card.panel == node || card.image == node || card.body.contains(&node) {
                Some(Self::body_item(i))
            } else {
                None
            }
        })
    }

    fn event(&mut self, cx: &mut SectionContext, event: SectionEvent) -> EventResponse {
        match event {
            SectionEvent::PointerEnter(item) => {
                let card = item / PARTS_PER_CARD;
                self.interaction.pointer_enter(card);
                if let Some(c) = self.cards.get(card) {
                    cx.animator.set_hovered(c.group, true);
                }
            }
            SectionEvent::PointerLeave(item) => {
                let card = item / PARTS_PER_CARD;
                self.interaction.pointer_leave(card);
                if let Some(c) = self.cards.get(card) {
                    cx.animator.set_hovered(c.group, false);
                }
            }
            SectionEvent::Click(item) => {
                let Some(project) = self.projects.get(item / PARTS_PER_CARD) else {
                    return EventResponse::Ignored;
                };
                let url = if item % PARTS_PER_CARD == PART_GITHUB {
                    project.github_url.as_deref()
                } else {
                    project.primary_url()
                };
                match url {
                    Some(url) => cx.links.open(url),
                    None => return EventResponse::Ignored,
                }
            }
        }
        EventResponse::Handled
    }

    fn update(&mut self, cx: &mut SectionContext, _tier: ViewportTier) {
        for (i, card) in self.cards.iter().enumerate() {
            let hovered = self.interaction.hovered() == Some(i);
            let scale = if hovered {
                self.interaction.visual(i).scale
            } else {
                self.rest_scale(i)
            };
            cx.animator.approach_scale(card.group, scale, HOVER_SCALE_RATE);
            cx.animator
                .approach_opacity(card.image, if hovered { 0.9 } else { 0.8 }, IMAGE_OPACITY_RATE);
            if let Some(panel) = cx.tree.get_mut(card.panel) {
                panel.emissive_intensity = if hovered { 0.1 } else { 0.03 };
            }
        }
    }

    fn textures(&self) -> Vec<TextureRequest> {
        self.cards
            .iter()
            .zip(&self.projects)
            .map(|(card, project)| TextureRequest {
                node: card.image,
                path: Some(project.image_url.clone()),
                placeholder: Some(PlaceholderText {
                    title: project.title.clone(),
                    technologies: project.technologies.clone(),
                    featured: project.featured,
                }),
            })
            .collect()
    }

    /// Refit the image quad to the loaded aspect ratio.
    fn texture_loaded(&mut self, tree: &mut SceneTree, node: NodeId, image: &DecodedImage) {
        if !self.cards.iter().any(|c| c.image == node) {
            return;
        }
        let (w, h) = fit_image(image.aspect());
        if let Some(n) = tree.get_mut(node) {
            n.kind = NodeKind::Image { width: w, height: h };
        }
    }

    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        self.interaction.take_cursor_change()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::Pointer;
    use crate::layout::{MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
    use crate::links::RecordingOpener;
    use crate::time::FrameTime;

    struct Harness {
        tree: SceneTree,
        animator: Animator,
        links: RecordingOpener,
        gallery: ProjectsGallery,
    }

    impl Harness {
        fn new(projects: Vec<Project>) -> Self {
            let mut tree = SceneTree::new();
            let mut animator = Animator::new();
            let root = tree.insert(SceneNode::new("content"));
            let mut gallery = ProjectsGallery::new(projects);
            gallery.mount(&mut tree, &mut animator, root);
            Self {
                tree,
                animator,
                links: RecordingOpener::new(),
                gallery,
            }
        }

        fn send(&mut self, event: SectionEvent) -> EventResponse {
            let mut cx = SectionContext {
                tree: &mut self.tree,
                animator: &mut self.animator,
                links: &mut self.links,
                now: 0.0,
            };
            self.gallery.event(&mut cx, event)
        }

        fn run(&mut self, start: f32, frames: usize, pointer: Pointer) {
            for frame in FrameTime::fixed_steps(start, 60.0, frames) {
                let mut cx = SectionContext {
                    tree: &mut self.tree,
                    animator: &mut self.animator,
                    links: &mut self.links,
                    now: frame.elapsed,
                };
                self.gallery.update(&mut cx, ViewportTier::Desktop);
                self.animator.update(&mut self.tree, &frame, pointer);
            }
        }
    }

    fn linked() -> Vec<Project> {
        let mut projects = default_projects();
        projects[0].github_url = Some("https://github.com/example/snipiddy".into());
        projects[0].live_url = Some("https://snipiddy.example".into());
        projects[1].github_url = Some("https://github.com/example/mileage".into());
        projects[2].featured = true;
        projects
    }

    #[test]
    fn test_click_routing() {
        let mut h = Harness::new(linked());
        assert_eq!(h.send(SectionEvent::Click(ProjectsGallery::body_item(0))), EventResponse::Handled);
        assert_eq!(h.send(SectionEvent::Click(ProjectsGallery::github_item(0))), EventResponse::Handled);
        assert_eq!(h.send(SectionEvent::Click(ProjectsGallery::body_item(1))), EventResponse::Handled);
        assert_eq!(h.send(SectionEvent::Click(ProjectsGallery::body_item(2))), EventResponse::Ignored);
        assert_eq!(
            h.links.opened(),
            vec![
                "https://snipiddy.example".to_string(),
                "https://github.com/example/snipiddy".to_string(),
                "https://github.com/example/mileage".to_string(),
            ]
        );
    }

    #[test]
    fn test_hit_resolves_parts() {
        let h = Harness::new(linked());
        let image = h.gallery.image(1).expect("image");
        assert_eq!(h.gallery.hit(image), Some(ProjectsGallery::body_item(1)));
        let button = h.gallery.cards[0].github[0];
        assert_eq!(h.gallery.hit(button), Some(ProjectsGallery::github_item(0)));
        assert!(h.gallery.cards[2].github.is_empty());
    }

    #[test]
    fn test_hover_and_featured_scale() {
        let mut h = Harness::new(linked());
        h.send(SectionEvent::PointerEnter(ProjectsGallery::github_item(0)));
        h.run(0.0, 120, Pointer::CENTER);

        let scale = |h: &Harness, i: usize| {
            h.gallery
                .card(i)
                .and_then(|id| h.tree.get(id))
                .map(|n| n.transform.scale.x)
                .unwrap_or(0.0)
        };
        assert!((scale(&h, 0) - 1.05).abs() < 1e-3);
        assert!((scale(&h, 1) - 1.0).abs() < 1e-3);
        assert!((scale(&h, 2) - FEATURED_SCALE).abs() < 1e-3);

        let image = h.gallery.image(0).and_then(|id| h.tree.get(id)).map(|n| n.opacity);
        assert!((image.unwrap_or(0.0) - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_gallery_tilts_toward_pointer() {
        let mut h = Harness::new(default_projects());
        h.run(0.0, 1, Pointer::new(1.0, -1.0));
        let root = h.gallery.root().and_then(|id| h.tree.get(id)).expect("root");
        assert!((root.transform.rotation.y - 0.02).abs() < 1e-6);
        assert!((root.transform.rotation.x + 0.01).abs() < 1e-6);
        assert!((root.transform.position.y - depths::PROJECTS.y).abs() <= 0.05 + 1e-6);
    }

    #[test]
    fn test_texture_refits_image() {
        let mut h = Harness::new(default_projects());
        let requests = h.gallery.textures();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.placeholder.is_some()));

        let node = requests[2].node;
        let tall = DecodedImage {
            width: 100,
            height: 200,
            rgba: vec![0; 100 * 200 * 4],
        };
        h.gallery.texture_loaded(&mut h.tree, node, &tall);
        let kind = h.tree.get(node).map(|n| n.kind.clone());
        assert_eq!(
            kind,
            Some(NodeKind::Image {
                width: MAX_IMAGE_HEIGHT * 0.5,
                height: MAX_IMAGE_HEIGHT,
            })
        );

        let wide = DecodedImage {
            width: 400,
            height: 100,
            rgba: vec![0; 400 * 100 * 4],
        };
        h.gallery.texture_loaded(&mut h.tree, node, &wide);
        let width = match h.tree.get(node).map(|n| &n.kind) {
            Some(NodeKind::Image { width, .. }) => *width,
            _ => 0.0,
        };
        assert_eq!(width, MAX_IMAGE_WIDTH);
    }
}
