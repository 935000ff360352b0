//! The scrollable content of the portfolio.
//!
//! Each section mounts its nodes under a group placed at its static depth,
//! registers animation channels with the [`Animator`] and reacts to pointer
//! events that the portfolio has already resolved to one of its items.

mod backdrop;
mod experience;
mod projects;
mod skills;
mod socials;
mod typography;

pub use backdrop::{default_backdrops, Backdrop, BackdropImage};
pub use experience::{default_experiences, ExperienceEntry, ExperienceSection};
pub use projects::{default_projects, Project, ProjectsGallery};
pub use skills::{default_skills, Skill, SkillsCarousel};
pub use socials::{default_socials, Social, SocialsRow};
pub use typography::{about_lines, SectionText};

use crate::animator::Animator;
use crate::assets::DecodedImage;
use crate::device::ViewportTier;
use crate::interaction::{CursorHint, ItemId};
use crate::links::LinkOpener;
use crate::scene::{NodeId, SceneTree};

/// Pointer input already resolved to an item of the receiving section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent {
    PointerEnter(ItemId),
    PointerLeave(ItemId),
    Click(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

/// Mutable state a section may touch while handling input or a frame.
pub struct SectionContext<'a> {
    pub tree: &'a mut SceneTree,
    pub animator: &'a mut Animator,
    pub links: &'a mut dyn LinkOpener,
    /// Seconds since the portfolio started
    pub now: f32,
}

/// Texture a mounted image quad wants.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    pub node: NodeId,
    /// Site-relative path, if the quad shows a file
    pub path: Option<String>,
    /// Shown until `path` resolves, or forever without one
    pub placeholder: Option<PlaceholderText>,
}

/// Text painted onto a generated placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderText {
    pub title: String,
    pub technologies: Vec<String>,
    pub featured: bool,
}

pub trait Section {
    fn name(&self) -> &'static str;

    /// Create this section's nodes under `parent`.
    fn mount(&mut self, tree: &mut SceneTree, animator: &mut Animator, parent: NodeId);

    /// Item owning `node`, if any. Callers walk up the ancestors.
    fn hit(&self, node: NodeId) -> Option<ItemId> {
        let _ = node;
        None
    }

    fn event(&mut self, cx: &mut SectionContext, event: SectionEvent) -> EventResponse {
        let _ = (cx, event);
        EventResponse::Ignored
    }

    /// Per-frame work before the animator runs.
    fn update(&mut self, cx: &mut SectionContext, tier: ViewportTier) {
        let _ = (cx, tier);
    }

    /// Textures to fetch after mounting.
    fn textures(&self) -> Vec<TextureRequest> {
        Vec::new()
    }

    /// A texture for one of this section's nodes finished loading.
    fn texture_loaded(&mut self, tree: &mut SceneTree, node: NodeId, image: &DecodedImage) {
        let _ = (tree, node, image);
    }

    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        None
    }
}

/// Standard text outline for section text: no width, soft black halo.
pub(crate) const TEXT_OUTLINE: crate::scene::Outline = crate::scene::Outline {
    width: 0.0,
    blur: 0.2,
    color: crate::math::Color::BLACK,
    opacity: 0.7,
};
