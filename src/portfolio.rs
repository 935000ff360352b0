//! The top-level frame driver.
//!
//! A [`Portfolio`] owns the scene tree and everything that mutates it. The
//! host feeds it [`InputEvent`]s as they arrive and calls
//! [`frame`](Portfolio::frame) once per display refresh; each frame drains
//! finished assets, applies scroll, runs section and nav updates, advances
//! the animator and composites through the glass.

use std::collections::HashMap;
use std::time::Duration;

use cosmic_text::FontSystem;

use crate::animator::{Animator, Pointer};
use crate::assets::{render_placeholder, AssetLoader, AssetRoot, DecodedImage, PlaceholderStyle};
use crate::compositor::{GlassCompositor, GlassConfig, RenderBackend};
use crate::device::{TierWatcher, ViewportTier};
use crate::interaction::{CursorHint, ItemId};
use crate::links::{LinkOpener, SystemBrowser};
use crate::nav::{default_nav_items, NavBar, NavItem};
use crate::scene::{NodeId, SceneNode, SceneTree};
use crate::scroll::{depths, ScrollCommand, ScrollConfig, ScrollController};
use crate::sections::{
    about_lines, default_backdrops, Backdrop, EventResponse, ExperienceSection, ProjectsGallery, Section,
    SectionContext, SectionEvent, SectionText, SkillsCarousel, SocialsRow, TextureRequest,
};
use crate::time::{FrameClock, FrameTime};

/// Input from the host window, already hit-tested where a node is named.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in surface pixels
    PointerMove { x: f32, y: f32 },
    PointerEnter(NodeId),
    PointerLeave(NodeId),
    Click(NodeId),
    Resize { width: u32, height: u32 },
    OrientationChange { width: u32, height: u32 },
    /// The scroll container's `scrollTop` in pixels
    Scroll { top: f32 },
}

/// What the host should do after a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// New cursor, only when it changed
    pub cursor: Option<CursorHint>,
    /// Scroll requests issued by nav clicks since the last frame
    pub scroll: Vec<ScrollCommand>,
}

#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub width: u32,
    pub height: u32,
    pub glass: GlassConfig,
    pub scroll: ScrollConfig,
    pub nav_items: Vec<NavItem>,
    pub asset_root: AssetRoot,
    /// Decode image files on a worker thread. Placeholders stay up when off.
    pub load_assets: bool,
}

impl PortfolioConfig {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn glass(mut self, glass: GlassConfig) -> Self {
        self.glass = glass;
        self
    }

    pub fn nav_items(mut self, items: Vec<NavItem>) -> Self {
        self.nav_items = items;
        self
    }

    pub fn asset_root(mut self, root: AssetRoot) -> Self {
        self.asset_root = root;
        self
    }

    pub fn load_assets(mut self, load: bool) -> Self {
        self.load_assets = load;
        self
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            glass: GlassConfig::default(),
            scroll: ScrollConfig::default(),
            nav_items: default_nav_items(),
            asset_root: AssetRoot::default(),
            load_assets: true,
        }
    }
}

/// The stock page, top to bottom.
pub fn default_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(SectionText::title("Aruv Dand", depths::NAME)),
        Box::new(SectionText::heading("About Me", depths::ABOUT_HEADING)),
        Box::new(SectionText::paragraph(about_lines(), depths::ABOUT_BODY)),
        Box::new(SectionText::heading("Experience", depths::EXPERIENCE_HEADING)),
        Box::new(ExperienceSection::default()),
        Box::new(SectionText::heading("Skills", depths::SKILLS_HEADING)),
        Box::new(SkillsCarousel::default()),
        Box::new(SectionText::heading("Projects", depths::PROJECTS_HEADING)),
        Box::new(ProjectsGallery::default()),
        Box::new(SocialsRow::default()),
        Box::new(Backdrop::new(default_backdrops())),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Nav,
    Section(usize),
}

pub struct Portfolio<B: RenderBackend> {
    tree: SceneTree,
    animator: Animator,
    content: NodeId,
    sections: Vec<Box<dyn Section>>,
    nav: Option<NavBar>,
    scroll: ScrollController,
    tiers: TierWatcher,
    compositor: GlassCompositor<B>,
    clock: FrameClock,
    surface: (u32, u32),
    pointer: Pointer,
    now: f32,
    links: Box<dyn LinkOpener>,
    loader: Option<AssetLoader>,
    assets: AssetRoot,
    fonts: FontSystem,
    textures: HashMap<NodeId, DecodedImage>,
    texture_owners: HashMap<NodeId, usize>,
    hovered: Option<(Owner, ItemId)>,
    commands: Vec<ScrollCommand>,
    cursor: CursorHint,
}

impl<B: RenderBackend> Portfolio<B> {
    /// Mount `sections` under the scrolled content root and start loading
    /// their textures.
    pub fn new(
        backend: B,
        config: PortfolioConfig,
        sections: Vec<Box<dyn Section>>,
        links: Box<dyn LinkOpener>,
    ) -> Self {
        let PortfolioConfig {
            width,
            height,
            glass,
            scroll,
            nav_items,
            asset_root,
            load_assets,
        } = config;

        let mut tree = SceneTree::new();
        let mut animator = Animator::new();
        let content = tree.insert(SceneNode::new("content"));

        let mut sections = sections;
        for section in sections.iter_mut() {
            section.mount(&mut tree, &mut animator, content);
        }

        let nav = glass.shape.has_nav().then(|| {
            let mut nav = NavBar::new(nav_items);
            nav.mount(&mut tree);
            nav
        });

        let loader = if load_assets {
            match AssetLoader::spawn() {
                Ok(loader) => Some(loader),
                Err(e) => {
                    log::warn!("Asset loader unavailable, keeping placeholders: {}", e);
                    None
                }
            }
        } else {
            None
        };

        log::info!(
            "portfolio mounted: {} sections, {} nodes, nav {}",
            sections.len(),
            tree.len(),
            if nav.is_some() { "on" } else { "off" }
        );

        let mut portfolio = Self {
            compositor: GlassCompositor::new(backend, glass, width, height),
            scroll: ScrollController::new(scroll, height as f32),
            tiers: TierWatcher::new(width as f32),
            tree,
            animator,
            content,
            sections,
            nav,
            clock: FrameClock::new(),
            surface: (width, height),
            pointer: Pointer::CENTER,
            now: 0.0,
            links,
            loader,
            assets: asset_root,
            fonts: FontSystem::new(),
            textures: HashMap::new(),
            texture_owners: HashMap::new(),
            hovered: None,
            commands: Vec::new(),
            cursor: CursorHint::Default,
        };
        portfolio.request_textures();
        portfolio
    }

    /// The stock page, opening links in the system browser.
    pub fn with_defaults(backend: B, config: PortfolioConfig) -> Self {
        Self::new(backend, config, default_sections(), Box::new(SystemBrowser))
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Group that scroll moves; every section hangs off it.
    pub fn content_root(&self) -> NodeId {
        self.content
    }

    pub fn sections(&self) -> impl Iterator<Item = &dyn Section> {
        self.sections.iter().map(|s| &**s)
    }

    pub fn nav(&self) -> Option<&NavBar> {
        self.nav.as_ref()
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn compositor(&self) -> &GlassCompositor<B> {
        &self.compositor
    }

    pub fn tier(&self) -> ViewportTier {
        self.tiers.tier()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Current texture of an image quad: a placeholder or the decoded file.
    pub fn texture(&self, node: NodeId) -> Option<&DecodedImage> {
        self.textures.get(&node)
    }

    pub fn textures(&self) -> impl Iterator<Item = (NodeId, &DecodedImage)> {
        self.textures.iter().map(|(id, image)| (*id, image))
    }

    pub fn pending_assets(&self) -> usize {
        self.loader.as_ref().map_or(0, AssetLoader::pending)
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => {
                let (w, h) = self.surface;
                self.pointer = Pointer::from_pixels(x, y, w as f32, h as f32);
            }
            InputEvent::PointerEnter(node) => {
                let Some(target) = self.resolve(node) else {
                    return;
                };
                if self.hovered == Some(target) {
                    return;
                }
                if let Some((owner, item)) = self.hovered.take() {
                    self.dispatch(owner, SectionEvent::PointerLeave(item));
                }
                self.dispatch(target.0, SectionEvent::PointerEnter(target.1));
                self.hovered = Some(target);
            }
            InputEvent::PointerLeave(node) => {
                let target = self.resolve(node);
                if target.is_some() && target == self.hovered {
                    self.hovered = None;
                    if let Some((owner, item)) = target {
                        self.dispatch(owner, SectionEvent::PointerLeave(item));
                    }
                }
            }
            InputEvent::Click(node) => {
                if let Some((owner, item)) = self.resolve(node) {
                    self.dispatch(owner, SectionEvent::Click(item));
                }
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                self.tiers.on_resize(width as f32);
            }
            InputEvent::OrientationChange { width, height } => {
                self.resize(width, height);
                self.tiers.on_orientation_change(width as f32);
            }
            InputEvent::Scroll { top } => self.scroll.on_scroll(top),
        }
    }

    /// Run one frame on the wall clock.
    pub fn frame(&mut self) -> FrameOutput {
        let frame = self.clock.tick();
        self.frame_at(frame)
    }

    /// Run one frame at an explicit time.
    pub fn frame_at(&mut self, frame: FrameTime) -> FrameOutput {
        self.now = frame.elapsed;
        self.drain_assets();

        let tier = self.tiers.tier();
        self.scroll.update(frame.delta);
        let offset = self
            .scroll
            .content_offset(self.compositor.content_viewport().height);
        if let Some(root) = self.tree.get_mut(self.content) {
            root.transform.position.y = offset;
        }

        let mut cx = SectionContext {
            tree: &mut self.tree,
            animator: &mut self.animator,
            links: self.links.as_mut(),
            now: frame.elapsed,
        };
        for section in self.sections.iter_mut() {
            section.update(&mut cx, tier);
        }

        if let Some(nav) = self.nav.as_mut() {
            let height = self.compositor.glass_viewport().height;
            let active = self.scroll.active_section();
            nav.sync(&mut self.tree, tier, height, active, frame.elapsed);
        }

        self.animator.update(&mut self.tree, &frame, self.pointer);
        self.compositor.render_frame(&self.tree, &frame, self.pointer);

        FrameOutput {
            cursor: self.take_cursor_change(),
            scroll: std::mem::take(&mut self.commands),
        }
    }

    /// Block until outstanding assets arrive or `timeout` passes. Returns
    /// how many were applied.
    pub fn wait_for_assets(&mut self, timeout: Duration) -> usize {
        let Some(loader) = self.loader.as_mut() else {
            return 0;
        };
        let loaded = loader.wait(&self.tree, timeout);
        let count = loaded.len();
        for image in loaded {
            self.apply_texture(image.node, image.image);
        }
        count
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
        self.compositor.resize(width, height);
        self.scroll.set_viewport_height(height as f32);
    }

    fn request_textures(&mut self) {
        let requests: Vec<(usize, TextureRequest)> = self
            .sections
            .iter()
            .enumerate()
            .flat_map(|(i, section)| section.textures().into_iter().map(move |r| (i, r)))
            .collect();

        for (owner, request) in requests {
            self.texture_owners.insert(request.node, owner);

            if let Some(text) = &request.placeholder {
                let style = PlaceholderStyle::for_project(text.featured);
                let image = render_placeholder(&mut self.fonts, &style, &text.title, text.technologies.as_slice());
                self.apply_texture(request.node, image);
            }

            let (Some(loader), Some(path)) = (self.loader.as_mut(), request.path.as_deref()) else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            if let Err(e) = loader.request(request.node, self.assets.source(path)) {
                log::warn!("Failed to queue {}: {}", path, e);
            }
        }
    }

    fn drain_assets(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        for image in loader.drain(&self.tree) {
            self.apply_texture(image.node, image.image);
        }
    }

    fn apply_texture(&mut self, node: NodeId, image: DecodedImage) {
        if let Some(section) = self
            .texture_owners
            .get(&node)
            .and_then(|&i| self.sections.get_mut(i))
        {
            section.texture_loaded(&mut self.tree, node, &image);
        }
        self.textures.insert(node, image);
    }

    /// Walk from `node` up to the first ancestor some group claims.
    fn resolve(&self, node: NodeId) -> Option<(Owner, ItemId)> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(item) = self.nav.as_ref().and_then(|nav| nav.item_for(id)) {
                return Some((Owner::Nav, item));
            }
            let claimed = self
                .sections
                .iter()
                .enumerate()
                .find_map(|(i, section)| section.hit(id).map(|item| (Owner::Section(i), item)));
            if claimed.is_some() {
                return claimed;
            }
            current = self.tree.parent(id);
        }
        None
    }

    fn dispatch(&mut self, owner: Owner, event: SectionEvent) {
        match owner {
            Owner::Nav => {
                let Some(nav) = self.nav.as_mut() else {
                    return;
                };
                match event {
                    SectionEvent::PointerEnter(i) => nav.pointer_enter(i),
                    SectionEvent::PointerLeave(i) => nav.pointer_leave(i),
                    SectionEvent::Click(i) => {
                        if let Some(command) = nav.click(i, self.now, &self.scroll) {
                            log::debug!("nav item {} -> {:?}", i, command);
                            self.commands.push(command);
                        }
                    }
                }
            }
            Owner::Section(index) => {
                let Some(section) = self.sections.get_mut(index) else {
                    return;
                };
                let mut cx = SectionContext {
                    tree: &mut self.tree,
                    animator: &mut self.animator,
                    links: self.links.as_mut(),
                    now: self.now,
                };
                if section.event(&mut cx, event) == EventResponse::Ignored {
                    log::debug!("{} ignored {:?}", section.name(), event);
                }
            }
        }
    }

    /// Any group switching to the hand cursor wins over one reverting to
    /// the arrow.
    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        let mut changes: Vec<CursorHint> = self
            .sections
            .iter_mut()
            .filter_map(|s| s.take_cursor_change())
            .collect();
        if let Some(change) = self.nav.as_mut().and_then(NavBar::take_cursor_change) {
            changes.push(change);
        }
        if changes.is_empty() {
            return None;
        }

        let cursor = if changes.contains(&CursorHint::Pointer) {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        if cursor == self.cursor {
            return None;
        }
        self.cursor = cursor;
        Some(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{GlassShape, RecordingBackend};
    use crate::links::RecordingOpener;

    fn portfolio(shape: GlassShape) -> (Portfolio<RecordingBackend>, RecordingOpener) {
        let links = RecordingOpener::new();
        let config = PortfolioConfig::default()
            .glass(GlassConfig::new(shape))
            .load_assets(false);
        let portfolio = Portfolio::new(
            RecordingBackend::new(),
            config,
            default_sections(),
            Box::new(links.clone()),
        );
        (portfolio, links)
    }

    fn find(tree: &SceneTree, label: &str) -> NodeId {
        tree.iter()
            .find(|(_, node)| node.label == label)
            .map(|(id, _)| id)
            .unwrap_or_else(|| panic!("no node labelled {}", label))
    }

    fn run(p: &mut Portfolio<RecordingBackend>, start: f32, frames: usize) -> Vec<FrameOutput> {
        FrameTime::fixed_steps(start, 60.0, frames)
            .map(|frame| p.frame_at(frame))
            .collect()
    }

    #[test]
    fn test_nav_only_with_bar() {
        let (lens, _) = portfolio(GlassShape::Lens);
        assert!(lens.nav().is_none());
        let (bar, _) = portfolio(GlassShape::Bar);
        assert_eq!(bar.nav().map(|n| n.items().len()), Some(4));
        assert!(bar.tree().children(bar.content_root()).len() >= 11);
    }

    #[test]
    fn test_nav_click_scrolls() {
        let (mut p, _) = portfolio(GlassShape::Bar);
        let label = p.nav().and_then(|n| n.label_node(1)).expect("label");
        p.handle(InputEvent::Click(label));
        let out = p.frame_at(FrameTime::new(1.0 / 60.0, 1.0 / 60.0));
        // 900 px viewport * 4 pages * 0.4 distance * 0.35
        match out.scroll.as_slice() {
            [ScrollCommand::SmoothTo { top }] => assert!((top - 504.0).abs() < 1e-3),
            other => panic!("unexpected commands {:?}", other),
        }
        assert!(p.frame_at(FrameTime::new(1.0 / 60.0, 2.0 / 60.0)).scroll.is_empty());
    }

    #[test]
    fn test_social_hover_and_click() {
        let (mut p, links) = portfolio(GlassShape::Lens);
        let icon = {
            let card = find(p.tree(), "socials:LinkedIn");
            p.tree().children(card)[1]
        };

        p.handle(InputEvent::PointerEnter(icon));
        let out = run(&mut p, 0.0, 1);
        assert_eq!(out[0].cursor, Some(CursorHint::Pointer));

        p.handle(InputEvent::Click(icon));
        assert_eq!(links.opened(), vec!["https://linkedin.com/in/aruv-dand".to_string()]);

        p.handle(InputEvent::PointerLeave(icon));
        let out = run(&mut p, 1.0 / 60.0, 1);
        assert_eq!(out[0].cursor, Some(CursorHint::Default));
    }

    #[test]
    fn test_scroll_moves_content() {
        let (mut p, _) = portfolio(GlassShape::Lens);
        let max = p.scroll().max_scroll();
        p.handle(InputEvent::Scroll { top: max });
        run(&mut p, 0.0, 600);

        let height = p.compositor().content_viewport().height;
        let y = p
            .tree()
            .get(p.content_root())
            .map(|n| n.transform.position.y)
            .unwrap_or(0.0);
        assert!((y - 3.0 * height).abs() < 1e-2);
    }

    #[test]
    fn test_scroll_highlights_nav() {
        let (mut p, _) = portfolio(GlassShape::Bar);
        let top = p.scroll().max_scroll() * 0.4;
        p.handle(InputEvent::Scroll { top });
        run(&mut p, 0.0, 600);

        assert_eq!(p.scroll().active_section(), Some("Experience"));
        let nav = p.nav().expect("bar shows nav");
        assert_eq!(nav.highlighted(), Some(1));
        let outline = nav.label_node(1).and_then(|id| p.tree().get(id)).map(|n| n.outline);
        assert_eq!(outline, Some(crate::nav::NAV_CLICK_OUTLINE));
    }

    #[test]
    fn test_resize_updates_tier_and_buffer() {
        let (mut p, _) = portfolio(GlassShape::Lens);
        assert_eq!(p.tier(), ViewportTier::Desktop);
        p.handle(InputEvent::Resize { width: 500, height: 800 });
        assert_eq!(p.tier(), ViewportTier::Mobile);
        let buffer = p.compositor().buffer();
        assert_eq!(p.compositor().backend().target_size(buffer), Some((500, 800)));

        p.handle(InputEvent::OrientationChange { width: 800, height: 500 });
        assert_eq!(p.tier(), ViewportTier::Tablet);
    }

    #[test]
    fn test_project_placeholders_mounted() {
        let (p, _) = portfolio(GlassShape::Lens);
        let placeholders = p
            .textures()
            .filter(|(_, image)| image.width == crate::assets::PLACEHOLDER_WIDTH)
            .count();
        assert_eq!(placeholders, 3);
        assert_eq!(p.pending_assets(), 0);
    }

    #[test]
    fn test_pointer_move_normalized() {
        let (mut p, _) = portfolio(GlassShape::Lens);
        p.handle(InputEvent::PointerMove { x: 1600.0, y: 0.0 });
        assert_eq!(p.pointer(), Pointer::new(1.0, 1.0));
    }
}
