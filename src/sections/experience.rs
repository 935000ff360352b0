//! Tab buttons on the left, one content card for the active tab on the
//! right.

use super::{EventResponse, Section, SectionContext, SectionEvent};
use crate::animation::{Easing, IdleFloat, StaggeredFade, ENTRANCE_SCALE_RATE, HOVER_SCALE_RATE};
use crate::animator::{Animator, FadeGroupId, RotationChannel};
use crate::device::ViewportTier;
use crate::interaction::{CursorHint, InteractionGroup, ItemId, VisualStyle};
use crate::layout::{ExperienceCardLayout, EXPERIENCE_BULLET_STYLE};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, Outline, SceneNode, SceneTree};
use crate::scroll::depths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    /// Tab label
    pub tab: String,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

impl ExperienceEntry {
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.company, self.duration)
    }
}

pub fn default_experiences() -> Vec<ExperienceEntry> {
    let entry = |tab: &str, title: &str, company: &str, duration: &str, bullets: &[&str]| ExperienceEntry {
        tab: tab.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        duration: duration.to_string(),
        bullets: bullets.iter().map(|b| b.to_string()).collect(),
    };
    vec![
        entry(
            "GEICO",
            "Software Development Intern",
            "GEICO",
            "June 2025 - Present",
            &[
                "Designed and built an internal PDLC orchestration platform using Figma, Django, GraphQL, PostgreSQL, and React/TypeScript to streamline developer workflows and accelerate project creation across a team of 3500+ engineers.",
                "Developed a REST API aligned with internal company procedures, incorporating Shift Left principles to reduce 27% of developer bottlenecks through earlier reviews, testing, and standardized processes.",
                "Integrated communication and automation features using Azure DevOps, Slack, and Office 365 APIs, enabling DevOps ticket generation and improving cross-team visibility.",
                "Implemented LLM-based risk categorization with Google Gemini API to proactively flag high-risk projects and enhance product creation planning.",
            ],
        ),
        entry(
            "E42.ai",
            "Software Intern",
            "E42.ai",
            "June 2024 - August 2024",
            &[
                "Utilized the company's platform to configure virtual AI workers for automating human resource processes.",
                "Tested the company’s generative AI model for accuracy using training documents and refined its responses.",
                "Built an MLOps pipeline simulating natural language-to-SQL with LLMs; generated fake employee datasets (e.g. name, address, phone number, etc.) with Python/Faker, stored in MySQL, used ChromaDB for SQL retrieval, and ChatDB to convert query results into English answers.",
            ],
        ),
        entry(
            "Bear Paddle",
            "Swimming Instructor",
            "Bear Paddle Swim School",
            "June 2021 – August 2021",
            &[
                "Taught life-saving swimming fundamentals to over 40 children aged 6 months to 13 years, promoting water safety and confidence in the pool.",
                "Provided personalized instruction and managed the safety of multiple children simultaneously, ensuring a secure and supportive learning environment.",
                "Effectively kept children engaged and entertained during lessons, contributing to improved customer retention and positive feedback from parents.",
            ],
        ),
    ]
}

const TAB_STYLE: VisualStyle = VisualStyle::PLAIN.hover_scale(1.05).active_scale(1.1);
const TAB_SPACING: f32 = 0.7;
const TABS_OFFSET: Vec3 = Vec3::new(-2.0, 0.0, 0.0);
const CARD_OFFSET: Vec3 = Vec3::new(1.0, -0.5, 0.0);
const TEXT_DEPTH: f32 = 0.03;
/// Slow sway of the tab column.
const TABS_SWAY: IdleFloat = IdleFloat::new(0.01, 0.3, 0.0);

const LABEL_OUTLINE: Outline = Outline {
    width: 0.005,
    blur: 0.0,
    color: Color::BLACK,
    opacity: 0.5,
};

struct Tab {
    panel: NodeId,
    label: NodeId,
}

/// Nodes of the currently shown card; rebuilt on every tab switch.
struct Card {
    panel: NodeId,
    text: NodeId,
}

pub struct ExperienceSection {
    entries: Vec<ExperienceEntry>,
    position: Vec3,
    interaction: InteractionGroup,
    tabs: Vec<Tab>,
    tab_group: Option<NodeId>,
    card_group: Option<NodeId>,
    card: Option<Card>,
    fade: Option<FadeGroupId>,
}

impl ExperienceSection {
    pub fn new(entries: Vec<ExperienceEntry>) -> Self {
        let mut interaction = InteractionGroup::new(TAB_STYLE);
        if !entries.is_empty() {
            interaction.set_active(Some(0));
        }
        Self {
            entries,
            position: depths::EXPERIENCE,
            interaction,
            tabs: Vec::new(),
            tab_group: None,
            card_group: None,
            card: None,
            fade: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<ItemId> {
        self.interaction.active()
    }

    pub fn interaction(&self) -> &InteractionGroup {
        &self.interaction
    }

    pub fn tab_panel(&self, index: usize) -> Option<NodeId> {
        self.tabs.get(index).map(|t| t.panel)
    }

    pub fn card_panel(&self) -> Option<NodeId> {
        self.card.as_ref().map(|c| c.panel)
    }

    /// Text nodes of the current card: title, subtitle, then bullets.
    pub fn card_text(&self, tree: &SceneTree) -> Vec<NodeId> {
        self.card
            .as_ref()
            .map(|c| tree.children(c.text).to_vec())
            .unwrap_or_default()
    }

    /// Show tab `index`. Out-of-range or already-active tabs are ignored.
    pub fn select(&mut self, tree: &mut SceneTree, animator: &mut Animator, index: ItemId, now: f32) {
        if index >= self.entries.len() || self.interaction.active() == Some(index) {
            return;
        }
        log::debug!("experience tab {} -> {}", self.interaction.active().unwrap_or(0), index);
        self.interaction.set_active(Some(index));
        self.build_card(tree, animator, now);
    }

    fn build_card(&mut self, tree: &mut SceneTree, animator: &mut Animator, now: f32) {
        if let Some(old) = self.card.take() {
            tree.remove(old.panel);
            tree.remove(old.text);
        }
        let (Some(group), Some(index)) = (self.card_group, self.interaction.active()) else {
            return;
        };
        let Some(entry) = self.entries.get(index) else {
            return;
        };

        let layout = ExperienceCardLayout::compute(&entry.bullets);
        let panel = tree.insert_child(
            group,
            SceneNode::panel("experience:card", layout.width, layout.height, 0.05)
                .color(Color::SLATE)
                .opacity(0.9)
                .emissive(0.05)
                .scaled(0.0),
        );
        animator.approach_scale(panel, 1.0, ENTRANCE_SCALE_RATE);

        let text = tree.insert_child(
            group,
            SceneNode::new("experience:text").at(Vec3::new(0.0, 0.0, TEXT_DEPTH)),
        );
        let mut lines = vec![
            SceneNode::text("experience:title", entry.title.clone(), 0.18)
                .color(Color::ACCENT)
                .at(Vec3::new(0.0, layout.title_y(), 0.0)),
            SceneNode::text("experience:subtitle", entry.subtitle(), 0.12)
                .color(Color::from_hex(0xcccccc))
                .at(Vec3::new(0.0, layout.subtitle_y(), 0.0)),
        ];
        lines[0].outline = LABEL_OUTLINE;
        for (i, bullet) in entry.bullets.iter().enumerate() {
            lines.push(
                SceneNode::text(
                    format!("experience:bullet:{}", i),
                    format!("• {}", bullet),
                    EXPERIENCE_BULLET_STYLE.font_size,
                )
                .at(Vec3::new(layout.bullet_x(), layout.bullet_y(i), 0.0)),
            );
        }

        let fade = *self
            .fade
            .get_or_insert_with(|| animator.add_fade(StaggeredFade::default().easing(Easing::EaseOutCubic)));
        animator.trigger_fade(fade, now);
        for (i, line) in lines.into_iter().enumerate() {
            let id = tree.insert_child(text, line.opacity(0.0));
            animator.staggered_opacity(id, fade, i);
        }

        self.card = Some(Card { panel, text });
    }
}

impl Default for ExperienceSection {
    fn default() -> Self {
        Self::new(default_experiences())
    }
}

impl Section for ExperienceSection {
    fn name(&self) -> &'static str {
        "experience"
    }

    fn mount(&mut self, tree: &mut SceneTree, animator: &mut Animator, parent: NodeId) {
        let root = tree.insert_child(parent, SceneNode::new("experience").at(self.position));

        let tab_group = tree.insert_child(root, SceneNode::new("experience:tabs").at(TABS_OFFSET));
        animator.rotate(tab_group, RotationChannel::Sway(TABS_SWAY));
        self.tabs = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let slot = tree.insert_child(
                    tab_group,
                    SceneNode::new(format!("experience:tab:{}", i))
                        .at(Vec3::new(0.0, -(i as f32) * TAB_SPACING, 0.0)),
                );
                let panel = tree.insert_child(
                    slot,
                    SceneNode::panel("experience:tab:panel", 1.5, 0.5, 0.05).opacity(0.8),
                );
                let mut label = SceneNode::text("experience:tab:label", entry.tab.clone(), 0.15)
                    .at(Vec3::new(0.0, 0.0, TEXT_DEPTH));
                label.outline = LABEL_OUTLINE;
                let label = tree.insert_child(slot, label);
                Tab { panel, label }
            })
            .collect();

        self.tab_group = Some(tab_group);
        self.card_group = Some(tree.insert_child(root, SceneNode::new("experience:card").at(CARD_OFFSET)));
        self.build_card(tree, animator, 0.0);
    }

    fn hit(&self, node: NodeId) -> Option<ItemId> {
        self.tabs
            .iter()
            .position(|t| t.panel == node || t.label == node)
    }

    fn event(&mut self, cx: &mut SectionContext, event: SectionEvent) -> EventResponse {
        match event {
            SectionEvent::PointerEnter(i) => self.interaction.pointer_enter(i),
            SectionEvent::PointerLeave(i) => self.interaction.pointer_leave(i),
            SectionEvent::Click(i) => self.select(cx.tree, cx.animator, i, cx.now),
        }
        EventResponse::Handled
    }

    fn update(&mut self, cx: &mut SectionContext, _tier: ViewportTier) {
        let active = self.interaction.active();
        for (i, tab) in self.tabs.iter().enumerate() {
            let visual = self.interaction.visual(i);
            cx.animator.approach_scale(tab.panel, visual.scale, HOVER_SCALE_RATE);
            if let Some(node) = cx.tree.get_mut(tab.panel) {
                let is_active = active == Some(i);
                node.color = if is_active { Color::ACCENT } else { Color::SLATE };
                node.emissive_intensity = if is_active { 0.2 } else { 0.0 };
            }
        }
    }

    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        self.interaction.take_cursor_change()
    }
}
