use super::{EventResponse, Section, SectionContext, SectionEvent, TextureRequest};
use crate::animation::HOVER_SCALE_RATE;
use crate::animator::{Animator, RotationChannel};
use crate::device::ViewportTier;
use crate::interaction::{CursorHint, InteractionGroup, ItemId, VisualStyle};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, SceneNode, SceneTree};
use crate::scroll::depths;

#[derive(Debug, Clone, PartialEq)]
pub struct Social {
    pub name: String,
    pub url: String,
    pub icon_path: String,
    pub color: Color,
}

pub fn default_socials() -> Vec<Social> {
    vec![
        Social {
            name: "GitHub".into(),
            url: "https://github.com/Ruv-And".into(),
            icon_path: "./assets/icons/github.png".into(),
            color: Color::from_hex(0x333333),
        },
        Social {
            name: "LinkedIn".into(),
            url: "https://linkedin.com/in/aruv-dand".into(),
            icon_path: "./assets/icons/linkedin.png".into(),
            color: Color::from_hex(0x0077b5),
        },
    ]
}

const CARD_STYLE: VisualStyle = VisualStyle::PLAIN.hover_scale(1.1);
const CARD_SPACING: f32 = 1.5;

struct Card {
    group: NodeId,
    panel: NodeId,
    icon: NodeId,
}

/// Row of clickable social cards that grow and wobble while hovered.
pub struct SocialsRow {
    socials: Vec<Social>,
    position: Vec3,
    cards: Vec<Card>,
    interaction: InteractionGroup,
}

impl SocialsRow {
    pub fn new(socials: Vec<Social>) -> Self {
        Self {
            socials,
            position: depths::SOCIALS,
            cards: Vec::new(),
            interaction: InteractionGroup::new(CARD_STYLE),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn socials(&self) -> &[Social] {
        &self.socials
    }

    pub fn card(&self, index: usize) -> Option<NodeId> {
        self.cards.get(index).map(|c| c.group)
    }

    /// x of card `index`, centered for a pair.
    pub fn card_x(index: usize) -> f32 {
        (index as f32 - 0.5) * CARD_SPACING
    }
}

impl Default for SocialsRow {
    fn default() -> Self {
        Self::new(default_socials())
    }
}

impl Section for SocialsRow {
    fn name(&self) -> &'static str {
        "socials"
    }

    fn mount(&mut self, tree: &mut SceneTree, animator: &mut Animator, parent: NodeId) {
        let root = tree.insert_child(parent, SceneNode::new("socials").at(self.position));
        self.cards = self
            .socials
            .iter()
            .enumerate()
            .map(|(i, social)| {
                let group = tree.insert_child(
                    root,
                    SceneNode::new(format!("socials:{}", social.name))
                        .at(Vec3::new(Self::card_x(i), 0.0, 0.0)),
                );
                let panel = tree.insert_child(
                    group,
                    SceneNode::panel("socials:card", 0.8, 0.8, 0.1)
                        .color(social.color)
                        .opacity(0.9),
                );
                let icon = tree.insert_child(
                    group,
                    SceneNode::image("socials:icon", 0.5, 0.5).at(Vec3::new(0.0, 0.0, 0.06)),
                );
                animator.rotate(group, RotationChannel::wobble());
                Card { group, panel, icon }
            })
            .collect();
    }

    fn hit(&self, node: NodeId) -> Option<ItemId> {
        self.cards
            .iter()
            .position(|c| c.group == node || c.panel == node || c.icon == node)
    }

    fn event(&mut self, cx: &mut SectionContext, event: SectionEvent) -> EventResponse {
        match event {
            SectionEvent::PointerEnter(i) => {
                self.interaction.pointer_enter(i);
                if let Some(card) = self.cards.get(i) {
                    cx.animator.set_hovered(card.group, true);
                }
            }
            SectionEvent::PointerLeave(i) => {
                self.interaction.pointer_leave(i);
                if let Some(card) = self.cards.get(i) {
                    cx.animator.set_hovered(card.group, false);
                }
            }
            SectionEvent::Click(i) => {
                let Some(social) = self.socials.get(i) else {
                    return EventResponse::Ignored;
                };
                cx.links.open(&social.url);
            }
        }
        EventResponse::Handled
    }

    fn update(&mut self, cx: &mut SectionContext, _tier: ViewportTier) {
        for (i, card) in self.cards.iter().enumerate() {
            let scale = self.interaction.visual(i).scale;
            cx.animator.approach_scale(card.group, scale, HOVER_SCALE_RATE);
        }
    }

    fn textures(&self) -> Vec<TextureRequest> {
        self.cards
            .iter()
            .zip(&self.socials)
            .map(|(card, social)| TextureRequest {
                node: card.icon,
                path: Some(social.icon_path.clone()),
                placeholder: None,
            })
            .collect()
    }

    fn take_cursor_change(&mut self) -> Option<CursorHint> {
        self.interaction.take_cursor_change()
    }
}
