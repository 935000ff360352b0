//! Hover and click state for a group of interactive items.
//!
//! One group covers one row of siblings (nav entries, experience tabs,
//! project cards). At most one item per group is hovered; a click marks an
//! item for a short window and then clears itself.
//!
//! Nothing here touches the environment: the pointer cursor is reported as a
//! [`CursorHint`] that the presentation layer picks up with
//! [`InteractionGroup::take_cursor_change`].

use crate::scene::Outline;

/// Index of an item inside its group.
pub type ItemId = usize;

/// Seconds a click stays marked.
pub const CLICK_CLEAR_DELAY: f32 = 0.3;

/// Cursor the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// The default arrow cursor.
    #[default]
    Default,
    /// Pointer/hand cursor for clickable elements.
    Pointer,
}

/// Identifies one click. A newer click always carries a different token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingClick {
    item: ItemId,
    deadline: f32,
    token: ClickToken,
}

/// Derived flags for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemState {
    pub hovered: bool,
    pub active: bool,
    pub clicked: bool,
}

/// How a group turns item state into visuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    pub rest_scale: f32,
    pub hover_scale: f32,
    pub active_scale: f32,
    pub rest_outline: Outline,
    pub clicked_outline: Outline,
}

impl VisualStyle {
    pub const PLAIN: VisualStyle = VisualStyle {
        rest_scale: 1.0,
        hover_scale: 1.0,
        active_scale: 1.0,
        rest_outline: Outline::NONE,
        clicked_outline: Outline::NONE,
    };

    pub const fn hover_scale(mut self, scale: f32) -> Self {
        self.hover_scale = scale;
        self
    }

    pub const fn active_scale(mut self, scale: f32) -> Self {
        self.active_scale = scale;
        self
    }

    pub const fn clicked_outline(mut self, outline: Outline) -> Self {
        self.clicked_outline = outline;
        self
    }
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Target visual for one item; the animator eases toward it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    pub scale: f32,
    pub outline: Outline,
}

/// Hover/active/clicked state machine for one group.
#[derive(Debug, Clone)]
pub struct InteractionGroup {
    hovered: Option<ItemId>,
    active: Option<ItemId>,
    clicked: Option<PendingClick>,
    next_token: u64,
    clear_delay: f32,
    style: VisualStyle,
    cursor: CursorHint,
    cursor_changed: bool,
}

impl InteractionGroup {
    pub fn new(style: VisualStyle) -> Self {
        Self {
            hovered: None,
            active: None,
            clicked: None,
            next_token: 0,
            clear_delay: CLICK_CLEAR_DELAY,
            style,
            cursor: CursorHint::Default,
            cursor_changed: false,
        }
    }

    pub fn clear_delay(mut self, seconds: f32) -> Self {
        self.clear_delay = seconds;
        self
    }

    pub fn pointer_enter(&mut self, id: ItemId) {
        if self.hovered != Some(id) {
            log::debug!("hover enter {}", id);
        }
        self.hovered = Some(id);
        self.set_cursor(CursorHint::Pointer);
    }

    /// Leaving an item that is not the hovered one keeps the hover, but the
    /// cursor always goes back to default.
    pub fn pointer_leave(&mut self, id: ItemId) {
        if self.hovered == Some(id) {
            log::debug!("hover leave {}", id);
            self.hovered = None;
        }
        self.set_cursor(CursorHint::Default);
    }

    /// Mark `id` clicked until `now + clear_delay`, replacing any earlier
    /// click.
    pub fn click(&mut self, id: ItemId, now: f32) -> ClickToken {
        let token = ClickToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.clicked = Some(PendingClick {
            item: id,
            deadline: now + self.clear_delay,
            token,
        });
        log::debug!("click {} (token {})", id, token.0);
        token
    }

    /// Clear an expired click. Returns `true` when something was cleared.
    pub fn tick(&mut self, now: f32) -> bool {
        match self.clicked {
            Some(pending) if now >= pending.deadline => {
                self.clicked = None;
                true
            }
            _ => false,
        }
    }

    /// Clear the click identified by `token`, if it is still the current one.
    pub fn expire(&mut self, token: ClickToken) -> bool {
        match self.clicked {
            Some(pending) if pending.token == token => {
                self.clicked = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_active(&mut self, id: Option<ItemId>) {
        self.active = id;
    }

    pub fn hovered(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    pub fn clicked(&self) -> Option<ItemId> {
        self.clicked.map(|c| c.item)
    }

    pub fn state(&self, id: ItemId) -> ItemState {
        ItemState {
            hovered: self.hovered == Some(id),
            active: self.active == Some(id),
            clicked: self.clicked() == Some(id),
        }
    }

    /// Active wins over hovered for scale.
    pub fn visual(&self, id: ItemId) -> ItemVisual {
        let state = self.state(id);
        let scale = if state.active {
            self.style.active_scale
        } else if state.hovered {
            self.style.hover_scale
        } else {
            self.style.rest_scale
        };
        let outline = if state.clicked {
            self.style.clicked_outline
        } else {
            self.style.rest_outline
        };
        ItemVisual { scale, outline }
    }

    pub fn style(&self) -> &VisualStyle {
        &self.style
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: CursorHint) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.cursor_changed = true;
        }
    }

    /// Take pending cursor change (returns the cursor if it changed since
    /// the last call).
    pub fn take_cursor_change(&mut self) -> Option<CursorHint> {
        if std::mem::take(&mut self.cursor_changed) {
            Some(self.cursor)
        } else {
            None
        }
    }
}

impl Default for InteractionGroup {
    fn default() -> Self {
        Self::new(VisualStyle::PLAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    const A: ItemId = 0;
    const B: ItemId = 1;

    #[test]
    fn test_later_click_survives_earlier_timer() {
        let mut group = InteractionGroup::default();
        let token_a = group.click(A, 0.0);
        group.click(B, 0.1);

        // A's deadline has passed, B's has not
        assert!(!group.tick(0.31));
        assert_eq!(group.clicked(), Some(B));
        assert!(!group.expire(token_a));
        assert_eq!(group.clicked(), Some(B));

        assert!(group.tick(0.41));
        assert_eq!(group.clicked(), None);
    }

    #[test]
    fn test_reclick_same_item_extends() {
        let mut group = InteractionGroup::default();
        group.click(A, 0.0);
        group.click(A, 0.2);
        assert!(!group.tick(0.35));
        assert_eq!(group.clicked(), Some(A));
        assert!(group.tick(0.55));
    }

    #[test]
    fn test_single_hover() {
        let mut group = InteractionGroup::default();
        group.pointer_enter(A);
        group.pointer_enter(B);
        assert_eq!(group.hovered(), Some(B));

        // Stale leave keeps the hover but resets the cursor
        group.pointer_leave(A);
        assert_eq!(group.hovered(), Some(B));
        assert_eq!(group.cursor(), CursorHint::Default);

        group.pointer_leave(B);
        assert_eq!(group.hovered(), None);
    }

    #[test]
    fn test_cursor_changes_are_reported_once() {
        let mut group = InteractionGroup::default();
        assert_eq!(group.take_cursor_change(), None);
        group.pointer_enter(A);
        group.pointer_enter(B);
        assert_eq!(group.take_cursor_change(), Some(CursorHint::Pointer));
        assert_eq!(group.take_cursor_change(), None);
        group.pointer_leave(B);
        assert_eq!(group.take_cursor_change(), Some(CursorHint::Default));
    }

    #[test]
    fn test_visual_priority() {
        let clicked = Outline {
            width: 0.015,
            blur: 0.3,
            color: Color::ACCENT,
            opacity: 0.8,
        };
        let style = VisualStyle::PLAIN
            .hover_scale(1.05)
            .active_scale(1.1)
            .clicked_outline(clicked);
        let mut group = InteractionGroup::new(style);
        group.set_active(Some(A));
        group.pointer_enter(A);
        group.pointer_enter(B);
        group.pointer_enter(A);
        assert_eq!(group.visual(A).scale, 1.1);
        assert_eq!(group.visual(B).scale, 1.0);

        group.pointer_enter(B);
        assert_eq!(group.visual(B).scale, 1.05);

        group.click(B, 1.0);
        assert_eq!(group.visual(B).outline, clicked);
        assert_eq!(group.visual(A).outline, Outline::NONE);
    }
}
