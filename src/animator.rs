//! Per-frame driver for every continuous animation in the scene.
//!
//! Sections attach channels to scene nodes and keep retargeting them as
//! interaction state changes. Once per rendered frame [`Animator::update`]
//! advances each channel by the real elapsed time and writes the result
//! into the node's [`AnimatedTransform`](crate::scene::AnimatedTransform)
//! or opacity. Channels whose node has been unmounted are skipped and
//! dropped on the same frame.

use std::collections::HashMap;

use crate::animation::{
    damp, lerp_toward, HoverWobble, IdleFloat, LoopingScroll, StaggeredFade,
};
use crate::math::Vec3;
use crate::scene::{NodeId, SceneNode, SceneTree};
use crate::time::FrameTime;

/// Normalized pointer position, both axes in `[-1, 1]`, y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub const CENTER: Pointer = Pointer { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// From a pixel position inside a `width` x `height` surface.
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::CENTER;
        }
        Self {
            x: (px / width) * 2.0 - 1.0,
            y: -((py / height) * 2.0 - 1.0),
        }
    }
}

/// Handle to a shared staggered fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FadeGroupId(usize);

/// Fixed-rate approach of a scalar toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub target: f32,
    pub rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PositionChannel {
    target: Vec3,
    smoothing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OpacityChannel {
    Approach(Approach),
    Stagger { group: FadeGroupId, index: usize },
}

/// Vertical bob around a resting y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BobChannel {
    base_y: f32,
    float: IdleFloat,
}

/// What drives a node's rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationChannel {
    /// Oscillate around y while hovered, settle back otherwise
    Wobble { wobble: HoverWobble, hovered: bool },
    /// Continuous y sway
    Sway(IdleFloat),
    /// Follow the pointer: yaw from x, pitch from y
    Tilt { yaw_gain: f32, pitch_gain: f32 },
}

impl RotationChannel {
    pub const GALLERY_TILT: RotationChannel = RotationChannel::Tilt {
        yaw_gain: 0.02,
        pitch_gain: 0.01,
    };

    pub fn wobble() -> Self {
        RotationChannel::Wobble {
            wobble: HoverWobble::CARD,
            hovered: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct NodeChannels {
    position: Option<PositionChannel>,
    bob: Option<BobChannel>,
    marquee: Option<LoopingScroll>,
    scale: Option<Approach>,
    rotation: Option<RotationChannel>,
    opacity: Option<OpacityChannel>,
}

impl NodeChannels {
    fn apply(
        &mut self,
        node: &mut SceneNode,
        frame: &FrameTime,
        pointer: Pointer,
        fades: &[StaggeredFade],
    ) {
        let transform = &mut node.transform;

        if let Some(pos) = self.position {
            transform.position = damp(&transform.position, &pos.target, pos.smoothing, frame.delta);
        }
        if let Some(bob) = self.bob {
            transform.position.y = bob.base_y + bob.float.offset(frame.elapsed);
        }
        if let Some(scroll) = self.marquee.as_mut() {
            transform.position.x = scroll.advance(frame.delta);
        }
        if let Some(scale) = self.scale {
            let s = lerp_toward(&transform.scale.x, &scale.target, scale.rate, frame.delta);
            transform.scale = Vec3::splat(s);
        }
        match self.rotation {
            Some(RotationChannel::Wobble { wobble, hovered }) => {
                transform.rotation.y =
                    wobble.update(transform.rotation.y, hovered, frame.elapsed, frame.delta);
            }
            Some(RotationChannel::Sway(float)) => {
                transform.rotation.y = float.offset(frame.elapsed);
            }
            Some(RotationChannel::Tilt {
                yaw_gain,
                pitch_gain,
            }) => {
                transform.rotation.y = pointer.x * yaw_gain;
                transform.rotation.x = pointer.y * pitch_gain;
            }
            None => {}
        }
        match self.opacity {
            Some(OpacityChannel::Approach(a)) => {
                node.opacity = lerp_toward(&node.opacity, &a.target, a.rate, frame.delta);
            }
            Some(OpacityChannel::Stagger { group, index }) => {
                if let Some(fade) = fades.get(group.0) {
                    node.opacity = fade.opacity(index, frame.elapsed);
                }
            }
            None => {}
        }
    }
}

/// Owns every animation channel and advances them once per frame.
#[derive(Debug, Default)]
pub struct Animator {
    channels: HashMap<NodeId, NodeChannels>,
    fades: Vec<StaggeredFade>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    fn channels_mut(&mut self, node: NodeId) -> &mut NodeChannels {
        self.channels.entry(node).or_default()
    }

    /// Damp `node` toward `target` with time constant `smoothing` seconds.
    /// Calling again only retargets.
    pub fn damp_position(&mut self, node: NodeId, target: Vec3, smoothing: f32) {
        self.channels_mut(node).position = Some(PositionChannel { target, smoothing });
    }

    /// Retarget an existing position channel. Returns `false` if the node
    /// has none.
    pub fn set_position_target(&mut self, node: NodeId, target: Vec3) -> bool {
        match self.channels.get_mut(&node).and_then(|c| c.position.as_mut()) {
            Some(pos) => {
                pos.target = target;
                true
            }
            None => false,
        }
    }

    pub fn approach_scale(&mut self, node: NodeId, target: f32, rate: f32) {
        self.channels_mut(node).scale = Some(Approach { target, rate });
    }

    pub fn approach_opacity(&mut self, node: NodeId, target: f32, rate: f32) {
        self.channels_mut(node).opacity = Some(OpacityChannel::Approach(Approach { target, rate }));
    }

    /// Register a fade shared by a list of nodes.
    pub fn add_fade(&mut self, fade: StaggeredFade) -> FadeGroupId {
        self.fades.push(fade);
        FadeGroupId(self.fades.len() - 1)
    }

    pub fn trigger_fade(&mut self, group: FadeGroupId, now: f32) {
        if let Some(fade) = self.fades.get_mut(group.0) {
            fade.trigger(now);
        }
    }

    pub fn fade(&self, group: FadeGroupId) -> Option<&StaggeredFade> {
        self.fades.get(group.0)
    }

    /// Drive the node's opacity from item `index` of a shared fade.
    pub fn staggered_opacity(&mut self, node: NodeId, group: FadeGroupId, index: usize) {
        self.channels_mut(node).opacity = Some(OpacityChannel::Stagger { group, index });
    }

    pub fn bob(&mut self, node: NodeId, base_y: f32, float: IdleFloat) {
        self.channels_mut(node).bob = Some(BobChannel { base_y, float });
    }

    pub fn rotate(&mut self, node: NodeId, rotation: RotationChannel) {
        self.channels_mut(node).rotation = Some(rotation);
    }

    /// Toggle the hover flag of a wobble channel.
    pub fn set_hovered(&mut self, node: NodeId, hovered: bool) {
        if let Some(RotationChannel::Wobble { hovered: h, .. }) =
            self.channels.get_mut(&node).and_then(|c| c.rotation.as_mut())
        {
            *h = hovered;
        }
    }

    /// Scroll the node along x; it should be the group holding the
    /// duplicated content.
    pub fn marquee(&mut self, node: NodeId, scroll: LoopingScroll) {
        self.channels_mut(node).marquee = Some(scroll);
    }

    pub fn marquee_offset(&self, node: NodeId) -> Option<f32> {
        self.channels
            .get(&node)
            .and_then(|c| c.marquee.as_ref())
            .map(|s| s.offset())
    }

    /// Remove every channel of `node`.
    pub fn detach(&mut self, node: NodeId) {
        self.channels.remove(&node);
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.channels.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Advance every channel by one frame.
    pub fn update(&mut self, tree: &mut SceneTree, frame: &FrameTime, pointer: Pointer) {
        let before = self.channels.len();
        let fades = &self.fades;
        self.channels.retain(|id, channels| match tree.get_mut(*id) {
            Some(node) => {
                channels.apply(node, frame, pointer, fades);
                true
            }
            None => false,
        });

        let pruned = before - self.channels.len();
        if pruned > 0 {
            log::debug!("dropped animation channels for {} unmounted node(s)", pruned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ENTRANCE_SCALE_RATE, HOVER_SCALE_RATE};

    fn frames(count: usize) -> impl Iterator<Item = FrameTime> {
        FrameTime::fixed_steps(0.0, 60.0, count)
    }

    #[test]
    fn test_position_converges() {
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::new("glass"));
        let mut animator = Animator::new();
        let target = Vec3::new(3.0, -2.0, 15.0);
        animator.damp_position(node, target, 0.15);

        let mut prev = f32::MAX;
        for frame in frames(300) {
            animator.update(&mut tree, &frame, Pointer::CENTER);
            let gap = tree.get(node).map(|n| n.transform.position.distance(target)).unwrap_or(0.0);
            assert!(gap <= prev);
            prev = gap;
        }
        assert!(prev < 1e-3);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::new("glass"));
        let mut animator = Animator::new();
        animator.damp_position(node, Vec3::new(10.0, 0.0, 0.0), 0.15);
        for frame in frames(10) {
            animator.update(&mut tree, &frame, Pointer::CENTER);
        }
        let midway = tree.get(node).map(|n| n.transform.position.x).unwrap_or(0.0);
        assert!(midway > 0.0 && midway < 10.0);

        assert!(animator.set_position_target(node, Vec3::ZERO));
        let frame = FrameTime::new(1.0 / 60.0, 1.0);
        animator.update(&mut tree, &frame, Pointer::CENTER);
        let after = tree.get(node).map(|n| n.transform.position.x).unwrap_or(0.0);
        // One frame moves back toward zero, without jumping
        assert!(after < midway && after > 0.0);
    }

    #[test]
    fn test_scale_hover_and_entrance() {
        let mut tree = SceneTree::new();
        let card = tree.insert(SceneNode::new("card").scaled(0.0));
        let mut animator = Animator::new();
        animator.approach_scale(card, 1.0, ENTRANCE_SCALE_RATE);
        for frame in frames(240) {
            animator.update(&mut tree, &frame, Pointer::CENTER);
        }
        let s = tree.get(card).map(|n| n.transform.uniform_scale()).unwrap_or(0.0);
        assert!((s - 1.0).abs() < 1e-3);

        animator.approach_scale(card, 1.05, HOVER_SCALE_RATE);
        // A very long frame lands on the target instead of past it
        animator.update(&mut tree, &FrameTime::new(1.0, 5.0), Pointer::CENTER);
        assert_eq!(tree.get(card).map(|n| n.transform.uniform_scale()), Some(1.05));
    }

    #[test]
    fn test_staggered_opacity() {
        let mut tree = SceneTree::new();
        let lines: Vec<NodeId> = (0..3)
            .map(|i| tree.insert(SceneNode::text(format!("line{}", i), "text", 0.08).opacity(0.0)))
            .collect();
        let mut animator = Animator::new();
        let fade = animator.add_fade(StaggeredFade::default());
        for (i, id) in lines.iter().enumerate() {
            animator.staggered_opacity(*id, fade, i);
        }
        animator.trigger_fade(fade, 1.0);

        animator.update(&mut tree, &FrameTime::new(0.016, 1.15), Pointer::CENTER);
        let opacity = |tree: &SceneTree, i: usize| tree.get(lines[i]).map(|n| n.opacity).unwrap_or(-1.0);
        assert!(opacity(&tree, 0) > 0.0);
        assert!(opacity(&tree, 1) > 0.0);
        assert_eq!(opacity(&tree, 2), 0.0);

        animator.update(&mut tree, &FrameTime::new(0.016, 2.0), Pointer::CENTER);
        for i in 0..3 {
            assert_eq!(opacity(&tree, i), 1.0);
        }
    }

    #[test]
    fn test_marquee_moves_group() {
        let mut tree = SceneTree::new();
        let strip = tree.insert(SceneNode::new("strip"));
        let mut animator = Animator::new();
        animator.marquee(strip, LoopingScroll::new(18.0, 0.5));
        for frame in frames(60) {
            animator.update(&mut tree, &frame, Pointer::CENTER);
        }
        let x = tree.get(strip).map(|n| n.transform.position.x).unwrap_or(0.0);
        assert!((x + 0.5).abs() < 1e-3);
        assert_eq!(animator.marquee_offset(strip), Some(x));
    }

    #[test]
    fn test_tilt_follows_pointer() {
        let mut tree = SceneTree::new();
        let gallery = tree.insert(SceneNode::new("gallery"));
        let mut animator = Animator::new();
        animator.rotate(gallery, RotationChannel::GALLERY_TILT);
        animator.update(&mut tree, &FrameTime::new(0.016, 0.0), Pointer::new(1.0, -1.0));
        let rotation = tree.get(gallery).map(|n| n.transform.rotation);
        assert_eq!(rotation, Some(Vec3::new(-0.01, 0.02, 0.0)));
    }

    #[test]
    fn test_wobble_toggle() {
        let mut tree = SceneTree::new();
        let card = tree.insert(SceneNode::new("card"));
        let mut animator = Animator::new();
        animator.rotate(card, RotationChannel::wobble());
        animator.set_hovered(card, true);
        animator.update(&mut tree, &FrameTime::new(0.016, 0.5), Pointer::CENTER);
        let expected = (0.5f32 * 3.0).sin() * 0.1;
        let y = tree.get(card).map(|n| n.transform.rotation.y).unwrap_or(0.0);
        assert!((y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_unmounted_nodes_are_pruned() {
        let mut tree = SceneTree::new();
        let parent = tree.insert(SceneNode::new("card"));
        let child = tree.insert_child(parent, SceneNode::new("image"));
        let mut animator = Animator::new();
        animator.approach_scale(parent, 1.05, HOVER_SCALE_RATE);
        animator.approach_opacity(child, 0.9, 6.0);
        assert_eq!(animator.len(), 2);

        tree.remove(parent);
        animator.update(&mut tree, &FrameTime::new(0.016, 0.1), Pointer::CENTER);
        assert!(animator.is_empty());
        assert!(!animator.is_animating(child));
    }

    #[test]
    fn test_pointer_from_pixels() {
        let p = Pointer::from_pixels(0.0, 0.0, 800.0, 600.0);
        assert_eq!(p, Pointer::new(-1.0, 1.0));
        assert_eq!(Pointer::from_pixels(400.0, 300.0, 800.0, 600.0), Pointer::CENTER);
        assert_eq!(Pointer::from_pixels(1.0, 1.0, 0.0, 0.0), Pointer::CENTER);
    }
}
