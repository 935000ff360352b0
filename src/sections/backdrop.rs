use super::{Section, TextureRequest};
use crate::animator::Animator;
use crate::math::Vec3;
use crate::scene::{NodeId, SceneNode, SceneTree};

/// A static photo quad placed in the scroll content.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropImage {
    pub path: String,
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
}

impl BackdropImage {
    pub fn new(path: impl Into<String>, position: Vec3, width: f32, height: f32) -> Self {
        Self {
            path: path.into(),
            position,
            width,
            height,
        }
    }
}

pub fn default_backdrops() -> Vec<BackdropImage> {
    vec![
        BackdropImage::new("assets/images/canada.jpg", Vec3::new(-2.0, 0.0, 3.0), 3.0, 3.0),
        BackdropImage::new("assets/images/golconda.png", Vec3::new(2.0, 0.0, 3.0), 3.0, 3.0),
        BackdropImage::new("assets/images/uiuccampus.jpg", Vec3::new(0.0, -4.3, 6.0), 4.0, 2.0),
    ]
}

/// Photos behind the text; nothing to interact with.
#[derive(Debug, Default)]
pub struct Backdrop {
    images: Vec<BackdropImage>,
    nodes: Vec<NodeId>,
}

impl Backdrop {
    pub fn new(images: Vec<BackdropImage>) -> Self {
        Self {
            images,
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl Section for Backdrop {
    fn name(&self) -> &'static str {
        "backdrop"
    }

    fn mount(&mut self, tree: &mut SceneTree, _animator: &mut Animator, parent: NodeId) {
        self.nodes = self
            .images
            .iter()
            .map(|img| {
                tree.insert_child(
                    parent,
                    SceneNode::image(format!("backdrop:{}", img.path), img.width, img.height).at(img.position),
                )
            })
            .collect();
    }

    fn textures(&self) -> Vec<TextureRequest> {
        self.nodes
            .iter()
            .zip(&self.images)
            .map(|(node, img)| TextureRequest {
                node: *node,
                path: Some(img.path.clone()),
                placeholder: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_and_requests() {
        let mut tree = SceneTree::new();
        let mut animator = Animator::new();
        let root = tree.insert(SceneNode::new("content"));
        let mut backdrop = Backdrop::new(default_backdrops());
        backdrop.mount(&mut tree, &mut animator, root);

        assert_eq!(tree.children(root).len(), 3);
        let campus = backdrop.nodes()[2];
        assert_eq!(tree.world_position(campus), Some(Vec3::new(0.0, -4.3, 6.0)));
        let requests = backdrop.textures();
        assert_eq!(requests[2].path.as_deref(), Some("assets/images/uiuccampus.jpg"));
        assert!(requests.iter().all(|r| r.placeholder.is_none()));
    }
}
