use std::path::PathBuf;
use std::time::Duration;

use glassfolio::assets::AssetRoot;
use glassfolio::compositor::{GlassConfig, GlassShape, RecordingBackend, RenderCommand};
use glassfolio::links::RecordingOpener;
use glassfolio::math::Vec3;
use glassfolio::scene::{NodeId, NodeKind, SceneTree};
use glassfolio::sections::{default_experiences, Backdrop, BackdropImage, Section};
use glassfolio::time::FrameTime;
use glassfolio::{default_sections, InputEvent, Portfolio, PortfolioConfig};

fn find(tree: &SceneTree, label: &str) -> Vec<NodeId> {
    tree.iter()
        .filter(|(_, node)| node.label == label)
        .map(|(id, _)| id)
        .collect()
}

fn text_of(tree: &SceneTree, id: NodeId) -> Option<String> {
    match &tree.get(id)?.kind {
        NodeKind::Text { content, .. } => Some(content.clone()),
        _ => None,
    }
}

fn bar_portfolio() -> Portfolio<RecordingBackend> {
    let config = PortfolioConfig::default()
        .glass(GlassConfig::new(GlassShape::Bar))
        .load_assets(false);
    Portfolio::new(
        RecordingBackend::new(),
        config,
        default_sections(),
        Box::new(RecordingOpener::new()),
    )
}

#[test]
fn test_every_frame_composites_in_order() {
    let mut p = bar_portfolio();
    for frame in FrameTime::fixed_steps(0.0, 60.0, 3) {
        p.frame_at(frame);
    }

    let commands = p.compositor().backend().commands();
    let scenes = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::RenderScene { .. }))
        .count();
    let glass = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::DrawGlass(_)))
        .count();
    assert_eq!(scenes, 3);
    assert_eq!(glass, 3);
}

#[test]
fn test_experience_tab_click_swaps_card() {
    let mut p = bar_portfolio();
    let entries = default_experiences();

    let title = find(p.tree(), "experience:title");
    assert_eq!(title.len(), 1);
    assert_eq!(text_of(p.tree(), title[0]), Some(entries[0].title.clone()));

    let slot = find(p.tree(), "experience:tab:1")[0];
    let panel = p.tree().children(slot)[0];
    p.handle(InputEvent::Click(panel));
    for frame in FrameTime::fixed_steps(0.0, 60.0, 120) {
        p.frame_at(frame);
    }

    let title = find(p.tree(), "experience:title");
    assert_eq!(title.len(), 1);
    assert_eq!(text_of(p.tree(), title[0]), Some(entries[1].title.clone()));
    let opacity = p.tree().get(title[0]).map(|n| n.opacity).unwrap_or(0.0);
    assert!((opacity - 1.0).abs() < 1e-6);
}

#[test]
fn test_nav_pinned_under_glass_top() {
    let mut p = bar_portfolio();
    p.frame_at(FrameTime::new(1.0 / 60.0, 1.0 / 60.0));

    let height = p.compositor().glass_viewport().height;
    let label = p.nav().and_then(|n| n.label_node(0)).expect("nav label");
    let position = p.tree().world_position(label).expect("mounted");
    assert!((position.y - (height / 2.0 - 0.112)).abs() < 1e-4);
    assert!((position.z - 15.1).abs() < 1e-6);
}

#[test]
fn test_backdrop_texture_loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("glassfolio-frame-loop-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).expect("temp dir");
    let file: PathBuf = dir.join("assets/tile.png");
    image::RgbaImage::from_pixel(6, 3, image::Rgba([10, 20, 30, 255]))
        .save(&file)
        .expect("write png");

    let sections: Vec<Box<dyn Section>> = vec![Box::new(Backdrop::new(vec![BackdropImage::new(
        "/assets/tile.png",
        Vec3::new(0.0, 0.0, 3.0),
        3.0,
        1.5,
    )]))];
    let config = PortfolioConfig::default().asset_root(AssetRoot::new(&dir));
    let mut p = Portfolio::new(
        RecordingBackend::new(),
        config,
        sections,
        Box::new(RecordingOpener::new()),
    );

    let quad = find(p.tree(), "backdrop:/assets/tile.png")[0];
    assert!(p.texture(quad).is_none());
    assert_eq!(p.wait_for_assets(Duration::from_secs(5)), 1);
    let texture = p.texture(quad).expect("loaded");
    assert_eq!((texture.width, texture.height), (6, 3));
    assert_eq!(p.pending_assets(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}
