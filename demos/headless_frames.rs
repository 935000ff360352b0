use std::time::Duration;

use glassfolio::compositor::gpu::{GpuBackend, GpuContext};
use glassfolio::prelude::*;

fn main() {
    init_logging(LoggingConfig::default());

    let config = PortfolioConfig::default()
        .size(1280, 720)
        .glass(GlassConfig::new(GlassShape::Bar));

    // Fall back to the recording backend on machines without an adapter
    match GpuContext::headless() {
        Some(gpu) => run(Portfolio::with_defaults(GpuBackend::new(gpu), config)),
        None => run(Portfolio::with_defaults(RecordingBackend::new(), config)),
    }
}

fn run<B: RenderBackend>(mut portfolio: Portfolio<B>) {
    let loaded = portfolio.wait_for_assets(Duration::from_secs(2));
    log::info!("{} textures ready, {} still pending", loaded, portfolio.pending_assets());

    // Scroll halfway down while the pointer drifts across the surface
    let max = portfolio.scroll().max_scroll();
    portfolio.handle(InputEvent::Scroll { top: max * 0.5 });

    for frame in FrameTime::fixed_steps(0.0, 60.0, 180) {
        let x = frame.elapsed / 3.0 * 1280.0;
        portfolio.handle(InputEvent::PointerMove { x, y: 360.0 });
        let out = portfolio.frame_at(frame);
        if let Some(cursor) = out.cursor {
            log::info!("cursor -> {:?}", cursor);
        }
    }

    log::info!(
        "after 3 s: progress {:.3}, section {:?}, glass at {:?}",
        portfolio.scroll().progress(),
        portfolio.scroll().active_section(),
        portfolio.compositor().position()
    );
}
