pub mod animation;
pub mod animator;
pub mod assets;
pub mod device;
pub mod interaction;
pub mod layout;
pub mod links;
pub mod logging;
pub mod math;
pub mod nav;
pub mod portfolio;
pub mod scene;
pub mod scroll;
pub mod sections;
pub mod time;

// The compositor is public for hosts that bring their own renderer
pub mod compositor;

pub use portfolio::{default_sections, FrameOutput, InputEvent, Portfolio, PortfolioConfig};

pub mod prelude {
    pub use crate::animator::{Animator, Pointer};
    pub use crate::compositor::{
        GlassAnchor, GlassCompositor, GlassConfig, GlassShape, RecordingBackend, RenderBackend,
    };
    pub use crate::device::{SizeClass, TierWatcher, ViewportTier};
    pub use crate::interaction::{CursorHint, InteractionGroup};
    pub use crate::links::{LinkOpener, SystemBrowser};
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::math::{Color, Vec3};
    pub use crate::nav::{NavBar, NavItem};
    pub use crate::scene::{NodeId, SceneNode, SceneTree};
    pub use crate::scroll::{ScrollCommand, ScrollConfig, ScrollController};
    pub use crate::sections::{Section, SectionContext, SectionEvent};
    pub use crate::time::{FrameClock, FrameTime};
    pub use crate::{default_sections, FrameOutput, InputEvent, Portfolio, PortfolioConfig};
}
