//! Viewport classification and the size tables keyed on it.

use std::fmt;

/// Widest viewport (px) still treated as a phone.
pub const MOBILE_MAX_WIDTH: f32 = 639.0;
/// Widest viewport (px) still treated as a tablet.
pub const TABLET_MAX_WIDTH: f32 = 1023.0;

/// Discrete viewport size classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportTier {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportTier {
    /// Choose one of three values by tier.
    pub fn pick<T>(self, mobile: T, tablet: T, desktop: T) -> T {
        match self {
            ViewportTier::Mobile => mobile,
            ViewportTier::Tablet => tablet,
            ViewportTier::Desktop => desktop,
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportTier::Mobile
    }
}

impl fmt::Display for ViewportTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewportTier::Mobile => "mobile",
            ViewportTier::Tablet => "tablet",
            ViewportTier::Desktop => "desktop",
        })
    }
}

/// Classify a viewport width in CSS pixels.
///
/// Bounds are inclusive. NaN and negative widths count as mobile.
pub fn resolve(width: f32) -> ViewportTier {
    if width.is_nan() || width <= MOBILE_MAX_WIDTH {
        ViewportTier::Mobile
    } else if width <= TABLET_MAX_WIDTH {
        ViewportTier::Tablet
    } else {
        ViewportTier::Desktop
    }
}

/// Typography size class used by section headings and body copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// World-space font size for this class at `tier`.
    pub fn font_size(self, tier: ViewportTier) -> f32 {
        match self {
            SizeClass::Small => tier.pick(0.07, 0.12, 0.19),
            SizeClass::Medium => tier.pick(0.13, 0.22, 0.35),
            SizeClass::Large => tier.pick(0.2, 0.4, 0.7),
        }
    }
}

/// Vertical step between stacked lines of section text.
pub fn line_step(font_size: f32) -> f32 {
    font_size * 1.2
}

/// Spacing and font size of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavMetrics {
    pub spacing: f32,
    pub font_size: f32,
}

impl NavMetrics {
    pub fn for_tier(tier: ViewportTier) -> Self {
        match tier {
            ViewportTier::Mobile => NavMetrics {
                spacing: 0.2,
                font_size: 0.035,
            },
            ViewportTier::Tablet => NavMetrics {
                spacing: 0.24,
                font_size: 0.045,
            },
            ViewportTier::Desktop => NavMetrics {
                spacing: 0.3,
                font_size: 0.045,
            },
        }
    }
}

/// Handle returned by [`TierWatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type TierCallback = Box<dyn FnMut(ViewportTier)>;

/// Tracks the current tier across resize and orientation events.
///
/// Subscribers hear about a change exactly once; resizes that stay inside
/// the current tier notify nobody.
pub struct TierWatcher {
    width: f32,
    tier: ViewportTier,
    subscribers: Vec<(SubscriptionId, TierCallback)>,
    next_id: u64,
}

impl TierWatcher {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            tier: resolve(width),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn tier(&self) -> ViewportTier {
        self.tier
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn subscribe(&mut self, callback: impl FnMut(ViewportTier) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Feed a new viewport width. Returns `true` when the tier changed.
    pub fn on_resize(&mut self, width: f32) -> bool {
        self.width = width;
        let tier = resolve(width);
        if tier == self.tier {
            return false;
        }
        log::debug!("viewport tier {} -> {} at width {}", self.tier, tier, width);
        self.tier = tier;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(tier);
        }
        true
    }

    /// Orientation flips report the post-rotation width.
    pub fn on_orientation_change(&mut self, width: f32) -> bool {
        self.on_resize(width)
    }
}

impl fmt::Debug for TierWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TierWatcher")
            .field("width", &self.width)
            .field("tier", &self.tier)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
