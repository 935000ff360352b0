//! Generated stand-in for a project screenshot: a diagonal gradient with
//! the project title and its first technologies.

use cosmic_text::{Align, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};

use super::source::DecodedImage;
use crate::animation::Animatable;
use crate::math::Color;

pub const PLACEHOLDER_WIDTH: u32 = 1024;
pub const PLACEHOLDER_HEIGHT: u32 = 512;

const TITLE_PX: f32 = 56.0;
const TITLE_BASELINE: f32 = 280.0;
const TECH_PX: f32 = 32.0;
const TECH_BASELINE: f32 = 360.0;
const TECH_COLOR: Color = Color::from_hex(0xcccccc);
const SHADOW: Color = Color::rgba(0.0, 0.0, 0.0, 0.5);
const SHADOW_OFFSET: i32 = 3;
/// At most this many technologies are listed.
const MAX_TECHS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderStyle {
    pub from: Color,
    pub to: Color,
}

impl PlaceholderStyle {
    pub const FEATURED: PlaceholderStyle = PlaceholderStyle {
        from: Color::ACCENT,
        to: Color::from_hex(0x8b5cf6),
    };
    pub const REGULAR: PlaceholderStyle = PlaceholderStyle {
        from: Color::SLATE,
        to: Color::from_hex(0x606080),
    };

    pub fn for_project(featured: bool) -> Self {
        if featured {
            Self::FEATURED
        } else {
            Self::REGULAR
        }
    }

    /// Gradient colour at a pixel; the axis runs from the top-left to the
    /// bottom-right corner.
    fn sample(&self, x: u32, y: u32) -> Color {
        let (w, h) = (PLACEHOLDER_WIDTH as f32, PLACEHOLDER_HEIGHT as f32);
        let t = (x as f32 * w + y as f32 * h) / (w * w + h * h);
        Color::lerp(&self.from, &self.to, t.clamp(0.0, 1.0))
    }
}

/// Paint a placeholder. Text is skipped silently if `font_system` has no
/// usable font.
pub fn render_placeholder<S: AsRef<str>>(
    font_system: &mut FontSystem,
    style: &PlaceholderStyle,
    title: &str,
    technologies: &[S],
) -> DecodedImage {
    let mut canvas = image::RgbaImage::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |x, y| {
        image::Rgba(style.sample(x, y).to_rgba8())
    });

    let techs = technologies
        .iter()
        .take(MAX_TECHS)
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" • ");

    let mut cache = SwashCache::new();
    let title_attrs = Attrs::new().family(Family::SansSerif).weight(Weight::BOLD);
    let tech_attrs = Attrs::new().family(Family::SansSerif);

    draw_centered(&mut canvas, font_system, &mut cache, title, &title_attrs, TITLE_PX, TITLE_BASELINE, SHADOW, SHADOW_OFFSET);
    draw_centered(&mut canvas, font_system, &mut cache, title, &title_attrs, TITLE_PX, TITLE_BASELINE, Color::WHITE, 0);
    draw_centered(&mut canvas, font_system, &mut cache, &techs, &tech_attrs, TECH_PX, TECH_BASELINE, TECH_COLOR, 0);

    DecodedImage::from(canvas)
}

#[allow(clippy::too_many_arguments)]
fn draw_centered(
    canvas: &mut image::RgbaImage,
    font_system: &mut FontSystem,
    cache: &mut SwashCache,
    text: &str,
    attrs: &Attrs,
    px: f32,
    baseline: f32,
    color: Color,
    offset: i32,
) {
    if text.is_empty() {
        return;
    }
    let mut buffer = Buffer::new(font_system, Metrics::new(px, px * 1.2));
    buffer.set_size(font_system, Some(PLACEHOLDER_WIDTH as f32), None);
    buffer.set_text(font_system, text, attrs, Shaping::Advanced, Some(Align::Center));
    buffer.shape_until_scroll(font_system, true);

    // Top of the first line sits roughly one ascent above the baseline
    let top = (baseline - px * 0.9) as i32 + offset;
    let [r, g, b, a] = color.to_rgba8();
    let ink = cosmic_text::Color::rgba(r, g, b, a);

    buffer.draw(font_system, cache, ink, |x, y, w, h, c| {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                blend(canvas, x + dx + offset, top + y + dy, c);
            }
        }
    });
}

/// Source-over blend of one coverage sample.
fn blend(canvas: &mut image::RgbaImage, x: i32, y: i32, c: cosmic_text::Color) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let alpha = c.a() as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in px.0.iter_mut().zip([c.r(), c.g(), c.b()]) {
        *dst = (src as f32 * alpha + *dst as f32 * (1.0 - alpha)).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(img: &DecodedImage, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * img.width + x) * 4) as usize;
        [img.rgba[i], img.rgba[i + 1], img.rgba[i + 2], img.rgba[i + 3]]
    }

    #[test]
    fn test_gradient_corners() {
        let mut fonts = FontSystem::new();
        let img = render_placeholder(&mut fonts, &PlaceholderStyle::REGULAR, "", &[] as &[&str]);
        assert_eq!((img.width, img.height), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
        assert_eq!(px(&img, 0, 0), Color::SLATE.to_rgba8());
        assert_eq!(px(&img, 1023, 511), [0x60, 0x60, 0x80, 255]);
    }

    #[test]
    fn test_featured_gradient() {
        let style = PlaceholderStyle::for_project(true);
        assert_eq!(style, PlaceholderStyle::FEATURED);
        assert_eq!(style.sample(0, 0), Color::ACCENT);
    }

    #[test]
    fn test_text_stays_inside_canvas() {
        let mut fonts = FontSystem::new();
        let img = render_placeholder(
            &mut fonts,
            &PlaceholderStyle::REGULAR,
            "QLearning Snake Agent",
            &["Python", "Numpy", "Pygame", "Dropped"],
        );
        assert_eq!(img.rgba.len(), (PLACEHOLDER_WIDTH * PLACEHOLDER_HEIGHT * 4) as usize);
        // Bottom-left corner is far from any text
        let corner = px(&img, 0, 511);
        assert_eq!(corner[3], 255);
    }
}
