use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{AssetError, Result};

/// SVGs are rasterized at this multiple of their intrinsic size so icons
/// stay sharp on a scaled card.
pub const SVG_RASTER_SCALE: f32 = 2.0;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from a file path
    SvgPath(PathBuf),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgPath(_) | ImageSource::SvgBytes(_))
    }

    fn path(&self) -> Option<&Path> {
        match self {
            ImageSource::Path(p) | ImageSource::SvgPath(p) => Some(p),
            _ => None,
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            ImageSource::SvgPath(path)
        } else {
            ImageSource::Path(path)
        }
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

/// Tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Width over height; 1 for a degenerate image.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl From<image::RgbaImage> for DecodedImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba: img.into_raw(),
        }
    }
}

/// Decode `source` into RGBA8. Blocking; the loader calls it off the frame
/// thread.
pub fn decode(source: &ImageSource) -> Result<DecodedImage> {
    let decoded = match source {
        ImageSource::Path(path) => DecodedImage::from(image::open(path)?.to_rgba8()),
        ImageSource::Bytes(bytes) => DecodedImage::from(image::load_from_memory(bytes)?.to_rgba8()),
        ImageSource::SvgPath(path) => {
            let data = std::fs::read(path)?;
            rasterize_svg(&data, SVG_RASTER_SCALE)?
        }
        ImageSource::SvgBytes(bytes) => rasterize_svg(bytes, SVG_RASTER_SCALE)?,
    };

    if decoded.width == 0 || decoded.height == 0 {
        let name = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<memory>"));
        return Err(AssetError::Empty(name));
    }
    Ok(decoded)
}

fn rasterize_svg(bytes: &[u8], scale: f32) -> Result<DecodedImage> {
    let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default())?;
    let size = tree.size();

    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let Some(mut pixmap) = resvg::tiny_skia::Pixmap::new(width, height) else {
        return Ok(DecodedImage {
            width: 0,
            height: 0,
            rgba: Vec::new(),
        });
    };

    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // Pixmap data is premultiplied RGBA
    Ok(DecodedImage {
        width,
        height,
        rgba: pixmap.take(),
    })
}
