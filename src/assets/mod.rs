//! Image assets: sources, decoding, background loading and generated
//! placeholders.
//!
//! Textures never block the frame loop. A section mounts its quad with a
//! placeholder, asks the [`AssetLoader`] for the real image and swaps it in
//! whenever a later frame drains the result.

mod loader;
mod placeholder;
mod source;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{AssetLoader, LoadedImage};
pub use placeholder::{render_placeholder, PlaceholderStyle, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
pub use source::{decode, DecodedImage, ImageSource, SVG_RASTER_SCALE};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("SVG parse error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Image has no pixels: {0}")]
    Empty(PathBuf),

    #[error("Asset loader has shut down")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// Site-relative form of an asset path: one leading `/` is dropped if
/// present, then one is prepended.
pub fn asset_path(path: &str) -> String {
    let clean = path.strip_prefix('/').unwrap_or(path);
    format!("/{}", clean)
}

/// Directory that site-relative asset paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoot {
    dir: PathBuf,
}

impl AssetRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// File path for `/assets/x.png`, `./assets/x.png` or `assets/x.png`.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let site = asset_path(path.trim_start_matches("./"));
        self.dir.join(site.trim_start_matches('/'))
    }

    /// [`ImageSource`] for a site-relative path, picking SVG by extension.
    pub fn source(&self, path: &str) -> ImageSource {
        ImageSource::from(self.resolve(path))
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path() {
        assert_eq!(asset_path("/assets/projects/snake.png"), "/assets/projects/snake.png");
        assert_eq!(asset_path("assets/icons/github.png"), "/assets/icons/github.png");
        assert_eq!(asset_path("//double"), "//double");
        assert_eq!(asset_path(""), "/");
    }

    #[test]
    fn test_root_resolve() {
        let root = AssetRoot::new("/srv/site");
        assert_eq!(root.resolve("/assets/a.png"), PathBuf::from("/srv/site/assets/a.png"));
        assert_eq!(root.resolve("./assets/a.png"), PathBuf::from("/srv/site/assets/a.png"));
        assert_eq!(root.resolve("assets/a.png"), root.resolve("/assets/a.png"));
        assert!(matches!(root.source("icons/x.SVG"), ImageSource::SvgPath(_)));
        assert!(matches!(root.source("icons/x.png"), ImageSource::Path(_)));
    }

    #[test]
    fn test_error_display() {
        let err = AssetError::Empty(PathBuf::from("blank.png"));
        assert_eq!(err.to_string(), "Image has no pixels: blank.png");
    }
}
