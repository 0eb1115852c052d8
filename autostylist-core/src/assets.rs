// File: autostylist-core/src/assets.rs

/// Shown wherever an item image is missing or fails to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='200' height='200'%3E%3Crect fill='%23f0f0f0' width='200' height='200'/%3E%3Ctext x='50%25' y='50%25' text-anchor='middle' dy='.3em' fill='%23999' font-size='14'%3ENo Image%3C/text%3E%3C/svg%3E";

/// Absolute URL for a stored image path.
///
/// Paths that already start with `http` are returned untouched; everything
/// else is joined onto `static_root`.
pub fn image_url(static_root: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        static_root.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Placeholder,
}

impl ImageSource {
    pub fn resolve(static_root: &str, path: Option<&str>) -> Self {
        match path.map(str::trim) {
            Some(p) if !p.is_empty() => ImageSource::Remote(image_url(static_root, p)),
            _ => ImageSource::Placeholder,
        }
    }

    pub fn as_url(&self) -> &str {
        match self {
            ImageSource::Remote(url) => url,
            ImageSource::Placeholder => PLACEHOLDER_IMAGE,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}
