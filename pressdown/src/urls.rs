//! Small URL helpers shared by the extractors, the associator, and the
//! content translator.

/// Image file extensions the converter cares about.
const IMAGE_EXTENSIONS: [&str; 4] = [".gif", ".jpg", ".jpeg", ".png"];

/// True when the URL (or path) ends in a recognized image extension,
/// case-insensitive.
pub fn has_image_extension(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Last path segment of a URL (`https://a/b/photo.jpg` -> `photo.jpg`).
pub fn filename_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}
