//! The configuration contract consumed by the conversion pipeline.
//!
//! These options are supplied by the surrounding shell (CLI, wizard, or a
//! programmatic caller); the library itself never prompts or reads the
//! environment. `pressdown-config` provides a layered TOML loader that
//! materializes this struct from defaults plus user overrides.

use serde::Deserialize;

/// Options steering extraction and content translation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Convert pages and custom post types in addition to plain posts.
    pub include_other_types: bool,
    /// Collect images uploaded as attachments of a post.
    pub save_attached_images: bool,
    /// Collect images referenced from `<img>` tags in post bodies, and
    /// rewrite body references to the local `images/` folder the writer
    /// downloads into.
    pub save_scraped_images: bool,
    /// Include the time component in post dates
    /// (`2020-12-25` becomes `2020-12-25T11:20:35.000Z`).
    pub include_time_with_date: bool,
    /// Custom strftime date format. Takes precedence over
    /// `include_time_with_date` when set.
    pub custom_date_formatting: Option<String>,
    /// Categories excluded from post frontmatter. This does not filter out
    /// posts themselves, just the category attached to them.
    pub filter_categories: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_other_types: false,
            save_attached_images: true,
            save_scraped_images: true,
            include_time_with_date: false,
            custom_date_formatting: None,
            filter_categories: vec!["uncategorized".to_string()],
        }
    }
}
