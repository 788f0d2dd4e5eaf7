//! The document model handed to the writer.

use serde::Serialize;

/// One converted post: frontmatter fields plus translated Markdown content.
///
/// `image_urls` and `cover_image` are filled in by the associator after
/// extraction; everything else is immutable once extracted.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Raw export id. Unique within a run.
    pub id: String,
    /// Percent-decoded post slug.
    pub slug: String,
    /// Entity-decoded post title.
    pub title: String,
    /// Publish date, formatted per [`crate::config::ConvertOptions`].
    pub date: String,
    /// The post type this item was exported as (`post`, `page`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// First category outside the configured exclusion set, if any.
    pub category: Option<String>,
    /// Tag nicenames in document order. Duplicates in the export are
    /// preserved as-is.
    pub tags: Vec<String>,
    /// Author display value, if the export carries one.
    pub author: Option<String>,
    /// Id of the designated featured image, from `_thumbnail_id` postmeta.
    pub cover_image_id: Option<String>,
    /// Filename of the featured image, set during association.
    pub cover_image: Option<String>,
    /// Unique image URLs attached to this post, in first-seen order.
    pub image_urls: Vec<String>,
    /// Translated excerpt Markdown.
    pub excerpt: String,
    /// Translated body Markdown.
    pub content: String,
}

/// One author record, copied verbatim from the export channel.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A discovered image reference. Only lives through the association phase;
/// not part of the final output.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Export id of the attachment item, or `"-1"` for images scraped from
    /// post bodies (those have no identity of their own).
    pub id: String,
    /// Id of the owning/parent post.
    pub post_id: String,
    /// Absolute URL of the image file.
    pub url: String,
}
