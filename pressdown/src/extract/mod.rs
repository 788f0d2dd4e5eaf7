//! Record extractors
//!
//! Pure functions over the parsed export tree. Each extractor walks the
//! channel's `<item>` (or `<author>`) children and derives one record kind;
//! none of them hold state across calls, and none touch I/O. Extraction of a
//! single post degrades gracefully: optional fields (category, author, cover
//! image id) become `None` rather than failing the post, while fields in the
//! export's required set raise `MissingField`.

pub mod author;
pub mod date;
pub mod image;
pub mod post;

pub use author::collect_authors;
pub use image::{collect_attached_images, collect_scraped_images};
pub use post::{collect_posts, post_types};

use crate::xml::Element;

/// Export post types that are never converted, even when the caller asks
/// for "all types". Effectively this leaves `post`, `page`, and custom
/// types.
const EXCLUDED_TYPES: [&str; 5] = [
    "attachment",
    "revision",
    "nav_menu_item",
    "custom_css",
    "customize_changeset",
];

/// All channel items of one post type.
pub(crate) fn items_of_type<'a>(
    channel: &'a Element,
    post_type: &'a str,
) -> impl Iterator<Item = &'a Element> {
    channel
        .elements("item")
        .filter(move |item| item.text_of("post_type").as_deref() == Some(post_type))
}

/// Whether an item survives status selection (published content only).
pub(crate) fn selected(item: &Element) -> bool {
    let status = item.text_of("status").unwrap_or_default();
    status != "trash" && status != "draft"
}
