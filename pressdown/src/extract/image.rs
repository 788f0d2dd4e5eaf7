//! Image discovery: attachment items and `<img>` tags scraped from post
//! bodies.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::error::ConvertError;
use crate::model::Image;
use crate::urls::has_image_extension;
use crate::xml::Element;

use super::{items_of_type, selected};

/// Scraped images have no identity of their own in the export.
pub const SCRAPED_IMAGE_ID: &str = "-1";

fn img_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)<img[^>]*src="(.+?\.(?:gif|jpe?g|png))"[^>]*>"#).unwrap()
    })
}

/// Images uploaded as `attachment` items, filtered to recognized image file
/// types. `post_parent` links the attachment to its owning post.
pub fn collect_attached_images(channel: &Element) -> Result<Vec<Image>, ConvertError> {
    let mut images = Vec::new();
    for attachment in items_of_type(channel, "attachment") {
        let url = attachment.require_text("attachment_url")?;
        if !has_image_extension(&url) {
            continue;
        }
        images.push(Image {
            id: attachment.require_text("post_id")?,
            post_id: attachment.require_text("post_parent")?,
            url,
        });
    }

    log::info!("{} attached images found.", images.len());
    Ok(images)
}

/// Images referenced from `<img>` tags in the raw bodies of the selected
/// posts. Relative paths resolve against the post's own permalink.
pub fn collect_scraped_images(
    channel: &Element,
    post_types: &[String],
) -> Result<Vec<Image>, ConvertError> {
    let mut images = Vec::new();
    for post_type in post_types {
        for post in items_of_type(channel, post_type).filter(|item| selected(item)) {
            let post_id = post.require_text("post_id")?;
            let content = post
                .element("encoded")
                .map(Element::text)
                .unwrap_or_default();
            let link = post.require_text("link")?;

            for capture in img_tag_pattern().captures_iter(&content) {
                let src = &capture[1];
                match resolve(&link, src) {
                    Some(url) => images.push(Image {
                        id: SCRAPED_IMAGE_ID.to_string(),
                        post_id: post_id.clone(),
                        url,
                    }),
                    None => log::warn!("skipping unresolvable image URL {src:?} in post {post_id}"),
                }
            }
        }
    }

    log::info!("{} images scraped from post body content.", images.len());
    Ok(images)
}

fn resolve(base: &str, src: &str) -> Option<String> {
    match Url::parse(base) {
        Ok(base_url) => base_url.join(src).ok().map(String::from),
        // No usable base; keep the reference only if it is already absolute.
        Err(_) => Url::parse(src).ok().map(String::from),
    }
}
