//! Post extraction: type discovery, status selection, and frontmatter
//! field derivation.

use percent_encoding::percent_decode_str;

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::model::Post;
use crate::translate::{TranslateOptions, Translator};
use crate::xml::Element;

use super::date::format_post_date;
use super::{items_of_type, selected, EXCLUDED_TYPES};

/// The set of post types this run converts.
///
/// When other types are requested, every item's `post_type` is scanned and
/// the distinct set (minus the fixed denylist) is kept in first-seen
/// document order. Otherwise just plain old vanilla "post" posts.
pub fn post_types(channel: &Element, options: &ConvertOptions) -> Vec<String> {
    if !options.include_other_types {
        return vec!["post".to_string()];
    }

    let mut types: Vec<String> = Vec::new();
    for item in channel.elements("item") {
        let Some(post_type) = item.text_of("post_type") else {
            continue;
        };
        if EXCLUDED_TYPES.contains(&post_type.as_str()) {
            continue;
        }
        if !types.contains(&post_type) {
            types.push(post_type);
        }
    }
    types
}

/// Extract one `Post` per selected item of each requested type, translating
/// excerpt and body to Markdown along the way.
pub fn collect_posts(
    channel: &Element,
    post_types: &[String],
    options: &ConvertOptions,
) -> Result<Vec<Post>, ConvertError> {
    let translator = Translator::new(TranslateOptions {
        rewrite_image_paths: options.save_scraped_images,
    });

    let mut all_posts = Vec::new();
    for post_type in post_types {
        let mut count = 0usize;
        for item in items_of_type(channel, post_type).filter(|item| selected(item)) {
            all_posts.push(build_post(item, post_type, options, &translator)?);
            count += 1;
        }
        if post_types.len() > 1 {
            log::info!("{count} \"{post_type}\" posts found.");
        }
    }

    if post_types.len() == 1 {
        log::info!("{} posts found.", all_posts.len());
    }
    Ok(all_posts)
}

fn build_post(
    item: &Element,
    post_type: &str,
    options: &ConvertOptions,
    translator: &Translator,
) -> Result<Post, ConvertError> {
    // The two encoded-content fields arrive in document order: body first,
    // excerpt second. The excerpt is commonly absent.
    let mut encoded = item.elements("encoded");
    let content_html = encoded
        .next()
        .map(Element::text)
        .ok_or_else(|| ConvertError::MissingField("<encoded> in <item>".to_string()))?;
    let excerpt_html = encoded.next().map(Element::text).unwrap_or_default();

    Ok(Post {
        id: item.require_text("post_id")?,
        slug: percent_decode(&item.require_text("post_name")?),
        title: html_escape::decode_html_entities(&item.require_text("title")?).into_owned(),
        date: format_post_date(&item.require_text("pubDate")?, options),
        kind: post_type.to_string(),
        category: category(item, options),
        tags: category_nicenames(item, "post_tag"),
        author: category_values(item, "author").into_iter().next(),
        cover_image_id: cover_image_id(item),
        cover_image: None,
        image_urls: Vec::new(),
        excerpt: translator.translate(&excerpt_html)?,
        content: translator.translate(&content_html)?,
    })
}

/// First category-domain value outside the configured exclusion set.
fn category(item: &Element, options: &ConvertOptions) -> Option<String> {
    category_nicenames(item, "category")
        .into_iter()
        .find(|name| !options.filter_categories.contains(name))
}

/// Percent-decoded `nicename` attributes of the item's category elements in
/// one taxonomy domain, in document order. Deliberately not deduplicated:
/// repeated tags in the export stay repeated.
fn category_nicenames(item: &Element, domain: &str) -> Vec<String> {
    item.elements("category")
        .filter(|c| c.attr("domain") == Some(domain))
        .filter_map(|c| c.attr("nicename"))
        .map(percent_decode)
        .collect()
}

/// Element text of the item's category elements in one taxonomy domain.
fn category_values(item: &Element, domain: &str) -> Vec<String> {
    item.elements("category")
        .filter(|c| c.attr("domain") == Some(domain))
        .map(Element::text)
        .collect()
}

/// The `_thumbnail_id` custom field designates the featured image.
fn cover_image_id(item: &Element) -> Option<String> {
    item.elements("postmeta")
        .find(|meta| meta.text_of("meta_key").as_deref() == Some("_thumbnail_id"))
        .and_then(|meta| meta.text_of("meta_value"))
}

fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
