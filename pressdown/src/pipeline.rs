//! The conversion pipeline.
//!
//! Sequences ingestion → post-type discovery → post/author/image extraction
//! → image association, and hands the finished `(posts, authors)` document
//! model back to the caller (the writer shell). Progress counts are emitted
//! through the `log` facade; they are observability, not data contract.
//!
//! A malformed document fails the whole run before any extraction starts;
//! there is no partial-document recovery and no retrying here.

use std::fs;
use std::path::Path;

use crate::associate::merge_images_into_posts;
use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::extract::{
    collect_attached_images, collect_authors, collect_posts, collect_scraped_images, post_types,
};
use crate::model::{Author, Post};
use crate::xml::parse_export;

/// Convert an export document already held in memory.
pub fn convert_export(
    source: &str,
    options: &ConvertOptions,
) -> Result<(Vec<Post>, Vec<Author>), ConvertError> {
    log::info!("Parsing...");
    let rss = parse_export(source)?;
    let channel = rss.require("channel")?;

    let types = post_types(channel, options);
    let mut posts = collect_posts(channel, &types, options)?;
    let authors = collect_authors(channel)?;

    let mut images = Vec::new();
    if options.save_attached_images {
        images.extend(collect_attached_images(channel)?);
    }
    if options.save_scraped_images {
        images.extend(collect_scraped_images(channel, &types)?);
    }

    merge_images_into_posts(&images, &mut posts);

    Ok((posts, authors))
}

/// Read an export file and convert it. The read is the single blocking
/// input operation of a run; everything after it is pure computation.
pub fn convert_export_file(
    path: &Path,
    options: &ConvertOptions,
) -> Result<(Vec<Post>, Vec<Author>), ConvertError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConvertError::Io(format!("{}: {e}", path.display())))?;
    convert_export(&source, options)
}
