//! Image-post association.
//!
//! Links discovered images to the posts that use them. An image attaches to
//! a post either because it was uploaded as a child attachment of that post
//! (parent-id match) or because it is the post's designated featured image
//! (cover-id match); the latter also records the cover filename. Export
//! sizes make the quadratic pass a non-issue.

use crate::model::{Image, Post};
use crate::urls::filename_from_url;

pub fn merge_images_into_posts(images: &[Image], posts: &mut [Post]) {
    for image in images {
        for post in posts.iter_mut() {
            // uploaded as an attachment to this post
            let mut should_attach = image.post_id == post.id;

            // set as the featured image for this post
            if post.cover_image_id.as_deref() == Some(image.id.as_str()) {
                should_attach = true;
                post.cover_image = Some(filename_from_url(&image.url));
            }

            if should_attach && !post.image_urls.contains(&image.url) {
                post.image_urls.push(image.url.clone());
            }
        }
    }
}
