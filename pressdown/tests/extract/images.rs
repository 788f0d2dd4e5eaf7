//! Image discovery and association tests.

use pressdown::ConvertOptions;

use crate::common::{convert_fixture, post_by_id};

#[test]
fn attachment_url_attaches_to_the_parent_post() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let post = post_by_id(&posts, "42");
    assert!(
        post.image_urls
            .contains(&"https://blog.example.com/uploads/2020/12/cover-photo.jpg".to_string()),
        "image urls: {:?}",
        post.image_urls
    );
}

#[test]
fn cover_match_sets_the_cover_filename() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(
        post_by_id(&posts, "42").cover_image.as_deref(),
        Some("cover-photo.jpg")
    );
}

#[test]
fn scraped_body_images_resolve_against_the_permalink() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let post = post_by_id(&posts, "42");
    assert!(
        post.image_urls
            .contains(&"https://blog.example.com/uploads/2020/12/diagram.png".to_string()),
        "relative src should resolve absolute: {:?}",
        post.image_urls
    );
}

#[test]
fn image_urls_have_no_duplicates() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    for post in &posts {
        let mut seen = std::collections::HashSet::new();
        for url in &post.image_urls {
            assert!(seen.insert(url), "duplicate url {url} in post {}", post.id);
        }
    }
}

#[test]
fn non_image_attachments_are_filtered_out() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    for post in &posts {
        assert!(
            !post.image_urls.iter().any(|url| url.ends_with(".pdf")),
            "pdf attachment leaked into {:?}",
            post.image_urls
        );
    }
}

#[test]
fn unattached_images_reach_no_post() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    for post in &posts {
        assert!(!post
            .image_urls
            .iter()
            .any(|url| url.ends_with("unattached.png")));
    }
}

#[test]
fn disabling_attached_images_skips_them() {
    let options = ConvertOptions {
        save_attached_images: false,
        ..Default::default()
    };
    let (posts, _) = convert_fixture(&options);
    let post = post_by_id(&posts, "42");
    assert!(!post.image_urls.iter().any(|url| url.contains("cover-photo")));
    // scraped discovery is independently controlled
    assert!(post.image_urls.iter().any(|url| url.contains("diagram.png")));
    assert_eq!(post.cover_image, None);
}

#[test]
fn disabling_scraped_images_skips_them_and_keeps_original_srcs() {
    let options = ConvertOptions {
        save_scraped_images: false,
        ..Default::default()
    };
    let (posts, _) = convert_fixture(&options);
    let post = post_by_id(&posts, "42");
    assert!(!post.image_urls.iter().any(|url| url.contains("diagram.png")));
    // with local saving off, body references keep their original path
    assert!(post.content.contains("/uploads/2020/12/diagram.png"));
    assert!(!post.content.contains("images/diagram.png"));
}

#[test]
fn enabled_scraping_rewrites_body_references() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let post = post_by_id(&posts, "42");
    assert!(
        post.content.contains("images/diagram.png"),
        "content: {}",
        post.content
    );
}
