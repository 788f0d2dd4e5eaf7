//! Post extraction tests: field derivation, status selection, and post-type
//! discovery.

use pressdown::{convert_export, ConvertOptions};

use crate::common::{convert_fixture, post_by_id};

#[test]
fn selects_published_posts_only() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["42", "50"], "draft and trash items must be skipped");
}

#[test]
fn slug_is_percent_decoded() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(post_by_id(&posts, "42").slug, "shipping-\u{2728}-caching");
}

#[test]
fn title_is_entity_decoded() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    // CDATA keeps `&amp;` and `&#8230;` away from the XML parser; the
    // extractor decodes them as HTML entities
    assert_eq!(post_by_id(&posts, "42").title, "Shipping & Caching\u{2026}");
}

#[test]
fn date_is_iso_date_by_default() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(post_by_id(&posts, "42").date, "2020-12-25");
}

#[test]
fn date_includes_time_when_configured() {
    let options = ConvertOptions {
        include_time_with_date: true,
        ..Default::default()
    };
    let (posts, _) = convert_fixture(&options);
    assert_eq!(post_by_id(&posts, "42").date, "2020-12-25T11:20:35.000Z");
}

#[test]
fn custom_date_format_takes_precedence() {
    let options = ConvertOptions {
        include_time_with_date: true,
        custom_date_formatting: Some("%d %b %Y".to_string()),
        ..Default::default()
    };
    let (posts, _) = convert_fixture(&options);
    assert_eq!(post_by_id(&posts, "42").date, "25 Dec 2020");
}

#[test]
fn category_skips_the_exclusion_set() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    // "uncategorized" comes first in the export but is filtered
    assert_eq!(post_by_id(&posts, "42").category.as_deref(), Some("web"));
}

#[test]
fn tags_keep_document_order_and_duplicates() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(
        post_by_id(&posts, "42").tags,
        vec!["rust", "caching layer", "rust"],
        "nicenames are percent-decoded, order preserved, duplicates preserved"
    );
}

#[test]
fn author_is_the_taxonomy_value() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(post_by_id(&posts, "42").author.as_deref(), Some("jane"));
}

#[test]
fn cover_image_id_comes_from_postmeta() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert_eq!(post_by_id(&posts, "42").cover_image_id.as_deref(), Some("99"));
}

#[test]
fn missing_optional_fields_degrade_to_none() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let minimal = post_by_id(&posts, "50");
    assert_eq!(minimal.category, None);
    assert_eq!(minimal.author, None);
    assert_eq!(minimal.cover_image_id, None);
    assert!(minimal.tags.is_empty());
    assert_eq!(minimal.excerpt, "");
}

#[test]
fn excerpt_and_content_are_translated() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    let post = post_by_id(&posts, "42");
    assert_eq!(post.excerpt, "A post about shipping.");
    assert!(post.content.contains("[link](https://example.com/docs)"));
}

#[test]
fn standard_runs_convert_plain_posts_only() {
    let (posts, _) = convert_fixture(&ConvertOptions::default());
    assert!(posts.iter().all(|p| p.kind == "post"));
}

#[test]
fn other_types_are_discovered_with_the_denylist_applied() {
    let options = ConvertOptions {
        include_other_types: true,
        ..Default::default()
    };
    let (posts, _) = convert_fixture(&options);
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains(&"70"), "pages should convert: {ids:?}");
    assert!(
        !ids.contains(&"80"),
        "nav_menu_item is denylisted: {ids:?}"
    );
    assert!(
        !ids.iter().any(|id| ["99", "100", "101"].contains(id)),
        "attachments are never posts: {ids:?}"
    );
    assert_eq!(post_by_id(&posts, "70").kind, "page");
}

#[test]
fn missing_required_field_is_an_error() {
    let source = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<item>
		<title><![CDATA[No id]]></title>
		<link>https://blog.example.com/?p=1</link>
		<pubDate>Mon, 04 Jan 2021 09:00:00 +0000</pubDate>
		<content:encoded><![CDATA[Body.]]></content:encoded>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
</channel>
</rss>"#;
    let err = convert_export(source, &ConvertOptions::default()).unwrap_err();
    assert!(
        matches!(err, pressdown::ConvertError::MissingField(ref field) if field.contains("post_id")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn unparseable_date_propagates_verbatim() {
    let source = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<item>
		<title><![CDATA[Bad date]]></title>
		<link>https://blog.example.com/?p=2</link>
		<pubDate>sometime in winter</pubDate>
		<content:encoded><![CDATA[Body.]]></content:encoded>
		<wp:post_id>2</wp:post_id>
		<wp:post_name><![CDATA[bad-date]]></wp:post_name>
		<wp:status><![CDATA[publish]]></wp:status>
		<wp:post_type><![CDATA[post]]></wp:post_type>
	</item>
</channel>
</rss>"#;
    let (posts, _) = convert_export(source, &ConvertOptions::default()).unwrap();
    assert_eq!(posts[0].date, "sometime in winter");
}
