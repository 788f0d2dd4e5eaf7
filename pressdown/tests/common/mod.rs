//! Shared helpers for the integration tests.

use pressdown::{convert_export, Author, ConvertOptions, Post};

/// The sample export exercised by most tests.
pub fn fixture() -> String {
    std::fs::read_to_string("tests/fixtures/export.xml").expect("fixture export should exist")
}

/// Convert the sample export with the given options.
pub fn convert_fixture(options: &ConvertOptions) -> (Vec<Post>, Vec<Author>) {
    convert_export(&fixture(), options).expect("fixture export should convert")
}

/// Find a post by id, panicking with a useful message when absent.
pub fn post_by_id<'a>(posts: &'a [Post], id: &str) -> &'a Post {
    posts
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("post {id} should be in the output"))
}
