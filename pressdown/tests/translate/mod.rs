mod code;

use pressdown::{TranslateOptions, Translator};

/// Translate with image-path rewriting off (most tests don't care).
pub fn translate(html: &str) -> String {
    Translator::new(TranslateOptions::default())
        .translate(html)
        .expect("translation should succeed")
}

/// Translate with image-path rewriting on.
pub fn translate_rewriting(html: &str) -> String {
    Translator::new(TranslateOptions {
        rewrite_image_paths: true,
    })
    .translate(html)
    .expect("translation should succeed")
}
