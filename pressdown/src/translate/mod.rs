//! Content translation (HTML fragment → Markdown export)
//!
//! Converts one post body or excerpt to Markdown.
//! Pipeline: HTML string → RcDom → comrak AST → Markdown string
//!
//! # Library Choice
//!
//! We never hand-write either side of the conversion: `html5ever` (the
//! Servo-project HTML5 parser, graceful with the malformed markup real
//! exports carry) parses the fragment into an `rcdom` tree, and `comrak`
//! serializes the assembled AST to Markdown. The walk in between
//! ([`builder`]) is where this crate's decisions live.
//!
//! # Preservation
//!
//! Embedded rich content (tweets, codepens, loader scripts, iframes) must
//! survive conversion as raw markup. An ordered rule list
//! ([`rules::standard_rules`]) is consulted for every element before
//! default conversion; a match is re-serialized verbatim into a raw HTML
//! block, which comrak passes through untouched with blank lines around
//! it. Loader scripts join a directly preceding embed block with a single
//! newline so the pair stays visually attached.
//!
//! # Code blocks
//!
//! A `<pre>` element becomes a fenced block whose literal is the inner
//! markup with `<code>` wrapper tags stripped and entities decoded exactly
//! once — `&lt;div&gt;` in the source appears inside the fence as the
//! literal text `<div>`, neither double-escaped nor under-escaped.
//!
//! # Determinism
//!
//! Nothing here consults the clock, randomness, or I/O: the same fragment
//! and options always yield byte-identical Markdown.

mod builder;
pub(crate) mod dom;
mod raw;
pub mod rules;

use std::cell::RefCell;
use std::sync::OnceLock;

use comrak::nodes::{Ast, AstNode, NodeValue};
use comrak::{format_commonmark, Arena, ComrakOptions};
use regex::Regex;

use crate::error::ConvertError;
use builder::Builder;
use rules::{standard_rules, PreserveRule};

/// Options consumed by the translator.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Rewrite `<img>` references with image extensions to the relative
    /// `images/<basename>` path the writer downloads into.
    pub rewrite_image_paths: bool,
}

/// The content translation engine. Holds no cross-call state; translating
/// each post is independent.
pub struct Translator {
    rules: Vec<Box<dyn PreserveRule>>,
    options: TranslateOptions,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            rules: standard_rules(),
            options,
        }
    }

    /// Translate one HTML fragment to Markdown.
    pub fn translate(&self, html: &str) -> Result<String, ConvertError> {
        if html.trim().is_empty() {
            return Ok(String::new());
        }

        // Step 1: HTML string → RcDom
        let content = dom::parse_body(html);

        // Step 2: RcDom → comrak AST
        let arena = Arena::new();
        let root = arena.alloc(AstNode::new(RefCell::new(Ast::new(
            NodeValue::Document,
            (0, 0).into(),
        ))));
        Builder::new(&arena, &self.rules, &self.options).build_blocks(&content, root)?;

        // Step 3: comrak AST → Markdown string (using comrak's serializer)
        let mut output = Vec::new();
        format_commonmark(root, &comrak_options(), &mut output).map_err(|e| {
            ConvertError::Translation(format!("Comrak serialization failed: {e}"))
        })?;
        let markdown = String::from_utf8(output)
            .map_err(|e| ConvertError::Translation(format!("UTF-8 conversion failed: {e}")))?;

        Ok(tidy(&markdown))
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslateOptions::default())
    }
}

fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    // raw embed blocks must pass through untouched
    options.render.unsafe_ = true;
    // `<pre>` builds fenced code blocks; comrak's CommonMark serializer only
    // honors the fence (rather than falling back to indented blocks) when
    // this is set.
    options.render.prefer_fenced = true;
    options
}

/// Final text cleanup on the rendered Markdown.
fn tidy(markdown: &str) -> String {
    // Remove Comrak's "end list" HTML comments which appear between
    // consecutive lists
    let markdown = markdown.replace("<!-- end list -->\n\n", "");
    // Clean up extra spaces after list markers
    let markdown = list_marker_spaces()
        .replace_all(&markdown, "$marker ")
        .into_owned();
    markdown.trim_matches('\n').to_string()
}

fn list_marker_spaces() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^(?P<marker>\s*(?:-|\d+\.)) {2,}").unwrap())
}
