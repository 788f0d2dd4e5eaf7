//! Preservation rules for embedded rich content.
//!
//! A naive HTML→Markdown pass destroys embeds: tweets become quote blocks,
//! scripts vanish, empty iframes collapse. Each rule here is a
//! `{predicate, renderer}` pair consulted for every element before default
//! conversion — first match wins — and a matching node bypasses conversion
//! entirely, re-emitted as its original outer markup.
//!
//! The list is ordered and extensible the same way a verbatim-handler
//! registry is: a rule only needs to answer "is this mine" and "what raw
//! markup should stand in for it".

use markup5ever_rcdom::Handle;

use crate::error::ConvertError;

use super::dom;
use super::raw::outer_html;

/// One preservation rule.
pub trait PreserveRule {
    /// Rule name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this rule claims the node.
    fn matches(&self, node: &Handle) -> bool;

    /// Raw markup to emit in place of converting the node.
    fn render(&self, node: &Handle) -> Result<String, ConvertError> {
        outer_html(node)
    }

    /// Attach to a directly preceding raw block with a single newline
    /// instead of opening a new blank-line-separated block. Embed loader
    /// scripts use this to stay visually attached to their embed markup.
    fn snug(&self) -> bool {
        false
    }
}

/// Embedded tweets: `<blockquote class="twitter-tweet">`.
pub struct TweetRule;

impl PreserveRule for TweetRule {
    fn name(&self) -> &'static str {
        "tweet"
    }

    fn matches(&self, node: &Handle) -> bool {
        dom::element_name(node).as_deref() == Some("blockquote")
            && dom::attr(node, "class").as_deref() == Some("twitter-tweet")
    }
}

/// Embedded codepens. Codepen embed snippets have changed over the years,
/// but this pair of checks finds the commonalities.
pub struct CodepenRule;

impl PreserveRule for CodepenRule {
    fn name(&self) -> &'static str {
        "codepen"
    }

    fn matches(&self, node: &Handle) -> bool {
        matches!(
            dom::element_name(node).as_deref(),
            Some("p") | Some("div")
        ) && dom::has_attr(node, "data-slug-hash")
            && dom::attr(node, "class").as_deref() == Some("codepen")
    }
}

/// Loader scripts (for tweets, codepens, gists, etc.).
pub struct ScriptRule;

impl PreserveRule for ScriptRule {
    fn name(&self) -> &'static str {
        "script"
    }

    fn matches(&self, node: &Handle) -> bool {
        dom::element_name(node).as_deref() == Some("script")
    }

    fn render(&self, node: &Handle) -> Result<String, ConvertError> {
        // the serializer writes boolean attributes as `async=""`
        Ok(outer_html(node)?.replace("async=\"\"", "async"))
    }

    fn snug(&self) -> bool {
        true
    }
}

/// Iframes (common for embedded audio/video).
pub struct IframeRule;

impl PreserveRule for IframeRule {
    fn name(&self) -> &'static str {
        "iframe"
    }

    fn matches(&self, node: &Handle) -> bool {
        dom::element_name(node).as_deref() == Some("iframe")
    }

    fn render(&self, node: &Handle) -> Result<String, ConvertError> {
        Ok(outer_html(node)?.replace("allowfullscreen=\"\"", "allowfullscreen"))
    }
}

/// The standard rule set, in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn PreserveRule>> {
    vec![
        Box::new(TweetRule),
        Box::new(CodepenRule),
        Box::new(ScriptRule),
        Box::new(IframeRule),
    ]
}

/// First rule claiming the node, if any.
pub fn matching_rule<'r>(
    rules: &'r [Box<dyn PreserveRule>],
    node: &Handle,
) -> Option<&'r dyn PreserveRule> {
    rules.iter().find(|rule| rule.matches(node)).map(|b| b.as_ref())
}
