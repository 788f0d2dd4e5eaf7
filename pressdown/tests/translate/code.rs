//! Code block handling: fences render code literally, decoded exactly once.

use super::translate;

#[test]
fn escaped_markup_round_trips_into_a_literal_fence() {
    let md = translate("<pre><code>&lt;div&gt;</code></pre>");
    assert_eq!(md, "```\n<div>\n```");
}

#[test]
fn pre_without_code_wrapper_still_fences() {
    let md = translate("<pre>plain text</pre>");
    assert_eq!(md, "```\nplain text\n```");
}

#[test]
fn multiline_code_keeps_its_lines() {
    let md = translate("<pre><code>fn main() {\n    println!(\"hi\");\n}</code></pre>");
    assert_eq!(md, "```\nfn main() {\n    println!(\"hi\");\n}\n```");
}

#[test]
fn nested_markup_inside_pre_stays_as_literal_tag_text() {
    // syntax-highlighted exports wrap tokens in spans; the fence keeps the
    // markup as text
    let md = translate(r#"<pre><code><span class="k">fn</span> main</code></pre>"#);
    assert_eq!(md, "```\n<span class=\"k\">fn</span> main\n```");
}

#[test]
fn fence_content_is_never_double_escaped() {
    let md = translate("<pre><code>a &amp;&amp; b &lt; c</code></pre>");
    assert!(md.contains("a && b < c"), "output: {md:?}");
    assert!(!md.contains("&amp;"));
    assert!(!md.contains("&lt;"));
}

#[test]
fn inline_code_converts_to_backticks() {
    let md = translate("<p>Run <code>cargo build</code> first.</p>");
    assert_eq!(md, "Run `cargo build` first.");
}

#[test]
fn inline_code_entities_decode_once() {
    let md = translate("<p>Compare <code>a &lt; b</code>.</p>");
    assert_eq!(md, "Compare `a < b`.");
}
