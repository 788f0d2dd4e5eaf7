//! DOM walk that assembles the Markdown (comrak) AST.
//!
//! Block structure is decided here: preserved embeds become raw HTML
//! blocks, known block elements map to their Markdown counterparts, and
//! runs of inline nodes (classic-editor bodies are mostly loose text with
//! inline markup) collect into paragraphs, splitting on blank lines.

use std::cell::RefCell;
use std::sync::OnceLock;

use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeHeading, NodeHtmlBlock, NodeList, NodeTable,
    NodeValue, TableAlignment,
};
use comrak::Arena;
use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

use crate::error::ConvertError;
use crate::urls::{filename_from_url, has_image_extension};

use super::dom;
use super::raw;
use super::rules::{matching_rule, PreserveRule};
use super::TranslateOptions;

/// Elements that end an inline run and convert as blocks of their own.
const BLOCK_TAGS: [&str; 28] = [
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "main", "nav", "ol", "p", "pre", "table", "ul",
];

fn blank_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n[ \t\r]*\n").unwrap())
}

pub struct Builder<'a, 'r> {
    arena: &'a Arena<AstNode<'a>>,
    rules: &'r [Box<dyn PreserveRule>],
    options: &'r TranslateOptions,
}

impl<'a, 'r> Builder<'a, 'r> {
    pub fn new(
        arena: &'a Arena<AstNode<'a>>,
        rules: &'r [Box<dyn PreserveRule>],
        options: &'r TranslateOptions,
    ) -> Self {
        Self {
            arena,
            rules,
            options,
        }
    }

    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
    }

    /// Convert a sibling list into block children of `parent`.
    pub fn build_blocks(
        &self,
        nodes: &[Handle],
        parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        let mut inline_run: Vec<Handle> = Vec::new();
        for node in nodes {
            if let Some(rule) = matching_rule(self.rules, node) {
                self.flush_inline_run(&mut inline_run, parent)?;
                self.append_raw(rule, node, parent)?;
            } else if is_block_element(node) {
                self.flush_inline_run(&mut inline_run, parent)?;
                self.build_block(node, parent)?;
            } else {
                inline_run.push(node.clone());
            }
        }
        self.flush_inline_run(&mut inline_run, parent)?;
        Ok(())
    }

    /// Emit a preserved node as a raw HTML block. A snug rule whose raw
    /// markup directly follows another raw block joins it with a single
    /// newline, keeping embed + loader script visually attached.
    fn append_raw(
        &self,
        rule: &dyn PreserveRule,
        node: &Handle,
        parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        let html = rule.render(node)?;
        if rule.snug() {
            if let Some(last) = parent.last_child() {
                let mut data = last.data.borrow_mut();
                if let NodeValue::HtmlBlock(ref mut block) = data.value {
                    block.literal.push('\n');
                    block.literal.push_str(&html);
                    return Ok(());
                }
            }
        }
        parent.append(self.node(NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: html,
        })));
        Ok(())
    }

    fn build_block(&self, node: &Handle, parent: &'a AstNode<'a>) -> Result<(), ConvertError> {
        let name = dom::element_name(node).unwrap_or_default();
        let children = node.children.borrow().clone();
        match name.as_str() {
            "p" | "dt" | "dd" | "figcaption" => self.build_paragraphs(&children, parent)?,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level: u8 = name[1..].parse().unwrap_or(1);
                let heading = self.node(NodeValue::Heading(NodeHeading {
                    level,
                    setext: false,
                }));
                parent.append(heading);
                self.build_inlines(&children, heading)?;
                trim_edge_text(heading);
            }
            "blockquote" => {
                let quote = self.node(NodeValue::BlockQuote);
                parent.append(quote);
                self.build_blocks(&children, quote)?;
            }
            "ul" | "ol" => self.build_list(&name, &children, parent)?,
            "pre" => {
                let mut literal = raw::pre_text(node);
                if !literal.ends_with('\n') {
                    literal.push('\n');
                }
                parent.append(self.node(NodeValue::CodeBlock(comrak::nodes::NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: String::new(),
                    literal,
                })));
            }
            "table" => self.build_table(node, parent)?,
            "hr" => {
                parent.append(self.node(NodeValue::ThematicBreak));
            }
            // transparent containers (div, section, figure, ...): their
            // children are blocks of ours
            _ => self.build_blocks(&children, parent)?,
        }
        Ok(())
    }

    fn build_list(
        &self,
        name: &str,
        items: &[Handle],
        parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        let ordered = name == "ol";
        let list = self.node(NodeValue::List(list_data(ordered)));
        parent.append(list);

        for li in items {
            if dom::element_name(li).as_deref() != Some("li") {
                continue;
            }
            let item = self.node(NodeValue::Item(list_data(ordered)));
            list.append(item);

            let li_children = li.children.borrow().clone();
            let has_blocks = li_children
                .iter()
                .any(|c| is_block_element(c) || matching_rule(self.rules, c).is_some());
            if has_blocks {
                self.build_blocks(&li_children, item)?;
            } else {
                self.build_paragraphs(&li_children, item)?;
            }
        }
        Ok(())
    }

    fn build_table(&self, table: &Handle, parent: &'a AstNode<'a>) -> Result<(), ConvertError> {
        let mut rows: Vec<Handle> = Vec::new();
        collect_rows(table, &mut rows);
        if rows.is_empty() {
            return Ok(());
        }

        let columns = cells_of(&rows[0]).len();
        let table_node = self.node(NodeValue::Table(NodeTable {
            alignments: vec![TableAlignment::None; columns],
            num_columns: columns,
            num_rows: rows.len(),
            num_nonempty_cells: 0,
        }));
        parent.append(table_node);

        for (index, row) in rows.iter().enumerate() {
            // the first row is the header row (explicit <thead> or not)
            let row_node = self.node(NodeValue::TableRow(index == 0));
            table_node.append(row_node);
            for cell in cells_of(row) {
                let cell_node = self.node(NodeValue::TableCell);
                row_node.append(cell_node);
                let cell_children = cell.children.borrow().clone();
                self.build_inlines(&cell_children, cell_node)?;
                trim_edge_text(cell_node);
            }
        }
        Ok(())
    }

    /// Convert an inline run into one or more paragraphs under `parent`.
    /// Loose text splits into separate paragraphs on blank lines.
    fn build_paragraphs(
        &self,
        nodes: &[Handle],
        parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        let mut paragraph: Option<&'a AstNode<'a>> = None;
        for node in nodes {
            self.emit_inline(node, &mut paragraph, parent)?;
        }
        self.close_paragraph(&mut paragraph);
        Ok(())
    }

    fn flush_inline_run(
        &self,
        run: &mut Vec<Handle>,
        parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        if run.is_empty() {
            return Ok(());
        }
        let nodes = std::mem::take(run);
        self.build_paragraphs(&nodes, parent)
    }

    fn emit_inline(
        &self,
        node: &Handle,
        paragraph: &mut Option<&'a AstNode<'a>>,
        block_parent: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                let mut first = true;
                for segment in blank_line().split(&text) {
                    if !first {
                        self.close_paragraph(paragraph);
                    }
                    first = false;

                    let collapsed = collapse_whitespace(segment);
                    if collapsed.trim().is_empty() {
                        // inter-element whitespace is significant inside an
                        // open paragraph, invisible outside one
                        if paragraph.is_some() && !collapsed.is_empty() {
                            self.ensure_paragraph(paragraph, block_parent)
                                .append(self.node(NodeValue::Text(" ".to_string())));
                        }
                        continue;
                    }
                    self.ensure_paragraph(paragraph, block_parent)
                        .append(self.node(NodeValue::Text(collapsed)));
                }
            }
            NodeData::Element { .. } => {
                if let Some(rule) = matching_rule(self.rules, node) {
                    self.close_paragraph(paragraph);
                    self.append_raw(rule, node, block_parent)?;
                    return Ok(());
                }
                if is_block_element(node) {
                    self.close_paragraph(paragraph);
                    self.build_block(node, block_parent)?;
                    return Ok(());
                }

                let name = dom::element_name(node).unwrap_or_default();
                let children = node.children.borrow().clone();
                match name.as_str() {
                    "a" => {
                        let link = self.node(NodeValue::Link(comrak::nodes::NodeLink {
                            url: dom::attr(node, "href").unwrap_or_default(),
                            title: dom::attr(node, "title").unwrap_or_default(),
                        }));
                        self.ensure_paragraph(paragraph, block_parent).append(link);
                        self.build_inlines(&children, link)?;
                    }
                    "strong" | "b" => {
                        let strong = self.node(NodeValue::Strong);
                        self.ensure_paragraph(paragraph, block_parent).append(strong);
                        self.build_inlines(&children, strong)?;
                    }
                    "em" | "i" => {
                        let emph = self.node(NodeValue::Emph);
                        self.ensure_paragraph(paragraph, block_parent).append(emph);
                        self.build_inlines(&children, emph)?;
                    }
                    "code" => {
                        let code = self.inline_code(node);
                        self.ensure_paragraph(paragraph, block_parent).append(code);
                    }
                    "img" => {
                        let image = self.image_node(node);
                        self.ensure_paragraph(paragraph, block_parent).append(image);
                    }
                    "br" => {
                        self.ensure_paragraph(paragraph, block_parent)
                            .append(self.node(NodeValue::LineBreak));
                    }
                    // spans and other unknown inline wrappers are
                    // transparent; text inside them still splits paragraphs
                    _ => {
                        for child in &children {
                            self.emit_inline(child, paragraph, block_parent)?;
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Strict inline conversion for contexts that cannot hold blocks
    /// (headings, links, emphasis, table cells).
    fn build_inlines(
        &self,
        nodes: &[Handle],
        target: &'a AstNode<'a>,
    ) -> Result<(), ConvertError> {
        for node in nodes {
            match &node.data {
                NodeData::Text { contents } => {
                    let collapsed = collapse_whitespace(&contents.borrow());
                    if !collapsed.is_empty() {
                        target.append(self.node(NodeValue::Text(collapsed)));
                    }
                }
                NodeData::Element { .. } => {
                    if let Some(rule) = matching_rule(self.rules, node) {
                        let html = rule.render(node)?;
                        target.append(self.node(NodeValue::HtmlInline(html)));
                        continue;
                    }
                    let name = dom::element_name(node).unwrap_or_default();
                    let children = node.children.borrow().clone();
                    match name.as_str() {
                        "a" => {
                            let link = self.node(NodeValue::Link(comrak::nodes::NodeLink {
                                url: dom::attr(node, "href").unwrap_or_default(),
                                title: dom::attr(node, "title").unwrap_or_default(),
                            }));
                            target.append(link);
                            self.build_inlines(&children, link)?;
                        }
                        "strong" | "b" => {
                            let strong = self.node(NodeValue::Strong);
                            target.append(strong);
                            self.build_inlines(&children, strong)?;
                        }
                        "em" | "i" => {
                            let emph = self.node(NodeValue::Emph);
                            target.append(emph);
                            self.build_inlines(&children, emph)?;
                        }
                        "code" => target.append(self.inline_code(node)),
                        "img" => target.append(self.image_node(node)),
                        "br" => target.append(self.node(NodeValue::LineBreak)),
                        _ => self.build_inlines(&children, target)?,
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn inline_code(&self, node: &Handle) -> &'a AstNode<'a> {
        let literal = collapse_whitespace(&dom::text_content(node))
            .trim()
            .to_string();
        self.node(NodeValue::Code(comrak::nodes::NodeCode {
            num_backticks: 1,
            literal,
        }))
    }

    fn image_node(&self, node: &Handle) -> &'a AstNode<'a> {
        let src = dom::attr(node, "src").unwrap_or_default();
        // point body references at the writer's local images folder
        let url = if self.options.rewrite_image_paths && has_image_extension(&src) {
            format!("images/{}", filename_from_url(&src))
        } else {
            src
        };
        let image = self.node(NodeValue::Image(comrak::nodes::NodeLink {
            url,
            title: dom::attr(node, "title").unwrap_or_default(),
        }));
        let alt = dom::attr(node, "alt").unwrap_or_default();
        if !alt.is_empty() {
            image.append(self.node(NodeValue::Text(alt)));
        }
        image
    }

    fn ensure_paragraph(
        &self,
        paragraph: &mut Option<&'a AstNode<'a>>,
        block_parent: &'a AstNode<'a>,
    ) -> &'a AstNode<'a> {
        if paragraph.is_none() {
            let p = self.node(NodeValue::Paragraph);
            block_parent.append(p);
            *paragraph = Some(p);
        }
        paragraph.unwrap()
    }

    fn close_paragraph(&self, paragraph: &mut Option<&'a AstNode<'a>>) {
        if let Some(p) = paragraph.take() {
            trim_edge_text(p);
            let empty = p
                .children()
                .all(|c| matches!(&c.data.borrow().value, NodeValue::Text(t) if t.is_empty()));
            if empty {
                p.detach();
            }
        }
    }
}

fn list_data(ordered: bool) -> NodeList {
    NodeList {
        list_type: if ordered {
            ListType::Ordered
        } else {
            ListType::Bullet
        },
        marker_offset: 0,
        padding: 0,
        start: 1,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    }
}

fn is_block_element(node: &Handle) -> bool {
    match dom::element_name(node) {
        Some(name) => BLOCK_TAGS.contains(&name.as_str()),
        None => false,
    }
}

fn collect_rows(node: &Handle, rows: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        match dom::element_name(child).as_deref() {
            Some("tr") => rows.push(child.clone()),
            Some("thead") | Some("tbody") | Some("tfoot") => collect_rows(child, rows),
            _ => {}
        }
    }
}

fn cells_of(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|c| matches!(dom::element_name(c).as_deref(), Some("td") | Some("th")))
        .cloned()
        .collect()
}

/// Trim the leading/trailing whitespace of a block's first/last text child.
fn trim_edge_text(node: &AstNode<'_>) {
    if let Some(first) = node.first_child() {
        let mut data = first.data.borrow_mut();
        if let NodeValue::Text(ref mut text) = data.value {
            *text = text.trim_start().to_string();
        }
    }
    if let Some(last) = node.last_child() {
        let mut data = last.data.borrow_mut();
        if let NodeValue::Text(ref mut text) = data.value {
            *text = text.trim_end().to_string();
        }
    }
}

/// Collapse whitespace runs to single spaces, per HTML rendering semantics.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}
