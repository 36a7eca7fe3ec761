use crate::block::{BlockType, classify, ordered_prefix};
use crate::html::{HtmlNode, LeafNode, ParentNode};
use crate::inline::text_to_segments;

/// Convert one block into its HTML subtree.
pub fn block_to_html(block: &str) -> ParentNode {
    block_to_html_as(block, classify(block))
}

/// Convert a block already classified as `block_type`.
pub fn block_to_html_as(block: &str, block_type: BlockType) -> ParentNode {
    match block_type {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading(level) => heading(block, level),
        BlockType::Code => code(block),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => unordered_list(block),
        BlockType::OrderedList => ordered_list(block),
    }
}

/// Tokenize inline markdown into leaf nodes.
pub fn inline_children(text: &str) -> Vec<HtmlNode> {
    text_to_segments(text)
        .iter()
        .map(|segment| segment.to_html().into())
        .collect()
}

fn paragraph(block: &str) -> ParentNode {
    // Soft breaks become word separators.
    let text = block.replace('\n', " ");
    ParentNode::new("p", inline_children(&text))
}

fn heading(block: &str, level: u8) -> ParentNode {
    let text = block[usize::from(level)..].trim();
    ParentNode::new(format!("h{level}"), inline_children(text))
}

fn code(block: &str) -> ParentNode {
    let lines: Vec<&str> = block.lines().collect();
    let (first, inner) = match lines.as_slice() {
        [first, inner @ .., _] => (*first, inner),
        _ => (block, &[][..]),
    };

    let mut content = inner.join("\n");
    content.push('\n');

    let mut leaf = LeafNode::new("code", content);
    if let Some(language) = first.trim_start_matches('`').split_whitespace().next() {
        leaf = leaf.with_attr("class", format!("language-{language}"));
    }
    ParentNode::new("pre", vec![leaf.into()])
}

fn quote(block: &str) -> ParentNode {
    let text = block
        .lines()
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.trim()
        })
        .collect::<Vec<_>>()
        .join("\n");
    ParentNode::new("blockquote", inline_children(&text))
}

fn unordered_list(block: &str) -> ParentNode {
    let items = block
        .lines()
        .map(|line| line.strip_prefix("- ").unwrap_or(line))
        .map(list_item)
        .collect();
    ParentNode::new("ul", items)
}

fn ordered_list(block: &str) -> ParentNode {
    let items = block
        .lines()
        .enumerate()
        .map(|(i, line)| line.strip_prefix(&ordered_prefix(i + 1)).unwrap_or(line))
        .map(list_item)
        .collect();
    ParentNode::new("ol", items)
}

fn list_item(text: &str) -> HtmlNode {
    ParentNode::new("li", inline_children(text)).into()
}
