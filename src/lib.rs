mod block;
mod config;
mod error;
mod html;
mod inline;
mod render;
pub mod site;

pub use block::{BlockType, classify, heading_level, split_into_blocks};
pub use config::{Config, ConfigError, PathsConfig, SiteConfig};
pub use error::{ConvertError, SiteError};
pub use html::{Attrs, HtmlNode, LeafNode, ParentNode, attrs_to_html};
pub use inline::{
    DELIMITERS, TextKind, TextSegment, extract_markdown_images, extract_markdown_links,
    split_delimiter, split_images, split_links, text_to_segments,
};
pub use render::{block_to_html, block_to_html_as, inline_children};

use tracing::trace;

/// Convert a markdown document into a single `<div>` tree, one child per block.
pub fn markdown_to_html_node(markdown: &str) -> HtmlNode {
    let blocks = split_into_blocks(markdown);
    trace!(blocks = blocks.len(), "converting markdown document");

    let children = blocks
        .into_iter()
        .map(|block| {
            let block_type = classify(block);
            trace!(?block_type, "rendering block");
            block_to_html_as(block, block_type).into()
        })
        .collect();
    ParentNode::new("div", children).into()
}

/// Convert a markdown document straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    markdown_to_html_node(markdown).render()
}

/// The text of the document's leading H1.
///
/// Only the first block is considered; it must start with `"# "`.
pub fn extract_title(markdown: &str) -> Result<String, ConvertError> {
    let first = split_into_blocks(markdown)
        .into_iter()
        .next()
        .ok_or(ConvertError::MissingTitle)?;
    let title = first
        .strip_prefix("# ")
        .ok_or(ConvertError::MissingTitle)?;
    Ok(title.trim().to_string())
}
