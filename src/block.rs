/// Structural kind of a markdown block, derived from its text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

const FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_into_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block. Checks run in a fixed order; the first match wins and
/// anything unrecognised is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }
    if is_code(block) {
        return BlockType::Code;
    }
    if block.is_empty() {
        return BlockType::Paragraph;
    }
    if block.lines().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if block.lines().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if is_ordered_list(block) {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

/// Number of leading `#` when followed by a space, for 1 to 6 hashes.
pub fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) || !block[hashes..].starts_with(' ') {
        return None;
    }
    u8::try_from(hashes).ok()
}

fn is_code(block: &str) -> bool {
    let mut lines = block.lines();
    let (Some(first), Some(last)) = (lines.next(), lines.next_back()) else {
        return false;
    };
    first.starts_with(FENCE) && last.starts_with(FENCE)
}

fn is_ordered_list(block: &str) -> bool {
    block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_prefix(i + 1)))
}

/// The marker an ordered list item at 1-based `number` must start with.
pub(crate) fn ordered_prefix(number: usize) -> String {
    format!("{number}. ")
}
