use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::html::LeafNode;

/// Formatting of an inline text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

/// A run of inline text with a single formatting.
///
/// For images `text` is the alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub kind: TextKind,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Plain)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, TextKind::Link { url: url.into() })
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, TextKind::Image { url: url.into() })
    }

    pub fn is_plain(&self) -> bool {
        self.kind == TextKind::Plain
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            TextKind::Link { url } | TextKind::Image { url } => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn to_html(&self) -> LeafNode {
        match &self.kind {
            TextKind::Plain => LeafNode::text(&self.text),
            TextKind::Bold => LeafNode::new("b", &self.text),
            TextKind::Italic => LeafNode::new("i", &self.text),
            TextKind::Code => LeafNode::new("code", &self.text),
            TextKind::Link { url } => LeafNode::new("a", &self.text).with_attr("href", url),
            TextKind::Image { url } => LeafNode::new("img", "")
                .with_attr("src", url)
                .with_attr("alt", &self.text),
        }
    }
}

/// Inline delimiters, in the order they are resolved.
pub static DELIMITERS: [(&str, TextKind); 3] = [
    ("**", TextKind::Bold),
    ("_", TextKind::Italic),
    ("`", TextKind::Code),
];

// Both captures are lazy: the text runs to the first `](` and the URL to the
// first `)` after it.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

// No lookbehind in `regex`; matches preceded by `!` are filtered out by hand.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Tokenize a span of markdown text into formatted segments.
///
/// Never returns an empty sequence.
pub fn text_to_segments(text: &str) -> Vec<TextSegment> {
    let mut segments = vec![TextSegment::plain(text)];
    for (delimiter, kind) in &DELIMITERS {
        segments = split_delimiter(segments, delimiter, kind);
    }
    segments = split_images(segments);
    segments = split_links(segments);

    if segments.is_empty() {
        segments.push(TextSegment::plain(""));
    }
    segments
}

/// Split every plain segment on `delimiter`, turning the enclosed text into
/// `kind`.
///
/// If any plain segment holds an odd number of delimiters, nothing is split
/// for this delimiter and `segments` comes back unchanged. Empty pieces are
/// dropped.
pub fn split_delimiter(
    segments: Vec<TextSegment>,
    delimiter: &str,
    kind: &TextKind,
) -> Vec<TextSegment> {
    let unbalanced = segments
        .iter()
        .filter(|segment| segment.is_plain())
        .any(|segment| segment.text.matches(delimiter).count() % 2 == 1);
    if unbalanced {
        return segments;
    }

    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if !segment.is_plain() || !segment.text.contains(delimiter) {
            out.push(segment);
            continue;
        }
        for (i, piece) in segment.text.split(delimiter).enumerate() {
            if piece.is_empty() {
                continue;
            }
            let piece_kind = if i % 2 == 0 {
                TextKind::Plain
            } else {
                kind.clone()
            };
            out.push(TextSegment::new(piece, piece_kind));
        }
    }
    out
}

/// All `![alt](url)` occurrences, as `(alt, url)` pairs.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// All `[text](url)` occurrences not preceded by `!`, as `(text, url)` pairs.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    link_matches(text)
        .into_iter()
        .map(|(_, text, url)| (text.to_string(), url.to_string()))
        .collect()
}

fn link_matches(text: &str) -> Vec<(Range<usize>, &str, &str)> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if text[..whole.start()].ends_with('!') {
                return None;
            }
            Some((whole.range(), caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        })
        .collect()
}

fn image_matches(text: &str) -> Vec<(Range<usize>, &str, &str)> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some((
                caps.get(0)?.range(),
                caps.get(1)?.as_str(),
                caps.get(2)?.as_str(),
            ))
        })
        .collect()
}

/// Split image syntax out of every plain segment.
pub fn split_images(segments: Vec<TextSegment>) -> Vec<TextSegment> {
    split_matches(segments, image_matches, |alt: &str, url: &str| {
        TextSegment::image(alt, url)
    })
}

/// Split link syntax out of every plain segment.
pub fn split_links(segments: Vec<TextSegment>) -> Vec<TextSegment> {
    split_matches(segments, link_matches, |text: &str, url: &str| {
        TextSegment::link(text, url)
    })
}

fn split_matches<F, B>(segments: Vec<TextSegment>, find: F, build: B) -> Vec<TextSegment>
where
    F: Fn(&str) -> Vec<(Range<usize>, &str, &str)>,
    B: Fn(&str, &str) -> TextSegment,
{
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_plain() {
            if let Some(pieces) = split_segment(&segment.text, &find, &build) {
                out.extend(pieces);
                continue;
            }
        }
        out.push(segment);
    }
    out
}

/// `None` when `text` has no matches.
fn split_segment<F, B>(text: &str, find: &F, build: &B) -> Option<Vec<TextSegment>>
where
    F: Fn(&str) -> Vec<(Range<usize>, &str, &str)>,
    B: Fn(&str, &str) -> TextSegment,
{
    let matches = find(text);
    if matches.is_empty() {
        return None;
    }

    let mut pieces = Vec::with_capacity(matches.len() * 2 + 1);
    let mut rest = 0;
    for (range, inner, url) in matches {
        let before = &text[rest..range.start];
        if !before.is_empty() {
            pieces.push(TextSegment::plain(before));
        }
        pieces.push(build(inner, url));
        rest = range.end;
    }
    let tail = &text[rest..];
    if !tail.is_empty() {
        pieces.push(TextSegment::plain(tail));
    }
    Some(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn plain(text: &str) -> TextSegment {
        TextSegment::plain(text)
    }

    fn styled(text: &str, kind: TextKind) -> TextSegment {
        TextSegment::new(text, kind)
    }

    #[rstest]
    #[case("**", TextKind::Bold, "This is text with a **bolded phrase** in the middle")]
    #[case("_", TextKind::Italic, "This is text with a _bolded phrase_ in the middle")]
    #[case("`", TextKind::Code, "This is text with a `bolded phrase` in the middle")]
    fn splits_each_delimiter(#[case] delimiter: &str, #[case] kind: TextKind, #[case] input: &str) {
        let result = split_delimiter(vec![plain(input)], delimiter, &kind);
        assert_eq!(
            result,
            vec![
                plain("This is text with a "),
                styled("bolded phrase", kind),
                plain(" in the middle"),
            ]
        );
    }

    #[test]
    fn leading_and_trailing_delimiters_leave_no_empty_segments() {
        let result = split_delimiter(vec![plain("**bold** and **more**")], "**", &TextKind::Bold);
        assert_eq!(
            result,
            vec![
                styled("bold", TextKind::Bold),
                plain(" and "),
                styled("more", TextKind::Bold),
            ]
        );
    }

    #[test]
    fn unbalanced_delimiter_is_left_alone() {
        let input = "text with **bold within?";
        assert_eq!(text_to_segments(input), vec![plain(input)]);
    }

    #[test]
    fn unbalanced_delimiter_keeps_earlier_passes() {
        let result = text_to_segments("**bold** and a stray _underscore");
        assert_eq!(
            result,
            vec![
                styled("bold", TextKind::Bold),
                plain(" and a stray _underscore"),
            ]
        );
    }

    #[test]
    fn styled_segments_are_not_rescanned() {
        let segments = vec![styled("a_b_c", TextKind::Code), plain("x")];
        assert_eq!(
            split_delimiter(segments.clone(), "_", &TextKind::Italic),
            segments
        );
    }

    #[test]
    fn images_and_links_are_extracted_separately() {
        let text = "an ![image](u) in text";
        assert_eq!(
            extract_markdown_images(text),
            vec![("image".to_string(), "u".to_string())]
        );
        assert!(extract_markdown_links(text).is_empty());
    }

    #[test]
    fn extracts_multiple_links() {
        let text = "This is text with a link [to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com/@bootdotdev)";
        assert_eq!(
            extract_markdown_links(text),
            vec![
                ("to boot dev".to_string(), "https://www.boot.dev".to_string()),
                (
                    "to youtube".to_string(),
                    "https://www.youtube.com/@bootdotdev".to_string()
                ),
            ]
        );
    }

    #[test]
    fn split_images_keeps_surrounding_text() {
        let segments = split_images(vec![plain(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)",
        )]);
        assert_eq!(
            segments,
            vec![
                plain("This is text with an "),
                TextSegment::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                plain(" and another "),
                TextSegment::image("second image", "https://i.imgur.com/3elNhQu.png"),
            ]
        );
    }

    #[test]
    fn adjacent_links() {
        let segments = split_links(vec![plain("[a](x)[b](y) tail")]);
        assert_eq!(
            segments,
            vec![
                TextSegment::link("a", "x"),
                TextSegment::link("b", "y"),
                plain(" tail"),
            ]
        );
    }

    #[test]
    fn link_pass_skips_images() {
        let segments = split_links(vec![plain("see ![pic](p.png)")]);
        assert_eq!(segments, vec![plain("see ![pic](p.png)")]);
    }

    #[rstest]
    #[case("[see [docs]](u)", vec![("see [docs]", "u")])]
    #[case("[home](/) and [about](/about)", vec![("home", "/"), ("about", "/about")])]
    #[case(
        "[wiki](https://en.wikipedia.org/wiki/Rust_(language))",
        vec![("wiki", "https://en.wikipedia.org/wiki/Rust_(language")]
    )]
    #[case("![img](a.png) then [link](b)", vec![("link", "b")])]
    fn link_text_and_url_are_lazy(#[case] text: &str, #[case] expected: Vec<(&str, &str)>) {
        let expected: Vec<(String, String)> = expected
            .into_iter()
            .map(|(t, u)| (t.to_string(), u.to_string()))
            .collect();
        assert_eq!(extract_markdown_links(text), expected);
    }

    #[rstest]
    #[case("![a [b]](c.png)", vec![("a [b]", "c.png")])]
    #[case("![a](x_(1).png)", vec![("a", "x_(1")])]
    fn image_alt_and_url_are_lazy(#[case] text: &str, #[case] expected: Vec<(&str, &str)>) {
        let expected: Vec<(String, String)> = expected
            .into_iter()
            .map(|(t, u)| (t.to_string(), u.to_string()))
            .collect();
        assert_eq!(extract_markdown_images(text), expected);
    }

    #[test]
    fn url_with_parentheses_splits_at_first_close() {
        assert_eq!(
            text_to_segments("see [wiki](https://example.org/Foo(bar)) now"),
            vec![
                plain("see "),
                TextSegment::link("wiki", "https://example.org/Foo(bar"),
                plain(") now"),
            ]
        );
    }

    #[test]
    fn image_directly_followed_by_link() {
        assert_eq!(
            text_to_segments("![a](x)[b](y)"),
            vec![TextSegment::image("a", "x"), TextSegment::link("b", "y")]
        );
    }

    #[test]
    fn full_tokenization() {
        let text = "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)";
        assert_eq!(
            text_to_segments(text),
            vec![
                plain("This is "),
                styled("text", TextKind::Bold),
                plain(" with an "),
                styled("italic", TextKind::Italic),
                plain(" word and a "),
                styled("code block", TextKind::Code),
                plain(" and an "),
                TextSegment::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                plain(" and a "),
                TextSegment::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn fully_elided_input_yields_one_empty_segment() {
        assert_eq!(text_to_segments("****"), vec![plain("")]);
        assert_eq!(text_to_segments(""), vec![plain("")]);
    }

    #[rstest]
    #[case(plain("raw"), "raw")]
    #[case(styled("bold", TextKind::Bold), "<b>bold</b>")]
    #[case(styled("it", TextKind::Italic), "<i>it</i>")]
    #[case(styled("x = 1", TextKind::Code), "<code>x = 1</code>")]
    #[case(TextSegment::link("home", "/"), "<a href=\"/\">home</a>")]
    #[case(TextSegment::image("cat", "/cat.png"), "<img src=\"/cat.png\" alt=\"cat\"></img>")]
    fn segment_to_html(#[case] segment: TextSegment, #[case] expected: &str) {
        assert_eq!(segment.to_html().render().unwrap(), expected);
    }

    #[test]
    fn url_only_on_links_and_images() {
        assert_eq!(TextSegment::link("a", "u").url(), Some("u"));
        assert_eq!(TextSegment::image("a", "u").url(), Some("u"));
        assert_eq!(plain("a").url(), None);
    }

    proptest! {
        #[test]
        fn plain_text_is_idempotent(text in "[a-zA-Z0-9 .,;:?]{1,64}") {
            prop_assert_eq!(text_to_segments(&text), vec![plain(&text)]);
        }

        #[test]
        fn never_empty(text in "[a-z*_`\\[\\]()! ]{0,64}") {
            prop_assert!(!text_to_segments(&text).is_empty());
        }
    }
}
