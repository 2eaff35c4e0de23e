//! Segment parser for streamed AI responses.
//!
//! The parser is stateless: every call re-parses the whole accumulated text, so it is safe to
//! run on each incoming chunk, including transiently invalid intermediate states. Nothing in
//! here returns an error; malformed input degrades to fewer segments.

mod buffer;

pub use buffer::StreamingBuffer;

use crate::domain::{ParseResult, Segment};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

const FENCE: &str = "```";
const MANIFEST_TERMINATOR: &str = "}}";

lazy_static! {
    static ref FENCE_TAG_RE: Regex =
        Regex::new(r"^[A-Za-z0-9_+.#-]*[ \t]*(?:\r?\n|$)").expect("fence language tag regex");
    static ref DEPENDENCY_PAIR_RE: Regex =
        Regex::new(r#""([^"]+)"\s*:\s*"([^"]*)""#).expect("dependency pair regex");
}

/// Parse the accumulated response text into ordered segments plus the raw dependency manifest.
pub fn parse_content(text: &str) -> ParseResult {
    let (dependencies_string, body) = split_manifest(text);
    ParseResult {
        segments: split_segments(body),
        dependencies_string: dependencies_string.map(str::to_string),
    }
}

/// Extract `"name": "version"` pairs from a manifest string.
///
/// Deliberately lenient: works on partially streamed or malformed JSON and never fails.
pub fn parse_dependencies(dependencies_string: Option<&str>) -> BTreeMap<String, String> {
    let Some(text) = dependencies_string else {
        return BTreeMap::new();
    };

    DEPENDENCY_PAIR_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Only a manifest at the very start of the text counts; the first `}}` closes it.
fn split_manifest(text: &str) -> (Option<&str>, &str) {
    if !text.starts_with('{') {
        return (None, text);
    }
    match text.find(MANIFEST_TERMINATOR) {
        Some(idx) => {
            let (manifest, body) = text.split_at(idx + MANIFEST_TERMINATOR.len());
            (Some(manifest), body)
        }
        None => (None, text),
    }
}

fn split_segments(body: &str) -> Vec<Segment> {
    let parts = split_on_fences(body);

    if let [only] = parts.as_slice() {
        return vec![Segment::markdown(only.trim())];
    }

    let mut segments = Vec::with_capacity(parts.len());
    for (idx, part) in parts.into_iter().enumerate() {
        if idx % 2 == 0 {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                segments.push(Segment::markdown(trimmed));
            }
        } else {
            // Empty code is kept: a just-opened fence must stay visible while streaming.
            segments.push(Segment::code(part));
        }
    }
    segments
}

/// Even indices are prose, odd indices are fenced code. An unterminated fence runs to the end.
fn split_on_fences(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = body;
    let mut in_code = false;

    while let Some(idx) = rest.find(FENCE) {
        let before = &rest[..idx];
        let after = &rest[idx + FENCE.len()..];
        if in_code {
            parts.push(strip_trailing_newline(before));
            rest = after;
        } else {
            parts.push(before);
            rest = skip_language_tag(after);
        }
        in_code = !in_code;
    }

    parts.push(rest);
    parts
}

fn skip_language_tag(after_fence: &str) -> &str {
    match FENCE_TAG_RE.find(after_fence) {
        Some(tag) => &after_fence[tag.end()..],
        None => after_fence,
    }
}

fn strip_trailing_newline(code: &str) -> &str {
    let code = code.strip_suffix('\n').unwrap_or(code);
    code.strip_suffix('\r').unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SegmentKind;

    fn kinds(result: &ParseResult) -> Vec<SegmentKind> {
        result.segments.iter().map(|segment| segment.kind).collect()
    }

    #[test]
    fn test_markdown_code_markdown() {
        let result = parse_content("Here's a component:\n\n```jsx\nfunction A(){}\n```\n\nDone.");

        assert_eq!(
            result.segments,
            vec![
                Segment::markdown("Here's a component:"),
                Segment::code("function A(){}"),
                Segment::markdown("Done."),
            ]
        );
        assert!(result.dependencies_string.is_none());
    }

    #[test]
    fn test_manifest_prefix_extracted() {
        let result = parse_content("{\"react\":\"^18.2.0\"}}\n\nHello");

        assert_eq!(
            result.dependencies_string.as_deref(),
            Some("{\"react\":\"^18.2.0\"}}")
        );
        assert_eq!(result.segments, vec![Segment::markdown("Hello")]);
    }

    #[test]
    fn test_manifest_only_at_start() {
        let text = "Use it like `<div style={{color: 'red'}}>`\n```jsx\nconst s = {{}};\n```";
        let result = parse_content(text);

        assert!(result.dependencies_string.is_none());
        assert_eq!(result.first_code(), Some("const s = {{}};"));
    }

    #[test]
    fn test_manifest_with_later_braces_in_code() {
        let text = "{\"dependencies\": {\"react\": \"^18\"}}\n```jsx\n<a style={{x: 1}} />\n```";
        let result = parse_content(text);

        assert_eq!(
            result.dependencies_string.as_deref(),
            Some("{\"dependencies\": {\"react\": \"^18\"}}")
        );
        assert_eq!(result.segments, vec![Segment::code("<a style={{x: 1}} />")]);
    }

    #[test]
    fn test_unterminated_manifest_is_markdown() {
        let result = parse_content("{\"react\": \"^18");
        assert!(result.dependencies_string.is_none());
        assert_eq!(result.segments, vec![Segment::markdown("{\"react\": \"^18")]);
    }

    #[test]
    fn test_no_fence_yields_single_markdown_even_if_empty() {
        assert_eq!(parse_content("").segments, vec![Segment::markdown("")]);
        assert_eq!(parse_content("   \n").segments, vec![Segment::markdown("")]);
        assert_eq!(
            parse_content("  plain prose  ").segments,
            vec![Segment::markdown("plain prose")]
        );
    }

    #[test]
    fn test_open_fence_is_code_to_end_of_text() {
        let result = parse_content("Building it now:\n```jsx\nexport default function App() {\n");

        assert_eq!(kinds(&result), vec![SegmentKind::Markdown, SegmentKind::Code]);
        assert_eq!(
            result.first_code(),
            Some("export default function App() {\n")
        );
    }

    #[test]
    fn test_just_opened_fence_emits_empty_code() {
        let with_tag = parse_content("Intro\n```js");
        assert_eq!(
            with_tag.segments,
            vec![Segment::markdown("Intro"), Segment::code("")]
        );

        let bare = parse_content("```");
        assert_eq!(bare.segments, vec![Segment::code("")]);
    }

    #[test]
    fn test_language_tag_never_in_content() {
        for tag in ["jsx", "js", "javascript", "tsx", "c++", "objective-c", ""] {
            let text = format!("```{tag}\nlet x = 1;\n```");
            let result = parse_content(&text);
            assert_eq!(result.first_code(), Some("let x = 1;"), "tag {tag:?}");
        }
    }

    #[test]
    fn test_code_on_fence_line_is_not_a_tag() {
        let result = parse_content("```const x = 1;\n```");
        assert_eq!(result.first_code(), Some("const x = 1;"));
    }

    #[test]
    fn test_crlf_fences() {
        let result = parse_content("Hi\r\n```jsx\r\nconst a = 1;\r\n```\r\nBye");
        assert_eq!(
            result.segments,
            vec![
                Segment::markdown("Hi"),
                Segment::code("const a = 1;"),
                Segment::markdown("Bye"),
            ]
        );
    }

    #[test]
    fn test_adjacent_fences_drop_empty_markdown() {
        let result = parse_content("```js\na\n```\n\n```js\nb\n```");
        assert_eq!(result.segments, vec![Segment::code("a"), Segment::code("b")]);
    }

    #[test]
    fn test_multiple_code_blocks_first_is_canonical() {
        let result = parse_content("One\n```jsx\nApp\n```\nTwo\n```css\n.a{}\n```\nThree");
        assert_eq!(
            kinds(&result),
            vec![
                SegmentKind::Markdown,
                SegmentKind::Code,
                SegmentKind::Markdown,
                SegmentKind::Code,
                SegmentKind::Markdown,
            ]
        );
        assert_eq!(result.first_code(), Some("App"));
        assert_eq!(result.last_code(), Some(".a{}"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "{\"a\":\"1\"}}\nIntro\n```jsx\nconst x = 1;\n```\nOutro";
        assert_eq!(parse_content(text), parse_content(text));
    }

    #[test]
    fn test_parse_dependencies_total() {
        assert!(parse_dependencies(None).is_empty());
        assert!(parse_dependencies(Some("{}")).is_empty());
        assert!(parse_dependencies(Some("not json at all")).is_empty());
    }

    #[test]
    fn test_parse_dependencies_extracts_pairs_through_noise() {
        let deps = parse_dependencies(Some(
            "garbage {\"react\": \"^18.2.0\", junk, \"react-dom\":\"^18.2.0\" ,\n \"use-fireproof\" :  \"0.20\"}}",
        ));

        assert_eq!(deps.len(), 3);
        assert_eq!(deps.get("react").map(String::as_str), Some("^18.2.0"));
        assert_eq!(deps.get("react-dom").map(String::as_str), Some("^18.2.0"));
        assert_eq!(deps.get("use-fireproof").map(String::as_str), Some("0.20"));
    }

    #[test]
    fn test_parse_dependencies_partial_stream() {
        let deps = parse_dependencies(Some("{\"react\": \"^18.2.0\", \"react-d"));
        assert_eq!(deps.len(), 1);
        assert!(deps.contains_key("react"));
    }

    #[test]
    fn test_parse_result_dependencies_accessor() {
        let result = parse_content("{\"dependencies\": {\"zustand\": \"^4\"}}\nok");
        let deps = result.dependencies();
        assert_eq!(deps.get("zustand").map(String::as_str), Some("^4"));
    }
}
