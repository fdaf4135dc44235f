//! Tag extraction from free-text descriptions: line-by-line tokenizer.
//!
//! Splits a description into prose, fenced examples and a footer, and pulls
//! the recognized tags out of it:
//!
//! - block tags, one per line: `@platform ios, android`, `@default 0`,
//!   `@type number` (`@default` and `@type` may repeat)
//! - inline directives anywhere in prose or tag values: `{@platform ios}`
//!
//! Anything that does not parse cleanly is left in the text as written.

use crate::error::Recovered;
use crate::model::{Description, Example, PlatformValue, TagSet};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+(.*))?$").unwrap());

static RE_INLINE_PLATFORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@platform\s+([A-Za-z0-9_][A-Za-z0-9_,\s]*)\}").unwrap()
});

static RE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(`{3,}|~{3,})\s*(.*)$").unwrap());

/// Block tags that end up in a [`TagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Platform,
    Default,
    Type,
}

impl TagKey {
    pub fn parse(key: &str) -> Option<TagKey> {
        match key {
            "platform" => Some(TagKey::Platform),
            "default" => Some(TagKey::Default),
            "type" => Some(TagKey::Type),
            _ => None,
        }
    }
}

/// Result of [`extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub description: Description,
    pub tags: TagSet,
}

impl Extracted {
    /// Description, examples and footer rejoined; what the owning entity
    /// shows as its description.
    pub fn clean_text(&self) -> String {
        self.description.joined()
    }
}

// -- Tokenizer state ----------------------------------------------------------

struct OpenFence {
    marker: char,
    len: usize,
    language: String,
    lines: Vec<String>,
}

struct OpenTag {
    key: TagKey,
    value: String,
    // Inline directives written in front of the tag on its first line.
    directives: String,
    raw_lines: Vec<String>,
}

#[derive(Default)]
struct State {
    prose: Vec<String>,
    description: Option<String>,
    examples: Vec<Example>,
    tags: TagSet,
    tag: Option<OpenTag>,
    fence: Option<OpenFence>,
}

// -- Public API ---------------------------------------------------------------

/// Normalize a raw description.
///
/// Never fails; running it again on [`Extracted::clean_text`] changes nothing.
pub fn extract(input: &str) -> Extracted {
    let text = unindent(&input.replace("\r\n", "\n"));
    let mut s = State::default();

    for line in text.split('\n') {
        if s.fence.is_some() {
            handle_fence_line(&mut s, line);
            continue;
        }

        let trimmed = line.trim();
        // Leading directives must not hide a fence or tag behind them.
        let (directives, rest) = if s.tag.is_none() {
            split_leading_directives(trimmed)
        } else {
            ("", trimmed)
        };

        if let Some(caps) = RE_FENCE_OPEN.captures(rest) {
            finish_tag(&mut s);
            for id in strip_platform_directives(directives).1 {
                s.tags.add_platform(&id);
            }
            let marker = &caps[1];
            s.fence = Some(OpenFence {
                marker: marker.chars().next().unwrap_or('`'),
                len: marker.len(),
                language: caps[2].trim().to_string(),
                lines: vec![rest.to_string()],
            });
            continue;
        }

        if let Some(caps) = RE_BLOCK_TAG.captures(rest) {
            finish_tag(&mut s);
            match TagKey::parse(&caps[1]) {
                Some(key) => {
                    s.tag = Some(OpenTag {
                        key,
                        value: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
                        directives: directives.to_string(),
                        raw_lines: vec![line.trim_end().to_string()],
                    });
                }
                None => {
                    tracing::debug!(
                        kind = %Recovered::MalformedDirective,
                        tag = &caps[1],
                        "unknown block tag left in description"
                    );
                    push_prose(&mut s, line);
                }
            }
            continue;
        }

        if trimmed.is_empty() {
            finish_tag(&mut s);
            if !s.prose.last().is_some_and(String::is_empty) {
                s.prose.push(String::new());
            }
            continue;
        }

        if let Some(ref mut tag) = s.tag {
            tag.value.push(' ');
            tag.value.push_str(trimmed);
            tag.raw_lines.push(line.trim_end().to_string());
            continue;
        }

        push_prose(&mut s, line);
    }

    finish_tag(&mut s);

    // Unterminated fence: keep it as prose.
    if let Some(fence) = s.fence.take() {
        tracing::debug!(
            kind = %Recovered::MalformedDirective,
            language = %fence.language,
            "unterminated code fence left in description"
        );
        s.prose.extend(fence.lines);
    }

    let rest = flush_prose(&mut s.prose);
    let (text, footer) = match s.description {
        Some(description) => (description, rest),
        None => (rest, String::new()),
    };

    Extracted {
        description: Description {
            text,
            examples: s.examples,
            footer,
        },
        tags: s.tags,
    }
}

/// Remove inline `{@platform ...}` directives from `text`.
///
/// Returns the cleaned text and the platform ids found, in order.
pub fn strip_platform_directives(text: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut platforms = Vec::new();
    let mut last = 0;

    for caps in RE_INLINE_PLATFORM.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&text[last..m.start()]);
        last = m.end();
        // Avoid a double space, or a space before punctuation, where the directive was.
        let rest = &text[last..];
        if rest.starts_with(['.', ',', ';', ':', '!', '?', ')']) {
            out.truncate(out.trim_end_matches([' ', '\t']).len());
        } else if out.is_empty() || out.ends_with([' ', '\t']) {
            last += rest.len() - rest.trim_start_matches([' ', '\t']).len();
        }
        platforms.extend(split_platform_ids(&caps[1]));
    }
    out.push_str(&text[last..]);

    if out.contains("{@") {
        tracing::debug!(
            kind = %Recovered::MalformedDirective,
            text = %out,
            "inline directive left in text"
        );
    }

    (out, platforms)
}

/// Split a line into its leading `{@platform ...}` directives and the rest.
fn split_leading_directives(line: &str) -> (&str, &str) {
    let mut end = 0;
    while let Some(m) = RE_INLINE_PLATFORM.find(&line[end..]) {
        if m.start() != 0 {
            break;
        }
        end += m.end();
        end += line[end..].len() - line[end..].trim_start().len();
    }
    (line[..end].trim_end(), &line[end..])
}

/// Split `ios, android` / `ios android` into ids.
pub fn split_platform_ids(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

// -- Line handlers ------------------------------------------------------------

fn handle_fence_line(s: &mut State, line: &str) {
    let Some(fence) = s.fence.as_mut() else {
        return;
    };
    let trimmed = line.trim();
    let closes = trimmed.len() >= fence.len && trimmed.chars().all(|c| c == fence.marker);
    if !closes {
        fence.lines.push(line.to_string());
        return;
    }

    let Some(mut fence) = s.fence.take() else {
        return;
    };
    let code = fence.lines[1..].join("\n");
    fence.lines.push(trimmed.to_string());

    let before = flush_prose(&mut s.prose);
    let intro = if s.description.is_none() {
        s.description = Some(before);
        String::new()
    } else {
        before
    };

    s.examples.push(Example {
        language: fence.language,
        intro,
        raw: fence.lines.join("\n"),
        code,
    });
}

fn push_prose(s: &mut State, line: &str) {
    let (clean, platforms) = strip_platform_directives(line.trim_end());
    for id in &platforms {
        s.tags.add_platform(id);
    }
    let clean = clean.trim_end();
    // A line that held nothing but a directive disappears.
    if clean.trim().is_empty() && !platforms.is_empty() {
        return;
    }
    s.prose.push(clean.to_string());
}

/// Close the open block tag, recording it or (when empty) returning its lines to prose.
fn finish_tag(s: &mut State) {
    let Some(tag) = s.tag.take() else {
        return;
    };

    if tag.value.trim().is_empty() {
        tracing::debug!(
            kind = %Recovered::MalformedDirective,
            line = %tag.raw_lines.join(" "),
            "block tag without value left in description"
        );
        s.prose.extend(tag.raw_lines);
        return;
    }

    let value = if tag.directives.is_empty() {
        tag.value
    } else {
        format!("{} {}", tag.directives, tag.value)
    };
    match tag.key {
        TagKey::Platform => {
            let (clean, inline) = strip_platform_directives(&value);
            for id in split_platform_ids(&clean).iter().chain(&inline) {
                s.tags.add_platform(id);
            }
        }
        TagKey::Default => s.tags.default.push(platform_value(&value)),
        TagKey::Type => s.tags.type_overrides.push(platform_value(&value)),
    }
}

fn platform_value(value: &str) -> PlatformValue {
    let (clean, platforms) = strip_platform_directives(value);
    PlatformValue {
        value: clean.trim().to_string(),
        platforms,
    }
}

/// Join buffered prose lines, dropping surrounding blank lines.
fn flush_prose(prose: &mut Vec<String>) -> String {
    let joined = prose.join("\n");
    prose.clear();
    joined.trim().to_string()
}

/// Remove common leading indentation from a multi-line string.
///
/// Whitespace-only lines don't count towards the common indentation.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                &l[min_indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_description_has_no_tags() {
        let out = extract("Whether the indicator is showing.");
        assert_eq!(out.description.text, "Whether the indicator is showing.");
        assert!(out.tags.is_empty());
        assert!(out.description.examples.is_empty());
    }

    #[test]
    fn block_tags_are_collected() {
        let out = extract(
            "The foreground color.\n\n@platform ios, android\n@default {@platform android} `null` (system accent)\n@default {@platform ios} '#999999'",
        );
        assert_eq!(out.description.text, "The foreground color.");
        assert_eq!(out.tags.platform, ["ios", "android"]);
        assert_eq!(out.tags.default.len(), 2);
        assert_eq!(out.tags.default[0].value, "`null` (system accent)");
        assert_eq!(out.tags.default[0].platforms, ["android"]);
        assert_eq!(out.tags.default[1].value, "'#999999'");
        assert_eq!(out.tags.default[1].platforms, ["ios"]);
    }

    #[test]
    fn repeated_type_tags_keep_order() {
        let out = extract("Size.\n@type {@platform android} enum('small', 'large')\n@type {@platform ios} number");
        let values: Vec<&str> = out.tags.type_overrides.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["enum('small', 'large')", "number"]);
        assert_eq!(out.tags.type_overrides[1].platforms, ["ios"]);
    }

    #[test]
    fn tag_continuation_lines() {
        let out = extract("Text.\n\n@default a very\n  long value\n\nAfter.");
        assert_eq!(out.tags.default[0].value, "a very long value");
        assert_eq!(out.description.text, "Text.\n\nAfter.");
    }

    #[test]
    fn inline_directive_in_prose_records_platform() {
        let out = extract("Shows a spinner {@platform android} on Android only.");
        assert_eq!(out.description.text, "Shows a spinner on Android only.");
        assert_eq!(out.tags.platform, ["android"]);
    }

    #[test]
    fn directive_only_line_is_dropped() {
        let out = extract("{@platform ios}\nOnly on iOS.");
        assert_eq!(out.description.text, "Only on iOS.");
        assert_eq!(out.tags.platform, ["ios"]);
    }

    #[test]
    fn malformed_directives_left_verbatim() {
        let out = extract("Broken {@platform ios and {@foo bar} here.\n@deprecated use other");
        assert_eq!(
            out.description.text,
            "Broken {@platform ios and {@foo bar} here.\n@deprecated use other"
        );
        assert!(out.tags.is_empty());
    }

    #[test]
    fn empty_tag_left_verbatim() {
        let out = extract("Text.\n@default");
        assert_eq!(out.description.text, "Text.\n@default");
        assert!(out.tags.default.is_empty());
    }

    #[test]
    fn examples_and_footer_are_split() {
        let input = "Intro text.\n\n```SnackPlayer name=One\nconst a = 1;\n```\n\nBetween.\n\n```js\nconst b = 2;\n```\n\nFooter text.";
        let out = extract(input);
        let desc = &out.description;
        assert_eq!(desc.text, "Intro text.");
        assert_eq!(desc.examples.len(), 2);
        assert_eq!(desc.examples[0].language, "SnackPlayer name=One");
        assert_eq!(desc.examples[0].code, "const a = 1;");
        assert_eq!(desc.examples[0].raw, "```SnackPlayer name=One\nconst a = 1;\n```");
        assert_eq!(desc.examples[1].intro, "Between.");
        assert_eq!(desc.footer, "Footer text.");
    }

    #[test]
    fn tags_inside_fences_are_code() {
        let out = extract("Text.\n```js\n@type not a tag\n```");
        assert!(out.tags.is_empty());
        assert_eq!(out.description.examples[0].code, "@type not a tag");
    }

    #[test]
    fn unterminated_fence_stays_prose() {
        let out = extract("Text.\n```js\nfoo();");
        assert!(out.description.examples.is_empty());
        assert_eq!(out.description.text, "Text.\n```js\nfoo();");
    }

    #[test]
    fn comment_indentation_removed() {
        let out = extract("    Indented line.\n      nested\n    @platform tv");
        assert_eq!(out.description.text, "Indented line.\n  nested");
        assert_eq!(out.tags.platform, ["tv"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let input = "  Renders things {@platform ios}.\n\n  ```SnackPlayer name=Example\n    <View />\n  ```\n\n  More text.\n\n  @platform ios\n  @default 0\n  @deprecated soon";
        let first = extract(input);
        let second = extract(&first.clean_text());
        assert_eq!(second.clean_text(), first.clean_text());
        assert!(second.tags.is_empty());
    }

    #[test]
    fn directive_before_block_tag_applies_to_the_tag() {
        let first = extract("Text.\n{@platform ios} @type number");
        assert_eq!(first.clean_text(), "Text.");
        assert_eq!(first.tags.type_overrides.len(), 1);
        assert_eq!(first.tags.type_overrides[0].value, "number");
        assert_eq!(first.tags.type_overrides[0].platforms, ["ios"]);

        let second = extract(&first.clean_text());
        assert_eq!(second.clean_text(), "Text.");
        assert!(second.tags.is_empty());
    }

    #[test]
    fn directive_before_fence_still_opens_it() {
        let first = extract("Text.\n{@platform ios} ```js\nfoo();\n```");
        assert_eq!(first.tags.platform, ["ios"]);
        assert_eq!(first.description.examples.len(), 1);
        assert_eq!(first.description.examples[0].code, "foo();");

        let second = extract(&first.clean_text());
        assert_eq!(second.clean_text(), first.clean_text());
        assert_eq!(second.description.examples, first.description.examples);
    }

    #[test]
    fn strip_directives_returns_ids() {
        let (text, ids) = strip_platform_directives("`0`{@platform ios, tv}");
        assert_eq!(text, "`0`");
        assert_eq!(ids, ["ios", "tv"]);
    }
}
