//! Prop blocks: heading with badges, description, and a Type/Default table.

use crate::error::Recovered;
use crate::model::{ComponentDoc, PlatformValue, PropDoc};
use crate::render::table::{self, code_cell, TableRow};
use crate::render::RenderContext;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

const REQUIRED_BADGE: &str = "<div class=\"label required basic\">Required</div>";

const SEGMENT_SEPARATOR: &str = "<hr/>";

// -- Regex patterns -----------------------------------------------------------

/// The `Platform.OS === 'ios' ?` head of a ternary, optionally parenthesized.
static RE_PLATFORM_TERNARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\(?\s*Platform\.OS\s*===?\s*['"](\w+)['"]\s*\)?\s*\?"#).unwrap()
});

/// `Platform.select({ios: a, android: b})`.
static RE_PLATFORM_SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^Platform\.select\(\s*(\{.*\})\s*\)$").unwrap());

/// One branch of a structural default that varies per platform.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Branch {
    platform: String,
    value: String,
}

// -- Section ------------------------------------------------------------------

/// The `## Props` section, or `None` when the component has no props.
pub fn render_props(component: &ComponentDoc, ctx: &RenderContext) -> Option<String> {
    if component.props.is_empty() {
        tracing::debug!(kind = %Recovered::EmptySection, section = "props", "no props to render");
        return None;
    }

    let mut out = String::from("## Props\n\n");
    if !component.composes.is_empty() {
        let inherits: Vec<String> = component
            .composes
            .iter()
            .map(|parent| format!("Inherits {}.", ctx.resolver.render_name(parent)))
            .collect();
        out.push_str(&inherits.join("\n\n"));
        out.push_str("\n\n");
    }

    let blocks: Vec<String> = sort_props(&component.props)
        .into_iter()
        .map(|prop| render_prop(prop, ctx))
        .collect();
    out.push_str(&blocks.join("\n\n---\n\n"));
    Some(out)
}

/// Required props first, then by name.
pub fn sort_props(props: &IndexMap<String, PropDoc>) -> Vec<&PropDoc> {
    let mut sorted: Vec<&PropDoc> = props.values().collect();
    sorted.sort_by(|a, b| b.required.cmp(&a.required).then_with(|| a.name.cmp(&b.name)));
    sorted
}

/// A single prop block.
pub fn render_prop(prop: &PropDoc, ctx: &RenderContext) -> String {
    let mut out = String::from("### ");
    if prop.required {
        out.push_str(REQUIRED_BADGE);
    }
    out.push('`');
    out.push_str(&prop.name);
    out.push('`');
    if !prop.tags.platform.is_empty() {
        out.push(' ');
        out.push_str(&ctx.platforms.badges(&prop.tags.platform));
    }
    out.push_str("\n\n");

    if !prop.description.is_empty() {
        out.push_str(&prop.description);
        out.push_str("\n\n");
    }

    let mut row = TableRow::new().cell("Type", type_column(prop, ctx));
    if let Some(default) = default_column(prop, ctx) {
        row = row.cell("Default", default);
    }
    out.push_str(&table::render(&[row]));
    out
}

// -- Columns ------------------------------------------------------------------

/// `@type` overrides win over the structural type.
fn type_column(prop: &PropDoc, ctx: &RenderContext) -> String {
    if !prop.tags.type_overrides.is_empty() {
        return prop
            .tags
            .type_overrides
            .iter()
            .map(|tag| with_badges(&tag.value, &tag.platforms, ctx))
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);
    }
    prop.type_descriptor
        .as_ref()
        .map(|descriptor| ctx.resolver.render(descriptor))
        .unwrap_or_default()
}

/// `@default` tags win; otherwise the structural default, split per platform
/// when it is a platform selector. `None` when the prop has no default.
fn default_column(prop: &PropDoc, ctx: &RenderContext) -> Option<String> {
    let swatch = prop.name == "color";

    if !prop.tags.default.is_empty() {
        let segments: Vec<String> = prop
            .tags
            .default
            .iter()
            .map(|tag| tag_default(tag, swatch, ctx))
            .collect();
        return Some(segments.join(SEGMENT_SEPARATOR));
    }

    let value = prop.default_value.as_deref()?.trim();
    if value.is_empty() {
        return None;
    }

    match platform_branches(value, ctx) {
        Some(branches) => Some(
            branches
                .iter()
                .map(|b| {
                    let code = if swatch {
                        color_swatch(&b.value)
                    } else {
                        code_cell(&b.value)
                    };
                    format!("{} {}", code, ctx.platforms.badge(&b.platform))
                })
                .collect::<Vec<_>>()
                .join(SEGMENT_SEPARATOR),
        ),
        None => Some(code_cell(value)),
    }
}

/// A `@default` value without a platform directive is emitted as written.
fn tag_default(tag: &PlatformValue, swatch: bool, ctx: &RenderContext) -> String {
    if tag.platforms.is_empty() {
        return tag.value.clone();
    }
    if swatch {
        return with_badges(&color_swatch(&tag.value), &tag.platforms, ctx);
    }
    with_badges(&tag.value, &tag.platforms, ctx)
}

fn with_badges(value: &str, platforms: &[String], ctx: &RenderContext) -> String {
    let badges = ctx.platforms.badges(platforms);
    if badges.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, badges)
    }
}

/// Inline-coded color value followed by a swatch, e.g. for `color` props.
///
/// Null literals get no swatch.
fn color_swatch(value: &str) -> String {
    let code = code_cell(value);
    if value.contains("null") {
        return code;
    }
    let color = value.trim().replace(['\'', '"'], "");
    format!(
        "{}<ins style=\"background: {}\" class=\"color-box\"></ins>",
        code, color
    )
}

// -- Structural platform defaults ---------------------------------------------

/// Split a platform-selecting default into its branches.
fn platform_branches(value: &str, ctx: &RenderContext) -> Option<Vec<Branch>> {
    if let Some(caps) = RE_PLATFORM_TERNARY.captures(value) {
        let platform = caps[1].to_string();
        let other = other_platform(&platform)?;
        let rest = &value[caps.get(0).map_or(0, |m| m.end())..];
        // Only the `:` outside quotes and brackets separates the branches.
        let parts = split_top_level(rest, ':');
        let [then, otherwise] = parts.as_slice() else {
            return None;
        };
        let (then, otherwise) = (then.trim(), otherwise.trim());
        if then.is_empty() || otherwise.is_empty() {
            return None;
        }
        return Some(vec![
            Branch {
                platform,
                value: then.to_string(),
            },
            Branch {
                platform: other.to_string(),
                value: otherwise.to_string(),
            },
        ]);
    }

    let object = match RE_PLATFORM_SELECT.captures(value) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None if value.starts_with('{') && value.ends_with('}') => value,
        None => return None,
    };
    let branches = json_branches(object).or_else(|| object_branches(object))?;
    if branches.is_empty() || !branches.iter().all(|b| ctx.platforms.is_known(&b.platform)) {
        return None;
    }
    Some(branches)
}

fn other_platform(platform: &str) -> Option<&'static str> {
    match platform.to_ascii_lowercase().as_str() {
        "ios" => Some("android"),
        "android" => Some("ios"),
        _ => None,
    }
}

/// `{"ios": "value", "android": 1}` as strict JSON.
fn json_branches(object: &str) -> Option<Vec<Branch>> {
    let map: IndexMap<String, serde_json::Value> = serde_json::from_str(object).ok()?;
    Some(
        map.into_iter()
            .map(|(platform, value)| Branch {
                platform,
                value: match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect(),
    )
}

/// `{ios: 'a', android: 'b'}` as a JS object literal; values kept as written.
fn object_branches(object: &str) -> Option<Vec<Branch>> {
    let body = object.trim().strip_prefix('{')?.strip_suffix('}')?;
    split_top_level(body, ',')
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (key, value) = entry.split_once(':')?;
            let key = key.trim().trim_matches(|c| c == '\'' || c == '"');
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some(Branch {
                platform: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Split on `sep` where it is outside quotes and brackets.
fn split_top_level(body: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut prev = None;

    for (i, c) in body.char_indices() {
        match quote {
            Some(q) => {
                if c == q && prev != Some('\\') {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                c if c == sep && depth == 0 => {
                    parts.push(&body[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
        prev = Some(c);
    }
    parts.push(&body[start..]);
    parts
}
