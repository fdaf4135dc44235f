//! Method blocks: heading, call signature, description and parameter table.

use crate::error::Recovered;
use crate::model::{ComponentDoc, MethodDoc, ParamDoc, TypeDescriptor};
use crate::render::table::{self, TableRow};
use crate::render::RenderContext;

/// The `## Methods` section, or `None` when the component has no methods.
pub fn render_methods(component: &ComponentDoc, ctx: &RenderContext) -> Option<String> {
    if component.methods.is_empty() {
        tracing::debug!(kind = %Recovered::EmptySection, section = "methods", "no methods to render");
        return None;
    }

    let mut methods: Vec<&MethodDoc> = component.methods.iter().collect();
    methods.sort_by(|a, b| a.name.cmp(&b.name));

    let blocks: Vec<String> = methods
        .into_iter()
        .map(|method| render_method(method, &component.display_name, ctx))
        .collect();
    Some(format!("## Methods\n\n{}", blocks.join("\n\n---\n\n")))
}

/// A single method block.
pub fn render_method(method: &MethodDoc, display_name: &str, ctx: &RenderContext) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut heading = format!("### `{}()`", method.name);
    if !method.tags.platform.is_empty() {
        heading.push(' ');
        heading.push_str(&ctx.platforms.badges(&method.tags.platform));
    }
    parts.push(heading);
    parts.push(signature_block(method, display_name));

    if !method.description.is_empty() {
        parts.push(method.description.clone());
    }

    if !method.params.is_empty() {
        parts.push("**Parameters:**".to_string());
        parts.push(parameter_table(&method.params, ctx).trim_end().to_string());
        parts.extend(
            method
                .params
                .iter()
                .filter_map(|param| valid_keys(param, ctx)),
        );
    }

    parts.join("\n\n")
}

/// ```` ```jsx ```` block with the call shape, e.g. `Alert.alert(title, [message]);`.
///
/// Static methods are called on the component; instance methods on a
/// lower-camel receiver.
fn signature_block(method: &MethodDoc, display_name: &str) -> String {
    let receiver = if method.is_static() {
        display_name.to_string()
    } else {
        lower_first(display_name)
    };
    let args: Vec<String> = method
        .params
        .iter()
        .map(|p| {
            if p.optional {
                format!("[{}]", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect();
    format!(
        "```jsx\n{}.{}({});\n```",
        receiver,
        method.name,
        args.join(", ")
    )
}

fn parameter_table(params: &[ParamDoc], ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = params
        .iter()
        .map(|param| {
            let kind = param
                .type_descriptor
                .as_ref()
                .map(|d| ctx.resolver.render(d))
                .unwrap_or_default();
            let mut row = TableRow::new()
                .cell("Name", &param.name)
                .cell("Type", kind)
                .cell("Required", if param.optional { "No" } else { "Yes" });
            if let Some(description) = param.description.as_deref().filter(|d| !d.is_empty()) {
                row = row.cell("Description", description);
            }
            row
        })
        .collect();
    table::render(&rows)
}

/// Key list for a parameter typed as an object literal.
fn valid_keys(param: &ParamDoc, ctx: &RenderContext) -> Option<String> {
    let Some(TypeDescriptor::Signature {
        kind, properties, ..
    }) = &param.type_descriptor
    else {
        return None;
    };
    if kind != "object" || properties.is_empty() {
        return None;
    }

    let items: Vec<String> = properties
        .iter()
        .map(|p| format!("- '{}' ({})", p.key, ctx.resolver.render(&p.value)))
        .collect();
    Some(format!(
        "Valid `{}` keys are:\n\n{}",
        param.name,
        items.join("\n")
    ))
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
