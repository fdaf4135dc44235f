//! Markdown page renderer.
//!
//! Produces one documentation page per component: front matter, the
//! component description with its examples, then a `# Reference` part with
//! the Props and Methods sections.

use crate::config::Config;
use crate::error::{DocResult, Recovered};
use crate::model::{Description, Example, PageDoc};
use crate::render::method::render_methods;
use crate::render::prop::render_props;
use crate::render::{RenderContext, Renderer};
use regex::Regex;
use std::sync::LazyLock;

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

// Tabs shown when a page carries both a function and a class component example.
const TOGGLER: &str = r#"<div class="toggler">
  <ul role="tablist" class="toggle-syntax">
    <li id="functional" class="button-functional" aria-selected="false" role="tab" tabindex="0" aria-controls="functionaltab" onclick="displayTabs('syntax', 'functional')">
      Function Component Example
    </li>
    <li id="classical" class="button-classical" aria-selected="false" role="tab" tabindex="0" aria-controls="classicaltab" onclick="displayTabs('syntax', 'classical')">
      Class Component Example
    </li>
  </ul>
</div>"#;

const FUNCTIONAL_BLOCK: &str = "<block class='functional syntax' />";
const CLASS_BLOCK: &str = "<block class='classical syntax' />";
const END_BLOCK: &str = "<block class='endBlock syntax' />";

const FUNCTION_EXAMPLE: &str = "Function Component Example";
const CLASS_EXAMPLE: &str = "Class Component Example";

pub struct MarkdownRenderer {
    ctx: RenderContext,
}

impl MarkdownRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            ctx: RenderContext::new(config),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, page: &PageDoc) -> DocResult<String> {
        Ok(self.render_page(page))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

impl MarkdownRenderer {
    /// Assemble the full page.
    pub fn render_page(&self, page: &PageDoc) -> String {
        let component = &page.component;
        let mut parts: Vec<String> = vec![format!(
            "---\nid: {}\ntitle: {}\n---",
            page.id, page.title
        )];

        let description = render_description(&component.description);
        if !description.is_empty() {
            parts.push(description);
        }

        let sections: Vec<String> = [
            render_props(component, &self.ctx),
            render_methods(component, &self.ctx),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !sections.is_empty() {
            parts.push("---".to_string());
            parts.push("# Reference".to_string());
            parts.extend(sections);
        }

        finish(&parts.join("\n\n"))
    }
}

/// Collapse blank-line runs and end with exactly one newline.
fn finish(markdown: &str) -> String {
    let collapsed = RE_BLANK_RUN.replace_all(markdown, "\n\n");
    let mut out = collapsed.trim_end().to_string();
    out.push('\n');
    out
}

// -- Description and examples -------------------------------------------------

/// Description prose, examples under `## Example`, then the footer.
fn render_description(desc: &Description) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !desc.text.is_empty() {
        parts.push(desc.text.clone());
    }

    if desc.examples.is_empty() {
        tracing::debug!(kind = %Recovered::EmptySection, section = "examples", "no examples to render");
    } else {
        parts.push("## Example".to_string());
        match tabbed_pair(&desc.examples) {
            Some((functional, class)) => {
                for example in [functional, class] {
                    if !example.intro.is_empty() {
                        parts.push(example.intro.clone());
                    }
                }
                parts.push(TOGGLER.to_string());
                parts.push(FUNCTIONAL_BLOCK.to_string());
                parts.push(functional.raw.clone());
                parts.push(CLASS_BLOCK.to_string());
                parts.push(class.raw.clone());
                parts.push(END_BLOCK.to_string());
                for example in &desc.examples {
                    if !std::ptr::eq(example, functional) && !std::ptr::eq(example, class) {
                        push_example(&mut parts, example);
                    }
                }
            }
            None => {
                for example in &desc.examples {
                    push_example(&mut parts, example);
                }
            }
        }
    }

    if !desc.footer.is_empty() {
        parts.push(desc.footer.clone());
    }
    parts.join("\n\n")
}

fn push_example(parts: &mut Vec<String>, example: &Example) {
    if !example.intro.is_empty() {
        parts.push(example.intro.clone());
    }
    parts.push(example.raw.clone());
}

/// The function and class component examples, when there is exactly one of each.
fn tabbed_pair(examples: &[Example]) -> Option<(&Example, &Example)> {
    let functional: Vec<&Example> = examples
        .iter()
        .filter(|e| snack_name(e).is_some_and(|n| n.contains(FUNCTION_EXAMPLE)))
        .collect();
    let class: Vec<&Example> = examples
        .iter()
        .filter(|e| snack_name(e).is_some_and(|n| n.contains(CLASS_EXAMPLE)))
        .collect();

    match (functional.as_slice(), class.as_slice()) {
        ([f], [c]) => Some((*f, *c)),
        _ => None,
    }
}

/// The decoded `name=` of a `SnackPlayer` example header.
fn snack_name(example: &Example) -> Option<String> {
    let rest = example.language.strip_prefix("SnackPlayer")?;
    let start = rest.find("name=")? + "name=".len();
    let name = rest[start..].split_whitespace().next().unwrap_or_default();
    Some(name.replace("%20", " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docgen::parse_pages;
    use crate::normalize::normalize_page;
    use pretty_assertions::assert_eq;

    fn render_json(json: &str) -> String {
        let pages = parse_pages(json).unwrap();
        let page = normalize_page(&pages[0]).unwrap();
        MarkdownRenderer::default().render(&page).unwrap()
    }

    fn example(language: &str, raw: &str) -> Example {
        Example {
            language: language.to_string(),
            intro: String::new(),
            raw: raw.to_string(),
            code: String::new(),
        }
    }

    #[test]
    fn single_required_prop_page() {
        let out = render_json(
            r#"{"id": "box", "title": "Box", "component": {
                "displayName": "Box",
                "description": "A box.",
                "props": {"size": {"flowType": {"name": "number"}, "required": true, "description": ""}}
            }}"#,
        );
        assert_eq!(
            out,
            "---\nid: box\ntitle: Box\n---\n\n\
             A box.\n\n\
             ---\n\n\
             # Reference\n\n\
             ## Props\n\n\
             ### <div class=\"label required basic\">Required</div>`size`\n\n\
             | Type   |\n\
             | ------ |\n\
             | number |\n"
        );
        assert_eq!(out.matches("Required").count(), 1);
        assert!(!out.contains("## Methods"));
    }

    #[test]
    fn reference_omitted_without_props_or_methods() {
        let out = render_json(
            r#"{"id": "x", "title": "X", "component": {"displayName": "X", "description": "Nothing."}}"#,
        );
        assert_eq!(out, "---\nid: x\ntitle: X\n---\n\nNothing.\n");
    }

    #[test]
    fn props_and_methods_sections() {
        let out = render_json(
            r#"{"id": "input", "title": "TextInput", "component": {
                "displayName": "TextInput",
                "props": {"editable": {"flowType": {"name": "boolean"}, "description": "",
                          "defaultValue": {"value": "true"}}},
                "methods": [{"name": "focus", "modifiers": [], "params": []}]
            }}"#,
        );
        let props = out.find("## Props").unwrap();
        let methods = out.find("## Methods").unwrap();
        assert!(props < methods);
        assert!(out.contains("| bool | `true`  |"));
        assert!(out.contains("```jsx\ntextInput.focus();\n```"));
        assert!(!out.contains("\n\n\n"));
        assert!(out.ends_with("```\n"));
    }

    #[test]
    fn examples_under_one_heading() {
        let desc = Description {
            text: "Intro.".into(),
            examples: vec![
                example("SnackPlayer name=First", "```SnackPlayer name=First\na\n```"),
                example("js", "```js\nb\n```"),
            ],
            footer: "Footer.".into(),
        };
        assert_eq!(
            render_description(&desc),
            "Intro.\n\n## Example\n\n```SnackPlayer name=First\na\n```\n\n```js\nb\n```\n\nFooter."
        );
    }

    #[test]
    fn function_and_class_examples_get_tabs() {
        let desc = Description {
            text: "Intro.".into(),
            examples: vec![
                example(
                    "SnackPlayer name=Class%20Component%20Example",
                    "```SnackPlayer name=Class%20Component%20Example\nclass A {}\n```",
                ),
                example(
                    "SnackPlayer name=Function%20Component%20Example",
                    "```SnackPlayer name=Function%20Component%20Example\nconst A = () => null;\n```",
                ),
            ],
            footer: String::new(),
        };
        let out = render_description(&desc);
        let toggler = out.find("<div class=\"toggler\">").unwrap();
        let functional = out.find(FUNCTIONAL_BLOCK).unwrap();
        let function_code = out.find("const A").unwrap();
        let class = out.find(CLASS_BLOCK).unwrap();
        let class_code = out.find("class A {}").unwrap();
        let end = out.find(END_BLOCK).unwrap();
        assert!(out.starts_with("Intro.\n\n## Example\n\n"));
        assert!(toggler < functional);
        assert!(functional < function_code);
        assert!(function_code < class);
        assert!(class < class_code);
        assert!(class_code < end);
    }

    #[test]
    fn two_function_examples_are_not_tabbed() {
        let examples = vec![
            example("SnackPlayer name=Function%20Component%20Example", "a"),
            example("SnackPlayer name=Function%20Component%20Example", "b"),
            example("SnackPlayer name=Class%20Component%20Example", "c"),
        ];
        assert!(tabbed_pair(&examples).is_none());
    }

    #[test]
    fn blank_runs_collapse() {
        assert_eq!(finish("a\n\n\n\nb\n\n\n"), "a\n\nb\n");
    }
}
