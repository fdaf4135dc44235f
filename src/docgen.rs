//! Input shapes produced by the component-introspection tool (react-docgen).
//!
//! These mirror the JSON emitted by the extractor and are deserialized as-is.
//! Nothing here is interpreted; see [`crate::normalize`] for that.

use indexmap::IndexMap;
use serde::Deserialize;

/// One documentation page: where it goes and which component it documents.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub component: Component,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    pub display_name: String,
    pub description: Option<String>,
    /// Ordered the way the extractor emitted them.
    pub props: IndexMap<String, Prop>,
    pub methods: Vec<Method>,
    /// Names of inherited prop types (e.g. `ViewProps`).
    pub composes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prop {
    pub flow_type: Option<FlowType>,
    pub required: bool,
    /// The extractor writes `null` for undocumented props.
    pub description: Option<String>,
    pub default_value: Option<DefaultValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultValue {
    pub value: String,
    pub computed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Method {
    pub name: String,
    pub description: Option<String>,
    pub modifiers: Vec<String>,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub flow_type: Option<FlowType>,
    pub optional: bool,
    pub description: Option<String>,
}

/// Loosely shaped type node. Which fields are set depends on `name`:
/// `union` has `elements`, `signature` has `type` and `signature`,
/// `literal` has `value`, generics have `raw` and `elements`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlowType {
    pub name: Option<String>,
    pub raw: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
    pub elements: Vec<FlowType>,
    pub signature: Option<SignatureShape>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignatureShape {
    pub properties: Vec<SignatureProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignatureProperty {
    pub key: String,
    pub value: FlowType,
}

/// Decode either a single page object or an array of pages.
pub fn parse_pages(json: &str) -> serde_json::Result<Vec<Page>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Page>),
        One(Box<Page>),
    }

    Ok(match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(pages) => pages,
        OneOrMany::One(page) => vec![*page],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_page() {
        let json = r#"{
            "id": "switch",
            "title": "Switch",
            "component": {
                "displayName": "Switch",
                "description": "Renders a boolean input.",
                "props": {
                    "value": {"flowType": {"name": "boolean"}, "required": false, "description": "On or off."},
                    "disabled": {"flowType": {"name": "boolean"}, "required": false, "description": ""}
                },
                "methods": []
            }
        }"#;
        let pages = parse_pages(json).unwrap();
        assert_eq!(pages.len(), 1);
        let component = &pages[0].component;
        assert_eq!(component.display_name, "Switch");
        let names: Vec<&str> = component.props.keys().map(String::as_str).collect();
        assert_eq!(names, ["value", "disabled"]);
    }

    #[test]
    fn parse_page_array() {
        let json = r#"[
            {"id": "a", "title": "A", "component": {"displayName": "A"}},
            {"id": "b", "title": "B", "component": {"displayName": "B"}}
        ]"#;
        let pages = parse_pages(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].id, "b");
    }

    #[test]
    fn parse_nested_flow_type() {
        let json = r#"{
            "name": "$ReadOnly",
            "raw": "$ReadOnly<{|true?: ?ColorValue|}>",
            "elements": [{
                "name": "signature",
                "type": "object",
                "raw": "{|true?: ?ColorValue|}",
                "signature": {"properties": [{"key": "true", "value": {"name": "ColorValue"}}]}
            }]
        }"#;
        let flow: FlowType = serde_json::from_str(json).unwrap();
        let inner = &flow.elements[0];
        assert_eq!(inner.kind.as_deref(), Some("object"));
        let props = &inner.signature.as_ref().unwrap().properties;
        assert_eq!(props[0].key, "true");
        assert_eq!(props[0].value.name.as_deref(), Some("ColorValue"));
    }

    #[test]
    fn null_descriptions_are_accepted() {
        let json = r#"{"id": "x", "title": "X", "component": {
            "displayName": "X",
            "description": null,
            "props": {"size": {"flowType": {"name": "number"}, "description": null}}
        }}"#;
        let pages = parse_pages(json).unwrap();
        let component = &pages[0].component;
        assert!(component.description.is_none());
        assert!(component.props["size"].description.is_none());
    }

    #[test]
    fn param_type_field_is_optional() {
        let json = r#"{"name": "focus", "params": [{"name": "x", "optional": true}]}"#;
        let method: Method = serde_json::from_str(json).unwrap();
        assert!(method.params[0].flow_type.is_none());
        assert!(method.params[0].optional);
    }
}
