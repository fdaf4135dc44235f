//! Extractor output → normalized document.
//!
//! Runs tag extraction on every description and classifies every type node.
//! Pure: the input tree is only read.

use crate::docgen::{Component, FlowType, Method, Page, Param, Prop};
use crate::error::{DocError, DocResult};
use crate::model::{ComponentDoc, MethodDoc, PageDoc, ParamDoc, PropDoc, TypeDescriptor};
use crate::tags;
use indexmap::IndexMap;

pub fn normalize_page(page: &Page) -> DocResult<PageDoc> {
    let component = normalize_component(&page.component)?;
    tracing::debug!(
        page = %page.id,
        props = component.props.len(),
        methods = component.methods.len(),
        "normalized page"
    );
    Ok(PageDoc {
        id: page.id.clone(),
        title: page.title.clone(),
        component,
    })
}

pub fn normalize_component(component: &Component) -> DocResult<ComponentDoc> {
    let extracted = tags::extract(component.description.as_deref().unwrap_or_default());

    let props: IndexMap<String, PropDoc> = component
        .props
        .iter()
        .map(|(name, prop)| Ok((name.clone(), normalize_prop(name, prop)?)))
        .collect::<DocResult<_>>()?;
    let methods: Vec<MethodDoc> = component
        .methods
        .iter()
        .map(normalize_method)
        .collect::<DocResult<_>>()?;

    Ok(ComponentDoc {
        display_name: component.display_name.clone(),
        description: extracted.description,
        tags: extracted.tags,
        props,
        methods,
        composes: component.composes.clone(),
    })
}

/// A prop needs a displayable type unless `@type` supplies one.
fn normalize_prop(name: &str, prop: &Prop) -> DocResult<PropDoc> {
    let extracted = tags::extract(prop.description.as_deref().unwrap_or_default());
    let overridden = !extracted.tags.type_overrides.is_empty();

    let type_descriptor = match prop.flow_type.as_ref() {
        Some(flow) => match TypeDescriptor::classify(flow) {
            Some(descriptor) => Some(descriptor),
            None if overridden => None,
            None => {
                return Err(DocError::MalformedType {
                    entity: name.to_string(),
                })
            }
        },
        None if overridden => None,
        None => {
            return Err(DocError::MissingType {
                entity: name.to_string(),
            })
        }
    };

    Ok(PropDoc {
        name: name.to_string(),
        required: prop.required,
        type_descriptor,
        default_value: prop
            .default_value
            .as_ref()
            .map(|d| d.value.trim().to_string())
            .filter(|v| !v.is_empty()),
        description: extracted.clean_text(),
        tags: extracted.tags,
    })
}

fn normalize_method(method: &Method) -> DocResult<MethodDoc> {
    let extracted = tags::extract(method.description.as_deref().unwrap_or_default());
    let params: Vec<ParamDoc> = method
        .params
        .iter()
        .map(|param| normalize_param(&method.name, param))
        .collect::<DocResult<_>>()?;

    Ok(MethodDoc {
        name: method.name.clone(),
        params,
        modifiers: method.modifiers.clone(),
        description: extracted.clean_text(),
        tags: extracted.tags,
    })
}

/// Parameters may be untyped; a type node that is present must be displayable.
fn normalize_param(method: &str, param: &Param) -> DocResult<ParamDoc> {
    let type_descriptor = param
        .flow_type
        .as_ref()
        .map(|flow| classify_param(method, &param.name, flow))
        .transpose()?;

    Ok(ParamDoc {
        name: param.name.clone(),
        type_descriptor,
        optional: param.optional,
        description: param
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
    })
}

fn classify_param(method: &str, param: &str, flow: &FlowType) -> DocResult<TypeDescriptor> {
    TypeDescriptor::classify(flow).ok_or_else(|| DocError::MalformedType {
        entity: format!("{}({})", method, param),
    })
}
