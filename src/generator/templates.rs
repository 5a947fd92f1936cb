use askama::Template;
use serde_json::json;

use super::descriptor::RequestDescriptor;

/// Template data for one `.bru` request file
#[derive(Template)]
#[template(path = "request.bru.txt", escape = "none")]
pub struct RequestTemplateData {
    pub name: String,
    pub seq: usize,
    /// Lowercase method, used as the block name
    pub method: String,
    pub url: String,
    /// `json` or `none`
    pub body_mode: &'static str,
    pub auth: String,
    /// Pretty JSON already indented for the `body:json` block
    pub body_json: Option<String>,
    /// Description already indented for the `docs` block
    pub docs: Option<String>,
}

impl RequestTemplateData {
    /// # Errors
    ///
    /// Returns an error if the request body cannot be serialized
    pub fn from_descriptor(descriptor: &RequestDescriptor, auth: &str) -> anyhow::Result<Self> {
        let body_json = descriptor.body_json()?.map(|json| indent(&json));
        Ok(RequestTemplateData {
            name: descriptor.name.clone(),
            seq: descriptor.seq,
            method: descriptor.method.to_lowercase(),
            url: descriptor.url.clone(),
            body_mode: if body_json.is_some() { "json" } else { "none" },
            auth: auth.to_string(),
            body_json,
            docs: (!descriptor.description.is_empty()).then(|| indent(&descriptor.description)),
        })
    }
}

/// Template data for `environments/<name>.bru`
#[derive(Template)]
#[template(path = "environment.bru.txt", escape = "none")]
pub struct EnvironmentTemplateData {
    pub base_url: String,
}

/// Render a request file, always ending with exactly one newline
///
/// # Errors
///
/// Returns an error if the body cannot be serialized or template rendering fails
pub fn render_request(descriptor: &RequestDescriptor, auth: &str) -> anyhow::Result<String> {
    let rendered = RequestTemplateData::from_descriptor(descriptor, auth)?.render()?;
    Ok(format!("{}\n", rendered.trim_end()))
}

/// Render an environment file defining `baseUrl`
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_environment(base_url: &str) -> anyhow::Result<String> {
    let rendered = EnvironmentTemplateData {
        base_url: base_url.to_string(),
    }
    .render()?;
    Ok(format!("{}\n", rendered.trim_end()))
}

/// Contents of the collection's `bruno.json`
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn render_collection_manifest(collection_name: &str) -> anyhow::Result<String> {
    let manifest = json!({
        "version": "1",
        "name": collection_name,
        "type": "collection",
        "ignore": ["node_modules", ".git"],
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&manifest)?))
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
