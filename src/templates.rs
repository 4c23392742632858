//! Template registry
//!
//! Content fields are rendered to HTML through templates fetched at the start
//! of each load cycle. Stylesheets and bundled scripts are kept alongside so
//! the detail view can inline them.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::Value;
use std::collections::HashMap;

/// Registry the loader pushes templates and stylesheets into
pub trait TemplateRegistry {
    /// Compile and register a template under `name`
    fn register_template(&mut self, name: &str, source: &str) -> Result<()>;

    fn register_css(&mut self, name: &str, css: &str);

    fn register_in_app_resource(&mut self, name: &str, content: &str);

    /// Render the template registered under `name`
    fn process_template(&self, name: &str, context: &Value) -> Result<String>;
}

/// [`TemplateRegistry`] backed by handlebars
pub struct HandlebarsRegistry {
    engine: Handlebars<'static>,
    css: HashMap<String, String>,
    in_app: HashMap<String, String>,
}

impl HandlebarsRegistry {
    pub fn new() -> Self {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        Self {
            engine,
            css: HashMap::new(),
            in_app: HashMap::new(),
        }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.has_template(name)
    }

    pub fn css(&self, name: &str) -> Option<&str> {
        self.css.get(name).map(String::as_str)
    }

    pub fn in_app_resource(&self, name: &str) -> Option<&str> {
        self.in_app.get(name).map(String::as_str)
    }
}

impl Default for HandlebarsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry for HandlebarsRegistry {
    fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        tracing::debug!("Registering template {}", name);
        self.engine
            .register_template_string(name, source)
            .with_context(|| format!("Invalid template {}", name))
    }

    fn register_css(&mut self, name: &str, css: &str) {
        tracing::debug!("Registering stylesheet {}", name);
        self.css.insert(name.to_string(), css.to_string());
    }

    fn register_in_app_resource(&mut self, name: &str, content: &str) {
        self.in_app.insert(name.to_string(), content.to_string());
    }

    fn process_template(&self, name: &str, context: &Value) -> Result<String> {
        self.engine
            .render(name, context)
            .with_context(|| format!("Failed to render template {}", name))
    }
}
