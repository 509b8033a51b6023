//! Embedded HTML templates rendered with `minijinja`.

use minijinja::Environment;
use serde::Serialize;

/// Template for the prediction form and history page.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Template for the visualisation page.
pub const VISUALIZE_TEMPLATE: &str = "visualize.html";

/// Compiled page templates.
#[derive(Debug)]
pub struct Templates {
    environment: Environment<'static>,
}

impl Templates {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut environment = Environment::new();
        environment.add_template("layout.html", include_str!("templates/layout.html"))?;
        environment.add_template(INDEX_TEMPLATE, include_str!("templates/index.html"))?;
        environment.add_template(VISUALIZE_TEMPLATE, include_str!("templates/visualize.html"))?;
        Ok(Self { environment })
    }

    /// Renders a named template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the template is unknown or
    /// rendering fails.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<String, minijinja::Error> {
        self.environment.get_template(name)?.render(context)
    }
}
