//! Notification message rendering.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Default change-notification template.
///
/// Telegram renders this with `parse_mode=Markdown`.
pub const DEFAULT_TEMPLATE: &str = "Change detected on:\n{{url}}";

/// Error for a template that does not compile.
#[derive(Debug, Error)]
#[error("invalid message template: {reason}")]
pub struct TemplateError {
    /// Handlebars' description of the syntax problem.
    pub reason: String,
}

/// Variables available to the template.
#[derive(Serialize)]
struct MessageData<'a> {
    /// The watched resource locator.
    url: &'a str,
    /// Local time of the detecting check, `HH:MM:SS`.
    time: String,
}

/// Handlebars template for the change-detected message.
///
/// Available variables: `{{url}}` and `{{time}}`. The template is
/// syntax-checked at construction so the loop never fails to render.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    template: String,
}

impl MessageTemplate {
    /// Compile-checks and wraps a template string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the template is not valid Handlebars
    /// syntax.
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        let hbs = Handlebars::new();
        hbs.render_template(&template, &serde_json::json!({}))
            .map_err(|e| TemplateError {
                reason: e.to_string(),
            })?;
        Ok(Self { template })
    }

    /// Renders the message for the given resource.
    #[must_use]
    pub fn render(&self, url: &Url) -> String {
        let data = MessageData {
            url: url.as_str(),
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
        };

        let hbs = Handlebars::new();
        hbs.render_template(&self.template, &data)
            // Syntax was validated at construction; a render failure here
            // still must not lose the notification.
            .unwrap_or_else(|_| format!("Change detected on:\n{url}"))
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
