//! Static site rendering.
//!
//! Pages are assembled from placeholder templates, with note bodies converted
//! from markdown.

mod html;
pub mod site;
pub mod template;
mod theme;

pub use html::markdown_to_html;
pub use site::{SiteConfig, SiteResult, TemplateName, Templates, generate_site};
pub use template::{TemplateVars, render};
pub use theme::{BASE_CSS, CUSTOM_CSS};
