//! The GraphiQL in-browser IDE page.

pub mod render;
pub mod template;

pub use render::{render_graphiql, simple_renderer, GraphiQLData, RenderError, Renderer, TemplateEnv};
pub use template::{DEFAULT_HTML_TITLE, GRAPHIQL_TEMPLATE, GRAPHIQL_VERSION};
