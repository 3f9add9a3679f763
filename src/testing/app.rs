//! Application factory for tests and demos.

use crate::app::App;
use crate::graphiql::{RenderError, TemplateEnv};
use crate::testing::schema::SchemaVariant;
use crate::view::{GraphQLView, ViewConfig};

/// Route name the factory mounts the view under.
pub const ROUTE_NAME: &str = "graphql";

/// Path the factory mounts the view at.
pub const ROUTE_PATH: &str = "/graphql";

/// Options accepted by [`create_app`].
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Schema to serve.
    pub schema: SchemaVariant,
    /// View configuration.
    pub config: ViewConfig,
    /// Render GraphiQL through this Tera environment instead of the simple renderer.
    pub template_env: Option<TemplateEnv>,
}

impl AppOptions {
    /// Default options: default schema, GraphiQL off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve another sample schema.
    pub fn schema(mut self, schema: SchemaVariant) -> Self {
        self.schema = schema;
        self
    }

    /// Enable or disable GraphiQL.
    pub fn graphiql(mut self, enabled: bool) -> Self {
        self.config = self.config.graphiql(enabled);
        self
    }

    /// Set the GraphiQL page title.
    pub fn graphiql_html_title(mut self, title: impl Into<String>) -> Self {
        self.config = self.config.graphiql_html_title(title);
        self
    }

    /// Run batch entries concurrently.
    pub fn enable_async(mut self, enabled: bool) -> Self {
        self.config = self.config.enable_async(enabled);
        self
    }

    /// Enable or disable batching.
    pub fn batch(mut self, enabled: bool) -> Self {
        self.config = self.config.batch(enabled);
        self
    }

    /// Always pretty-print.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config = self.config.pretty(enabled);
        self
    }

    /// Render through a Tera environment.
    pub fn template_env(mut self, env: TemplateEnv) -> Self {
        self.template_env = Some(env);
        self
    }

    /// Replace the whole view configuration.
    pub fn config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }
}

/// Build an app serving one view at [`ROUTE_PATH`].
pub fn create_app(options: AppOptions) -> Result<App, RenderError> {
    let AppOptions {
        schema,
        config,
        template_env,
    } = options;

    let mut view = GraphQLView::new(schema.build(), config);
    if let Some(env) = template_env {
        view = view.with_template_env(env)?;
    }
    Ok(App::new().mount(ROUTE_NAME, ROUTE_PATH, view))
}

/// `/graphql`, followed by the url-encoded `params` if there are any.
pub fn url_string(params: &[(&str, &str)]) -> String {
    let mut url = ROUTE_PATH.to_string();
    if !params.is_empty() {
        url.push('?');
        url.push_str(&serde_urlencoded::to_string(params).unwrap_or_default());
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_string_encodes_params() {
        assert_eq!(url_string(&[]), "/graphql");
        assert_eq!(url_string(&[("query", "{test}")]), "/graphql?query=%7Btest%7D");
    }

    #[test]
    fn factory_mounts_named_route() {
        let app = create_app(AppOptions::new().graphiql(true)).unwrap();

        assert_eq!(app.url_for(ROUTE_NAME, &[]).as_deref(), Some(ROUTE_PATH));
        assert!(app.view(ROUTE_NAME).unwrap().config().graphiql);
    }

    #[test]
    fn factory_registers_template_env() {
        let app = create_app(
            AppOptions::new()
                .graphiql(true)
                .template_env(TemplateEnv::default().enable_async(true)),
        );

        assert!(app.is_ok());
    }
}
