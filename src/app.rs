//! An application: named GraphQL views behind a route table.

use crate::http::{StatusCode, ViewRequest, ViewResponse};
use crate::routing::{Route, RouteMethod, RouteTable};
use crate::view::GraphQLView;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A set of mounted views.
///
/// Shared by the hyper server, the axum router and the test client; all of
/// them end up in [`App::handle`].
#[derive(Debug, Default)]
pub struct App {
    routes: RouteTable,
    views: HashMap<String, Arc<GraphQLView>>,
}

impl App {
    /// Create an empty application.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `view` at `path` under the route name `name`.
    ///
    /// Mounting a second view under the same name replaces the first.
    pub fn mount(mut self, name: impl Into<String>, path: impl Into<String>, view: GraphQLView) -> Self {
        let name = name.into();
        self.routes.remove(&name);
        self.routes.add(Route::new(RouteMethod::Any, path, name.clone()));
        self.views.insert(name, Arc::new(view));
        self
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The view mounted under `name`.
    pub fn view(&self, name: &str) -> Option<&Arc<GraphQLView>> {
        self.views.get(name)
    }

    /// Reverse a route name into a URL, extra params going to the query string.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.routes.url_for(name, params)
    }

    /// Route a request to its view.
    pub async fn handle(&self, request: ViewRequest) -> ViewResponse {
        let method = request.method.to_string();
        let Some(view) = self
            .routes
            .find(request.path(), &method)
            .and_then(|route| self.views.get(&route.name))
        else {
            debug!("No route for {} {}", method, request.path());
            return ViewResponse::error(StatusCode::NOT_FOUND, "Not Found");
        };
        view.dispatch(&request).await
    }
}
