//! Named routes.
//!
//! Maps request paths to mounted views and reverses route names back into
//! URLs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// HTTP method for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Any,
}

impl RouteMethod {
    /// Check if this method matches the given method string.
    pub fn matches(&self, method: &str) -> bool {
        match self {
            RouteMethod::Any => true,
            RouteMethod::Get => method.eq_ignore_ascii_case("GET"),
            RouteMethod::Post => method.eq_ignore_ascii_case("POST"),
            RouteMethod::Put => method.eq_ignore_ascii_case("PUT"),
            RouteMethod::Delete => method.eq_ignore_ascii_case("DELETE"),
            RouteMethod::Patch => method.eq_ignore_ascii_case("PATCH"),
            RouteMethod::Head => method.eq_ignore_ascii_case("HEAD"),
            RouteMethod::Options => method.eq_ignore_ascii_case("OPTIONS"),
        }
    }
}

impl From<&str> for RouteMethod {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "GET" => RouteMethod::Get,
            "POST" => RouteMethod::Post,
            "PUT" => RouteMethod::Put,
            "DELETE" => RouteMethod::Delete,
            "PATCH" => RouteMethod::Patch,
            "HEAD" => RouteMethod::Head,
            "OPTIONS" => RouteMethod::Options,
            _ => RouteMethod::Any,
        }
    }
}

/// A route entry that maps a path pattern to a named endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route path pattern (e.g., "/graphql", "/api/:version/graphql", "/static/*").
    pub path: String,
    /// HTTP method for this route.
    pub method: RouteMethod,
    /// Endpoint name used for URL reversal.
    pub name: String,
    /// Route priority (higher = more priority).
    pub priority: u32,
    /// Whether the route is enabled.
    pub enabled: bool,
}

impl Route {
    /// Create a new route.
    pub fn new(
        method: impl Into<RouteMethod>,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            name: name.into(),
            priority: 0,
            enabled: true,
        }
    }

    /// Set the route priority.
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the enabled state.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if this route matches the given path and method.
    pub fn matches(&self, path: &str, method: &str) -> bool {
        if !self.enabled || !self.method.matches(method) {
            return false;
        }

        if let Some(prefix) = self.path.strip_suffix("/*") {
            path.starts_with(prefix)
        } else if self.path.contains(':') {
            let route_segments: Vec<&str> = self.path.split('/').collect();
            let path_segments: Vec<&str> = path.split('/').collect();

            if route_segments.len() != path_segments.len() {
                return false;
            }

            route_segments
                .iter()
                .zip(path_segments.iter())
                .all(|(r, p)| r.starts_with(':') || *r == *p)
        } else {
            self.path == path
        }
    }

    /// Build a URL for this route.
    ///
    /// Params named by `:placeholders` fill the path; the rest become the
    /// query string. Returns `None` when a placeholder has no value.
    pub fn url(&self, params: &[(&str, &str)]) -> Option<String> {
        let mut used = HashSet::new();
        let mut segments = Vec::new();
        for segment in self.path.split('/') {
            match segment.strip_prefix(':') {
                Some(key) => {
                    let (_, value) = params.iter().find(|(name, _)| *name == key)?;
                    used.insert(key);
                    segments.push((*value).to_string());
                }
                None => segments.push(segment.to_string()),
            }
        }

        let mut url = segments.join("/");
        let extra: Vec<(&str, &str)> = params
            .iter()
            .filter(|(name, _)| !used.contains(name))
            .copied()
            .collect();
        if !extra.is_empty() {
            let query = serde_urlencoded::to_string(&extra).ok()?;
            url.push('?');
            url.push_str(&query);
        }
        Some(url)
    }
}

/// Priority-ordered route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create a new route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the table.
    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
        // Stable sort keeps insertion order among equal priorities.
        self.routes.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Remove every route registered under `name`.
    pub fn remove(&mut self, name: &str) {
        self.routes.retain(|r| r.name != name);
    }

    /// Find a matching route for the given path and method.
    pub fn find(&self, path: &str, method: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(path, method))
    }

    /// Look a route up by name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Reverse a route name into a URL.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.by_name(name)?.url(params)
    }

    /// List all routes.
    pub fn list(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_method_from_str() {
        assert_eq!(RouteMethod::from("GET"), RouteMethod::Get);
        assert_eq!(RouteMethod::from("post"), RouteMethod::Post);
        assert_eq!(RouteMethod::from("*"), RouteMethod::Any);
    }

    #[test]
    fn test_route_exact_match() {
        let route = Route::new(RouteMethod::Get, "/graphql", "graphql");

        assert!(route.matches("/graphql", "GET"));
        assert!(!route.matches("/graphql", "POST"));
        assert!(!route.matches("/graphql/batch", "GET"));
    }

    #[test]
    fn test_route_wildcard_match() {
        let route = Route::new(RouteMethod::Any, "/api/*", "api");

        assert!(route.matches("/api/graphql", "POST"));
        assert!(!route.matches("/other", "GET"));
    }

    #[test]
    fn test_route_param_match() {
        let route = Route::new(RouteMethod::Any, "/:tenant/graphql", "tenant");

        assert!(route.matches("/acme/graphql", "GET"));
        assert!(!route.matches("/graphql", "GET"));
    }

    #[test]
    fn test_disabled_route_never_matches() {
        let route = Route::new(RouteMethod::Any, "/graphql", "graphql").enabled(false);

        assert!(!route.matches("/graphql", "GET"));
    }

    #[test]
    fn test_url_for_encodes_query() {
        let mut table = RouteTable::new();
        table.add(Route::new(RouteMethod::Any, "/graphql", "graphql"));

        assert_eq!(table.url_for("graphql", &[]).as_deref(), Some("/graphql"));
        assert_eq!(
            table.url_for("graphql", &[("query", "{test}")]).as_deref(),
            Some("/graphql?query=%7Btest%7D")
        );
        assert_eq!(table.url_for("missing", &[]), None);
    }

    #[test]
    fn test_url_for_fills_placeholders() {
        let route = Route::new(RouteMethod::Any, "/:tenant/graphql", "tenant");

        assert_eq!(
            route.url(&[("tenant", "acme"), ("raw", "1")]).as_deref(),
            Some("/acme/graphql?raw=1")
        );
        assert_eq!(route.url(&[]), None);
    }

    #[test]
    fn test_route_table_priority() {
        let mut table = RouteTable::new();

        table.add(Route::new(RouteMethod::Any, "/api/*", "catch-all").priority(0));
        table.add(Route::new(RouteMethod::Any, "/api/graphql", "graphql").priority(10));

        assert_eq!(table.find("/api/graphql", "GET").unwrap().name, "graphql");
        assert_eq!(table.find("/api/other", "GET").unwrap().name, "catch-all");
    }

    #[test]
    fn test_route_table_remove() {
        let mut table = RouteTable::new();

        table.add(Route::new(RouteMethod::Any, "/graphql", "graphql"));
        table.add(Route::new(RouteMethod::Any, "/admin/graphql", "admin"));
        table.remove("graphql");

        assert_eq!(table.list().len(), 1);
        assert_eq!(table.list()[0].name, "admin");
    }
}
