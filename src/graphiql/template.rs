//! Default GraphiQL page.

/// GraphiQL release loaded by the default template.
pub const GRAPHIQL_VERSION: &str = "1.4.7";

/// Title used when none is configured.
pub const DEFAULT_HTML_TITLE: &str = "GraphiQL";

/// The default page.
///
/// Uses the shared subset of Tera and the simple renderer: `{{ name }}`
/// is HTML-escaped, and everything handed to the script goes through
/// `json_encode | safe`.
pub const GRAPHIQL_TEMPLATE: &str = r#"<!--
This endpoint was asked for "text/html", so it answers with GraphiQL, an
in-browser IDE for GraphQL. Send "Accept: application/json" or append
"&raw" to the URL to get plain JSON instead.
-->
<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>{{ graphiql_html_title }}</title>
  <meta name="robots" content="noindex" />
  <meta name="referrer" content="origin" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
    body {
      margin: 0;
      overflow: hidden;
    }
    #graphiql {
      height: 100vh;
    }
  </style>
  <link href="https://cdn.jsdelivr.net/npm/graphiql@{{ graphiql_version }}/graphiql.css" rel="stylesheet" />
  <script src="https://cdn.jsdelivr.net/npm/promise-polyfill@8.1.3/dist/polyfill.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/unfetch@4.1.0/dist/unfetch.umd.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/react@16.13.1/umd/react.production.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/react-dom@16.13.1/umd/react-dom.production.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/graphiql@{{ graphiql_version }}/graphiql.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/subscriptions-transport-ws@0.9.16/browser/client.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/graphiql-subscriptions-fetcher@0.0.2/browser/client.js"></script>
</head>
<body>
  <div id="graphiql">Loading...</div>
  <script>
    var parameters = {};
    window.location.search.substr(1).split('&').forEach(function (entry) {
      var eq = entry.indexOf('=');
      if (eq >= 0) {
        parameters[decodeURIComponent(entry.slice(0, eq))] =
          decodeURIComponent(entry.slice(eq + 1));
      }
    });

    function locationQuery(params) {
      return '?' + Object.keys(params).filter(function (key) {
        return Boolean(params[key]);
      }).map(function (key) {
        return encodeURIComponent(key) + '=' + encodeURIComponent(params[key]);
      }).join('&');
    }

    var graphqlParamNames = {
      query: true,
      variables: true,
      operationName: true
    };
    var otherParams = {};
    for (var k in parameters) {
      if (parameters.hasOwnProperty(k) && graphqlParamNames[k] !== true) {
        otherParams[k] = parameters[k];
      }
    }
    var fetchURL = locationQuery(otherParams);

    function graphQLFetcher(graphQLParams, opts) {
      var headers = Object.assign(
        {
          'Accept': 'application/json',
          'Content-Type': 'application/json'
        },
        opts && opts.headers
      );
      return fetch(fetchURL, {
        method: 'post',
        headers: headers,
        body: JSON.stringify(graphQLParams),
        credentials: 'include',
      }).then(function (response) {
        return response.text();
      }).then(function (responseBody) {
        try {
          return JSON.parse(responseBody);
        } catch (error) {
          return responseBody;
        }
      });
    }

    var subscriptionUrl = {{ subscription_url | json_encode | safe }};
    var fetcher;
    if (subscriptionUrl) {
      var subscriptionsClient = new SubscriptionsTransportWs.SubscriptionClient(
        subscriptionUrl,
        { reconnect: true }
      );
      fetcher = GraphiQLSubscriptionsFetcher.graphQLFetcher(
        subscriptionsClient,
        graphQLFetcher
      );
    } else {
      fetcher = graphQLFetcher;
    }

    function onEditQuery(newQuery) {
      parameters.query = newQuery;
      updateURL();
    }

    function onEditVariables(newVariables) {
      parameters.variables = newVariables;
      updateURL();
    }

    function onEditOperationName(newOperationName) {
      parameters.operationName = newOperationName;
      updateURL();
    }

    function updateURL() {
      history.replaceState(null, null, locationQuery(parameters));
    }

    ReactDOM.render(
      React.createElement(GraphiQL, {
        fetcher: fetcher,
        onEditQuery: onEditQuery,
        onEditVariables: onEditVariables,
        onEditOperationName: onEditOperationName,
        query: {{ query | json_encode | safe }},
        response: {{ result | json_encode | safe }},
        variables: {{ variables | json_encode | safe }},
        headers: {{ headers | json_encode | safe }},
        operationName: {{ operation_name | json_encode | safe }},
        defaultQuery: {{ default_query | json_encode | safe }},
        headerEditorEnabled: {{ header_editor_enabled | json_encode | safe }},
        shouldPersistHeaders: {{ should_persist_headers | json_encode | safe }}
      }),
      document.getElementById('graphiql')
    );
  </script>
</body>
</html>
"#;
