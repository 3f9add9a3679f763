//! GraphQL-over-HTTP request handling.
//!
//! Turns decoded request data into executed GraphQL results and encodes them
//! back into JSON with the status code the HTTP layer should answer with.

pub mod error;
pub mod executor;
pub mod format;
pub mod order;
pub mod params;
pub mod query;

pub use error::HttpQueryError;
pub use executor::{GraphQLExecutor, RequestContext};
pub use format::{encode_execution_results, format_execution_result, json_encode, FormattedResult};
pub use order::restore_selection_order;
pub use params::{get_graphql_params, load_json_variables, GraphQLParams};
pub use query::{run_http_query, run_query, HttpQueryOutcome, QueryOptions};
