pub mod api;
pub mod http;

pub use api::{CareerApi, LoginGrant};
pub use http::HttpGateway;
