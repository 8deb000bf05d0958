//! HTTP types used in the public API, re-exported from the [`http`](https://docs.rs/http) crate.
pub use http::Method;
pub use http::method::InvalidMethod;
