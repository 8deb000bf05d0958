//! # waymark
//!
//! Typed URL builders for server-side route definitions.
//!
//! A backend exposes its routes as URL templates (`/usuarios/{usuario}`) paired with the
//! HTTP methods they answer to. `waymark` mirrors those definitions and turns them into:
//!
//! - URLs, via [`build_url`];
//! - `{url, method}` pairs, via [`build_definition`];
//! - `{action, method}` pairs for HTML forms, via [`build_form_definition`].
//!
//! Route parameters can be passed in several shapes (see [`RouteArg`]): a bare value,
//! a sequence of values matched by position, or values keyed by placeholder name.
//! Query strings are described by [`QueryOptions`].
//!
//! ```rust
//! use waymark::route::{methods::DELETE, Route};
//! use waymark::{params, QueryOptions};
//!
//! const VENTAS_DESTROY: Route = Route::new(
//!     "logistica.entregas.ventas.destroy",
//!     DELETE,
//!     "/logistica/entregas/{entrega}/ventas/{venta}",
//! );
//!
//! let url = VENTAS_DESTROY.url(params! { entrega: 3, venta: 9 }, None).unwrap();
//! assert_eq!(url, "/logistica/entregas/3/ventas/9");
//!
//! let options = QueryOptions::query([("confirmar", true)]);
//! let form = VENTAS_DESTROY.form([3, 9], Some(&options)).unwrap();
//! assert_eq!(form.action, "/logistica/entregas/3/ventas/9?_method=DELETE&confirmar=1");
//! ```
pub use arg::{ParamValue, RouteArg};
pub use builder::{
    FormMethod, RouteDefinition, RouteFormDefinition, UrlGenerator, build_definition,
    build_form_definition, build_url,
};
pub use query::{QueryOptions, QueryValue, query_params};

mod arg;
pub mod builder;
#[cfg(feature = "config")]
pub mod config;
pub mod defaults;
pub mod errors;
pub mod http;
pub mod query;
pub mod registry;
pub mod route;
