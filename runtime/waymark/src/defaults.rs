//! Default values for route parameters and query strings.
//!
//! Some route parameters are the same for almost every URL an application builds:
//! the current locale, the current tenant, etc.
//! Register them once as [`UrlDefaults`] and they'll be used whenever the caller
//! doesn't provide a value for the corresponding placeholder.
//!
//! Defaults can be scoped to a [`UrlGenerator`] or installed process-wide with
//! [`set_url_defaults`] / [`add_url_default`]. The free functions in the crate root
//! (e.g. [`build_url`]) use the process-wide defaults.
//!
//! [`UrlGenerator`]: crate::UrlGenerator
//! [`build_url`]: crate::build_url
use std::sync::{LazyLock, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::ParamValue;
use crate::query::{QueryMap, QueryValue};
use crate::route::ParsedTemplate;

/// Default values for route parameters and query keys.
///
/// # Example
///
/// ```rust
/// use waymark::defaults::UrlDefaults;
/// use waymark::http::Method;
/// use waymark::route::RouteTemplate;
/// use waymark::UrlGenerator;
///
/// let defaults = UrlDefaults::new().param("locale", "es");
/// let generator = UrlGenerator::with_defaults(defaults);
///
/// let index = RouteTemplate::new([Method::GET], "/{locale}/productos").unwrap();
/// assert_eq!(generator.url(&index, (), None).unwrap(), "/es/productos");
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UrlDefaults {
    /// Values for placeholders the caller didn't fill.
    #[serde(default)]
    pub params: IndexMap<String, ParamValue>,
    /// The query values [`QueryOptions::MergeQuery`] merges over.
    ///
    /// [`QueryOptions::MergeQuery`]: crate::QueryOptions::MergeQuery
    #[serde(default)]
    pub query: QueryMap,
}

impl UrlDefaults {
    /// An empty set of defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value for the route parameter called `name`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the default value for the query key called `key`.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// `true` if no default is registered.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.query.is_empty()
    }
}

/// Fill the placeholders of `parsed` that are missing from `params` using `defaults`.
///
/// Parameters the caller provided are never overwritten. Defaults for names that don't
/// appear in the template are not added.
pub fn apply_url_defaults(
    parsed: &ParsedTemplate<'_>,
    mut params: IndexMap<String, ParamValue>,
    defaults: &UrlDefaults,
) -> IndexMap<String, ParamValue> {
    if defaults.params.is_empty() {
        return params;
    }
    for placeholder in parsed.placeholders() {
        if params.contains_key(placeholder.name) {
            continue;
        }
        if let Some(value) = defaults.params.get(placeholder.name) {
            tracing::debug!(
                parameter = placeholder.name,
                "Filling a route parameter with its URL default"
            );
            params.insert(placeholder.name.to_owned(), value.clone());
        }
    }
    params
}

static GLOBAL_DEFAULTS: LazyLock<RwLock<UrlDefaults>> =
    LazyLock::new(|| RwLock::new(UrlDefaults::default()));

/// A snapshot of the process-wide URL defaults.
pub fn url_defaults() -> UrlDefaults {
    GLOBAL_DEFAULTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide URL defaults.
pub fn set_url_defaults(defaults: UrlDefaults) {
    *GLOBAL_DEFAULTS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = defaults;
}

/// Add (or replace) a single process-wide default for the route parameter called `name`.
pub fn add_url_default(name: impl Into<String>, value: impl Into<ParamValue>) {
    GLOBAL_DEFAULTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .params
        .insert(name.into(), value.into());
}

/// Add (or replace) a single process-wide default for the query key called `key`.
pub fn add_query_default(key: impl Into<String>, value: impl Into<QueryValue>) {
    GLOBAL_DEFAULTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .query
        .insert(key.into(), value.into());
}

/// Remove every process-wide default.
pub fn clear_url_defaults() {
    set_url_defaults(UrlDefaults::default());
}
