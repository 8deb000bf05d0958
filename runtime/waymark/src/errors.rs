//! Errors that can happen when declaring routes or building URLs out of them.
use crate::http::Method;
use crate::route::RouteMethods;

/// The error returned when a URL template is malformed.
///
/// Templates built with [`RouteTemplate::new`] are checked eagerly.
/// Templates declared in `const` context with [`RouteTemplate::from_static`]
/// are checked when a URL is built from them, or on demand via
/// [`RouteTemplate::validate`].
///
/// [`RouteTemplate::new`]: crate::route::RouteTemplate::new
/// [`RouteTemplate::from_static`]: crate::route::RouteTemplate::from_static
/// [`RouteTemplate::validate`]: crate::route::RouteTemplate::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidRouteTemplate {
    #[error(
        "`{template}` contains an unclosed placeholder. \
        Placeholders must be enclosed in curly braces (`{{` and `}}`), \
        but `{partial}` is missing a closing brace (`}}`)."
    )]
    UnclosedPlaceholder { template: String, partial: String },
    #[error(
        "`{template}` contains a closing brace (`}}`) without a matching opening brace (`{{`)."
    )]
    UnmatchedClosingBrace { template: String },
    #[error(
        "All placeholders must be named. `{template}` can't be accepted since it contains an unnamed placeholder, `{{}}`."
    )]
    EmptyPlaceholderName { template: String },
    #[error("`{name}`, one of the placeholders in `{template}`, is not a valid identifier.")]
    InvalidPlaceholderName { template: String, name: String },
    #[error(
        "`{field}` is not a valid binding field for `{name}` in `{template}`. \
        Binding fields must be valid identifiers."
    )]
    InvalidBindingField {
        template: String,
        name: String,
        field: String,
    },
    #[error("`{template}` uses the same placeholder name, `{name}`, more than once.")]
    DuplicatePlaceholder { template: String, name: String },
    #[error("`{template}` doesn't allow any HTTP method.")]
    NoMethods { template: String },
}

/// The error returned when a URL or a route descriptor can't be built.
///
/// All variants stand for programmer errors at the call site: they are never transient,
/// retrying with the same inputs will fail in the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildUrlError {
    #[error(transparent)]
    /// See [`InvalidRouteTemplate`] for details.
    InvalidTemplate(#[from] InvalidRouteTemplate),
    /// A required placeholder didn't get a value, neither from the caller nor from the URL defaults.
    #[error(
        "`{template}` requires a value for `{name}`, \
        but none was provided and there is no URL default for it."
    )]
    MissingParameter { template: String, name: String },
    /// A bare value was passed for a template that doesn't have exactly one placeholder
    /// or exactly one required placeholder.
    #[error(
        "A bare value can only be used with templates that have exactly one placeholder, \
        or exactly one required placeholder, but `{template}` has {n_placeholders}. \
        Pass the parameters by name instead."
    )]
    AmbiguousScalar {
        template: String,
        n_placeholders: usize,
    },
    /// More positional values than placeholders.
    #[error(
        "`{template}` has {n_placeholders} placeholder(s), but {n_values} positional values were provided."
    )]
    TooManyPositional {
        template: String,
        n_placeholders: usize,
        n_values: usize,
    },
    /// The entity passed for a placeholder doesn't expose the field the placeholder is bound to.
    #[error(
        "The entity passed for `{name}` in `{template}` doesn't have a `{field}` field \
        that can be used in a URL."
    )]
    MissingEntityKey {
        template: String,
        name: String,
        field: String,
    },
    /// The caller asked for a method the route doesn't answer to.
    #[error("`{template}` doesn't answer to `{method}`. Allowed methods: {allowed}.")]
    MethodNotAllowed {
        template: String,
        method: Method,
        allowed: RouteMethods,
    },
}

/// The error returned by [`ParamValue::entity`] when the value doesn't serialize
/// to a map of fields.
///
/// [`ParamValue::entity`]: crate::ParamValue::entity
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EntityError {
    #[error("Failed to serialize the entity")]
    Serialization(#[source] serde_json::Error),
    #[error("Entities must serialize to a map of fields, but got `{kind}`")]
    NotAMap { kind: &'static str },
}

/// The error returned by [`RouteRegistry`] operations.
///
/// [`RouteRegistry`]: crate::registry::RouteRegistry
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("There is no route named `{name}`")]
    UnknownRoute { name: String },
    #[error("Failed to parse the route manifest")]
    InvalidManifest(#[source] serde_json::Error),
    #[error("`{name}` has an invalid URL template")]
    InvalidTemplate {
        name: String,
        #[source]
        source: InvalidRouteTemplate,
    },
    #[error("`{name}` declares an invalid HTTP method, `{method}`")]
    InvalidMethod { name: String, method: String },
    #[error(transparent)]
    Build(#[from] BuildUrlError),
}
