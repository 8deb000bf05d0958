//! Route templates and named routes.
//!
//! A [`RouteTemplate`] is the static shape of a backend route: the HTTP methods it
//! answers to and its URL template.
//! A [`Route`] attaches a symbolic name to a template and exposes the builders
//! (URL, [`RouteDefinition`], [`RouteFormDefinition`]) as methods.
use std::borrow::Cow;

pub use methods::RouteMethods;
pub use template::{ParsedTemplate, Placeholder, RouteTemplate};
pub(crate) use template::Segment;

use crate::builder::{
    RouteDefinition, RouteFormDefinition, build_definition, build_form_definition, build_url,
};
use crate::errors::BuildUrlError;
use crate::http::Method;
use crate::query::QueryOptions;
use crate::RouteArg;

pub mod methods;
mod template;

/// Anything that can be turned into a URL by the route builders.
pub trait RouteDescriptor {
    /// The template URLs are built from.
    fn template(&self) -> &RouteTemplate;

    /// Build the URL for this route, using the process-wide URL defaults.
    fn build(
        &self,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<String, BuildUrlError>
    where
        Self: Sized,
    {
        build_url(self.template(), args, options)
    }
}

impl RouteDescriptor for RouteTemplate {
    fn template(&self) -> &RouteTemplate {
        self
    }
}

/// A named backend route.
///
/// # Example
///
/// ```rust
/// use waymark::route::{methods::{GET_HEAD, PUT_PATCH}, Route};
///
/// const USUARIOS_SHOW: Route = Route::new("usuarios.show", GET_HEAD, "/usuarios/{usuario}");
/// const CODIGOS_BARRA_UPDATE: Route =
///     Route::new("codigos-barra.update", PUT_PATCH, "/codigos-barra/{codigos_barra}");
///
/// assert_eq!(USUARIOS_SHOW.url(42, None).unwrap(), "/usuarios/42");
///
/// let form = CODIGOS_BARRA_UPDATE.form(5, None).unwrap();
/// assert_eq!(form.action, "/codigos-barra/5?_method=PUT");
/// assert_eq!(form.method.as_str(), "post");
///
/// // `usuarios.show` doesn't answer to `DELETE`.
/// assert!(USUARIOS_SHOW.delete(42, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Route {
    name: Cow<'static, str>,
    #[serde(flatten)]
    template: RouteTemplate,
}

impl Route {
    /// Declare a route in `const` context.
    ///
    /// The template is not checked here: use [`Route::validate`] in a test to catch typos.
    pub const fn new(name: &'static str, methods: &'static [Method], url: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            template: RouteTemplate::from_static(methods, url),
        }
    }

    /// Attach a name to an existing template.
    pub fn from_template(name: impl Into<Cow<'static, str>>, template: RouteTemplate) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// The symbolic name of the route (e.g. `usuarios.show`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw URL template.
    pub fn pattern(&self) -> &str {
        self.template.url()
    }

    /// The methods the route answers to.
    pub fn methods(&self) -> &RouteMethods {
        self.template.methods()
    }

    /// Check that the template is well-formed.
    pub fn validate(&self) -> Result<(), crate::errors::InvalidRouteTemplate> {
        self.template.validate()
    }

    /// Build the URL for this route.
    pub fn url(
        &self,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<String, BuildUrlError> {
        build_url(&self.template, args, options)
    }

    /// Build a [`RouteDefinition`] using the canonical method of the route.
    pub fn definition(
        &self,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<RouteDefinition, BuildUrlError> {
        build_definition(&self.template, args, options, None)
    }

    /// Build a [`RouteDefinition`] using `method`.
    pub fn with_method(
        &self,
        method: Method,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<RouteDefinition, BuildUrlError> {
        build_definition(&self.template, args, options, Some(method))
    }

    /// Build a [`RouteFormDefinition`] using the canonical method of the route.
    pub fn form(
        &self,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<RouteFormDefinition, BuildUrlError> {
        build_form_definition(&self.template, args, options, None)
    }

    /// Build a [`RouteFormDefinition`] using `method`.
    pub fn form_with(
        &self,
        method: Method,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<RouteFormDefinition, BuildUrlError> {
        build_form_definition(&self.template, args, options, Some(method))
    }
}

macro_rules! verb_accessors {
    ($($(#[$meta:meta])* $name:ident => $method:ident),* $(,)?) => {
        impl Route {
            $(
                $(#[$meta])*
                pub fn $name(
                    &self,
                    args: impl Into<RouteArg>,
                    options: Option<&QueryOptions>,
                ) -> Result<RouteDefinition, BuildUrlError> {
                    self.with_method(Method::$method, args, options)
                }
            )*
        }
    };
}

verb_accessors! {
    /// Build a `GET` [`RouteDefinition`].
    get => GET,
    /// Build a `HEAD` [`RouteDefinition`].
    head => HEAD,
    /// Build a `POST` [`RouteDefinition`].
    post => POST,
    /// Build a `PUT` [`RouteDefinition`].
    put => PUT,
    /// Build a `PATCH` [`RouteDefinition`].
    patch => PATCH,
    /// Build a `DELETE` [`RouteDefinition`].
    delete => DELETE,
}

impl RouteDescriptor for Route {
    fn template(&self) -> &RouteTemplate {
        &self.template
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.name,
            self.template.methods(),
            self.template.url()
        )
    }
}
