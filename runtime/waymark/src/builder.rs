//! Turn route templates and arguments into URLs and route descriptors.
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::defaults::{UrlDefaults, apply_url_defaults, url_defaults};
use crate::errors::{BuildUrlError, InvalidRouteTemplate};
use crate::http::Method;
use crate::query::{QueryOptions, QueryValue, query_params};
use crate::route::{RouteTemplate, Segment, methods::lowercase};
use crate::RouteArg;

/// Characters that must be percent-encoded in a route parameter value.
///
/// `/` is left untouched: the backend accepts it in catch-all parameters.
const PARAM_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The query key used to tunnel an HTTP method through an HTML form.
pub const METHOD_OVERRIDE_KEY: &str = "_method";

/// A URL paired with the HTTP method to use when calling it.
///
/// It serializes to `{"url": "...", "method": "get"}`, with a lowercase method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub url: String,
    pub method: Method,
}

impl serde::Serialize for RouteDefinition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("RouteDefinition", 2)?;
        s.serialize_field("url", &self.url)?;
        s.serialize_field("method", &lowercase(&self.method))?;
        s.end()
    }
}

/// The methods an HTML form can use natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    /// The value of the form's `method` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Get => "get",
            FormMethod::Post => "post",
        }
    }
}

impl std::fmt::Display for FormMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `action` and `method` attributes of an HTML form targeting a route.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteFormDefinition {
    pub action: String,
    pub method: FormMethod,
}

/// Builds URLs and route descriptors out of [`RouteTemplate`]s.
///
/// A generator carries the [`UrlDefaults`] used to fill in missing placeholders and,
/// optionally, an origin to produce absolute URLs.
/// [`UrlGenerator::new`] reads the process-wide defaults (see [`crate::defaults`])
/// every time a URL is built; [`UrlGenerator::with_defaults`] uses its own.
///
/// # Example
///
/// ```rust
/// use waymark::http::Method;
/// use waymark::route::RouteTemplate;
/// use waymark::UrlGenerator;
///
/// let show = RouteTemplate::new([Method::GET], "/usuarios/{usuario}").unwrap();
/// let generator = UrlGenerator::new().origin("https://erp.example.com/");
/// assert_eq!(
///     generator.url(&show, 42, None).unwrap(),
///     "https://erp.example.com/usuarios/42"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlGenerator {
    origin: Option<String>,
    defaults: Option<UrlDefaults>,
}

impl UrlGenerator {
    /// A generator that uses the process-wide URL defaults and builds relative URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator that uses `defaults` instead of the process-wide URL defaults.
    pub fn with_defaults(defaults: UrlDefaults) -> Self {
        Self {
            origin: None,
            defaults: Some(defaults),
        }
    }

    /// Prefix every URL with `origin` (scheme and authority, e.g. `https://example.com`).
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.origin = Some(origin.trim_end_matches('/').to_owned());
        self
    }

    /// Build the URL for `template`.
    ///
    /// `args` are normalized to a map from placeholder names to values (see [`RouteArg`]),
    /// completed with the URL defaults and substituted into the template.
    /// Trailing slashes left behind by the substitution are stripped.
    /// Finally, the query string described by `options` is appended.
    pub fn url(
        &self,
        template: &RouteTemplate,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<String, BuildUrlError> {
        let snapshot;
        let defaults = match &self.defaults {
            Some(defaults) => defaults,
            None => {
                snapshot = url_defaults();
                &snapshot
            }
        };

        let parsed = template.parse()?;
        let params = args.into().normalize(&parsed, template.url())?;
        let params = apply_url_defaults(&parsed, params, defaults);

        let mut path = String::with_capacity(template.url().len());
        for segment in &parsed.segments {
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Placeholder(placeholder) => match params.get(placeholder.name) {
                    Some(value) => {
                        let raw = value.route_key(placeholder, template.url())?;
                        path.extend(utf8_percent_encode(&raw, PARAM_VALUE));
                    }
                    None if placeholder.optional => {
                        // Drop the separator that introduced the missing segment.
                        if path.ends_with('/') {
                            path.pop();
                        }
                    }
                    None => {
                        return Err(BuildUrlError::MissingParameter {
                            template: template.url().to_owned(),
                            name: placeholder.name.to_owned(),
                        });
                    }
                },
            }
        }
        if !parsed.is_static() {
            let trimmed_len = path.trim_end_matches('/').len();
            path.truncate(trimmed_len);
            if path.is_empty() {
                path.push('/');
            }
        }

        let mut url = match &self.origin {
            Some(origin) => format!("{origin}{path}"),
            None => path,
        };
        url.push_str(&query_params(options, &defaults.query));
        tracing::trace!(template = template.url(), url = %url, "Built a route URL");
        Ok(url)
    }

    /// Build a [`RouteDefinition`] for `template`.
    ///
    /// The canonical method of the route is used, unless `method` asks for a different one.
    /// It fails with [`BuildUrlError::MethodNotAllowed`] if the route doesn't answer to `method`.
    pub fn definition(
        &self,
        template: &RouteTemplate,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
        method: Option<Method>,
    ) -> Result<RouteDefinition, BuildUrlError> {
        let method = pick_method(template, method)?;
        let url = self.url(template, args, options)?;
        Ok(RouteDefinition { url, method })
    }

    /// Build a [`RouteFormDefinition`] for `template`.
    ///
    /// HTML forms only support `GET` and `POST`.
    /// Any other method is tunneled through `POST` (`GET` for `HEAD`), adding a
    /// `_method=<METHOD>` pair in front of the query so that the backend can recover it.
    pub fn form_definition(
        &self,
        template: &RouteTemplate,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
        method: Option<Method>,
    ) -> Result<RouteFormDefinition, BuildUrlError> {
        let method = pick_method(template, method)?;
        let (form_method, method_override) = if method == Method::GET {
            (FormMethod::Get, None)
        } else if method == Method::HEAD {
            (FormMethod::Get, Some(method))
        } else if method == Method::POST {
            (FormMethod::Post, None)
        } else {
            (FormMethod::Post, Some(method))
        };

        let action = match method_override {
            None => self.url(template, args, options)?,
            Some(method) => {
                let options = QueryOptions::prepend(
                    options,
                    METHOD_OVERRIDE_KEY,
                    QueryValue::String(method.as_str().to_owned()),
                );
                self.url(template, args, Some(&options))?
            }
        };
        Ok(RouteFormDefinition {
            action,
            method: form_method,
        })
    }
}

fn pick_method(template: &RouteTemplate, method: Option<Method>) -> Result<Method, BuildUrlError> {
    let methods = template.methods();
    match method {
        Some(method) if methods.contains(&method) => Ok(method),
        Some(method) => Err(BuildUrlError::MethodNotAllowed {
            template: template.url().to_owned(),
            method,
            allowed: methods.clone(),
        }),
        None => methods.canonical().cloned().ok_or_else(|| {
            BuildUrlError::InvalidTemplate(InvalidRouteTemplate::NoMethods {
                template: template.url().to_owned(),
            })
        }),
    }
}

/// Build the URL for `template`, using the process-wide URL defaults.
///
/// See [`UrlGenerator::url`] for details.
pub fn build_url(
    template: &RouteTemplate,
    args: impl Into<RouteArg>,
    options: Option<&QueryOptions>,
) -> Result<String, BuildUrlError> {
    UrlGenerator::new().url(template, args, options)
}

/// Build a [`RouteDefinition`] for `template`, using the process-wide URL defaults.
///
/// See [`UrlGenerator::definition`] for details.
pub fn build_definition(
    template: &RouteTemplate,
    args: impl Into<RouteArg>,
    options: Option<&QueryOptions>,
    method: Option<Method>,
) -> Result<RouteDefinition, BuildUrlError> {
    UrlGenerator::new().definition(template, args, options, method)
}

/// Build a [`RouteFormDefinition`] for `template`, using the process-wide URL defaults.
///
/// See [`UrlGenerator::form_definition`] for details.
pub fn build_form_definition(
    template: &RouteTemplate,
    args: impl Into<RouteArg>,
    options: Option<&QueryOptions>,
    method: Option<Method>,
) -> Result<RouteFormDefinition, BuildUrlError> {
    UrlGenerator::new().form_definition(template, args, options, method)
}
