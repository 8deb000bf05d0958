use std::borrow::Cow;

use crate::errors::InvalidRouteTemplate;
use crate::http::Method;

use super::RouteMethods;

/// The static shape of a route: the HTTP methods it answers to and its URL template.
///
/// The URL template uses the same placeholder syntax as the backend routes it mirrors:
///
/// - `{name}`, a required route parameter;
/// - `{name?}`, an optional route parameter. It is dropped from the URL, together with
///   the `/` that precedes it, when no value is available;
/// - `{name:field}`, a route parameter bound to a specific field of an entity.
///   If the caller passes an entity, `field` is read instead of `id`.
///
/// # Example
///
/// ```rust
/// use waymark::http::Method;
/// use waymark::route::{methods::PUT_PATCH, RouteTemplate};
///
/// // Checked at runtime..
/// let show = RouteTemplate::new([Method::GET], "/usuarios/{usuario}").unwrap();
/// assert_eq!(show.methods().as_slice(), &[Method::GET, Method::HEAD]);
///
/// // ..or declared in `const` context.
/// const UPDATE: RouteTemplate =
///     RouteTemplate::from_static(PUT_PATCH, "/codigos-barra/{codigos_barra}");
/// assert_eq!(UPDATE.url(), "/codigos-barra/{codigos_barra}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RouteTemplate {
    methods: RouteMethods,
    url: Cow<'static, str>,
}

impl RouteTemplate {
    /// Create a new template, checking that `url` is well-formed and that `methods` isn't empty.
    ///
    /// The method set is normalized (see [`RouteMethods::new`]).
    pub fn new(
        methods: impl IntoIterator<Item = Method>,
        url: impl Into<Cow<'static, str>>,
    ) -> Result<Self, InvalidRouteTemplate> {
        let url = url.into();
        ParsedTemplate::parse(&url)?;
        let methods = RouteMethods::new(methods);
        if methods.is_empty() {
            return Err(InvalidRouteTemplate::NoMethods {
                template: url.into_owned(),
            });
        }
        Ok(Self { methods, url })
    }

    /// Create a new template in `const` context.
    ///
    /// Neither the URL nor the method set are checked here: malformed URLs
    /// are reported when a URL is built from the template.
    pub const fn from_static(methods: &'static [Method], url: &'static str) -> Self {
        Self {
            methods: RouteMethods::from_static(methods),
            url: Cow::Borrowed(url),
        }
    }

    /// The HTTP methods this route answers to.
    pub fn methods(&self) -> &RouteMethods {
        &self.methods
    }

    /// The raw URL template, placeholders included.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Split the URL template into literal segments and placeholders.
    pub fn parse(&self) -> Result<ParsedTemplate<'_>, InvalidRouteTemplate> {
        ParsedTemplate::parse(&self.url)
    }

    /// Check that the URL is well-formed and that at least one method is allowed.
    pub fn validate(&self) -> Result<(), InvalidRouteTemplate> {
        self.parse()?;
        if self.methods.is_empty() {
            return Err(InvalidRouteTemplate::NoMethods {
                template: self.url.to_string(),
            });
        }
        Ok(())
    }
}

/// A placeholder in a URL template, e.g. `{entrega}`, `{producto:slug}` or `{locale?}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The name of the route parameter.
    pub name: &'a str,
    /// The entity field to read when an entity is passed, if not `id`.
    pub binding: Option<&'a str>,
    /// Whether the parameter can be left out.
    pub optional: bool,
}

impl Placeholder<'_> {
    /// The entity field this placeholder reads when given an entity.
    pub fn binding_field(&self) -> &str {
        self.binding.unwrap_or("id")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    Placeholder(Placeholder<'a>),
}

/// A URL template split into literal segments and [`Placeholder`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate<'a> {
    pub(crate) segments: Vec<Segment<'a>>,
}

impl<'a> ParsedTemplate<'a> {
    /// Parse a raw URL template.
    pub fn parse(url: &'a str) -> Result<Self, InvalidRouteTemplate> {
        let mut segments = Vec::new();
        let mut rest = url;
        let mut names: Vec<&'a str> = Vec::new();

        while let Some(open_at) = rest.find(['{', '}']) {
            if rest.as_bytes()[open_at] == b'}' {
                return Err(InvalidRouteTemplate::UnmatchedClosingBrace {
                    template: url.to_owned(),
                });
            }
            if open_at > 0 {
                segments.push(Segment::Literal(&rest[..open_at]));
            }
            let after_open = &rest[open_at + 1..];
            let Some(close_at) = after_open.find('}') else {
                return Err(InvalidRouteTemplate::UnclosedPlaceholder {
                    template: url.to_owned(),
                    partial: rest[open_at..].to_owned(),
                });
            };
            let raw = &after_open[..close_at];
            if raw.contains('{') {
                return Err(InvalidRouteTemplate::UnclosedPlaceholder {
                    template: url.to_owned(),
                    partial: format!("{{{}", &raw[..raw.find('{').unwrap_or(raw.len())]),
                });
            }
            let placeholder = parse_placeholder(url, raw)?;
            if names.contains(&placeholder.name) {
                return Err(InvalidRouteTemplate::DuplicatePlaceholder {
                    template: url.to_owned(),
                    name: placeholder.name.to_owned(),
                });
            }
            names.push(placeholder.name);
            segments.push(Segment::Placeholder(placeholder));
            rest = &after_open[close_at + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(Self { segments })
    }

    /// The placeholders, in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder<'a>> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// The number of placeholders in the template.
    pub fn n_placeholders(&self) -> usize {
        self.placeholders().count()
    }

    /// `true` if the template has no placeholders.
    pub fn is_static(&self) -> bool {
        self.n_placeholders() == 0
    }
}

fn parse_placeholder<'a>(
    template: &str,
    raw: &'a str,
) -> Result<Placeholder<'a>, InvalidRouteTemplate> {
    let (raw, optional) = match raw.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (raw, false),
    };
    let (name, binding) = match raw.split_once(':') {
        Some((name, binding)) => (name, Some(binding)),
        None => (raw, None),
    };
    if name.is_empty() {
        return Err(InvalidRouteTemplate::EmptyPlaceholderName {
            template: template.to_owned(),
        });
    }
    if !is_identifier(name) {
        return Err(InvalidRouteTemplate::InvalidPlaceholderName {
            template: template.to_owned(),
            name: name.to_owned(),
        });
    }
    if let Some(binding) = binding {
        if !is_identifier(binding) {
            return Err(InvalidRouteTemplate::InvalidBindingField {
                template: template.to_owned(),
                name: name.to_owned(),
                field: binding.to_owned(),
            });
        }
    }
    Ok(Placeholder {
        name,
        binding,
        optional,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
