//! A registry of named routes.
//!
//! The same logical action is often reachable through more than one URL (e.g. an API
//! path and a legacy path). [`RouteRegistry`] maps each symbolic name to the list of
//! templates, its *alternatives*, and lets the caller pick one by pattern.
//! It can also be turned into a [`RouteMatcher`] to go the other way around,
//! from an incoming request path back to the route that serves it.
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;

use crate::builder::{RouteDefinition, UrlGenerator};
use crate::errors::RegistryError;
use crate::http::Method;
use crate::query::QueryOptions;
use crate::route::methods::parse_method;
use crate::route::{ParsedTemplate, Route, RouteTemplate, Segment};
use crate::RouteArg;

/// Named routes, each with one or more alternative templates.
///
/// # Example
///
/// ```rust
/// use waymark::http::Method;
/// use waymark::registry::RouteRegistry;
/// use waymark::route::RouteTemplate;
///
/// let mut registry = RouteRegistry::new();
/// registry
///     .insert("productos.store", RouteTemplate::new([Method::POST], "/api/productos").unwrap())
///     .insert("productos.store", RouteTemplate::new([Method::POST], "/productos").unwrap());
///
/// // The first alternative is the default one..
/// assert_eq!(registry.url("productos.store", (), None).unwrap(), "/api/productos");
/// // ..but the others can be picked by pattern.
/// let legacy = registry.alternative_for("productos.store", "/productos").unwrap();
/// assert_eq!(legacy.url(), "/productos");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: IndexMap<String, Vec<RouteTemplate>>,
}

impl RouteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `template` as an alternative for `name`.
    ///
    /// Registering the same template twice under the same name is a no-op.
    pub fn insert(&mut self, name: impl Into<String>, template: RouteTemplate) -> &mut Self {
        let alternatives = self.routes.entry(name.into()).or_default();
        if !alternatives.contains(&template) {
            alternatives.push(template);
        }
        self
    }

    /// Register a [`Route`] under its own name.
    pub fn insert_route(&mut self, route: &Route) -> &mut Self {
        use crate::route::RouteDescriptor;

        self.insert(route.name(), route.template().clone())
    }

    /// The default (i.e. first) alternative for `name`.
    pub fn get(&self, name: &str) -> Option<&RouteTemplate> {
        self.alternatives(name).first()
    }

    /// Every alternative registered for `name`, in registration order.
    ///
    /// It returns an empty slice if `name` is unknown.
    pub fn alternatives(&self, name: &str) -> &[RouteTemplate] {
        self.routes.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The alternative for `name` whose URL template is exactly `pattern`.
    pub fn alternative_for(&self, name: &str, pattern: &str) -> Option<&RouteTemplate> {
        self.alternatives(name).iter().find(|t| t.url() == pattern)
    }

    /// `true` if a route named `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Iterate over `(name, alternatives)` pairs, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RouteTemplate])> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The number of registered names.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// `true` if no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&RouteTemplate, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownRoute {
            name: name.to_owned(),
        })
    }

    /// Build the URL for the default alternative of `name`.
    pub fn url(
        &self,
        name: &str,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<String, RegistryError> {
        self.url_with(&UrlGenerator::new(), name, args, options)
    }

    /// Build the URL for the default alternative of `name` with a specific [`UrlGenerator`].
    pub fn url_with(
        &self,
        generator: &UrlGenerator,
        name: &str,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
    ) -> Result<String, RegistryError> {
        let template = self.lookup(name)?;
        Ok(generator.url(template, args, options)?)
    }

    /// Build a [`RouteDefinition`] for the default alternative of `name`.
    pub fn definition(
        &self,
        name: &str,
        args: impl Into<RouteArg>,
        options: Option<&QueryOptions>,
        method: Option<Method>,
    ) -> Result<RouteDefinition, RegistryError> {
        let template = self.lookup(name)?;
        Ok(UrlGenerator::new().definition(template, args, options, method)?)
    }

    /// Load a registry from the JSON output of Laravel's `php artisan route:list --json`.
    ///
    /// Each entry must have a `uri` (without leading `/`) and a `method`
    /// (`|`-separated, e.g. `GET|HEAD`). Entries without a `name` can't be referred to
    /// and are skipped. Other fields are ignored.
    pub fn from_manifest_json(manifest: &str) -> Result<Self, RegistryError> {
        #[derive(serde::Deserialize)]
        struct ManifestEntry {
            #[serde(default)]
            name: Option<String>,
            uri: String,
            method: String,
        }

        let entries: Vec<ManifestEntry> =
            serde_json::from_str(manifest).map_err(RegistryError::InvalidManifest)?;
        let mut registry = Self::new();
        for entry in entries {
            let Some(name) = entry.name else {
                tracing::debug!(uri = %entry.uri, "Skipping an unnamed route from the manifest");
                continue;
            };
            let methods = entry
                .method
                .split('|')
                .map(|raw| {
                    parse_method(raw).map_err(|_| RegistryError::InvalidMethod {
                        name: name.clone(),
                        method: raw.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let url = format!("/{}", entry.uri.trim_start_matches('/'));
            let template = RouteTemplate::new(methods, url).map_err(|source| {
                RegistryError::InvalidTemplate {
                    name: name.clone(),
                    source,
                }
            })?;
            registry.insert(name, template);
        }
        tracing::debug!(n_routes = registry.len(), "Loaded the route manifest");
        Ok(registry)
    }

    /// Build a [`RouteMatcher`] over every alternative of every route.
    pub fn matcher(&self) -> Result<RouteMatcher, RegistryError> {
        RouteMatcher::new(self)
    }

    /// Find the route that serves `method` requests to `path`.
    ///
    /// It builds a fresh [`RouteMatcher`] on every call: use [`RouteRegistry::matcher`]
    /// if you need to match more than one path.
    pub fn recognize(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<Option<RouteMatch<'static>>, RegistryError> {
        let matcher = self.matcher()?;
        Ok(matcher.recognize(method, path).map(RouteMatch::into_owned))
    }
}

impl<'a> Extend<&'a Route> for RouteRegistry {
    fn extend<T: IntoIterator<Item = &'a Route>>(&mut self, iter: T) {
        for route in iter {
            self.insert_route(route);
        }
    }
}

impl<'a> FromIterator<&'a Route> for RouteRegistry {
    fn from_iter<T: IntoIterator<Item = &'a Route>>(iter: T) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    template: RouteTemplate,
    /// The placeholder names, in the order they appear in the matched pattern.
    params: Vec<String>,
}

/// Reverse routing: from a request path to the route that serves it.
///
/// Built with [`RouteRegistry::matcher`].
#[derive(Debug)]
pub struct RouteMatcher {
    router: matchit::Router<usize>,
    patterns: IndexMap<String, Vec<Candidate>>,
    unmatchable: Vec<String>,
}

/// The outcome of [`RouteMatcher::recognize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'m> {
    /// The name of the matched route.
    pub name: std::borrow::Cow<'m, str>,
    /// The matched alternative.
    pub template: std::borrow::Cow<'m, RouteTemplate>,
    /// The percent-decoded route parameters, keyed by placeholder name.
    pub params: IndexMap<String, String>,
}

impl RouteMatch<'_> {
    /// Detach the match from the matcher that produced it.
    pub fn into_owned(self) -> RouteMatch<'static> {
        RouteMatch {
            name: std::borrow::Cow::Owned(self.name.into_owned()),
            template: std::borrow::Cow::Owned(self.template.into_owned()),
            params: self.params,
        }
    }
}

impl RouteMatcher {
    fn new(registry: &RouteRegistry) -> Result<Self, RegistryError> {
        let mut patterns: IndexMap<String, Vec<Candidate>> = IndexMap::new();
        for (name, alternatives) in registry.iter() {
            for template in alternatives {
                let parsed = template
                    .parse()
                    .map_err(|source| RegistryError::InvalidTemplate {
                        name: name.to_owned(),
                        source,
                    })?;
                for (pattern, params) in matchit_patterns(&parsed) {
                    patterns.entry(pattern).or_default().push(Candidate {
                        name: name.to_owned(),
                        template: template.clone(),
                        params,
                    });
                }
            }
        }

        let mut router = matchit::Router::new();
        let mut unmatchable = Vec::new();
        for (i, pattern) in patterns.keys().enumerate() {
            if let Err(e) = router.insert(pattern.as_str(), i) {
                let names = patterns[i].iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
                tracing::warn!(
                    pattern = %pattern,
                    routes = ?names,
                    error = %e,
                    "Skipping a route pattern that can't be recognized"
                );
                unmatchable.push(pattern.clone());
            }
        }
        Ok(Self {
            router,
            patterns,
            unmatchable,
        })
    }

    /// The `matchit` patterns that couldn't be added to the router.
    ///
    /// Paths of the routes they belong to are never recognized through them,
    /// but URLs can still be built for those routes.
    pub fn unmatchable(&self) -> &[String] {
        &self.unmatchable
    }

    /// Find the route that serves `method` requests to `path`.
    ///
    /// The query string and the fragment, if any, are ignored, as well as trailing slashes.
    /// When several routes share the same pattern, the first one registered that answers to
    /// `method` wins.
    pub fn recognize(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let path = match path.split_once(['?', '#']) {
            Some((path, _)) => path,
            None => path,
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let Ok(matched) = self.router.at(path) else {
            tracing::trace!(path, "No route matches the path");
            return None;
        };
        let (_, candidates) = self.patterns.get_index(*matched.value)?;
        let Some(candidate) = candidates
            .iter()
            .find(|c| c.template.methods().contains(method))
        else {
            tracing::trace!(path, %method, "The path matches, but not for this method");
            return None;
        };

        let params = candidate
            .params
            .iter()
            .zip(matched.params.iter())
            .map(|(name, (_, raw))| {
                let decoded = percent_decode_str(raw).decode_utf8_lossy();
                (name.clone(), decoded.into_owned())
            })
            .collect();
        Some(RouteMatch {
            name: std::borrow::Cow::Borrowed(candidate.name.as_str()),
            template: std::borrow::Cow::Borrowed(&candidate.template),
            params,
        })
    }
}

/// Turn a template into the `matchit` patterns it can match, one per combination
/// of present/absent optional placeholders.
///
/// Parameters are renamed positionally (`{p0}`, `{p1}`, ...) so that routes sharing
/// a shape but not their placeholder names don't conflict. The original names are
/// returned alongside each pattern.
fn matchit_patterns(parsed: &ParsedTemplate<'_>) -> Vec<(String, Vec<String>)> {
    let mut variants: Vec<(String, Vec<String>)> = vec![(String::new(), Vec::new())];
    for segment in &parsed.segments {
        match segment {
            Segment::Literal(literal) => {
                for (pattern, _) in &mut variants {
                    pattern.push_str(literal);
                }
            }
            Segment::Placeholder(placeholder) => {
                let mut without = Vec::new();
                if placeholder.optional {
                    for (pattern, params) in &variants {
                        let mut pattern = pattern.clone();
                        if pattern.ends_with('/') {
                            pattern.pop();
                        }
                        without.push((pattern, params.clone()));
                    }
                }
                for (pattern, params) in &mut variants {
                    pattern.push_str(&format!("{{p{}}}", params.len()));
                    params.push(placeholder.name.to_owned());
                }
                variants.extend(without);
            }
        }
    }

    let mut patterns: Vec<(String, Vec<String>)> = Vec::with_capacity(variants.len());
    for (pattern, params) in variants {
        let pattern = match pattern.trim_end_matches('/') {
            "" => "/".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        if !patterns.iter().any(|(p, _)| *p == pattern) {
            patterns.push((pattern, params));
        }
    }
    patterns
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use itertools::Itertools;

    use super::*;

    fn patterns(url: &str) -> String {
        let parsed = ParsedTemplate::parse(url).unwrap();
        matchit_patterns(&parsed)
            .into_iter()
            .map(|(pattern, params)| format!("{pattern} ({})", params.join(", ")))
            .join("\n")
    }

    #[test]
    fn optional_placeholders_expand_into_several_patterns() {
        assert_snapshot!(patterns("/usuarios/{usuario}"), @"/usuarios/{p0} (usuario)");
        assert_snapshot!(patterns("/{locale?}/reportes/{formato?}"), @r"
        /{p0}/reportes/{p1} (locale, formato)
        /reportes/{p0} (formato)
        /{p0}/reportes (locale)
        /reportes ()
        ");
        assert_snapshot!(patterns("/productos/{producto:slug}/"), @"/productos/{p0} (producto)");
    }

    const MANIFEST: &str = r#"[
        {"domain": null, "method": "GET|HEAD", "uri": "api/productos", "name": "productos.index", "action": "App\\Http\\Controllers\\ProductoController@index", "middleware": ["api"]},
        {"domain": null, "method": "POST", "uri": "api/productos", "name": "productos.store", "action": "App\\Http\\Controllers\\ProductoController@store", "middleware": ["api"]},
        {"domain": null, "method": "POST", "uri": "productos", "name": "productos.store", "action": "App\\Http\\Controllers\\ProductoController@store", "middleware": ["web"]},
        {"domain": null, "method": "GET|HEAD", "uri": "productos/{producto}", "name": "productos.show", "action": "App\\Http\\Controllers\\ProductoController@show", "middleware": ["web"]},
        {"domain": null, "method": "PUT|PATCH", "uri": "productos/{producto}", "name": "productos.update", "action": "App\\Http\\Controllers\\ProductoController@update", "middleware": ["web"]},
        {"domain": null, "method": "GET|HEAD", "uri": "sanctum/csrf-cookie", "name": null, "action": "Laravel\\Sanctum\\Http\\Controllers\\CsrfCookieController@show", "middleware": ["web"]}
    ]"#;

    #[test]
    fn manifest_loading() {
        let registry = RouteRegistry::from_manifest_json(MANIFEST).unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["productos.index", "productos.store", "productos.show", "productos.update"]
        );
        let urls = registry
            .alternatives("productos.store")
            .iter()
            .map(RouteTemplate::url)
            .collect::<Vec<_>>();
        assert_eq!(urls, ["/api/productos", "/productos"]);
        assert_eq!(
            registry.get("productos.index").unwrap().methods().as_slice(),
            &[Method::GET, Method::HEAD]
        );
        assert_eq!(
            registry.url("productos.update", 3, None).unwrap(),
            "/productos/3"
        );
    }

    #[test]
    fn invalid_manifests() {
        let err = RouteRegistry::from_manifest_json("{}").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidManifest(_)));

        let err = RouteRegistry::from_manifest_json(
            r#"[{"name": "x", "uri": "x/{id", "method": "GET|HEAD"}]"#,
        )
        .unwrap_err();
        assert_snapshot!(err, @"`x` has an invalid URL template");

        let err = RouteRegistry::from_manifest_json(
            r#"[{"name": "x", "uri": "x", "method": "GET|HE AD"}]"#,
        )
        .unwrap_err();
        assert_snapshot!(err, @"`x` declares an invalid HTTP method, `HE AD`");
    }

    #[test]
    fn unknown_routes() {
        let registry = RouteRegistry::new();
        assert!(registry.alternatives("nope").is_empty());
        let err = registry.url("nope", (), None).unwrap_err();
        assert_snapshot!(err, @"There is no route named `nope`");
    }

    #[test]
    fn duplicate_alternatives_are_ignored() {
        let template = RouteTemplate::new([Method::POST], "/productos").unwrap();
        let mut registry = RouteRegistry::new();
        registry
            .insert("productos.store", template.clone())
            .insert("productos.store", template);
        assert_eq!(registry.alternatives("productos.store").len(), 1);
    }

    #[test]
    fn recognize_routes() {
        let registry = RouteRegistry::from_manifest_json(MANIFEST).unwrap();
        let matcher = registry.matcher().unwrap();

        let matched = matcher.recognize(&Method::PATCH, "/productos/caja%20chica?x=1").unwrap();
        assert_eq!(matched.name, "productos.update");
        assert_eq!(matched.params.get("producto").map(String::as_str), Some("caja chica"));

        let matched = matcher.recognize(&Method::HEAD, "/productos/4/").unwrap();
        assert_eq!(matched.name, "productos.show");

        // The first alternative registered for a pattern wins.
        let matched = matcher.recognize(&Method::POST, "/productos").unwrap();
        assert_eq!(matched.name, "productos.store");
        assert_eq!(matched.template.url(), "/productos");

        assert!(matcher.recognize(&Method::DELETE, "/productos/4").is_none());
        assert!(matcher.recognize(&Method::GET, "/almacenes").is_none());
    }

    #[test]
    fn unmatchable_patterns_are_skipped() {
        let mut registry = RouteRegistry::new();
        registry
            .insert(
                "usuarios.show",
                RouteTemplate::new([Method::GET], "/usuarios/{usuario}").unwrap(),
            )
            .insert(
                "reportes.rango",
                RouteTemplate::new([Method::GET], "/reportes/{desde}-{hasta}").unwrap(),
            );

        assert_eq!(
            registry.url("reportes.rango", [1, 2], None).unwrap(),
            "/reportes/1-2"
        );

        let matcher = registry.matcher().unwrap();
        assert_eq!(matcher.unmatchable(), ["/reportes/{p0}-{p1}"]);
        let matched = matcher.recognize(&Method::GET, "/usuarios/42").unwrap();
        assert_eq!(matched.name, "usuarios.show");
        assert!(matcher.recognize(&Method::GET, "/reportes/1-2").is_none());

        let owned = registry
            .recognize(&Method::HEAD, "/usuarios/42")
            .unwrap()
            .unwrap();
        assert_eq!(owned.name, "usuarios.show");
    }

    #[test]
    fn recognize_optional_placeholders() {
        let mut registry = RouteRegistry::new();
        registry.insert(
            "reportes.entregas",
            RouteTemplate::new([Method::GET], "/reportes/entregas/{formato?}").unwrap(),
        );
        let owned = registry
            .recognize(&Method::GET, "/reportes/entregas")
            .unwrap()
            .unwrap();
        assert_eq!(owned.name, "reportes.entregas");
        assert!(owned.params.is_empty());

        let owned = registry
            .recognize(&Method::GET, "/reportes/entregas/pdf")
            .unwrap()
            .unwrap();
        assert_eq!(owned.params.get("formato").map(String::as_str), Some("pdf"));
    }
}
