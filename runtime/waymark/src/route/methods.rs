use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{Deserializer, Serializer};
use smallvec::SmallVec;

use crate::http::Method;

/// The ordered set of HTTP methods a route answers to.
///
/// The first method is the **canonical** one: it's the method used by
/// [`build_definition`] when the caller doesn't ask for a specific verb.
///
/// Whenever the set contains `GET` it also contains `HEAD`, mirroring
/// HTTP semantics: [`RouteMethods::new`] inserts `HEAD` right after `GET`
/// if it is missing.
///
/// # Example
///
/// ```rust
/// use waymark::http::Method;
/// use waymark::route::RouteMethods;
///
/// let methods = RouteMethods::new([Method::GET]);
/// assert_eq!(methods.as_slice(), &[Method::GET, Method::HEAD]);
/// assert_eq!(methods.canonical(), Some(&Method::GET));
/// ```
///
/// [`build_definition`]: crate::build_definition
#[derive(Debug, Clone)]
pub struct RouteMethods(Repr);

#[derive(Debug, Clone)]
enum Repr {
    Static(&'static [Method]),
    // 5 fits the most common case, a resource path
    // answering to `GET`/`HEAD`/`PUT`/`PATCH`/`DELETE`.
    Owned(SmallVec<[Method; 5]>),
}

static HEAD: Method = Method::HEAD;

impl RouteMethods {
    /// Build a method set from an iterator of [`Method`]s.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    /// `HEAD` is inserted right after `GET` if the caller didn't list it.
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        let mut set: SmallVec<[Method; 5]> = SmallVec::new();
        for method in methods {
            if !set.contains(&method) {
                set.push(method);
            }
        }
        if !set.contains(&Method::HEAD) {
            if let Some(get_at) = set.iter().position(|m| *m == Method::GET) {
                set.insert(get_at + 1, Method::HEAD);
            }
        }
        Self(Repr::Owned(set))
    }

    /// Build a method set from a static slice, in `const` context.
    ///
    /// The slice is stored as-is, but the set behaves as if `HEAD` followed `GET`
    /// when the slice lists `GET` alone: see [`RouteMethods::iter`].
    pub const fn from_static(methods: &'static [Method]) -> Self {
        Self(Repr::Static(methods))
    }

    /// The methods, exactly as they were declared.
    ///
    /// Unlike [`RouteMethods::iter`], it doesn't add the implied `HEAD` to a static set.
    pub fn as_slice(&self) -> &[Method] {
        match &self.0 {
            Repr::Static(methods) => methods,
            Repr::Owned(methods) => methods.as_slice(),
        }
    }

    /// Iterate over the methods, in declaration order.
    ///
    /// `HEAD` is yielded right after `GET` if the declaration left it out.
    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        let implied_head = self.implies_head();
        self.as_slice().iter().flat_map(move |method| {
            let head = (implied_head && *method == Method::GET).then_some(&HEAD);
            std::iter::once(method).chain(head)
        })
    }

    /// The first listed method, if any.
    pub fn canonical(&self) -> Option<&Method> {
        self.as_slice().first()
    }

    /// Check if `method` is one of the allowed methods.
    pub fn contains(&self, method: &Method) -> bool {
        self.as_slice().contains(method) || (*method == Method::HEAD && self.implies_head())
    }

    /// Get the number of methods in the set, implied `HEAD` included.
    pub fn len(&self) -> usize {
        self.as_slice().len() + usize::from(self.implies_head())
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// `true` if the declaration lists `GET` but not `HEAD`.
    fn implies_head(&self) -> bool {
        let declared = self.as_slice();
        declared.contains(&Method::GET) && !declared.contains(&Method::HEAD)
    }
}

impl PartialEq for RouteMethods {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for RouteMethods {}

impl std::fmt::Display for RouteMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, method) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{method}")?;
        }
        Ok(())
    }
}

/// `GET`, with the `HEAD` that must accompany it.
pub const GET_HEAD: &[Method] = &[Method::GET, Method::HEAD];
/// `POST`.
pub const POST: &[Method] = &[Method::POST];
/// `PUT`.
pub const PUT: &[Method] = &[Method::PUT];
/// `PATCH`.
pub const PATCH: &[Method] = &[Method::PATCH];
/// `PUT` and `PATCH`, the pair a resource update route answers to.
pub const PUT_PATCH: &[Method] = &[Method::PUT, Method::PATCH];
/// `DELETE`.
pub const DELETE: &[Method] = &[Method::DELETE];

/// Parse a method name, case-insensitively.
pub(crate) fn parse_method(raw: &str) -> Result<Method, http::method::InvalidMethod> {
    Method::from_str(&raw.trim().to_ascii_uppercase())
}

/// The lowercase name of a method, as found in route definitions.
pub(crate) fn lowercase(method: &Method) -> String {
    method.as_str().to_ascii_lowercase()
}

impl serde::Serialize for RouteMethods {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for method in self.iter() {
            seq.serialize_element(&lowercase(method))?;
        }
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for RouteMethods {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<String> = serde::de::Deserialize::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(serde::de::Error::custom("expected at least one method"));
        }
        let mut methods = Vec::with_capacity(raw.len());
        for method in raw {
            match parse_method(&method) {
                Ok(m) => methods.push(m),
                Err(e) => {
                    return Err(serde::de::Error::custom(format!(
                        "invalid method `{method}`: {e}"
                    )));
                }
            }
        }
        Ok(RouteMethods::new(methods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_inserted_after_get() {
        let methods = RouteMethods::new([Method::GET, Method::POST]);
        assert_eq!(
            methods.as_slice(),
            &[Method::GET, Method::HEAD, Method::POST]
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let methods = RouteMethods::new([Method::PUT, Method::PATCH, Method::PUT]);
        assert_eq!(methods.as_slice(), &[Method::PUT, Method::PATCH]);
        assert_eq!(methods.canonical(), Some(&Method::PUT));
    }

    #[test]
    fn static_get_implies_head() {
        const ONLY_GET: &[Method] = &[Method::GET, Method::POST];
        let methods = RouteMethods::from_static(ONLY_GET);
        assert_eq!(methods.as_slice(), &[Method::GET, Method::POST]);
        assert!(methods.contains(&Method::HEAD));
        assert_eq!(
            methods.iter().cloned().collect::<Vec<_>>(),
            [Method::GET, Method::HEAD, Method::POST]
        );
        assert_eq!(methods.len(), 3);
        assert_eq!(methods.to_string(), "GET, HEAD, POST");
        assert_eq!(methods, RouteMethods::new([Method::GET, Method::POST]));
        assert_eq!(
            serde_json::to_string(&methods).unwrap(),
            r#"["get","head","post"]"#
        );
    }

    #[test]
    fn head_is_not_implied_without_get() {
        let methods = RouteMethods::from_static(PUT_PATCH);
        assert!(!methods.contains(&Method::HEAD));
        assert_eq!(methods.len(), 2);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let methods: RouteMethods = serde_json::from_str(r#"["put", "PATCH"]"#).unwrap();
        assert_eq!(methods.as_slice(), &[Method::PUT, Method::PATCH]);
        assert_eq!(
            serde_json::to_string(&methods).unwrap(),
            r#"["put","patch"]"#
        );
    }

    #[test]
    fn empty_sets_are_rejected() {
        let err = serde_json::from_str::<RouteMethods>("[]").unwrap_err();
        assert!(err.to_string().starts_with("expected at least one method"));
    }
}
