//! The values callers pass to fill in the placeholders of a URL template.
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::errors::{BuildUrlError, EntityError};
use crate::route::{ParsedTemplate, Placeholder};

/// The value of a single route parameter.
///
/// It's either a primitive identifier (a string, a number or a boolean) or an
/// **entity**: a map of fields, usually obtained by serializing one of your domain types
/// with [`ParamValue::entity`]. When an entity is used to fill in a placeholder, its `id`
/// field is used, or the field the placeholder is bound to (`{producto:slug}`).
///
/// Booleans are rendered as `1` and `0`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A string identifier.
    String(String),
    /// A boolean flag.
    Bool(bool),
    /// A numeric identifier.
    Number(Number),
    /// A map of fields. The relevant one is picked when building the URL.
    Entity(Map<String, Value>),
}

impl ParamValue {
    /// Build an entity value out of any type that serializes to a map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waymark::ParamValue;
    ///
    /// #[derive(serde::Serialize)]
    /// struct Venta {
    ///     id: u64,
    ///     folio: String,
    /// }
    ///
    /// let venta = Venta { id: 9, folio: "F-0009".into() };
    /// let value = ParamValue::entity(&venta).unwrap();
    /// assert_eq!(value.field("folio"), Some("F-0009".to_string()));
    /// ```
    pub fn entity<T>(entity: &T) -> Result<Self, EntityError>
    where
        T: serde::Serialize + ?Sized,
    {
        match serde_json::to_value(entity).map_err(EntityError::Serialization)? {
            Value::Object(fields) => Ok(ParamValue::Entity(fields)),
            other => Err(EntityError::NotAMap {
                kind: json_kind(&other),
            }),
        }
    }

    /// Build an entity value that only carries an `id`.
    pub fn with_id(id: impl Into<ParamValue>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_owned(), id.into().into_json());
        ParamValue::Entity(fields)
    }

    /// Read one of the fields of an entity, rendered as it would appear in a URL.
    ///
    /// It returns `None` if `self` is not an entity, if the field is missing
    /// or if it's not a primitive value.
    pub fn field(&self, name: &str) -> Option<String> {
        let ParamValue::Entity(fields) = self else {
            return None;
        };
        match fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(render_bool(*b).to_owned()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// `true` if the value is an entity.
    pub fn is_entity(&self) -> bool {
        matches!(self, ParamValue::Entity(_))
    }

    /// The string that replaces `placeholder` in the URL, before percent-encoding.
    pub(crate) fn route_key(
        &self,
        placeholder: &Placeholder<'_>,
        template: &str,
    ) -> Result<String, BuildUrlError> {
        match self {
            ParamValue::String(s) => Ok(s.clone()),
            ParamValue::Number(n) => Ok(n.to_string()),
            ParamValue::Bool(b) => Ok(render_bool(*b).to_owned()),
            ParamValue::Entity(_) => {
                let field = placeholder.binding_field();
                self.field(field)
                    .ok_or_else(|| BuildUrlError::MissingEntityKey {
                        template: template.to_owned(),
                        name: placeholder.name.to_owned(),
                        field: field.to_owned(),
                    })
            }
        }
    }

    fn into_json(self) -> Value {
        match self {
            ParamValue::String(s) => Value::String(s),
            ParamValue::Bool(b) => Value::Bool(b),
            ParamValue::Number(n) => Value::Number(n),
            ParamValue::Entity(fields) => Value::Object(fields),
        }
    }
}

fn render_bool(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Number(Number::from(value))
                }
            }

            impl From<$ty> for RouteArg {
                fn from(value: $ty) -> Self {
                    RouteArg::Scalar(value.into())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::String(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&ParamValue> for ParamValue {
    fn from(value: &ParamValue) -> Self {
        value.clone()
    }
}

/// The arguments used to fill in the placeholders of a URL template.
///
/// Callers can pass route parameters in several shapes:
///
/// - nothing at all ([`RouteArg::None`]), for templates without required placeholders;
/// - a single bare value ([`RouteArg::Scalar`]), for templates with exactly one placeholder
///   or exactly one required placeholder (the optional ones are left empty).
///   The value can be an entity: `{ id: 7 }` and `7` build the same URL;
/// - a positional sequence ([`RouteArg::Positional`]): the i-th value fills the
///   i-th placeholder, in declaration order;
/// - a map from placeholder names to values ([`RouteArg::Keyed`]).
///
/// Every shape is normalized to the keyed form before substitution.
///
/// # Example
///
/// ```rust
/// use waymark::{params, RouteArg};
///
/// let bare: RouteArg = 42.into();
/// let positional: RouteArg = (3, 9).into();
/// let keyed = params! { entrega: 3, venta: 9 };
/// # let _ = (bare, positional, keyed);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteArg {
    /// No parameters.
    #[default]
    None,
    /// A bare value, for a template with a single (required) placeholder.
    Scalar(ParamValue),
    /// Values matched to placeholders by position.
    Positional(Vec<ParamValue>),
    /// Values matched to placeholders by name.
    Keyed(IndexMap<String, ParamValue>),
}

impl RouteArg {
    /// Build a keyed argument out of `(name, value)` pairs.
    pub fn keyed<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        RouteArg::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a positional argument out of a sequence of values.
    pub fn positional<V>(values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<ParamValue>,
    {
        RouteArg::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Convert the argument into its keyed form, matching it against the placeholders of `parsed`.
    pub(crate) fn normalize(
        self,
        parsed: &ParsedTemplate<'_>,
        template: &str,
    ) -> Result<IndexMap<String, ParamValue>, BuildUrlError> {
        match self {
            RouteArg::None => Ok(IndexMap::new()),
            RouteArg::Keyed(map) => Ok(map),
            RouteArg::Scalar(value) => {
                let n_placeholders = parsed.n_placeholders();
                let target = if n_placeholders == 1 {
                    parsed.placeholders().next()
                } else {
                    // Optional placeholders don't compete with the sole required one.
                    let mut required = parsed.placeholders().filter(|p| !p.optional);
                    match (required.next(), required.next()) {
                        (Some(sole), None) => Some(sole),
                        _ => None,
                    }
                };
                match target {
                    Some(sole) => {
                        let mut map = IndexMap::with_capacity(1);
                        map.insert(sole.name.to_owned(), value);
                        Ok(map)
                    }
                    None => Err(BuildUrlError::AmbiguousScalar {
                        template: template.to_owned(),
                        n_placeholders,
                    }),
                }
            }
            RouteArg::Positional(values) => {
                let n_placeholders = parsed.n_placeholders();
                if values.len() > n_placeholders {
                    return Err(BuildUrlError::TooManyPositional {
                        template: template.to_owned(),
                        n_placeholders,
                        n_values: values.len(),
                    });
                }
                Ok(parsed
                    .placeholders()
                    .zip(values)
                    .map(|(p, v)| (p.name.to_owned(), v))
                    .collect())
            }
        }
    }
}

impl From<()> for RouteArg {
    fn from(_: ()) -> Self {
        RouteArg::None
    }
}

impl From<ParamValue> for RouteArg {
    fn from(value: ParamValue) -> Self {
        RouteArg::Scalar(value)
    }
}

impl From<&str> for RouteArg {
    fn from(value: &str) -> Self {
        RouteArg::Scalar(value.into())
    }
}

impl From<String> for RouteArg {
    fn from(value: String) -> Self {
        RouteArg::Scalar(value.into())
    }
}

impl From<&String> for RouteArg {
    fn from(value: &String) -> Self {
        RouteArg::Scalar(value.into())
    }
}

impl From<bool> for RouteArg {
    fn from(value: bool) -> Self {
        RouteArg::Scalar(value.into())
    }
}

impl<V: Into<ParamValue>> From<Vec<V>> for RouteArg {
    fn from(values: Vec<V>) -> Self {
        RouteArg::positional(values)
    }
}

impl<V: Into<ParamValue>, const N: usize> From<[V; N]> for RouteArg {
    fn from(values: [V; N]) -> Self {
        RouteArg::positional(values)
    }
}

impl<A, B> From<(A, B)> for RouteArg
where
    A: Into<ParamValue>,
    B: Into<ParamValue>,
{
    fn from((a, b): (A, B)) -> Self {
        RouteArg::Positional(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for RouteArg
where
    A: Into<ParamValue>,
    B: Into<ParamValue>,
    C: Into<ParamValue>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        RouteArg::Positional(vec![a.into(), b.into(), c.into()])
    }
}

impl From<IndexMap<String, ParamValue>> for RouteArg {
    fn from(map: IndexMap<String, ParamValue>) -> Self {
        RouteArg::Keyed(map)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RouteArg {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RouteArg::keyed(iter)
    }
}

/// Build a keyed [`RouteArg`] using placeholder names as keys.
///
/// ```rust
/// use waymark::{params, ParamValue, RouteArg};
///
/// let args = params! { entrega: 3, venta: "V-9" };
/// assert_eq!(
///     args,
///     RouteArg::keyed([
///         ("entrega", ParamValue::from(3)),
///         ("venta", ParamValue::from("V-9")),
///     ])
/// );
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::RouteArg::None
    };
    ($($name:ident : $value:expr),+ $(,)?) => {
        $crate::RouteArg::Keyed(::std::iter::IntoIterator::into_iter([
            $((::std::string::String::from(stringify!($name)), $crate::ParamValue::from($value))),+
        ]).collect())
    };
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn normalize(arg: impl Into<RouteArg>, url: &str) -> Result<Vec<(String, ParamValue)>, BuildUrlError> {
        let parsed = ParsedTemplate::parse(url).unwrap();
        arg.into()
            .normalize(&parsed, url)
            .map(|map| map.into_iter().collect())
    }

    #[test]
    fn bare_value_fills_the_sole_placeholder() {
        assert_eq!(
            normalize(42, "/usuarios/{usuario}").unwrap(),
            vec![("usuario".to_owned(), ParamValue::from(42))]
        );
    }

    #[test]
    fn bare_value_needs_exactly_one_placeholder() {
        let err = normalize(3, "/logistica/entregas/{entrega}/ventas/{venta}").unwrap_err();
        assert_snapshot!(err, @"A bare value can only be used with templates that have exactly one placeholder, or exactly one required placeholder, but `/logistica/entregas/{entrega}/ventas/{venta}` has 2. Pass the parameters by name instead.");

        let err = normalize("x", "/usuarios").unwrap_err();
        assert!(matches!(err, BuildUrlError::AmbiguousScalar { n_placeholders: 0, .. }));
    }

    #[test]
    fn bare_value_fills_the_sole_required_placeholder() {
        assert_eq!(
            normalize(8, "/logistica/entregas/{entrega}/hoja-ruta/{formato?}").unwrap(),
            vec![("entrega".to_owned(), ParamValue::from(8))]
        );
        // A lone optional placeholder can still take a bare value.
        assert_eq!(
            normalize("es", "/{locale?}").unwrap(),
            vec![("locale".to_owned(), ParamValue::from("es"))]
        );
        // Two required placeholders are still ambiguous, optional ones or not.
        let err = normalize(1, "/{locale?}/entregas/{entrega}/ventas/{venta}").unwrap_err();
        assert!(matches!(err, BuildUrlError::AmbiguousScalar { n_placeholders: 3, .. }));
        // Only optional placeholders: there is no obvious target.
        let err = normalize(1, "/{locale?}/reportes/{formato?}").unwrap_err();
        assert!(matches!(err, BuildUrlError::AmbiguousScalar { n_placeholders: 2, .. }));
    }

    #[test]
    fn positional_values_follow_declaration_order() {
        assert_eq!(
            normalize((3, 9), "/logistica/entregas/{entrega}/ventas/{venta}").unwrap(),
            vec![
                ("entrega".to_owned(), ParamValue::from(3)),
                ("venta".to_owned(), ParamValue::from(9)),
            ]
        );
        // Fewer values than placeholders is fine: defaults may fill the gap.
        assert_eq!(
            normalize([3], "/logistica/entregas/{entrega}/ventas/{venta}").unwrap(),
            vec![("entrega".to_owned(), ParamValue::from(3))]
        );
    }

    #[test]
    fn too_many_positional_values() {
        let err = normalize(vec![1, 2], "/usuarios/{usuario}").unwrap_err();
        assert_snapshot!(err, @"`/usuarios/{usuario}` has 1 placeholder(s), but 2 positional values were provided.");
    }

    #[test]
    fn entities_expose_their_fields() {
        #[derive(serde::Serialize)]
        struct Producto {
            id: u32,
            slug: &'static str,
            activo: bool,
            tags: Vec<&'static str>,
        }

        let value = ParamValue::entity(&Producto {
            id: 7,
            slug: "tornillo-m4",
            activo: true,
            tags: vec![],
        })
        .unwrap();
        assert_eq!(value.field("id").as_deref(), Some("7"));
        assert_eq!(value.field("slug").as_deref(), Some("tornillo-m4"));
        assert_eq!(value.field("activo").as_deref(), Some("1"));
        assert_eq!(value.field("tags"), None);
        assert_eq!(value.field("missing"), None);
    }

    #[test]
    fn only_maps_are_entities() {
        let err = ParamValue::entity(&[1, 2, 3]).unwrap_err();
        assert_snapshot!(err, @"Entities must serialize to a map of fields, but got `array`");
    }

    #[test]
    fn params_macro_builds_keyed_args() {
        assert_eq!(params! {}, RouteArg::None);
        assert_eq!(
            params! { usuario: 42 },
            RouteArg::keyed([("usuario", 42)])
        );
    }
}
