//! Query options and their serialization into a query string.
use indexmap::IndexMap;

/// A map from query keys to values. Keys keep their insertion order.
pub type QueryMap = IndexMap<String, QueryValue>;

/// A value in the query string.
///
/// Lists are serialized as `key[]=a&key[]=b`, maps as `key[sub]=value`.
/// Booleans become `1` and `0`. [`QueryValue::Null`] is skipped when serializing and
/// removes the key when used in a [`QueryOptions::MergeQuery`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<QueryValue>),
    Map(QueryMap),
}

/// Options that control the query string appended to a URL.
///
/// The two variants are mutually exclusive:
///
/// - [`QueryOptions::Query`] sets the query string to exactly the given map;
/// - [`QueryOptions::MergeQuery`] merges the given map over the default query values
///   (see [`UrlDefaults`]). Keys set to [`QueryValue::Null`] are removed.
///
/// # Loosely-typed options
///
/// When options are deserialized, e.g. from a `{"query": {...}}` JSON object,
/// unknown keys are ignored. If both `query` and `mergeQuery` are present,
/// `mergeQuery` takes precedence and `query` is discarded.
///
/// [`UrlDefaults`]: crate::defaults::UrlDefaults
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawQueryOptions", into = "RawQueryOptions")]
pub enum QueryOptions {
    Query(QueryMap),
    MergeQuery(QueryMap),
}

impl QueryOptions {
    /// Replace the query string with the given pairs.
    pub fn query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        QueryOptions::Query(collect(pairs))
    }

    /// Merge the given pairs over the default query values.
    pub fn merge_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        QueryOptions::MergeQuery(collect(pairs))
    }

    /// The map carried by the options, whichever the variant.
    pub fn map(&self) -> &QueryMap {
        match self {
            QueryOptions::Query(map) | QueryOptions::MergeQuery(map) => map,
        }
    }

    /// Return a copy of the options where `key` is set to `value` **before** every
    /// caller-supplied key, keeping the variant.
    ///
    /// Callers can still override `key` since their pairs come after it.
    pub(crate) fn prepend(options: Option<&QueryOptions>, key: &str, value: QueryValue) -> Self {
        let mut map = QueryMap::new();
        map.insert(key.to_owned(), value);
        match options {
            Some(QueryOptions::MergeQuery(caller)) => {
                map.extend(caller.iter().map(|(k, v)| (k.clone(), v.clone())));
                QueryOptions::MergeQuery(map)
            }
            Some(QueryOptions::Query(caller)) => {
                map.extend(caller.iter().map(|(k, v)| (k.clone(), v.clone())));
                QueryOptions::Query(map)
            }
            None => QueryOptions::Query(map),
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions::Query(QueryMap::new())
    }
}

fn collect<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryMap
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RawQueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query: Option<QueryMap>,
    #[serde(
        default,
        rename = "mergeQuery",
        alias = "merge_query",
        skip_serializing_if = "Option::is_none"
    )]
    merge_query: Option<QueryMap>,
}

impl From<RawQueryOptions> for QueryOptions {
    fn from(raw: RawQueryOptions) -> Self {
        match (raw.query, raw.merge_query) {
            (Some(_), Some(merge)) => {
                tracing::warn!(
                    "Query options set both `query` and `mergeQuery`: `query` is ignored"
                );
                QueryOptions::MergeQuery(merge)
            }
            (None, Some(merge)) => QueryOptions::MergeQuery(merge),
            (Some(query), None) => QueryOptions::Query(query),
            (None, None) => QueryOptions::default(),
        }
    }
}

impl From<QueryOptions> for RawQueryOptions {
    fn from(options: QueryOptions) -> Self {
        match options {
            QueryOptions::Query(query) => RawQueryOptions {
                query: Some(query),
                merge_query: None,
            },
            QueryOptions::MergeQuery(merge) => RawQueryOptions {
                query: None,
                merge_query: Some(merge),
            },
        }
    }
}

/// Compute the query-string suffix for a URL, leading `?` included.
///
/// `defaults` are the default query values [`QueryOptions::MergeQuery`] merges over.
/// It returns an empty string if there are no pairs to serialize.
pub fn query_params(options: Option<&QueryOptions>, defaults: &QueryMap) -> String {
    let merged;
    let map = match options {
        None => return String::new(),
        Some(QueryOptions::Query(query)) => query,
        Some(QueryOptions::MergeQuery(overrides)) => {
            merged = merge(defaults, overrides);
            &merged
        }
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut n_pairs = 0;
    for (key, value) in map {
        append(&mut serializer, key, value, &mut n_pairs);
    }
    if n_pairs == 0 {
        return String::new();
    }
    format!("?{}", serializer.finish())
}

/// Merge `overrides` over `base`. Existing keys keep their position.
fn merge(base: &QueryMap, overrides: &QueryMap) -> QueryMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        if let QueryValue::Null = value {
            merged.shift_remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn append(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &QueryValue,
    n_pairs: &mut usize,
) {
    match value {
        QueryValue::Null => {}
        QueryValue::Bool(b) => {
            serializer.append_pair(key, if *b { "1" } else { "0" });
            *n_pairs += 1;
        }
        QueryValue::Integer(i) => {
            serializer.append_pair(key, &i.to_string());
            *n_pairs += 1;
        }
        QueryValue::Float(f) => {
            serializer.append_pair(key, &f.to_string());
            *n_pairs += 1;
        }
        QueryValue::String(s) => {
            serializer.append_pair(key, s);
            *n_pairs += 1;
        }
        QueryValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                let nested_key = match item {
                    // Nested structures need an explicit index to stay unambiguous.
                    QueryValue::Map(_) | QueryValue::List(_) => format!("{key}[{i}]"),
                    _ => format!("{key}[]"),
                };
                append(serializer, &nested_key, item, n_pairs);
            }
        }
        QueryValue::Map(fields) => {
            for (field, item) in fields {
                append(serializer, &format!("{key}[{field}]"), item, n_pairs);
            }
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Integer(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<QueryMap> for QueryValue {
    fn from(map: QueryMap) -> Self {
        QueryValue::Map(map)
    }
}
