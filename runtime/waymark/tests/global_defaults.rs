//! The process-wide URL defaults are shared by every test in a binary,
//! so they are exercised in a binary of their own, by a single test.
use waymark::defaults::{
    UrlDefaults, add_query_default, add_url_default, clear_url_defaults, set_url_defaults,
    url_defaults,
};
use waymark::route::{Route, methods::GET_HEAD};
use waymark::{QueryOptions, build_url};

const PRODUCTOS_INDEX: Route = Route::new("productos.index", GET_HEAD, "/{locale}/productos");

#[test]
fn global_defaults_lifecycle() {
    assert!(url_defaults().is_empty());
    assert!(PRODUCTOS_INDEX.url((), None).is_err());

    add_url_default("locale", "es");
    assert_eq!(PRODUCTOS_INDEX.url((), None).unwrap(), "/es/productos");
    // Caller-provided values win over defaults.
    assert_eq!(PRODUCTOS_INDEX.url("en", None).unwrap(), "/en/productos");

    add_query_default("vista", "compacta");
    let merge = QueryOptions::merge_query([("pagina", 2)]);
    assert_eq!(
        PRODUCTOS_INDEX.url((), Some(&merge)).unwrap(),
        "/es/productos?vista=compacta&pagina=2"
    );
    let query = QueryOptions::query([("pagina", 2)]);
    assert_eq!(
        PRODUCTOS_INDEX.url((), Some(&query)).unwrap(),
        "/es/productos?pagina=2"
    );

    set_url_defaults(UrlDefaults::new().param("locale", "pt"));
    let template = waymark::route::RouteTemplate::new(
        [waymark::http::Method::GET],
        "/{locale}/productos",
    )
    .unwrap();
    assert_eq!(build_url(&template, (), None).unwrap(), "/pt/productos");

    clear_url_defaults();
    assert!(url_defaults().is_empty());
}
