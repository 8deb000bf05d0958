use insta::assert_snapshot;
use itertools::Itertools;
use waymark::http::Method;
use waymark::{FormMethod, ParamValue, QueryOptions, params};
use waymark_routes::{
    ALL, codigos_barra, logistica, modulos_sidebar, permisos, productos, registry, roles,
    usuarios,
};

#[test]
fn every_route_is_well_formed() {
    for route in ALL.iter().flat_map(|routes| routes.iter()) {
        route
            .validate()
            .unwrap_or_else(|e| panic!("`{}` is invalid: {e}", route.name()));
    }
}

#[test]
fn names_and_patterns_are_not_reused_by_accident() {
    let routes = ALL.iter().flat_map(|routes| routes.iter()).collect_vec();
    // The same pattern + method pair must never be declared twice.
    let duplicates = routes
        .iter()
        .flat_map(|r| r.methods().iter().map(move |m| (m.clone(), r.pattern())))
        .duplicates()
        .collect_vec();
    assert!(duplicates.is_empty(), "{duplicates:?}");

    // Only the product routes have alternatives.
    let registry = registry();
    let with_alternatives = registry
        .iter()
        .filter(|(_, alternatives)| alternatives.len() > 1)
        .map(|(name, _)| name)
        .collect_vec();
    assert_eq!(with_alternatives, ["productos.index", "productos.store"]);
}

#[test]
fn catalog_examples() {
    let show = usuarios::SHOW.definition(42, None).unwrap();
    assert_eq!(show.url, "/usuarios/42");
    assert_eq!(show.method, Method::GET);

    let form = codigos_barra::UPDATE.form(5, None).unwrap();
    assert_eq!(form.action, "/codigos-barra/5?_method=PUT");
    assert_eq!(form.method, FormMethod::Post);

    assert_eq!(
        logistica::ventas::SHOW.url([3, 9], None).unwrap(),
        "/logistica/entregas/3/ventas/9"
    );
}

#[test]
fn binding_fields_read_the_right_attribute() {
    #[derive(serde::Serialize)]
    struct Entrega {
        id: u32,
        codigo_seguimiento: &'static str,
    }

    let entrega = ParamValue::entity(&Entrega {
        id: 17,
        codigo_seguimiento: "LGX-0017",
    })
    .unwrap();
    assert_eq!(
        logistica::seguimiento::SHOW.url(entrega.clone(), None).unwrap(),
        "/seguimiento/LGX-0017"
    );
    // Routes without a binding field use the `id`.
    assert_eq!(
        logistica::entregas::SHOW.url(entrega, None).unwrap(),
        "/logistica/entregas/17"
    );

    let err = permisos::UPDATE.put(ParamValue::with_id(3), None).unwrap_err();
    assert_snapshot!(err, @"The entity passed for `permiso` in `/permisos/{permiso:nombre}` doesn't have a `nombre` field that can be used in a URL.");
    assert_eq!(
        permisos::UPDATE.put("ventas.ver", None).unwrap().url,
        "/permisos/ventas.ver"
    );
}

#[test]
fn optional_format() {
    let hoja = &logistica::entregas::HOJA_RUTA;
    assert_eq!(hoja.url(8, None).unwrap(), "/logistica/entregas/8/hoja-ruta");
    assert_eq!(
        hoja.url(params! { entrega: 8, formato: "xlsx" }, None).unwrap(),
        "/logistica/entregas/8/hoja-ruta/xlsx"
    );
}

#[test]
fn verb_accessors() {
    assert_eq!(
        logistica::entregas::CAMBIAR_ESTADO
            .patch(4, Some(&QueryOptions::query([("estado", "en_ruta")])))
            .unwrap()
            .url,
        "/logistica/entregas/4/estado?estado=en_ruta"
    );
    assert!(logistica::entregas::CAMBIAR_ESTADO.put(4, None).is_err());
    assert_eq!(
        roles::PERMISOS_SYNC.form(2, None).unwrap().action,
        "/roles/2/permisos?_method=PUT"
    );
    assert_eq!(
        modulos_sidebar::DESTROY.form(6, None).unwrap().action,
        "/modulos-sidebar/6?_method=DELETE"
    );
    assert_eq!(
        modulos_sidebar::REORDENAR.form((), None).unwrap().action,
        "/modulos-sidebar/reordenar"
    );
}

#[test]
fn registry_alternatives() {
    let registry = registry();
    assert_eq!(
        registry.url("productos.store", (), None).unwrap(),
        "/api/productos"
    );
    let legacy = registry
        .alternative_for("productos.store", productos::STORE_LEGACY.pattern())
        .unwrap();
    assert_eq!(
        waymark::build_url(legacy, (), None).unwrap(),
        "/productos"
    );
}

#[test]
fn every_route_is_recognized() {
    let registry = registry();
    let matcher = registry.matcher().unwrap();

    let recognized = |method: Method, path: &str| {
        matcher
            .recognize(&method, path)
            .map(|m| {
                let params = m
                    .params
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .join(",");
                format!("{} ({params})", m.name)
            })
            .unwrap_or_else(|| "<none>".into())
    };

    assert_snapshot!(recognized(Method::GET, "/logistica/entregas/create"), @"logistica.entregas.create ()");
    assert_snapshot!(recognized(Method::GET, "/logistica/entregas/12"), @"logistica.entregas.show (entrega=12)");
    assert_snapshot!(recognized(Method::DELETE, "/logistica/entregas/12/ventas/3"), @"logistica.entregas.ventas.destroy (entrega=12,venta=3)");
    assert_snapshot!(recognized(Method::GET, "/logistica/entregas/12/hoja-ruta"), @"logistica.entregas.hoja-ruta (entrega=12)");
    assert_snapshot!(recognized(Method::POST, "/codigos-barra/generar"), @"codigos-barra.generar ()");
    assert_snapshot!(recognized(Method::PATCH, "/codigos-barra/5"), @"codigos-barra.update (codigos_barra=5)");
    assert_snapshot!(recognized(Method::POST, "/productos"), @"productos.store ()");
    assert_snapshot!(recognized(Method::GET, "/seguimiento/LGX-0017"), @"logistica.seguimiento.show (entrega=LGX-0017)");
    assert_snapshot!(recognized(Method::DELETE, "/usuarios"), @"<none>");

    // Every URL built from the catalog is recognized as the route it was built from.
    for route in ALL.iter().flat_map(|routes| routes.iter()) {
        let n_placeholders = route
            .pattern()
            .matches('{')
            .count();
        let args = (1..=n_placeholders).map(|i| i as u32).collect_vec();
        let definition = route.definition(args, None).unwrap();
        let matched = matcher
            .recognize(&definition.method, &definition.url)
            .unwrap_or_else(|| panic!("`{}` was not recognized", definition.url));
        assert_eq!(matched.name, route.name());
    }
}

#[test]
fn definitions_serialize_like_the_frontend_expects() {
    let definition = productos::DESTROY.definition(9, None).unwrap();
    assert_eq!(
        serde_json::to_value(&definition).unwrap(),
        serde_json::json!({"url": "/api/productos/9", "method": "delete"})
    );
}
