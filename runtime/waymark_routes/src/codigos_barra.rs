//! Barcodes attached to products.
use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT_PATCH};

pub const INDEX: Route = Route::new("codigos-barra.index", GET_HEAD, "/codigos-barra");
pub const STORE: Route = Route::new("codigos-barra.store", POST, "/codigos-barra");
/// Generate barcodes in bulk for products that don't have one.
pub const GENERAR: Route = Route::new("codigos-barra.generar", POST, "/codigos-barra/generar");
pub const SHOW: Route = Route::new(
    "codigos-barra.show",
    GET_HEAD,
    "/codigos-barra/{codigos_barra}",
);
pub const UPDATE: Route = Route::new(
    "codigos-barra.update",
    PUT_PATCH,
    "/codigos-barra/{codigos_barra}",
);
pub const DESTROY: Route = Route::new(
    "codigos-barra.destroy",
    DELETE,
    "/codigos-barra/{codigos_barra}",
);
pub const IMPRIMIR: Route = Route::new(
    "codigos-barra.imprimir",
    GET_HEAD,
    "/codigos-barra/{codigos_barra}/imprimir",
);

pub const ROUTES: &[Route] = &[INDEX, STORE, GENERAR, SHOW, UPDATE, DESTROY, IMPRIMIR];
