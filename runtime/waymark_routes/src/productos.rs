//! The product catalog.
//!
//! Products are served both by the JSON API (`/api/productos`) and by the older
//! server-rendered pages (`/productos`). Both are registered under the same names,
//! the API first.
use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT_PATCH};

pub const INDEX: Route = Route::new("productos.index", GET_HEAD, "/api/productos");
pub const INDEX_LEGACY: Route = Route::new("productos.index", GET_HEAD, "/productos");
pub const STORE: Route = Route::new("productos.store", POST, "/api/productos");
pub const STORE_LEGACY: Route = Route::new("productos.store", POST, "/productos");
pub const SHOW: Route = Route::new("productos.show", GET_HEAD, "/api/productos/{producto}");
pub const UPDATE: Route = Route::new("productos.update", PUT_PATCH, "/api/productos/{producto}");
pub const DESTROY: Route = Route::new("productos.destroy", DELETE, "/api/productos/{producto}");
pub const CODIGOS_BARRA: Route = Route::new(
    "productos.codigos-barra",
    GET_HEAD,
    "/api/productos/{producto}/codigos-barra",
);

pub const ROUTES: &[Route] = &[
    INDEX,
    INDEX_LEGACY,
    STORE,
    STORE_LEGACY,
    SHOW,
    UPDATE,
    DESTROY,
    CODIGOS_BARRA,
];
