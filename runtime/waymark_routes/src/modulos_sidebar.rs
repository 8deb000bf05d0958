//! The modules listed in the application's sidebar, and their order.
use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT_PATCH};

pub const INDEX: Route = Route::new("modulos-sidebar.index", GET_HEAD, "/modulos-sidebar");
pub const STORE: Route = Route::new("modulos-sidebar.store", POST, "/modulos-sidebar");
/// Persist a new order for the sidebar entries.
pub const REORDENAR: Route = Route::new(
    "modulos-sidebar.reordenar",
    POST,
    "/modulos-sidebar/reordenar",
);
pub const UPDATE: Route = Route::new(
    "modulos-sidebar.update",
    PUT_PATCH,
    "/modulos-sidebar/{modulo}",
);
pub const DESTROY: Route = Route::new(
    "modulos-sidebar.destroy",
    DELETE,
    "/modulos-sidebar/{modulo}",
);

pub const ROUTES: &[Route] = &[INDEX, STORE, REORDENAR, UPDATE, DESTROY];
