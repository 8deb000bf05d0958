use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT_PATCH};

pub const INDEX: Route = Route::new("permisos.index", GET_HEAD, "/permisos");
pub const STORE: Route = Route::new("permisos.store", POST, "/permisos");
pub const UPDATE: Route = Route::new("permisos.update", PUT_PATCH, "/permisos/{permiso:nombre}");
pub const DESTROY: Route = Route::new("permisos.destroy", DELETE, "/permisos/{permiso:nombre}");

pub const ROUTES: &[Route] = &[INDEX, STORE, UPDATE, DESTROY];
