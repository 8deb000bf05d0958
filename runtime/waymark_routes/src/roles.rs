use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT, PUT_PATCH};

pub const INDEX: Route = Route::new("roles.index", GET_HEAD, "/roles");
pub const STORE: Route = Route::new("roles.store", POST, "/roles");
pub const SHOW: Route = Route::new("roles.show", GET_HEAD, "/roles/{role}");
pub const UPDATE: Route = Route::new("roles.update", PUT_PATCH, "/roles/{role}");
pub const DESTROY: Route = Route::new("roles.destroy", DELETE, "/roles/{role}");
/// Replace the permissions granted to a role.
pub const PERMISOS_SYNC: Route = Route::new("roles.permisos.sync", PUT, "/roles/{role}/permisos");

pub const ROUTES: &[Route] = &[INDEX, STORE, SHOW, UPDATE, DESTROY, PERMISOS_SYNC];
