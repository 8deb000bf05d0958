use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST, PUT, PUT_PATCH};

pub const INDEX: Route = Route::new("usuarios.index", GET_HEAD, "/usuarios");
pub const STORE: Route = Route::new("usuarios.store", POST, "/usuarios");
pub const SHOW: Route = Route::new("usuarios.show", GET_HEAD, "/usuarios/{usuario}");
pub const UPDATE: Route = Route::new("usuarios.update", PUT_PATCH, "/usuarios/{usuario}");
pub const DESTROY: Route = Route::new("usuarios.destroy", DELETE, "/usuarios/{usuario}");
/// Replace the roles assigned to a user.
pub const ROLES_SYNC: Route = Route::new("usuarios.roles.sync", PUT, "/usuarios/{usuario}/roles");

pub const ROUTES: &[Route] = &[INDEX, STORE, SHOW, UPDATE, DESTROY, ROLES_SYNC];
