//! The sales assigned to a delivery.
use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, POST};

pub const INDEX: Route = Route::new(
    "logistica.entregas.ventas.index",
    GET_HEAD,
    "/logistica/entregas/{entrega}/ventas",
);
pub const STORE: Route = Route::new(
    "logistica.entregas.ventas.store",
    POST,
    "/logistica/entregas/{entrega}/ventas",
);
pub const SHOW: Route = Route::new(
    "logistica.entregas.ventas.show",
    GET_HEAD,
    "/logistica/entregas/{entrega}/ventas/{venta}",
);
pub const DESTROY: Route = Route::new(
    "logistica.entregas.ventas.destroy",
    DELETE,
    "/logistica/entregas/{entrega}/ventas/{venta}",
);

pub const ROUTES: &[Route] = &[INDEX, STORE, SHOW, DESTROY];
