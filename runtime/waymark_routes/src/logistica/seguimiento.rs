//! Shipment tracking.
//!
//! Tracking pages are public and looked up by tracking code rather than by id.
use waymark::route::Route;
use waymark::route::methods::{GET_HEAD, POST};

pub const SHOW: Route = Route::new(
    "logistica.seguimiento.show",
    GET_HEAD,
    "/seguimiento/{entrega:codigo_seguimiento}",
);
/// Record a tracking event (a scan, a delivery attempt, ...) for a delivery.
pub const EVENTOS_STORE: Route = Route::new(
    "logistica.seguimiento.eventos.store",
    POST,
    "/api/logistica/entregas/{entrega}/eventos",
);

pub const ROUTES: &[Route] = &[SHOW, EVENTOS_STORE];
