use waymark::route::Route;
use waymark::route::methods::{DELETE, GET_HEAD, PATCH, POST, PUT_PATCH};

pub const INDEX: Route = Route::new("logistica.entregas.index", GET_HEAD, "/logistica/entregas");
pub const CREATE: Route = Route::new(
    "logistica.entregas.create",
    GET_HEAD,
    "/logistica/entregas/create",
);
pub const STORE: Route = Route::new("logistica.entregas.store", POST, "/logistica/entregas");
pub const SHOW: Route = Route::new(
    "logistica.entregas.show",
    GET_HEAD,
    "/logistica/entregas/{entrega}",
);
pub const EDIT: Route = Route::new(
    "logistica.entregas.edit",
    GET_HEAD,
    "/logistica/entregas/{entrega}/edit",
);
pub const UPDATE: Route = Route::new(
    "logistica.entregas.update",
    PUT_PATCH,
    "/logistica/entregas/{entrega}",
);
pub const DESTROY: Route = Route::new(
    "logistica.entregas.destroy",
    DELETE,
    "/logistica/entregas/{entrega}",
);
/// Move a delivery to another state (e.g. `en_ruta`, `entregada`).
pub const CAMBIAR_ESTADO: Route = Route::new(
    "logistica.entregas.estado",
    PATCH,
    "/logistica/entregas/{entrega}/estado",
);
/// The delivery sheet, in the requested format (`pdf` when omitted).
pub const HOJA_RUTA: Route = Route::new(
    "logistica.entregas.hoja-ruta",
    GET_HEAD,
    "/logistica/entregas/{entrega}/hoja-ruta/{formato?}",
);

pub const ROUTES: &[Route] = &[
    INDEX,
    CREATE,
    STORE,
    SHOW,
    EDIT,
    UPDATE,
    DESTROY,
    CAMBIAR_ESTADO,
    HOJA_RUTA,
];
