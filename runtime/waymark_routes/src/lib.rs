//! The routes exposed by the logistics backend.
//!
//! Each module mirrors one group of backend routes. Routes are `const` values, named after
//! the action they point to:
//!
//! ```rust
//! use waymark_routes::usuarios;
//!
//! let definition = usuarios::SHOW.definition(42, None).unwrap();
//! assert_eq!(definition.url, "/usuarios/42");
//! ```
//!
//! [`registry`] collects every route, alternatives included, under its backend name.
use waymark::registry::RouteRegistry;
use waymark::route::Route;

pub mod codigos_barra;
pub mod logistica;
pub mod modulos_sidebar;
pub mod permisos;
pub mod productos;
pub mod roles;
pub mod usuarios;

/// Every route in the catalog, grouped by module.
pub const ALL: &[&[Route]] = &[
    logistica::entregas::ROUTES,
    logistica::ventas::ROUTES,
    logistica::seguimiento::ROUTES,
    codigos_barra::ROUTES,
    productos::ROUTES,
    usuarios::ROUTES,
    roles::ROUTES,
    permisos::ROUTES,
    modulos_sidebar::ROUTES,
];

/// A registry with every route of the catalog.
///
/// Routes reachable through more than one URL are registered once per URL, under the
/// same name: the first alternative is the one used by default.
pub fn registry() -> RouteRegistry {
    ALL.iter().flat_map(|routes| routes.iter()).collect()
}
