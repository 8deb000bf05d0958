//! Deliveries: planning, the sales they carry and shipment tracking.
pub mod entregas;
pub mod seguimiento;
pub mod ventas;
