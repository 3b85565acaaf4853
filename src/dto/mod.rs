//! Data Transfer Objects
//!
//! Formularios HTML recibidos por las vistas, avisos mostrados tras cada
//! acción y el contrato JSON del webhook de optimización.

pub mod delivery_dto;
pub mod depot_dto;
pub mod notice;
pub mod optimization_dto;
pub mod vehicle_dto;

pub use notice::{Notice, NoticeLevel};
