//! Middleware del sistema
//! 
//! Capas HTTP comunes a todas las rutas.

pub mod cors;

pub use cors::*;
