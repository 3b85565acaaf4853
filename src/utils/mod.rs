//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores y validación de
//! formularios.

pub mod errors;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
