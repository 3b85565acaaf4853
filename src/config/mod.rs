//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de base de datos y las variables de
//! entorno (secretos de Supabase, Google Maps y n8n).

pub mod database;
pub mod environment;

pub use environment::*;
