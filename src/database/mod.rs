//! Módulo de base de datos
//! 
//! Acceso a la base de datos alojada: el contrato `TableStore` y sus
//! backends (Supabase REST, PostgreSQL directo y memoria).

pub mod memory;
pub mod postgres;
pub mod store;
pub mod supabase;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{Record, StoreError, StoreResult, Table, TableStore};
pub use supabase::SupabaseStore;
