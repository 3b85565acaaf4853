//! Modelos del sistema
//! 
//! Este módulo contiene los registros que la base de datos alojada devuelve
//! (entregas, vehículos, almacenes y rutas optimizadas) ya tipados.

pub mod coordinates;
pub mod delivery;
pub mod depot;
pub mod route;
pub mod row_id;
pub mod vehicle;

pub use coordinates::Coordinates;
pub use delivery::{Delivery, DeliveryStatus};
pub use depot::Depot;
pub use route::{OptimizedRoute, OptimizedSequence, RouteSummary, Waypoint};
pub use row_id::RowId;
pub use vehicle::{Vehicle, VehicleStatus, VehicleType};
