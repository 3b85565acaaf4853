//! Repositorios
//!
//! Acceso tipado a cada tabla sobre el contrato genérico `TableStore`.

pub mod delivery_repository;
pub mod depot_repository;
pub mod driver_repository;
pub mod route_repository;
pub mod vehicle_repository;

pub use delivery_repository::DeliveryRepository;
pub use depot_repository::DepotRepository;
pub use driver_repository::DriverRepository;
pub use route_repository::RouteRepository;
pub use vehicle_repository::VehicleRepository;
