//! Services module
//! 
//! Este módulo contiene la lógica de negocio y las integraciones externas:
//! geocodificación, webhook de optimización, polilíneas, métricas del
//! dashboard y reportes PDF.

pub mod dashboard_service;
pub mod geocoding_service;
pub mod polyline;
pub mod report_service;
pub mod route_optimization_service;

pub use geocoding_service::GeocodingService;
pub use route_optimization_service::{OptimizationError, RouteOptimizationService};
