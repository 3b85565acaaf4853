//! Modelo de Route
//!
//! Rutas optimizadas producidas por el workflow externo. La aplicación solo
//! las lee (dashboard y reportes); nunca escribe la tabla optimized_routes.

use serde::{Deserialize, Serialize};

use super::RowId;

/// Parada ordenada devuelta por el workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Secuencia optimizada: polilínea codificada y paradas en orden
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizedSequence {
    #[serde(rename = "encodedPolyline", default)]
    pub encoded_polyline: Option<String>,
    #[serde(default)]
    pub ordered_waypoints: Vec<Waypoint>,
}

/// Route principal - mapea a la tabla optimized_routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default)]
    pub route_name: String,
    #[serde(default)]
    pub total_distance_km: f64,
    #[serde(default)]
    pub estimated_duration_minutes: f64,
    #[serde(default)]
    pub optimized_sequence: Option<OptimizedSequence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl OptimizedRoute {
    pub fn distance_label(&self) -> String {
        format!("{:.2}", self.total_distance_km)
    }

    pub fn duration_label(&self) -> String {
        format_number(self.estimated_duration_minutes)
    }
}

/// Métricas agregadas de las rutas (dashboard y reporte detallado)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteSummary {
    pub total_routes: usize,
    pub total_distance_km: f64,
    pub average_distance_km: f64,
    pub average_duration_minutes: f64,
}

impl RouteSummary {
    pub fn from_routes(routes: &[OptimizedRoute]) -> Self {
        if routes.is_empty() {
            return Self::default();
        }
        let n = routes.len() as f64;
        let total_distance: f64 = routes.iter().map(|r| r.total_distance_km).sum();
        let total_duration: f64 = routes.iter().map(|r| r.estimated_duration_minutes).sum();
        Self {
            total_routes: routes.len(),
            total_distance_km: round2(total_distance),
            average_distance_km: round2(total_distance / n),
            average_duration_minutes: round2(total_duration / n),
        }
    }
}

/// Redondeo a dos decimales, como se muestran las métricas
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formatear un número sin decimales superfluos (45.0 -> "45", 12.5 -> "12.5")
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, km: f64, minutes: f64) -> OptimizedRoute {
        OptimizedRoute {
            id: None,
            route_name: name.to_string(),
            total_distance_km: km,
            estimated_duration_minutes: minutes,
            optimized_sequence: None,
            created_at: None,
        }
    }

    #[test]
    fn test_summary_rounds_to_two_decimals() {
        let routes = vec![route("A", 10.123, 30.0), route("B", 5.0, 45.0), route("C", 2.5, 20.0)];
        let summary = RouteSummary::from_routes(&routes);
        assert_eq!(summary.total_routes, 3);
        assert_eq!(summary.total_distance_km, 17.62);
        assert_eq!(summary.average_distance_km, 5.87);
        assert_eq!(summary.average_duration_minutes, 31.67);
    }

    #[test]
    fn test_summary_of_no_routes() {
        assert_eq!(RouteSummary::from_routes(&[]), RouteSummary::default());
    }

    #[test]
    fn test_route_decodes_sequence() {
        let row = serde_json::json!({
            "id": "r-1",
            "route_name": "Ruta Centro",
            "total_distance_km": 12,
            "estimated_duration_minutes": 38,
            "optimized_sequence": {
                "encodedPolyline": "_p~iF~ps|U",
                "ordered_waypoints": [{"lat": -7.4, "lng": -79.57, "label": "Juan"}]
            }
        });
        let r: OptimizedRoute = serde_json::from_value(row).unwrap();
        assert_eq!(r.total_distance_km, 12.0);
        let seq = r.optimized_sequence.unwrap();
        assert_eq!(seq.encoded_polyline.as_deref(), Some("_p~iF~ps|U"));
        assert_eq!(seq.ordered_waypoints[0].label.as_deref(), Some("Juan"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(45.0), "45");
        assert_eq!(format_number(12.5), "12.5");
    }
}
