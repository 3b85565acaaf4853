//! Métricas del dashboard
//!
//! Cálculos en memoria sobre las filas ya leídas: totales por estado,
//! distribución, histograma de distancias y puntos del mapa.

use serde::Serialize;

use crate::models::{Coordinates, Delivery, DeliveryStatus, OptimizedRoute, RouteSummary};

/// Número de barras del histograma de distancias
pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliveryTotals {
    pub total: usize,
    pub delivered: usize,
    pub in_progress: usize,
    pub pending: usize,
}

impl DeliveryTotals {
    pub fn from_deliveries(deliveries: &[Delivery]) -> Self {
        let count = |status| deliveries.iter().filter(|d| d.status == status).count();
        Self {
            total: deliveries.len(),
            delivered: count(DeliveryStatus::Delivered),
            in_progress: count(DeliveryStatus::InProgress),
            pending: count(DeliveryStatus::Pending),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: DeliveryStatus,
    pub count: usize,
    pub percent: f64,
}

/// Cantidad por estado, de mayor a menor (solo estados presentes)
pub fn status_distribution(deliveries: &[Delivery]) -> Vec<StatusShare> {
    if deliveries.is_empty() {
        return Vec::new();
    }
    let total = deliveries.len() as f64;
    let mut shares: Vec<StatusShare> = DeliveryStatus::ALL
        .iter()
        .map(|&status| {
            let count = deliveries.iter().filter(|d| d.status == status).count();
            StatusShare {
                status,
                count,
                percent: (count as f64 * 1000.0 / total).round() / 10.0,
            }
        })
        .filter(|share| share.count > 0)
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Altura relativa a la barra más alta (0-100)
    pub height_pct: u32,
}

/// Histograma de `total_distance_km` en `bins` intervalos iguales
pub fn distance_histogram(routes: &[OptimizedRoute], bins: usize) -> Vec<HistogramBin> {
    if routes.is_empty() || bins == 0 {
        return Vec::new();
    }
    let distances: Vec<f64> = routes.iter().map(|r| r.total_distance_km).collect();
    let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: distances.len(),
            height_pct: 100,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for d in &distances {
        let index = (((d - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    let tallest = counts.iter().copied().max().unwrap_or(0).max(1);
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
            height_pct: (count * 100 / tallest) as u32,
        })
        .collect()
}

/// Color del marcador según el estado
pub fn status_color(status: DeliveryStatus) -> &'static str {
    match status {
        DeliveryStatus::Pending => "#F0AD4E",
        DeliveryStatus::InProgress => "#3E92CC",
        DeliveryStatus::Delivered => "#5CB85C",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub status: DeliveryStatus,
    pub color: &'static str,
}

/// Entregas con coordenadas, listas para el mapa
pub fn delivery_map_points(deliveries: &[Delivery]) -> Vec<MapPoint> {
    deliveries
        .iter()
        .filter_map(|d| {
            d.customer_coordinates.map(|Coordinates { lat, lng }| MapPoint {
                lat,
                lng,
                label: d.customer_name.clone(),
                status: d.status,
                color: status_color(d.status),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub totals: DeliveryTotals,
    pub distribution: Vec<StatusShare>,
    pub histogram: Vec<HistogramBin>,
    pub map_points: Vec<MapPoint>,
    /// `None` cuando aún no hay rutas optimizadas
    pub routes: Option<RouteSummary>,
    pub vehicle_count: usize,
    pub driver_count: usize,
}

impl DashboardMetrics {
    /// Sin entregas ni rutas no hay nada que mostrar
    pub fn has_data(&self) -> bool {
        self.totals.total > 0 || self.routes.is_some()
    }
}

pub fn build_dashboard(
    deliveries: &[Delivery],
    routes: &[OptimizedRoute],
    vehicle_count: usize,
    driver_count: usize,
) -> DashboardMetrics {
    DashboardMetrics {
        totals: DeliveryTotals::from_deliveries(deliveries),
        distribution: status_distribution(deliveries),
        histogram: distance_histogram(routes, HISTOGRAM_BINS),
        map_points: delivery_map_points(deliveries),
        routes: (!routes.is_empty()).then(|| RouteSummary::from_routes(routes)),
        vehicle_count,
        driver_count,
    }
}
