//! Routers por sección
//!
//! Cada sección del menú tiene su router; `create_app` los monta bajo su
//! prefijo.

pub mod dashboard_routes;
pub mod delivery_routes;
pub mod depot_routes;
pub mod optimization_routes;
pub mod report_routes;
pub mod vehicle_routes;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Descarga de un PDF generado en memoria
pub fn pdf_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_response_headers() {
        let response = pdf_response("reporte.pdf", b"%PDF-1.3".to_vec());
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"reporte.pdf\""
        );
    }
}
