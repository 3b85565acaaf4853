//! Generador de reportes PDF
//!
//! El contenido se compone primero en un modelo de páginas (`ReportLayout`):
//! celdas con borde, saltos de página automáticos, cabecera y pie repetidos.
//! `render_pdf` convierte ese modelo en bytes con printpdf.
//!
//! Todas las medidas están en milímetros, con `y` medida desde el borde
//! superior de la página (A4 vertical).

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, Point};
use thiserror::Error;

use crate::models::route::{format_number, round2};
use crate::models::{OptimizedRoute, RouteSummary, Vehicle};

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN: f64 = 10.0;
/// Margen inferior a partir del cual se salta de página
pub const BREAK_MARGIN: f64 = 20.0;

const PAGE_HEADER: &str = "Reporte de Eficiencia - Pacasmayo";
const ROW_HEIGHT: f64 = 8.0;
const PT_TO_MM: f64 = 0.3528;

pub const VEHICLES_REPORT_FILENAME: &str = "reporte_vehiculos.pdf";
pub const ROUTES_REPORT_FILENAME: &str = "reporte_detallado_pacasmayo.pdf";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    /// Tamaño en puntos
    pub size: f64,
}

impl Font {
    pub const fn new(style: FontStyle, size: f64) -> Self {
        Self { style, size }
    }

    fn size_mm(&self) -> f64 {
        self.size * PT_TO_MM
    }

    /// Ancho aproximado del texto con las métricas medias de Helvetica
    fn text_width(&self, text: &str) -> f64 {
        let factor = match self.style {
            FontStyle::Bold => 0.56,
            _ => 0.5,
        };
        text.chars().count() as f64 * self.size_mm() * factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Texto con la línea base en `y`
    Text { x: f64, y: f64, font: Font, text: String },
    /// Borde de celda
    Rect { x: f64, y: f64, w: f64, h: f64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPage {
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl ReportPage {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }
}

/// Tabla con encabezado repetido en cada página
pub struct TableSpec<'a> {
    pub widths: &'a [f64],
    pub headers: &'a [&'a str],
    pub aligns: &'a [Align],
    /// Posición horizontal fija; `None` usa el margen izquierdo
    pub x: Option<f64>,
}

/// Composición de páginas al estilo FPDF
pub struct ReportLayout {
    pages: Vec<ReportPage>,
    x: f64,
    y: f64,
    font: Font,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportLayout {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font: Font::new(FontStyle::Regular, 10.0),
        }
    }

    fn page_break_trigger() -> f64 {
        PAGE_HEIGHT - BREAK_MARGIN
    }

    fn current(&mut self) -> &mut ReportPage {
        if self.pages.is_empty() {
            self.pages.push(ReportPage {
                number: 1,
                ops: Vec::new(),
            });
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn set_font(&mut self, style: FontStyle, size: f64) {
        self.font = Font::new(style, size);
    }

    /// Salto de línea: vuelve al margen y baja `h`
    pub fn ln(&mut self, h: f64) {
        self.x = MARGIN;
        self.y += h;
    }

    /// Nueva página con la cabecera fija
    pub fn add_page(&mut self) {
        if !self.pages.is_empty() {
            self.draw_footer();
        }
        let number = self.pages.len() + 1;
        self.pages.push(ReportPage {
            number,
            ops: Vec::new(),
        });

        let font = self.font;
        self.x = MARGIN;
        self.y = MARGIN;
        self.set_font(FontStyle::Bold, 14.0);
        self.put_cell(0.0, 10.0, PAGE_HEADER, false, Align::Center);
        self.ln(10.0);
        self.ln(8.0);
        self.font = font;
    }

    fn draw_footer(&mut self) {
        let number = self.current().number;
        let font = self.font;
        self.x = MARGIN;
        self.y = PAGE_HEIGHT - 15.0;
        self.set_font(FontStyle::Italic, 8.0);
        self.put_cell(0.0, 10.0, &format!("Página {}", number), false, Align::Center);
        self.font = font;
    }

    /// Dibujar una celda en la posición actual sin mover el cursor
    fn put_cell(&mut self, w: f64, h: f64, text: &str, border: bool, align: Align) -> f64 {
        let w = if w == 0.0 { PAGE_WIDTH - MARGIN - self.x } else { w };
        let (x, y, font) = (self.x, self.y, self.font);
        let page = self.current();
        if border {
            page.ops.push(DrawOp::Rect { x, y, w, h });
        }
        if !text.is_empty() {
            let text_x = match align {
                Align::Left => x + 1.0,
                Align::Center => x + (w - font.text_width(text)) / 2.0,
            };
            page.ops.push(DrawOp::Text {
                x: text_x,
                y: y + 0.5 * h + 0.3 * font.size_mm(),
                font,
                text: text.to_string(),
            });
        }
        w
    }

    /// Celda con salto de página automático.
    /// `new_line` deja el cursor al inicio de la línea siguiente.
    pub fn cell(&mut self, w: f64, h: f64, text: &str, border: bool, new_line: bool, align: Align) {
        if self.y + h > Self::page_break_trigger() {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
        let w = self.put_cell(w, h, text, border, align);
        if new_line {
            self.ln(h);
        } else {
            self.x += w;
        }
    }

    /// Bloque de título en negrita seguido de líneas de texto
    pub fn chapter(&mut self, title: &str, body: &str) {
        self.set_font(FontStyle::Bold, 12.0);
        self.cell(0.0, 8.0, title, false, true, Align::Left);
        self.set_font(FontStyle::Regular, 10.0);
        for line in body.lines() {
            self.cell(0.0, 8.0, line, false, true, Align::Left);
        }
        self.ln(5.0);
    }

    fn table_header(&mut self, spec: &TableSpec<'_>) {
        self.set_font(FontStyle::Bold, 11.0);
        self.x = spec.x.unwrap_or(MARGIN);
        for (i, header) in spec.headers.iter().enumerate() {
            let last = i + 1 == spec.headers.len();
            self.cell(spec.widths[i], ROW_HEIGHT, header, true, last, Align::Center);
        }
        self.set_font(FontStyle::Regular, 10.0);
    }

    /// Tabla con borde; si una fila no cabe, continúa en otra página
    /// repitiendo el encabezado.
    pub fn table(&mut self, spec: &TableSpec<'_>, rows: &[Vec<String>]) {
        self.table_header(spec);
        for row in rows {
            if self.y + ROW_HEIGHT > Self::page_break_trigger() {
                self.add_page();
                self.table_header(spec);
            }
            self.x = spec.x.unwrap_or(MARGIN);
            for (i, value) in row.iter().enumerate() {
                let last = i + 1 == row.len();
                let align = spec.aligns.get(i).copied().unwrap_or(Align::Left);
                self.cell(spec.widths[i], ROW_HEIGHT, value, true, last, align);
            }
        }
    }

    /// Cerrar la última página y devolver todas
    pub fn finish(mut self) -> Vec<ReportPage> {
        if !self.pages.is_empty() {
            self.draw_footer();
        }
        self.pages
    }
}

/// Primeros `max` caracteres
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Nombres largos se recortan a 35 caracteres más "..."
pub fn shorten_route_name(name: &str) -> String {
    if name.chars().count() > 38 {
        format!("{}...", truncate_chars(name, 35))
    } else {
        name.to_string()
    }
}

/// Reporte de vehículos
pub fn vehicles_report(vehicles: &[Vehicle]) -> Vec<ReportPage> {
    let mut layout = ReportLayout::new();
    layout.add_page();

    layout.set_font(FontStyle::Bold, 14.0);
    layout.cell(0.0, 10.0, "REPORTE DE VEHÍCULOS - PACASMAYO", false, true, Align::Center);
    layout.ln(5.0);

    let rows: Vec<Vec<String>> = vehicles
        .iter()
        .map(|v| {
            vec![
                v.license_plate.clone(),
                truncate_chars(v.vehicle_type.as_str(), 22),
                format!("{:.1}", v.capacity_kg),
                v.status.as_str().to_string(),
                truncate_chars(v.created_at.as_deref().unwrap_or_default(), 10),
            ]
        })
        .collect();

    layout.table(
        &TableSpec {
            widths: &[40.0, 45.0, 45.0, 35.0, 30.0],
            headers: &["Placa", "Tipo de Vehículo", "Capacidad (kg)", "Estado", "Fecha"],
            aligns: &[Align::Left, Align::Left, Align::Center, Align::Center, Align::Center],
            x: None,
        },
        &rows,
    );

    layout.ln(8.0);
    layout.set_font(FontStyle::Italic, 9.0);
    layout.cell(
        0.0,
        8.0,
        &format!("Total de vehículos registrados: {}", vehicles.len()),
        false,
        true,
        Align::Left,
    );
    layout.cell(
        0.0,
        8.0,
        "Reporte generado automáticamente por el sistema de rutas Pacasmayo.",
        false,
        true,
        Align::Center,
    );

    layout.finish()
}

/// Reporte detallado de rutas optimizadas
pub fn routes_report(routes: &[OptimizedRoute], summary: &RouteSummary) -> Vec<ReportPage> {
    let mut layout = ReportLayout::new();
    layout.add_page();

    layout.chapter(
        "Resumen General",
        &format!(
            "Rutas generadas: {}\nDistancia total: {} km\nDistancia promedio: {} km\nDuración promedio: {} minutos",
            summary.total_routes,
            format_number(round2(summary.total_distance_km)),
            format_number(round2(summary.average_distance_km)),
            format_number(round2(summary.average_duration_minutes)),
        ),
    );

    let widths = [80.0, 40.0, 40.0];
    let table_width: f64 = widths.iter().sum();
    let x_offset = ((PAGE_WIDTH - 2.0 * MARGIN) - table_width) / 2.0;

    let rows: Vec<Vec<String>> = routes
        .iter()
        .map(|r| {
            vec![
                shorten_route_name(&r.route_name),
                r.distance_label(),
                r.duration_label(),
            ]
        })
        .collect();

    layout.table(
        &TableSpec {
            widths: &widths,
            headers: &["Nombre de Ruta", "Distancia (km)", "Duración (min)"],
            aligns: &[Align::Left, Align::Center, Align::Center],
            x: Some(x_offset),
        },
        &rows,
    );

    layout.ln(10.0);
    layout.set_font(FontStyle::Italic, 9.0);
    layout.cell(
        0.0,
        10.0,
        "Reporte generado automáticamente por el sistema de optimización de rutas Pacasmayo.",
        false,
        true,
        Align::Center,
    );

    layout.finish()
}

/// Las fuentes base del PDF no cubren UTF-8: se reemplazan los acentos
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn font_slot(style: FontStyle) -> usize {
    match style {
        FontStyle::Regular => 0,
        FontStyle::Bold => 1,
        FontStyle::Italic => 2,
    }
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

/// Convertir las páginas compuestas en un documento PDF
pub fn render_pdf(title: &str, pages: &[ReportPage]) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Capa 1");
    let fonts: [IndirectFontRef; 3] = [
        doc.add_builtin_font(BuiltinFont::Helvetica)?,
        doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    ];

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Capa 1");
            doc.get_page(page_ref).get_layer(layer_ref)
        };
        layer.set_outline_thickness(0.2);

        for op in &page.ops {
            match op {
                DrawOp::Text { x, y, font, text } => {
                    layer.use_text(
                        pdf_text(text),
                        font.size as f32,
                        mm(*x),
                        mm(PAGE_HEIGHT - y),
                        &fonts[font_slot(font.style)],
                    );
                }
                DrawOp::Rect { x, y, w, h } => {
                    let top = PAGE_HEIGHT - y;
                    let bottom = top - h;
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(mm(*x), mm(top)), false),
                            (Point::new(mm(x + w), mm(top)), false),
                            (Point::new(mm(x + w), mm(bottom)), false),
                            (Point::new(mm(*x), mm(bottom)), false),
                        ],
                        is_closed: true,
                    });
                }
            }
        }
    }

    log::info!("📄 PDF generado: {} ({} páginas)", title, pages.len());
    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VehicleStatus, VehicleType};

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle {
            id: None,
            license_plate: plate.to_string(),
            vehicle_type: VehicleType::MediumTruck,
            capacity_kg: 750.0,
            status: VehicleStatus::Available,
            created_at: Some("2025-10-20T14:03:11.123456+00:00".to_string()),
        }
    }

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
    fn test_vehicles_report_single_page() {
        let vehicles = vec![vehicle("ABC-123"), vehicle("XYZ-999"), vehicle("T1A-234")];
        let pages = vehicles_report(&vehicles);
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert!(page.contains_text("Reporte de Eficiencia - Pacasmayo"));
        assert!(page.contains_text("REPORTE DE VEHÍCULOS - PACASMAYO"));
        assert!(page.contains_text("750.0"));
        assert!(page.contains_text("2025-10-20"));
        assert!(page.contains_text("Total de vehículos registrados: 3"));
        assert!(page.contains_text("Página 1"));
    }

    #[test]
    fn test_vehicles_report_repeats_header_on_each_page() {
        let vehicles: Vec<Vehicle> = (0..60).map(|i| vehicle(&format!("PLT-{:03}", i))).collect();
        let pages = vehicles_report(&vehicles);
        assert_eq!(pages.len(), 3);

        for page in &pages {
            assert!(page.contains_text("Placa"));
            assert!(page.contains_text(&format!("Página {}", page.number)));
        }
        let plates: usize = pages
            .iter()
            .map(|p| p.texts().iter().filter(|t| t.starts_with("PLT-")).count())
            .sum();
        assert_eq!(plates, 60);
        assert!(pages[2].contains_text("Total de vehículos registrados: 60"));
    }

    #[test]
    fn test_routes_report_summary_and_centered_table() {
        let routes = vec![
            route("Ruta Centro", 12.346, 38.0),
            route("Ruta Norte - Malecón, Jr. Dos de Mayo y alrededores", 8.0, 25.5),
        ];
        let summary = RouteSummary::from_routes(&routes);
        let pages = routes_report(&routes, &summary);
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert!(page.contains_text("Resumen General"));
        assert!(page.contains_text("Rutas generadas: 2"));
        assert!(page.contains_text("12.35"));
        assert!(page.contains_text("Ruta Norte - Malecón, Jr. Dos de Ma..."));
        assert!(page.contains_text("25.5"));
        assert!(page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { x, w, .. } if *x == 15.0 && *w == 80.0)));
    }

    #[test]
    fn test_shorten_route_name() {
        assert_eq!(shorten_route_name("Ruta Centro"), "Ruta Centro");
        let exactly_38 = "a".repeat(38);
        assert_eq!(shorten_route_name(&exactly_38), exactly_38);
        let long = "b".repeat(39);
        assert_eq!(shorten_route_name(&long), format!("{}...", "b".repeat(35)));
    }

    #[test]
    fn test_pdf_text_folds_accents() {
        assert_eq!(pdf_text("Página Vehículos Duración"), "Pagina Vehiculos Duracion");
    }

    #[test]
    fn test_render_pdf_bytes() {
        let pages = vehicles_report(&[vehicle("ABC-123")]);
        let bytes = render_pdf("Reporte de Vehículos", &pages).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
