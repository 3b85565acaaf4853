//! Polilíneas codificadas (algoritmo estándar de Google, precisión 1e5)
//!
//! El workflow devuelve la ruta como polilínea; se decodifica solo para
//! dibujarla en el mapa.

use thiserror::Error;

use crate::models::Coordinates;

const PRECISION: f64 = 1e5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("Carácter inválido '{character}' en la posición {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Polilínea truncada")]
    Truncated,

    #[error("Valor demasiado largo en la posición {0}")]
    Overflow(usize),
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// Codificar una serie de coordenadas
pub fn encode(points: &[Coordinates]) -> String {
    let mut out = String::new();
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let position = *index;
        let byte = *bytes.get(position).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: byte as char,
                position,
            });
        }
        // 32 bits bastan para cualquier delta de coordenadas a 1e5
        if shift > 30 {
            return Err(PolylineError::Overflow(position));
        }
        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

/// Decodificar una polilínea en puntos `(lat, lng)`
pub fn decode(encoded: &str) -> Result<Vec<Coordinates>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lng) = (0i64, 0i64);
    let mut points = Vec::new();

    while index < bytes.len() {
        let position = index;
        lat = lat
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(position))?;
        let position = index;
        lng = lng
            .checked_add(decode_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(position))?;
        points.push(Coordinates::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}
