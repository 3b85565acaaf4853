//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Los secretos (Supabase,
//! Google Maps, webhook de n8n) se leen del entorno o de `.env`; nunca van
//! escritos en el código.

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Endpoint de geocodificación de Google Maps
pub const GOOGLE_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Sufijo con el que se acota cada búsqueda de dirección
pub const DEFAULT_GEOCODING_REGION: &str = "Pacasmayo,Peru";

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(StoreBackend::Supabase),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("STORE_BACKEND desconocido: {}", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackend::Supabase => "supabase",
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub database_url: Option<String>,
    pub google_maps_api_key: String,
    pub google_geocoding_url: String,
    pub geocoding_region: String,
    pub geocoding_timeout: Duration,
    pub n8n_webhook_url: String,
    pub webhook_timeout: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            store_backend: StoreBackend::Memory,
            supabase_url: None,
            supabase_key: None,
            database_url: None,
            google_maps_api_key: String::new(),
            google_geocoding_url: GOOGLE_GEOCODING_URL.to_string(),
            geocoding_region: DEFAULT_GEOCODING_REGION.to_string(),
            geocoding_timeout: Duration::from_secs(20),
            n8n_webhook_url: String::new(),
            webhook_timeout: Duration::from_secs(45),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de una fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(p) => p.parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };
        let geocoding_timeout = match var("GEOCODING_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(s.parse().context("GEOCODING_TIMEOUT_SECS must be a valid number")?),
            None => defaults.geocoding_timeout,
        };
        let webhook_timeout = match var("WEBHOOK_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(s.parse().context("WEBHOOK_TIMEOUT_SECS must be a valid number")?),
            None => defaults.webhook_timeout,
        };

        let supabase_url = var("SUPABASE_URL");
        let supabase_key = var("SUPABASE_KEY");
        let database_url = var("DATABASE_URL");

        let store_backend = match var("STORE_BACKEND") {
            Some(name) => name.parse()?,
            None if supabase_url.is_some() => StoreBackend::Supabase,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        match store_backend {
            StoreBackend::Supabase if supabase_url.is_none() || supabase_key.is_none() => {
                bail!("SUPABASE_URL and SUPABASE_KEY must be set for the supabase backend")
            }
            StoreBackend::Postgres if database_url.is_none() => {
                bail!("DATABASE_URL must be set for the postgres backend")
            }
            _ => {}
        }

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: var("HOST").unwrap_or(defaults.host),
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store_backend,
            supabase_url,
            supabase_key,
            database_url,
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            google_geocoding_url: var("GOOGLE_GEOCODING_URL").unwrap_or(defaults.google_geocoding_url),
            geocoding_region: var("GEOCODING_REGION").unwrap_or(defaults.geocoding_region),
            geocoding_timeout,
            n8n_webhook_url: var("N8N_WEBHOOK_URL").unwrap_or_default(),
            webhook_timeout,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Secretos opcionales que faltan (se avisan al arrancar)
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.google_maps_api_key.is_empty() {
            missing.push("GOOGLE_MAPS_API_KEY");
        }
        if self.n8n_webhook_url.is_empty() {
            missing.push("N8N_WEBHOOK_URL");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_use_memory_backend() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 3000);
        assert_eq!(config.webhook_timeout, Duration::from_secs(45));
        assert_eq!(config.geocoding_region, "Pacasmayo,Peru");
        assert_eq!(config.missing_secrets(), vec!["GOOGLE_MAPS_API_KEY", "N8N_WEBHOOK_URL"]);
    }

    #[test]
    fn test_supabase_backend_is_inferred() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "service-key"),
            ("GOOGLE_MAPS_API_KEY", "maps-key"),
            ("N8N_WEBHOOK_URL", "https://n8n.example.com/webhook/optimize"),
            ("CORS_ORIGINS", "http://localhost:5173, https://pacasmayo.pe"),
        ])
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Supabase);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.missing_secrets().is_empty());
    }

    #[test]
    fn test_supabase_backend_requires_key() {
        let result = config_from(&[
            ("STORE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://abc.supabase.co"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("PORT", "abc")]).is_err());
    }

    #[test]
    fn test_postgres_backend_from_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgresql://localhost/pacasmayo")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
    }
}
