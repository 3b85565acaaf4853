use anyhow::{anyhow, Result};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use pacasmayo_routing::config::database::DatabaseConfig;
use pacasmayo_routing::config::environment::{EnvironmentConfig, StoreBackend};
use pacasmayo_routing::create_app;
use pacasmayo_routing::database::{MemoryStore, PostgresStore, SupabaseStore, TableStore};
use pacasmayo_routing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Sistema Optimizador de Rutas - Pacasmayo");
    info!("================================================");

    for secret in config.missing_secrets() {
        warn!("⚠️ {} no configurado; la función que lo usa no estará disponible", secret);
    }

    let http_client = Client::builder()
        .user_agent("pacasmayo-routing/0.1")
        .build()?;

    // Inicializar base de datos
    let store = match connect_store(&config, &http_client).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Store '{}' listo", config.store_backend);

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(config, store, http_client));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("📊 Dashboard:");
    info!("   GET  / - Métricas, distribución e histograma");
    info!("📦 Entregas:");
    info!("   GET  /deliveries - Listar y filtrar entregas");
    info!("   POST /deliveries - Nueva entrega (geocodificada)");
    info!("   POST /deliveries/status - Cambiar estado");
    info!("🗺️ Optimización:");
    info!("   GET  /optimize - Seleccionar entregas y almacén");
    info!("   POST /optimize - Enviar al webhook de n8n");
    info!("🚛 Vehículos:");
    info!("   GET  /vehicles - Flota");
    info!("   POST /vehicles - Registrar vehículo");
    info!("   POST /vehicles/status - Cambiar estado");
    info!("   POST /vehicles/delete - Eliminar vehículo");
    info!("   GET  /vehicles/report.pdf - Reporte PDF");
    info!("🏭 Almacenes:");
    info!("   GET  /depots - Almacenes");
    info!("   POST /depots - Registrar almacén");
    info!("   POST /depots/default - Marcar predeterminado");
    info!("   POST /depots/delete - Eliminar almacén");
    info!("📄 Reportes:");
    info!("   GET  /reports - Eficiencia de rutas");
    info!("   GET  /reports/routes.pdf - Reporte PDF detallado");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Backend de persistencia según `STORE_BACKEND`
async fn connect_store(config: &EnvironmentConfig, client: &Client) -> Result<Arc<dyn TableStore>> {
    match config.store_backend {
        StoreBackend::Supabase => {
            let url = config
                .supabase_url
                .as_deref()
                .ok_or_else(|| anyhow!("SUPABASE_URL no configurado"))?;
            let key = config
                .supabase_key
                .clone()
                .ok_or_else(|| anyhow!("SUPABASE_KEY no configurado"))?;
            Ok(Arc::new(SupabaseStore::new(client.clone(), url, key)))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow!("DATABASE_URL no configurado"))?;
            let store = PostgresStore::connect(&DatabaseConfig::new(url)).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("⚠️ Usando store en memoria: los datos se pierden al reiniciar");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
