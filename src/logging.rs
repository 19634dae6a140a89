//! # Logging Estructurado
//! src/logging.rs
//!
//! Inicializa `tracing` con salida de texto a stderr. `RUST_LOG` tiene
//! prioridad sobre el nivel que llega por configuración.

use crate::error::ServerError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global.
///
/// Falla si ya había uno instalado.
pub fn init(level: &str) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
