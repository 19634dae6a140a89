//! # Armado de la Aplicación
//! src/app.rs
//!
//! Construye la tabla de rutas del servidor: primero las del tablón de
//! mensajes, luego una ruta por cada archivo bajo `www_dir`.

use crate::commands::messages;
use crate::commands::MessageBoard;
use crate::config::Config;
use crate::error::ServerError;
use crate::router::{static_routes, Router};
use tracing::info;

/// Tabla de rutas completa para `config`
///
/// # Errores
///
/// Falla si la configuración es inválida, si `www_dir` no se puede recorrer
/// o si las rutas no caben en `max_routes`.
pub fn build_router(config: &Config) -> Result<Router<MessageBoard>, ServerError> {
    config.validate().map_err(ServerError::Config)?;

    let mut router = Router::with_limit(config.max_routes);
    messages::register(&mut router)?;

    let files = static_routes::generate(&config.www_dir)?;
    info!(www_dir = %config.www_dir, routes = files.len(), "static routes generated");
    router.extend(files)?;

    Ok(router)
}
