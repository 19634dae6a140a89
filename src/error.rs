//! # Errores Fatales
//! src/error.rs
//!
//! Solo los errores de arranque (y una falla del propio `poll(2)`) llegan
//! hasta aquí. Los errores de una conexión se responden al cliente (400,
//! 404, 500, 503) y el servidor sigue atendiendo.

use crate::buffer::CapacityError;
use crate::router::static_routes::StaticRouteError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("readiness wait failed: {0}")]
    Poll(#[source] io::Error),

    #[error("static routes: {0}")]
    StaticRoutes(#[from] StaticRouteError),

    #[error("route table: {0}")]
    Routes(#[from] CapacityError),

    #[error("cannot serialize route table: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot initialize logging: {0}")]
    Logging(String),
}
