//! # Tablón de Mensajes
//! src/commands/messages.rs
//!
//! Aplicación de ejemplo sobre el servidor:
//! - `GET /messages`: todos los mensajes concatenados, en orden de llegada
//! - `POST /messages`: guarda el body como un mensaje HTML
//!
//! El tablón es el estado de la aplicación (`S`) que el servidor presta a
//! cada handler. Como el servidor tiene un solo hilo, no necesita `Mutex`.

use crate::buffer::{CapacityError, Growable};
use crate::http::{Method, Request, StatusCode};
use crate::router::Router;
use tracing::{info, warn};

/// Mensajes publicados desde que arrancó el servidor
#[derive(Debug, Default)]
pub struct MessageBoard {
    messages: Growable<String>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tablón que acepta como máximo `limit` mensajes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            messages: Growable::with_limit(limit),
        }
    }

    /// Envuelve `content` en el formato HTML del tablón y lo guarda
    pub fn post(&mut self, content: &str) -> Result<(), CapacityError> {
        self.messages
            .push(format!("<p>NAME</p><div>{}</div>", content))
    }

    /// Todos los mensajes concatenados
    pub fn render(&self) -> String {
        self.messages.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Handler para GET /messages
pub fn get_messages(req: &mut Request, board: &mut MessageBoard) {
    req.respond(StatusCode::Ok, board.render());
}

/// Handler para POST /messages
///
/// Un body ausente se guarda como mensaje vacío.
pub fn post_message(req: &mut Request, board: &mut MessageBoard) {
    let content = req
        .body()
        .map(|body| String::from_utf8_lossy(body).into_owned())
        .unwrap_or_default();

    match board.post(&content) {
        Ok(()) => {
            info!(client = %req.client_addr(), total = board.len(), "message posted");
            req.respond(StatusCode::Ok, "");
        }
        Err(e) => {
            warn!(error = %e, "cannot store message");
            req.respond(StatusCode::InternalServerError, "");
        }
    }
}

/// Registra las rutas del tablón
pub fn register(router: &mut Router<MessageBoard>) -> Result<(), CapacityError> {
    router.register(Method::GET, "/messages", get_messages)?;
    router.register(Method::POST, "/messages", post_message)?;
    Ok(())
}
