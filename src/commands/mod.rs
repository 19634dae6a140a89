//! # Comandos del Servidor
//!
//! Handlers de ejemplo que corren sobre el núcleo del servidor.
//!
//! - **messages**: tablón de mensajes en memoria (`GET`/`POST /messages`)
//!
//! Cada handler recibe el `Request` y el estado de la aplicación, y debe
//! terminar llamando a `Request::respond`.

pub mod messages;

pub use messages::MessageBoard;
