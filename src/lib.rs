//! # Servidor HTTP/1.0 Multiplexado
//! src/lib.rs
//!
//! Servidor HTTP/1.0 mínimo de un solo hilo, escrito directamente sobre
//! sockets TCP y `poll(2)`. Cada conexión lleva un request y se cierra al
//! responder.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `poller`: espera de disponibilidad sobre descriptores con `poll(2)`
//! - `http`: lectura con timeout, parser incremental y respuestas
//! - `router`: tabla de rutas con comodines `*` y rutas estáticas
//! - `server`: multiplexor de conexiones
//! - `commands`: handlers de la aplicación (tablón de mensajes)
//! - `app`: arma la tabla de rutas a partir de la configuración
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use socks_http::app;
//! use socks_http::commands::MessageBoard;
//! use socks_http::config::Config;
//! use socks_http::server::Server;
//!
//! let config = Config::default();
//! let router = app::build_router(&config).unwrap();
//! let mut server = Server::bind(&config, router, MessageBoard::new()).unwrap();
//! server.run().unwrap();
//! ```

pub mod app;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod poller;
pub mod router;
pub mod server;
