//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el multiplexor de conexiones que:
//! 1. Escucha en un puerto
//! 2. Espera disponibilidad sobre todos los sockets con `poll(2)`
//! 3. Acepta conexiones entrantes
//! 4. Atiende un request por conexión y la cierra

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
