//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./socks_http --port 8080 --www-dir ./www --read-timeout-ms 20
//! ./socks_http --list-routes
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 WWW_DIR=./public ./socks_http
//! ```

use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Configuración del servidor HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "socks_http")]
#[command(about = "Servidor HTTP/1.0 de un solo hilo multiplexado con poll(2)")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se generan las rutas estáticas
    #[arg(long = "www-dir", default_value = "www", env = "WWW_DIR")]
    pub www_dir: String,

    // === Lectura de sockets ===
    /// Espera máxima por cada lectura de socket, en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "10", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Espera máxima por cada escritura de una respuesta, en milisegundos
    #[arg(long = "write-timeout-ms", default_value = "1000", env = "WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: u64,

    /// Máximo de bytes para request line + headers
    #[arg(long = "max-head-bytes", default_value = "8192", env = "MAX_HEAD_BYTES")]
    pub max_head_bytes: usize,

    /// Máximo valor aceptado de Content-Length
    #[arg(long = "max-body-bytes", default_value = "1048576", env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    // === Capacidad ===
    /// Máximo de conexiones de clientes vigiladas a la vez (las demás reciben 503)
    #[arg(long = "max-connections", default_value = "1024", env = "MAX_CONNECTIONS")]
    pub max_connections: usize,

    /// Máximo de rutas en la tabla
    #[arg(long = "max-routes", default_value = "4096", env = "MAX_ROUTES")]
    pub max_routes: usize,

    // === Observabilidad ===
    /// Nivel de log (trace, debug, info, warn, error); RUST_LOG tiene prioridad
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Imprime la tabla de rutas en JSON y termina
    #[arg(long = "list-routes")]
    pub list_routes: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use socks_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }
        // set_write_timeout rechaza una duración cero
        if self.write_timeout_ms == 0 {
            return Err("Write timeout must be > 0".to_string());
        }

        // La request line tiene que caber en el primer trozo
        if self.max_head_bytes < 1024 {
            return Err("Max head bytes must be >= 1024".to_string());
        }

        if self.max_connections == 0 {
            return Err("Max connections must be >= 1".to_string());
        }
        if self.max_routes == 0 {
            return Err("Max routes must be >= 1".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            www_dir = %self.www_dir,
            "network"
        );
        info!(
            read_timeout_ms = self.read_timeout_ms,
            write_timeout_ms = self.write_timeout_ms,
            max_head_bytes = self.max_head_bytes,
            max_body_bytes = self.max_body_bytes,
            "request limits"
        );
        info!(
            max_connections = self.max_connections,
            max_routes = self.max_routes,
            "capacity"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            www_dir: "www".to_string(),
            read_timeout_ms: 10,
            write_timeout_ms: 1000,
            max_head_bytes: 8192,
            max_body_bytes: 1024 * 1024,
            max_connections: 1024,
            max_routes: 4096,
            log_level: "info".to_string(),
            list_routes: false,
        }
    }
}
