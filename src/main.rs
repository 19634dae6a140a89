//! # Servidor HTTP/1.0 - Entry Point
//! src/main.rs
//!
//! Lee la configuración, arma la tabla de rutas y atiende conexiones
//! hasta que ocurra un error fatal.

use socks_http::app;
use socks_http::commands::MessageBoard;
use socks_http::config::Config;
use socks_http::error::ServerError;
use socks_http::logging;
use socks_http::router::RouteInfo;
use socks_http::server::Server;
use tracing::error;

fn main() {
    let config = Config::new();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), ServerError> {
    config.log_summary();

    let router = app::build_router(&config)?;

    if config.list_routes {
        let routes: Vec<RouteInfo> = router.routes().iter().map(|r| r.info()).collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    let mut server = Server::bind(&config, router, MessageBoard::new())?;
    server.run()
}
