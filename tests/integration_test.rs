//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto libre, con un `www`
//! temporal, en un hilo aparte. Los clientes no cierran su lado de
//! escritura: el servidor trata un EOF antes del request como error.

use socks_http::app;
use socks_http::commands::MessageBoard;
use socks_http::config::Config;
use socks_http::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// `www` de prueba: index.html en la raíz y una hoja de estilos
fn www_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>Bienvenido</h1>").unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css").join("app.css"), "body { color: red; }").unwrap();
    dir
}

/// Levanta un servidor sobre `www` y retorna su dirección
fn spawn_server(www: &TempDir) -> SocketAddr {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        www_dir: www.path().display().to_string(),
        read_timeout_ms: 100,
        ..Config::default()
    };
    let (tx, rx) = mpsc::channel();

    // El router guarda closures que no son Send: se arma dentro del hilo
    thread::spawn(move || {
        let router = app::build_router(&config).unwrap();
        let mut server = Server::bind(&config, router, MessageBoard::new()).unwrap();
        tx.send(server.local_addr().unwrap()).unwrap();
        server.run().unwrap();
    });

    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

/// Envía `raw` en una sola escritura y lee hasta que el servidor cierre
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn get(addr: SocketAddr, path: &str) -> String {
    send_raw(addr, format!("GET {} HTTP/1.0\r\n\r\n", path).as_bytes())
}

fn post(addr: SocketAddr, path: &str, body: &str) -> String {
    let request = format!(
        "POST {} HTTP/1.0\r\nContent-Length: {}\r\n\r\n{}",
        path,
        body.len(),
        body
    );
    send_raw(addr, request.as_bytes())
}

#[test]
fn test_empty_message_board() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(get(addr, "/messages"), "HTTP/1.0 200\r\n\r\n");
}

#[test]
fn test_post_then_get_messages() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(post(addr, "/messages", "hola"), "HTTP/1.0 200\r\n\r\n");
    assert_eq!(post(addr, "/messages", "chao"), "HTTP/1.0 200\r\n\r\n");

    assert_eq!(
        get(addr, "/messages"),
        "HTTP/1.0 200\r\n\r\n<p>NAME</p><div>hola</div><p>NAME</p><div>chao</div>"
    );
}

#[test]
fn test_static_files() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(get(addr, "/"), "HTTP/1.0 200\r\n\r\n<h1>Bienvenido</h1>");
    assert_eq!(get(addr, "/index.html"), "HTTP/1.0 200\r\n\r\n<h1>Bienvenido</h1>");
    assert_eq!(
        get(addr, "/css/app.css"),
        "HTTP/1.0 200\r\n\r\nbody { color: red; }"
    );
}

#[test]
fn test_unknown_path_is_404() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(get(addr, "/nope.html"), "HTTP/1.0 404\r\n\r\n");
    assert_eq!(get(addr, "/css/"), "HTTP/1.0 404\r\n\r\n");
}

#[test]
fn test_static_routes_only_answer_get() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(post(addr, "/index.html", "x"), "HTTP/1.0 404\r\n\r\n");
}

#[test]
fn test_bad_request_then_server_keeps_serving() {
    let www = www_dir();
    let addr = spawn_server(&www);

    assert_eq!(send_raw(addr, b"GET \r\n\r\n"), "HTTP/1.0 400\r\n\r\n");
    assert_eq!(send_raw(addr, b"no line terminator"), "HTTP/1.0 400\r\n\r\n");

    assert_eq!(get(addr, "/messages"), "HTTP/1.0 200\r\n\r\n");
}

#[test]
fn test_body_split_across_writes() {
    let www = www_dir();
    let addr = spawn_server(&www);

    let body = "x".repeat(3000);
    let head = format!("POST /messages HTTP/1.0\r\nContent-Length: {}\r\n\r\n", body.len());

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(head.as_bytes()).unwrap();
    stream.write_all(&body.as_bytes()[..500]).unwrap();
    thread::sleep(Duration::from_millis(30));
    stream.write_all(&body.as_bytes()[500..]).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert_eq!(response, "HTTP/1.0 200\r\n\r\n");

    let expected = format!("HTTP/1.0 200\r\n\r\n<p>NAME</p><div>{}</div>", body);
    assert_eq!(get(addr, "/messages"), expected);
}

#[test]
fn test_truncated_body_is_400() {
    let www = www_dir();
    let addr = spawn_server(&www);

    let response = send_raw(
        addr,
        b"POST /messages HTTP/1.0\r\nContent-Length: 50\r\n\r\nshort",
    );
    assert_eq!(response, "HTTP/1.0 400\r\n\r\n");

    // Nada quedó guardado
    assert_eq!(get(addr, "/messages"), "HTTP/1.0 200\r\n\r\n");
}

#[test]
fn test_slow_client_does_not_block_others() {
    let www = www_dir();
    let addr = spawn_server(&www);

    // Conectado pero sin enviar nada: no está listo y no se atiende
    let _idle = TcpStream::connect(addr).unwrap();

    assert_eq!(get(addr, "/index.html"), "HTTP/1.0 200\r\n\r\n<h1>Bienvenido</h1>");
}
