//! # Respuestas HTTP/1.0
//! src/http/response.rs
//!
//! El formato de respuesta es deliberadamente mínimo:
//!
//! ```text
//! HTTP/1.0 200\r\n
//! \r\n
//! <body>
//! ```
//!
//! No se emite ningún header (ni `Content-Length` ni `Content-Type`): el
//! cliente sabe que terminó el body porque el servidor cierra la conexión.
//! `Request::respond` es el único lugar donde se cierra un socket de cliente.

use super::request::Request;
use super::StatusCode;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Respuesta HTTP/1.0: status y body opcional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin body
    ///
    /// # Ejemplo
    /// ```
    /// use socks_http::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::NotFound);
    /// assert_eq!(response.to_bytes(), b"HTTP/1.0 404\r\n\r\n");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Establece el body desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el body desde bytes (archivos binarios, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Serializa status line, línea vacía y body en un solo buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let status_line = format!("HTTP/1.0 {}\r\n\r\n", self.status.as_u16());

        let mut result = Vec::with_capacity(status_line.len() + self.body.len());
        result.extend_from_slice(status_line.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Escribe la respuesta completa en `writer`.
    ///
    /// `write_all` reintenta escrituras parciales; solo falla con un error
    /// real de I/O.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Request {
    /// Responde al cliente y cierra la conexión.
    ///
    /// Marca el request como atendido aunque la escritura falle. Un segundo
    /// `respond` sobre el mismo request no hace nada.
    pub fn respond(&mut self, status: StatusCode, body: impl Into<Vec<u8>>) {
        self.send(Response::new(status).with_body_bytes(body.into()));
    }

    /// Igual que `respond`, a partir de una `Response` ya construida
    pub fn send(&mut self, response: Response) {
        let Some(mut conn) = self.conn.take() else {
            warn!(
                path = %self.path(),
                status = %response.status(),
                "request already answered, dropping extra response"
            );
            return;
        };
        self.handled = true;

        if let Err(e) = response.write_to(&mut conn) {
            warn!(client = %self.client_addr(), error = %e, "failed to write response");
        }

        debug!(
            client = %self.client_addr(),
            bytes = response.body().len(),
            "responded with {}",
            response.status()
        );

        // Cerrar el socket: el protocolo es un request por conexión
        drop(conn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{TcpListener, TcpStream};

    fn request_pair() -> (Request, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server, _) = listener.accept().unwrap();
        (Request::new(server, "127.0.0.1"), client)
    }

    #[test]
    fn test_to_bytes_without_body() {
        let bytes = Response::new(StatusCode::Ok).to_bytes();
        assert_eq!(bytes, b"HTTP/1.0 200\r\n\r\n");
    }

    #[test]
    fn test_to_bytes_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("<p>hola</p>");
        assert_eq!(response.to_bytes(), b"HTTP/1.0 200\r\n\r\n<p>hola</p>");
    }

    #[test]
    fn test_binary_body_is_sent_verbatim() {
        let binary = vec![0x00, 0x0D, 0x0A, 0xFF];
        let response = Response::new(StatusCode::Ok).with_body_bytes(binary.clone());

        let bytes = response.to_bytes();
        assert!(bytes.ends_with(&binary));
        assert_eq!(response.body(), &binary[..]);
    }

    #[test]
    fn test_no_headers_are_emitted() {
        let bytes = Response::new(StatusCode::Ok).with_body("x").to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("Content-Length"));
        assert!(!text.contains("Content-Type"));
    }

    #[test]
    fn test_respond_writes_and_closes() {
        let (mut request, mut client) = request_pair();

        request.respond(StatusCode::Ok, "hello");
        assert!(request.is_handled());

        // read_to_end solo termina si el servidor cerró el socket
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"HTTP/1.0 200\r\n\r\nhello");
    }

    #[test]
    fn test_second_respond_is_ignored() {
        let (mut request, mut client) = request_pair();

        request.respond(StatusCode::InternalServerError, "");
        request.respond(StatusCode::Ok, "late");

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"HTTP/1.0 500\r\n\r\n");
    }

    #[test]
    fn test_respond_to_vanished_client_still_marks_handled() {
        let (mut request, client) = request_pair();
        drop(client);

        request.respond(StatusCode::Ok, vec![b'x'; 64]);
        assert!(request.is_handled());
    }
}
