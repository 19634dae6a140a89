//! # Requests HTTP/1.0
//! src/http/request.rs
//!
//! Un `Request` se crea por cada conexión aceptada. Primero lo llena el
//! parser, después el router le asigna la ruta en disco (si la hay) y al
//! final un único handler lo consume respondiendo con `Request::respond`.
//!
//! ## Ciclo de vida
//!
//! ```text
//! accept → Request::new → parser::parse_request → Router::find → handler → respond
//! ```

use std::net::TcpStream;
use std::path::{Path, PathBuf};

/// Máximo de bytes que se guardan del método
pub const MAX_METHOD_LEN: usize = 7;

/// Máximo de bytes que se guardan del path
pub const MAX_PATH_LEN: usize = 256;

/// Métodos definidos por HTTP/1.0
///
/// El request guarda el método como texto crudo; este enum solo se usa para
/// registrar rutas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Enviar datos a un recurso
    POST,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Un request HTTP/1.0 junto con la conexión que lo trajo
#[derive(Debug)]
pub struct Request {
    /// IP del cliente en formato texto
    client_addr: String,

    /// Método tal como llegó (ej: "GET")
    method: String,

    /// Path de la petición (ej: "/css/app.css")
    path: String,

    /// Archivo asociado por la ruta que hizo match
    fs_path: Option<PathBuf>,

    /// Headers en orden de llegada
    headers: Vec<(String, String)>,

    /// Body, solo si `Content-Length` era mayor que 0
    body: Option<Vec<u8>>,

    /// Conexión con el cliente; `None` una vez respondido
    pub(crate) conn: Option<TcpStream>,

    /// Se vuelve `true` cuando algún handler respondió
    pub(crate) handled: bool,
}

impl Request {
    /// Crea un request vacío para una conexión recién aceptada
    pub fn new(conn: TcpStream, client_addr: impl Into<String>) -> Self {
        Self {
            client_addr: client_addr.into(),
            method: String::new(),
            path: String::new(),
            fs_path: None,
            headers: Vec::new(),
            body: None,
            conn: Some(conn),
            handled: false,
        }
    }

    /// Copia un token limitándolo a `max` bytes sin partir un carácter
    pub(crate) fn bounded(token: &str, max: usize) -> String {
        if token.len() <= max {
            return token.to_string();
        }

        let mut end = max;
        while !token.is_char_boundary(end) {
            end -= 1;
        }
        token[..end].to_string()
    }

    pub(crate) fn set_request_line(&mut self, method: &str, path: &str) {
        self.method = Self::bounded(method, MAX_METHOD_LEN);
        self.path = Self::bounded(path, MAX_PATH_LEN);
    }

    pub(crate) fn set_headers(&mut self, headers: Vec<(String, String)>) {
        self.headers = headers;
    }

    pub(crate) fn set_body(&mut self, body: Option<Vec<u8>>) {
        self.body = body;
    }

    pub(crate) fn set_fs_path(&mut self, fs_path: Option<PathBuf>) {
        self.fs_path = fs_path;
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn client_addr(&self) -> &str {
        &self.client_addr
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Archivo en disco asignado por el router (rutas estáticas)
    pub fn fs_path(&self) -> Option<&Path> {
        self.fs_path.as_deref()
    }

    /// Obtiene un header específico (comparación exacta)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Indica si algún handler ya respondió
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}
