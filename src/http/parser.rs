//! # Parser Incremental de Requests
//! src/http/parser.rs
//!
//! Lee el request directamente del socket, en trozos, sin asumir que el
//! mensaje completo llega en un solo `read`.
//!
//! ## Algoritmo
//!
//! 1. Leer un primer trozo de 1 KiB; debe contener la request line completa
//! 2. Separar la request line en método y path
//! 3. Recorrer headers línea por línea, leyendo más si falta un `\r\n`
//! 4. Una línea vacía termina los headers
//! 5. Si hubo `Content-Length`, usar los bytes sobrantes y leer el resto

use super::request::Request;
use super::wire;
use crate::config::Config;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Tamaño de cada lectura del head
pub const CHUNK_SIZE: usize = 1024;

const CRLF: &[u8] = b"\r\n";

/// Errores de protocolo: todos terminan en un 400
#[derive(Debug, Error)]
pub enum ParseError {
    /// La conexión ya fue cerrada por un handler
    #[error("connection already closed")]
    ConnectionClosed,

    /// Falla de lectura en el socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    /// El primer trozo no contenía `\r\n`
    #[error("request line is not terminated by CRLF")]
    MissingRequestLine,

    #[error("request line has no method")]
    MissingMethod,

    #[error("request line has no path")]
    MissingPath,

    /// Se acabaron los datos antes de encontrar el fin de un header
    #[error("header block is not terminated")]
    MissingTerminator,

    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("request head is not valid UTF-8")]
    InvalidEncoding,

    #[error("body of {length} bytes exceeds the limit of {max}")]
    BodyTooLarge { length: usize, max: usize },

    /// El cliente dejó de enviar antes de completar el body
    #[error("incomplete body: expected {expected} bytes, got {received}")]
    IncompleteBody { expected: usize, received: usize },
}

/// Límites que aplica el parser a cada request
#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    /// Espera máxima por cada lectura sin datos
    pub read_timeout: Duration,

    /// Máximo de bytes para request line + headers
    pub max_head_bytes: usize,

    /// Máximo valor aceptado de `Content-Length`
    pub max_body_bytes: usize,
}

impl ParseLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            read_timeout: config.read_timeout(),
            max_head_bytes: config.max_head_bytes,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(10),
            max_head_bytes: 8 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Resultado del parseo, antes de copiarlo al `Request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Caracteres "en blanco" de `isspace` en la locale C
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Recorta blancos en ambos extremos.
///
/// Un string vacío o solo con blancos queda vacío; `None` sigue siendo `None`.
///
/// # Ejemplo
/// ```
/// use socks_http::http::parser::trim;
///
/// assert_eq!(trim(Some("  x  ")), Some("x"));
/// assert_eq!(trim(Some("   ")), Some(""));
/// assert_eq!(trim(None), None);
/// ```
pub fn trim(s: Option<&str>) -> Option<&str> {
    s.map(|s| s.trim_matches(is_blank))
}

/// Posición de la primera aparición de `needle` en `haystack`
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Prefijo decimal de `value` (como `atoi`, pero sin negativos).
///
/// Sin dígitos → 0. Un desbordamiento satura en `usize::MAX`.
pub fn parse_content_length(value: Option<&str>) -> usize {
    let Some(value) = trim(value) else {
        return 0;
    };
    let digits = value.strip_prefix('+').unwrap_or(value);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0usize, |acc, d| {
            acc.saturating_mul(10).saturating_add((d - b'0') as usize)
        })
}

/// Separa una línea en key y value por el primer ':'
fn split_header(line: &str) -> (Option<&str>, Option<&str>) {
    match line.find(':') {
        Some(colon) => (trim(Some(&line[..colon])), trim(Some(&line[colon + 1..]))),
        None => (trim(Some(line)), None),
    }
}

/// Agrega otro trozo al buffer del head
fn extend_head<S>(stream: &mut S, buf: &mut Vec<u8>, limits: &ParseLimits) -> Result<(), ParseError>
where
    S: Read + AsRawFd,
{
    if buf.len() >= limits.max_head_bytes {
        return Err(ParseError::HeadTooLarge(limits.max_head_bytes));
    }

    let start = buf.len();
    let room = CHUNK_SIZE.min(limits.max_head_bytes - start);
    buf.resize(start + room, 0);

    let n = wire::read_bounded(stream, &mut buf[start..], limits.read_timeout)?;
    buf.truncate(start + n);

    if n == 0 {
        return Err(ParseError::MissingTerminator);
    }
    Ok(())
}

/// Completa `body` hasta `expected` bytes
fn fill_body<S>(
    stream: &mut S,
    body: &mut Vec<u8>,
    expected: usize,
    limits: &ParseLimits,
) -> Result<(), ParseError>
where
    S: Read + AsRawFd,
{
    while body.len() < expected {
        let start = body.len();
        body.resize(expected, 0);

        let n = wire::read_bounded(stream, &mut body[start..], limits.read_timeout)?;
        body.truncate(start + n);

        if n == 0 {
            return Err(ParseError::IncompleteBody {
                expected,
                received: body.len(),
            });
        }
    }
    Ok(())
}

/// Parsea un request completo desde `stream`
pub fn parse<S>(stream: &mut S, limits: &ParseLimits) -> Result<RequestHead, ParseError>
where
    S: Read + AsRawFd,
{
    let mut buf = vec![0u8; CHUNK_SIZE.min(limits.max_head_bytes.max(1))];
    let n = wire::read_bounded(stream, &mut buf, limits.read_timeout)?;
    buf.truncate(n);

    // 1. Request line: debe venir completa en el primer trozo
    let line_end = find(&buf, CRLF).ok_or(ParseError::MissingRequestLine)?;
    let line = std::str::from_utf8(&buf[..line_end]).map_err(|_| ParseError::InvalidEncoding)?;

    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    let method = tokens.next().ok_or(ParseError::MissingMethod)?.to_string();
    let path = tokens.next().ok_or(ParseError::MissingPath)?.to_string();
    debug!("{} {}", method, path);

    // 2. Headers hasta la línea vacía
    let mut pos = line_end + CRLF.len();
    let mut headers = Vec::new();
    let mut content_length = 0;

    loop {
        let Some(len) = find(&buf[pos..], CRLF) else {
            extend_head(stream, &mut buf, limits)?;
            continue;
        };

        let raw = &buf[pos..pos + len];
        pos += len + CRLF.len();

        if raw.is_empty() {
            break;
        }

        let line = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidEncoding)?;
        let (key, value) = split_header(line);
        trace!(key = ?key, value = ?value, "header");

        if key == Some("Content-Length") {
            content_length = parse_content_length(value);
        }
        headers.push((
            key.unwrap_or_default().to_string(),
            value.unwrap_or_default().to_string(),
        ));
    }

    // 3. Body
    if content_length == 0 {
        return Ok(RequestHead {
            method,
            path,
            headers,
            body: None,
        });
    }

    if content_length > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge {
            length: content_length,
            max: limits.max_body_bytes,
        });
    }

    let leftover = &buf[pos..];
    let mut body = Vec::with_capacity(content_length);
    body.extend_from_slice(&leftover[..leftover.len().min(content_length)]);
    fill_body(stream, &mut body, content_length, limits)?;

    Ok(RequestHead {
        method,
        path,
        headers,
        body: Some(body),
    })
}

/// Lee de la conexión de `req` y llena sus campos
pub fn parse_request(req: &mut Request, limits: &ParseLimits) -> Result<(), ParseError> {
    let conn = req.conn.as_mut().ok_or(ParseError::ConnectionClosed)?;
    let head = parse(conn, limits)?;

    req.set_request_line(&head.method, &head.path);
    req.set_headers(head.headers);
    req.set_body(head.body);
    Ok(())
}
