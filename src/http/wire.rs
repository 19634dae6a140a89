//! # Lector de Sockets con Timeout
//! src/http/wire.rs
//!
//! El servidor es de un solo hilo, así que nunca puede quedarse bloqueado
//! en un socket. Antes de cada `read` se espera con un timeout corto; si no
//! llega nada se retorna lo acumulado hasta ahora (posiblemente 0 bytes).

use crate::poller;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::time::Duration;

/// Lee hasta `buf.len()` bytes de `stream`.
///
/// Retorna antes de llenar el buffer cuando pasan `timeout` sin datos.
///
/// # Errores
///
/// - Falla de `poll(2)` o del `read`
/// - `UnexpectedEof` si el descriptor estaba listo pero el `read` leyó 0
///   bytes (el cliente cerró la conexión)
pub fn read_bounded<S>(stream: &mut S, buf: &mut [u8], timeout: Duration) -> io::Result<usize>
where
    S: Read + AsRawFd,
{
    let mut total = 0;

    while total < buf.len() {
        if !poller::wait_readable(stream.as_raw_fd(), timeout)? {
            return Ok(total);
        }

        match stream.read(&mut buf[total..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed by peer",
                ));
            }
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(total)
}
