//! # Espera de Disponibilidad
//! src/poller.rs
//!
//! Envoltorio mínimo sobre `poll(2)`. Es la única primitiva de espera del
//! servidor: el multiplexor espera sin timeout sobre todos los descriptores
//! y el lector de sockets espera con un timeout corto sobre uno solo.
//!
//! La cantidad de descriptores la acota `Config::max_connections`.

use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

/// Cualquier evento cuenta como "listo": datos, EOF o error.
/// Un read posterior se encarga de distinguirlos.
const READ_EVENTS: libc::c_short = libc::POLLIN;

/// Timeout en milisegundos, redondeado hacia arriba. `None` espera sin límite.
fn timeout_millis(timeout: Option<Duration>) -> libc::c_int {
    match timeout {
        None => -1,
        Some(d) => {
            let millis = d.as_micros().div_ceil(1000);
            millis.min(libc::c_int::MAX as u128) as libc::c_int
        }
    }
}

fn poll(fds: &mut [libc::pollfd], timeout: Option<Duration>) -> io::Result<usize> {
    let timeout = timeout_millis(timeout);

    loop {
        // SAFETY: `fds` es un slice válido de `pollfd` durante toda la llamada
        let ready = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout) };

        if ready >= 0 {
            return Ok(ready as usize);
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Espera hasta `timeout` a que `fd` tenga algo que leer.
///
/// Retorna `Ok(false)` si venció el timeout sin actividad.
pub fn wait_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    let mut fds = [libc::pollfd {
        fd,
        events: READ_EVENTS,
        revents: 0,
    }];

    Ok(poll(&mut fds, Some(timeout))? > 0)
}

/// Espera a que al menos uno de `fds` esté listo.
///
/// Retorna los descriptores listos en orden ascendente. Con `timeout = None`
/// bloquea indefinidamente.
pub fn wait_any(fds: &[RawFd], timeout: Option<Duration>) -> io::Result<Vec<RawFd>> {
    let mut pollfds: Vec<libc::pollfd> = fds
        .iter()
        .map(|&fd| libc::pollfd {
            fd,
            events: READ_EVENTS,
            revents: 0,
        })
        .collect();

    if poll(&mut pollfds, timeout)? == 0 {
        return Ok(Vec::new());
    }

    let mut ready: Vec<RawFd> = pollfds
        .iter()
        .filter(|p| p.revents != 0)
        .map(|p| p.fd)
        .collect();
    ready.sort_unstable();

    Ok(ready)
}
