//! # Servidor TCP Multiplexado
//! src/server/tcp.rs
//!
//! Un solo hilo atiende todas las conexiones. En cada vuelta:
//!
//! 1. `poll(2)` sin timeout sobre el socket de escucha y los clientes
//! 2. Se recorren los descriptores listos en orden ascendente
//! 3. Socket de escucha listo → `accept` de una conexión, se registra
//! 4. Cliente listo → parser → router → handler → respuesta → cierre
//!
//! Un cliente aceptado en una vuelta no se atiende hasta la siguiente.
//! Cada conexión lleva exactamente un request (no hay keep-alive).
//!
//! Ninguna operación sobre un cliente bloquea sin límite: las lecturas
//! esperan `read_timeout` y cada escritura `write_timeout`. Solo la espera
//! de `poll(2)` del multiplexor es indefinida.

use crate::config::Config;
use crate::error::ServerError;
use crate::http::parser::{self, ParseLimits};
use crate::http::{Request, StatusCode};
use crate::poller;
use crate::router::Router;
use std::collections::BTreeMap;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Conexión aceptada que espera su request
struct Client {
    stream: TcpStream,
    addr: String,
}

/// Servidor HTTP/1.0 de un solo hilo
///
/// `S` es el estado de la aplicación que se presta a cada handler.
pub struct Server<S> {
    listener: TcpListener,

    /// Clientes vigilados, ordenados por número de descriptor
    clients: BTreeMap<RawFd, Client>,

    router: Router<S>,
    state: S,
    limits: ParseLimits,
    write_timeout: Duration,
    max_connections: usize,
}

impl<S> Server<S> {
    /// Abre el socket de escucha en `config.address()`
    ///
    /// # Errores
    ///
    /// `ServerError::Bind` si no se puede crear, hacer bind o escuchar.
    pub fn bind(config: &Config, router: Router<S>, state: S) -> Result<Self, ServerError> {
        let address = config.address();
        let listener =
            TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self {
            listener,
            clients: BTreeMap::new(),
            router,
            state,
            limits: ParseLimits::from_config(config),
            write_timeout: config.write_timeout(),
            max_connections: config.max_connections,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Número de clientes aceptados que todavía no se atienden
    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }

    /// Atiende conexiones para siempre.
    ///
    /// Solo retorna si falla la espera de `poll(2)`.
    pub fn run(&mut self) -> Result<(), ServerError> {
        info!(
            address = %self.local_addr().map_err(ServerError::Poll)?,
            routes = self.router.len(),
            "server listening"
        );

        loop {
            self.poll_once()?;
        }
    }

    /// Una vuelta del multiplexor: espera y atiende cada descriptor listo.
    ///
    /// Retorna cuántos descriptores estaban listos.
    pub fn poll_once(&mut self) -> Result<usize, ServerError> {
        let listen_fd = self.listener.as_raw_fd();

        let mut fds = Vec::with_capacity(self.clients.len() + 1);
        fds.push(listen_fd);
        fds.extend(self.clients.keys().copied());

        debug!(clients = self.connection_count(), "waiting for a client");
        let ready = poller::wait_any(&fds, None).map_err(ServerError::Poll)?;

        for &fd in &ready {
            if fd == listen_fd {
                self.accept_one();
            } else {
                self.serve(fd);
            }
        }

        Ok(ready.len())
    }

    /// Acepta una conexión pendiente y la registra
    fn accept_one(&mut self) {
        let (stream, peer) = match self.listener.accept() {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "accept failed");
                return;
            }
        };
        let addr = peer.ip().to_string();

        // Cada escritura de la respuesta espera como máximo `write_timeout`
        if let Err(e) = stream.set_write_timeout(Some(self.write_timeout)) {
            warn!(client = %addr, error = %e, "cannot bound socket writes, dropping");
            return;
        }

        if self.clients.len() >= self.max_connections {
            warn!(
                client = %addr,
                max = self.max_connections,
                "connection limit reached, rejecting"
            );
            Request::new(stream, addr).respond(StatusCode::ServiceUnavailable, "");
            return;
        }

        let fd = stream.as_raw_fd();
        debug!(client = %addr, fd, "accepted connection");
        self.clients.insert(fd, Client { stream, addr });
    }

    /// Ciclo completo de un cliente: parser → router → respuesta
    fn serve(&mut self, fd: RawFd) {
        // La conexión se cierra siempre al responder: sale del conjunto ya
        let Some(client) = self.clients.remove(&fd) else {
            return;
        };
        let mut req = Request::new(client.stream, client.addr);

        if let Err(e) = parser::parse_request(&mut req, &self.limits) {
            warn!(client = %req.client_addr(), error = %e, "bad request");
            req.respond(StatusCode::BadRequest, "");
            return;
        }

        info!(client = %req.client_addr(), "{} {}", req.method(), req.path());

        let routed = self.router.dispatch(&mut req, &mut self.state);
        if !req.is_handled() {
            if routed {
                warn!(path = %req.path(), "handler finished without responding");
            }
            req.respond(StatusCode::NotFound, "");
        }
    }
}
