//! # Sistema de Routing
//! src/router/mod.rs
//!
//! El router guarda una tabla ordenada de rutas `(verbo, template, handler)`
//! y entrega la primera que acepta el request.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::find → Route → handler(&mut Request, &mut S) → respond
//! ```
//!
//! `S` es el estado de la aplicación, que pertenece al `Server` y se presta
//! a cada handler. Un handler debe responder exactamente una vez; si no
//! responde, el servidor contesta 404.

pub mod matcher;
pub mod static_routes;

use crate::buffer::{CapacityError, Growable};
use crate::http::{Method, Request};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub use matcher::url_matches;

/// Un handler recibe el request y el estado de la aplicación
pub type Handler<S> = Box<dyn Fn(&mut Request, &mut S)>;

/// Una entrada de la tabla de rutas
pub struct Route<S> {
    /// Template de la URL, puede tener `*`
    url: String,

    /// Archivo asociado (solo rutas estáticas)
    fs_path: Option<PathBuf>,

    verb: Method,

    handler: Handler<S>,
}

/// Vista serializable de una ruta, para `--list-routes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub verb: &'static str,
    pub url: String,
    pub path: Option<String>,
}

impl<S> Route<S> {
    pub fn new<F>(verb: Method, url: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut S) + 'static,
    {
        Self {
            url: url.into(),
            fs_path: None,
            verb,
            handler: Box::new(handler),
        }
    }

    /// Asocia un archivo en disco a la ruta
    pub fn with_fs_path(mut self, fs_path: impl Into<PathBuf>) -> Self {
        self.fs_path = Some(fs_path.into());
        self
    }

    pub fn verb(&self) -> Method {
        self.verb
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fs_path(&self) -> Option<&Path> {
        self.fs_path.as_deref()
    }

    /// Verbo exacto + template con comodines
    pub fn matches(&self, verb: &str, path: &str) -> bool {
        self.verb.as_str() == verb && url_matches(&self.url, path)
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            verb: self.verb.as_str(),
            url: self.url.clone(),
            path: self.fs_path.as_ref().map(|p| p.display().to_string()),
        }
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("verb", &self.verb)
            .field("url", &self.url)
            .field("fs_path", &self.fs_path)
            .finish_non_exhaustive()
    }
}

/// Tabla de rutas, first-match-wins en orden de registro
pub struct Router<S> {
    routes: Growable<Route<S>>,
}

impl<S> Router<S> {
    /// Crea un router vacío sin límite práctico de rutas
    pub fn new() -> Self {
        Self {
            routes: Growable::new(),
        }
    }

    /// Crea un router que acepta como máximo `max_routes` rutas
    pub fn with_limit(max_routes: usize) -> Self {
        Self {
            routes: Growable::with_limit(max_routes),
        }
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use socks_http::http::{Method, Request, StatusCode};
    /// use socks_http::router::Router;
    ///
    /// fn hello(req: &mut Request, _state: &mut ()) {
    ///     req.respond(StatusCode::Ok, "hello");
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "/hello", hello).unwrap();
    /// assert!(router.find("GET", "/hello").is_some());
    /// ```
    pub fn register<F>(&mut self, verb: Method, url: &str, handler: F) -> Result<(), CapacityError>
    where
        F: Fn(&mut Request, &mut S) + 'static,
    {
        self.add(Route::new(verb, url, handler))
    }

    pub fn add(&mut self, route: Route<S>) -> Result<(), CapacityError> {
        self.routes.push(route)
    }

    /// Agrega varias rutas conservando su orden
    pub fn extend<I>(&mut self, routes: I) -> Result<(), CapacityError>
    where
        I: IntoIterator<Item = Route<S>>,
    {
        for route in routes {
            self.add(route)?;
        }
        Ok(())
    }

    /// Primera ruta registrada que acepta `verb` y `path`
    pub fn find(&self, verb: &str, path: &str) -> Option<&Route<S>> {
        self.routes.iter().find(|route| route.matches(verb, path))
    }

    /// Busca la ruta del request y ejecuta su handler.
    ///
    /// Retorna `false` si ninguna ruta hizo match.
    pub fn dispatch(&self, req: &mut Request, state: &mut S) -> bool {
        let Some(route) = self.find(req.method(), req.path()) else {
            return false;
        };

        req.set_fs_path(route.fs_path.clone());
        (route.handler)(req, state);
        true
    }

    pub fn routes(&self) -> &[Route<S>] {
        self.routes.as_slice()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use std::io::Read;
    use std::net::{TcpListener, TcpStream};

    type Log = Vec<&'static str>;

    fn noop(_req: &mut Request, _log: &mut Log) {}

    fn request_for(method: &str, path: &str) -> (Request, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server, _) = listener.accept().unwrap();

        let mut request = Request::new(server, "127.0.0.1");
        request.set_request_line(method, path);
        (request, client)
    }

    #[test]
    fn test_router_creation() {
        let router: Router<Log> = Router::new();
        assert!(router.is_empty());
    }

    #[test]
    fn test_register_route() {
        let mut router: Router<Log> = Router::new();
        router.register(Method::GET, "/test", noop).unwrap();

        assert_eq!(router.len(), 1);
        assert_eq!(router.routes()[0].url(), "/test");
    }

    #[test]
    fn test_verb_must_match_exactly() {
        let mut router: Router<Log> = Router::new();
        router.register(Method::POST, "/messages", noop).unwrap();

        assert!(router.find("POST", "/messages").is_some());
        assert!(router.find("GET", "/messages").is_none());
        assert!(router.find("post", "/messages").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut router: Router<Log> = Router::new();
        router.register(Method::GET, "/*", noop).unwrap();
        router.add(Route::new(Method::GET, "/hello", noop).with_fs_path("/srv/hello")).unwrap();

        let route = router.find("GET", "/hello").unwrap();
        assert_eq!(route.url(), "/*");
        assert!(route.fs_path().is_none());
    }

    #[test]
    fn test_no_match() {
        let mut router: Router<Log> = Router::new();
        router.register(Method::GET, "/hello/*", noop).unwrap();

        assert!(router.find("GET", "/goodbye/world").is_none());
        assert!(router.find("GET", "/hello/world/again").is_none());
    }

    #[test]
    fn test_route_limit() {
        let mut router: Router<Log> = Router::with_limit(1);
        router.register(Method::GET, "/a", noop).unwrap();

        let result = router.register(Method::GET, "/b", noop);
        assert_eq!(result, Err(CapacityError::LimitReached { limit: 1 }));
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut router: Router<Log> = Router::new();
        router
            .extend(vec![
                Route::new(Method::GET, "/one", noop),
                Route::new(Method::GET, "/two", noop),
            ])
            .unwrap();

        let urls: Vec<&str> = router.routes().iter().map(Route::url).collect();
        assert_eq!(urls, vec!["/one", "/two"]);
    }

    #[test]
    fn test_route_info() {
        let route: Route<Log> = Route::new(Method::GET, "/", noop).with_fs_path("www/index.html");

        assert_eq!(
            route.info(),
            RouteInfo {
                verb: "GET",
                url: "/".to_string(),
                path: Some("www/index.html".to_string()),
            }
        );
    }

    #[test]
    fn test_dispatch_runs_handler_with_state() {
        let mut router: Router<Log> = Router::new();
        router
            .register(Method::GET, "/hello/*", |req: &mut Request, log: &mut Log| {
                log.push("hello");
                req.respond(StatusCode::Ok, "hi");
            })
            .unwrap();

        let (mut request, mut client) = request_for("GET", "/hello/world");
        let mut log = Log::new();

        assert!(router.dispatch(&mut request, &mut log));
        assert!(request.is_handled());
        assert_eq!(log, vec!["hello"]);

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"HTTP/1.0 200\r\n\r\nhi");
    }

    #[test]
    fn test_dispatch_sets_fs_path() {
        let mut router: Router<Option<PathBuf>> = Router::new();
        router
            .add(
                Route::new(Method::GET, "/", |req: &mut Request, seen: &mut Option<PathBuf>| {
                    *seen = req.fs_path().map(Path::to_path_buf);
                })
                .with_fs_path("www/index.html"),
            )
            .unwrap();

        let (mut request, _client) = request_for("GET", "/");
        let mut seen = None;

        assert!(router.dispatch(&mut request, &mut seen));
        assert_eq!(seen, Some(PathBuf::from("www/index.html")));
        // El handler no respondió: eso lo resuelve el servidor con un 404
        assert!(!request.is_handled());
    }

    #[test]
    fn test_dispatch_without_match() {
        let router: Router<Log> = Router::new();
        let (mut request, _client) = request_for("GET", "/nothing");

        assert!(!router.dispatch(&mut request, &mut Log::new()));
        assert!(!request.is_handled());
    }
}
