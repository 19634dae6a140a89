//! # Rutas de Archivos Estáticos
//! src/router/static_routes.rs
//!
//! Recorre un directorio una sola vez al iniciar y genera una ruta `GET`
//! por cada archivo regular:
//!
//! ```text
//! www/index.html    → GET /index.html   y   GET /
//! www/css/app.css   → GET /css/app.css
//! www/docs/index.html → GET /docs/index.html   y   GET /docs/
//! ```
//!
//! Los symlinks y otros tipos de entrada se ignoran. El orden de las rutas
//! es el orden en que el sistema de archivos entrega las entradas.

use super::Route;
use crate::http::{Method, Request, StatusCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const INDEX_FILE: &str = "index.html";

/// Errores al recorrer el directorio raíz
#[derive(Debug, Error)]
pub enum StaticRouteError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot inspect entry in {path}: {source}")]
    Entry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Genera las rutas de todos los archivos bajo `root`
pub fn generate<S: 'static>(root: impl AsRef<Path>) -> Result<Vec<Route<S>>, StaticRouteError> {
    let root = root.as_ref();
    let mut routes = Vec::new();
    walk(root, root, &mut routes)?;
    Ok(routes)
}

fn walk<S: 'static>(
    root: &Path,
    dir: &Path,
    routes: &mut Vec<Route<S>>,
) -> Result<(), StaticRouteError> {
    let entries = fs::read_dir(dir).map_err(|source| StaticRouteError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| StaticRouteError::Entry {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| StaticRouteError::Entry {
            path: entry.path(),
            source,
        })?;
        let path = entry.path();

        if file_type.is_file() {
            let url = url_for(root, &path);
            debug!(url = %url, path = %path.display(), "static route");
            routes.push(Route::new(Method::GET, url, serve_file::<S>).with_fs_path(&path));

            if entry.file_name().to_str() == Some(INDEX_FILE) {
                let dir_url = format!("{}/", url_for(root, dir));
                debug!(url = %dir_url, path = %path.display(), "static index route");
                routes.push(Route::new(Method::GET, dir_url, serve_file::<S>).with_fs_path(&path));
            }
        } else if file_type.is_dir() {
            walk(root, &path, routes)?;
        }
    }

    Ok(())
}

/// URL de `path` relativa a `root`: `/css/app.css`. La raíz misma es "".
fn url_for(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    relative
        .components()
        .map(|c| format!("/{}", c.as_os_str().to_string_lossy()))
        .collect()
}

/// Handler de todas las rutas estáticas: responde con el archivo completo
pub fn serve_file<S>(req: &mut Request, _state: &mut S) {
    let Some(path) = req.fs_path().map(Path::to_path_buf) else {
        warn!(url = %req.path(), "static route without file path");
        req.respond(StatusCode::InternalServerError, "");
        return;
    };

    match fs::read(&path) {
        Ok(content) => req.respond(StatusCode::Ok, content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read static file");
            req.respond(StatusCode::InternalServerError, "");
        }
    }
}
