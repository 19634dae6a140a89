//! # Matching de URLs con Comodín
//! src/router/matcher.rs
//!
//! Sintaxis de templates:
//!
//! - Caracteres literales: deben coincidir exactamente (distingue mayúsculas)
//! - `*`: consume cualquier cantidad de caracteres hasta el siguiente `/`
//!
//! ```text
//! url_matches("/*", "/anything")          → true
//! url_matches("/*", "/anything/more")     → false
//! url_matches("/*/", "/anything/")        → true
//! url_matches("/hello/*", "/hello/world") → true
//! ```
//!
//! No se normalizan barras finales: `/docs/` solo hace match con paths que
//! terminan en `/`.

/// Marcador de comodín de un segmento
pub const WILDCARD: u8 = b'*';

const SEPARATOR: u8 = b'/';

/// Verifica si `url` satisface `template`
pub fn url_matches(template: &str, url: &str) -> bool {
    if template == url {
        return true;
    }

    let template = template.as_bytes();
    let url = url.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < template.len() && j < url.len() {
        if template[i] == url[j] {
            i += 1;
            j += 1;
        } else if template[i] == WILDCARD {
            i += 1;
            while j < url.len() && url[j] != SEPARATOR {
                j += 1;
            }
        } else {
            break;
        }
    }

    let current = template.get(i);
    current == url.get(j) || current == Some(&WILDCARD)
}
