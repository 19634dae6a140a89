//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.0 que entiende el servidor:
//!
//! - Lectura de sockets con timeout (`wire`)
//! - Parsing incremental de requests (`parser`)
//! - Escritura de responses y cierre de la conexión (`response`)
//! - Códigos de estado (`status`)
//!
//! ### Formato de Request
//!
//! ```text
//! POST /messages HTTP/1.0\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! Solo `Content-Length` tiene significado; el resto de headers se parsea
//! y se guarda, pero el servidor no los usa.
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200\r\n
//! \r\n
//! <body>
//! ```

pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod wire;

pub use parser::{ParseError, ParseLimits};
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
