//! HTTP access for Forum-Scribe
//!
//! All network traffic of a run flows through one explicit [`Session`],
//! which owns the client and the accumulated session cookies.

mod session;

pub use session::{build_http_client, Session, XSRF_COOKIE, XSRF_HEADER};
