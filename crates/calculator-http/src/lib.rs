//! HTTP plumbing for the calculator skeleton
//!
//! - [`request`]: the explicit per-request context and form value extraction
//! - [`cookies`]: the cookie store contract and a header-backed jar

pub mod cookies;
pub mod request;

pub use cookies::{CookieError, CookieJar, CookieOptions, CookieStore};
pub use request::{RequestContext, RequestContextBuilder, RequestError};
