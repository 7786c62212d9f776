//! JSON payloads kept in cookies

use calculator_http::cookies::CookieStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read and decode a cookie; corrupt payloads count as absent
pub(crate) fn load<C, T>(cookies: &C, name: &str) -> Option<T>
where
	C: CookieStore + ?Sized,
	T: DeserializeOwned,
{
	let payload = cookies.get(name)?;
	if payload.is_empty() {
		return None;
	}
	match serde_json::from_str(payload) {
		Ok(decoded) => Some(decoded),
		Err(e) => {
			tracing::warn!(cookie = %name, error = %e, "Ignoring corrupted cookie payload");
			None
		}
	}
}

/// Bytes of `name=payload` once `data` is encoded into a header
pub(crate) fn cookie_size<C, T>(cookies: &C, name: &str, data: &T) -> Option<usize>
where
	C: CookieStore + ?Sized,
	T: Serialize + ?Sized,
{
	let payload = serde_json::to_string(data).ok()?;
	Some(name.len() + 1 + cookies.encoded_len(&payload))
}

/// Encode and store a cookie
pub(crate) fn save<C, T>(cookies: &mut C, name: &str, data: &T, ttl: Option<Duration>)
where
	C: CookieStore + ?Sized,
	T: Serialize + ?Sized,
{
	match serde_json::to_string(data) {
		Ok(payload) => cookies.set(name, payload, ttl),
		Err(e) => {
			tracing::warn!(cookie = %name, error = %e, "Cannot encode cookie payload, keeping previous one");
		}
	}
}
