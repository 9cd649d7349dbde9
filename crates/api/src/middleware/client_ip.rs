use axum::http::HeaderMap;

/// Bucket shared by every request that carries no proxy headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Requester identity for rate limiting.
///
/// Takes the first `x-forwarded-for` entry, then `x-real-ip`, then falls back
/// to [`UNKNOWN_CLIENT`]. The headers are trusted as sent, so a deployment must
/// sit behind a proxy that overwrites them.
pub fn client_identity(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| UNKNOWN_CLIENT.to_string(), str::to_string)
}
