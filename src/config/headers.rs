//! HTTP header name constants.

/// Headers a browser client may send with a cross-origin analysis request.
pub const CORS_ALLOWED_HEADERS: [&str; 4] =
    ["authorization", "x-client-info", "apikey", "content-type"];
