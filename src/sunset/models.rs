use serde::Deserialize;

// ---------------------------------------------------------------------------
// GET /json?lat=..&lng=..
// ---------------------------------------------------------------------------

/// Only the part of the response we read; the API returns many more fields.
#[derive(Debug, Deserialize)]
pub struct SunsetResponse {
    pub results: SunsetResults,
}

#[derive(Debug, Deserialize)]
pub struct SunsetResults {
    /// Local time of sunset, e.g. `"6:01:58 PM"` or `"18:01:58"`.
    pub sunset: String,
}
