//! Configuration constants.

/// Google Geocoding API endpoint.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Reverse lookups are constrained to street-address precision.
pub const GEOCODE_RESULT_TYPE: &str = "street_address";

/// Reverse lookups require rooftop-level location accuracy.
pub const GEOCODE_LOCATION_TYPE: &str = "ROOFTOP";

/// Coordinate used for the startup API-key probe (Porto Alegre, RS).
pub const KEY_PROBE_COORDINATE: (f64, f64) = (30.1084987, -51.3172284);

/// PostgreSQL port. The connection string is assembled from the POSTGRES_*
/// environment variables; the port is fixed.
pub const POSTGRES_PORT: u16 = 5432;

/// Connection pool cap. Writes are sequential, so a small pool suffices.
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Default per-request timeout for geocoding lookups, seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "transform.log";

/// Default CSV header name for the latitude column.
pub const LATITUDE_COLUMN: &str = "latitude";

/// Default CSV header name for the longitude column.
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Default CSV header name for the optional distance column.
pub const DISTANCE_COLUMN: &str = "distance_km";

/// Default CSV header name for the optional bearing column.
pub const BEARING_COLUMN: &str = "bearing_degrees";
