/// Remote collection name for assets
pub const ASSETS_COLLECTION: &str = "assets";

/// Remote collection name for transactions
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// Remote collection name for goals
pub const GOALS_COLLECTION: &str = "goals";

/// Remote collection name for trips
pub const TRIPS_COLLECTION: &str = "trips";

/// Remote collection name for reminders
pub const REMINDERS_COLLECTION: &str = "reminders";

/// Remote collection holding the single settings document
pub const SETTINGS_COLLECTION: &str = "settings";

/// Document name of the settings record inside `SETTINGS_COLLECTION`
pub const SETTINGS_DOCUMENT: &str = "preferences";

/// Root of every per-user remote path
pub const USERS_ROOT: &str = "users";

/// Registrar recorded on holdings parsed from a CAMS statement
pub const CAS_REGISTRAR: &str = "CAMS";

/// Default lifetime of the cached mutual-fund NAV table, in seconds
pub const NAV_CACHE_TTL_SECS: u64 = 15 * 60;

/// Maximum number of results returned by a mutual-fund name search
pub const NAV_SEARCH_LIMIT: usize = 20;

/// Milliseconds in one day
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
