/// Default base URL of the device API
pub const DEFAULT_API_URL: &str = "https://dev-space.su/api/v1/a";

/// How long a banner stays visible
pub const DEFAULT_BANNER_MILLIS: u64 = 3000;

/// Fallback message when a failed mutation carries no server message
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Banner shown when the device list cannot be fetched
pub const DEVICE_LIST_LOAD_FAILED: &str = "Couldn't load the device list";

/// Banner shown when a single device cannot be fetched
pub const DEVICE_LOAD_FAILED: &str = "Couldn't load the device";

/// Longest amount the keypad accepts, in characters
pub const KEYPAD_MAX_LEN: usize = 12;

/// Shown in place of a device total that does not fit a `Decimal`
pub const TOTAL_OUT_OF_RANGE: &str = "out of range";
