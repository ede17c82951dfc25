/// Environment variables checked for the Gemini key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Reads the Gemini API key from the process environment.
///
/// A missing key is not an error here: requests go out without one and fail
/// through the normal curation error path.
pub fn gemini_api_key() -> Option<String> {
    api_key_from(|name| std::env::var(name).ok())
}

/// First non-blank value among [`API_KEY_ENV_VARS`], using `lookup` to read
/// each variable.
pub fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
