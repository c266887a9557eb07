//! User-Agent classification for analytics grouping

use woothee::parser::Parser;

/// Bucket used when the agent string is not recognised
pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentFamily {
    /// Operating system family, e.g. "Windows 10", "Mac OSX"
    pub os: String,
    /// Browser family, e.g. "Chrome", "Firefox"
    pub browser: String,
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Parse a User-Agent string using woothee
pub fn classify(user_agent: &str) -> UserAgentFamily {
    match Parser::new().parse(user_agent) {
        Some(result) => UserAgentFamily {
            os: or_unknown(result.os),
            browser: or_unknown(result.name),
        },
        None => UserAgentFamily {
            os: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
        },
    }
}
