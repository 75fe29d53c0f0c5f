use chrono::Local;
use std::fmt;
use uuid::Uuid;

/// Identifier of one recording session
///
/// Local time to the minute (filesystem safe) followed by the low-order hex
/// digits of a UUIDv7, e.g. `2025-10-27_14-30_5f0c9e21`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let stamp = Local::now().format("%Y-%m-%d_%H-%M");
        let uuid = Uuid::now_v7().simple().to_string();
        let suffix = &uuid[uuid.len() - 8..];
        Self(format!("{stamp}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
