use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix of Shopify global ids (`gid://shopify/Product/123`).
const GID_SCHEME: &str = "gid://";

/// Canonical identifier for products, orders and customers.
///
/// Webhook payloads carry ids as JSON numbers while configuration and the
/// GraphQL API use strings or global ids. Every form is normalized to the
/// bare id string so comparisons never depend on the wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Normalize an id given as a bare value or as a global id.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let bare = match trimmed.strip_prefix(GID_SCHEME) {
            Some(rest) => {
                let without_query = rest.split('?').next().unwrap_or(rest);
                without_query.rsplit('/').next().unwrap_or(without_query)
            }
            None => trimmed,
        };
        Self(bare.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for ResourceId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Self::from(n),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Text(s) => Self::new(s),
        })
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
