use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier attached to every dispatch span, backed by a ULID.
///
/// ULIDs sort by creation time, so log lines of consecutive dispatches stay
/// in order when grouped by id.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    /// Fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Reuse an id supplied by the host application, or mint one when it is
    /// absent or malformed.
    #[must_use]
    pub fn parse_or_new(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RequestId(ulid::Ulid::from_string(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parses_back() {
        let id = RequestId::new();
        let parsed: RequestId = id.to_string().parse().expect("valid ulid");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_or_new() {
        let id = RequestId::new();
        let text = id.to_string();
        assert_eq!(RequestId::parse_or_new(Some(&text)), id);
        assert_ne!(RequestId::parse_or_new(Some("not-a-ulid")), id);
        assert_eq!(RequestId::parse_or_new(None).to_string().len(), 26);
    }
}
