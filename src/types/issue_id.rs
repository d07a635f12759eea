use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::YouTrackError;

static READABLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)-(\d+)$").unwrap());
static DATABASE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-\d+$").unwrap());

/// Issue key accepted by `/api/issues/<id>`: either a readable key such as
/// `CEL-1234` or an entity id such as `2-15`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueId(String);

impl FromStr for IssueId {
    type Err = YouTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if DATABASE_ID.is_match(trimmed) {
            return Ok(Self(trimmed.to_string()));
        }

        READABLE_ID
            .captures(trimmed)
            .map(|cap| Self(format!("{}-{}", cap[1].to_uppercase(), &cap[2])))
            .ok_or_else(|| YouTrackError::InvalidIssueId(s.to_string()))
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_id_is_uppercased() {
        let id: IssueId = " cel-1234 ".parse().unwrap();
        assert_eq!(id.to_string(), "CEL-1234");
    }

    #[test]
    fn test_database_id_is_kept() {
        let id: IssueId = "2-15".parse().unwrap();
        assert_eq!(id.to_string(), "2-15");
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        for bad in ["", "CEL", "CEL-", "-12", "CEL-12/../x", "CEL 12"] {
            assert!(
                matches!(bad.parse::<IssueId>(), Err(YouTrackError::InvalidIssueId(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
