//! Builder for the `fields` query parameter sent with issue requests.

use std::fmt;

use const_format::concatcp;

const BASE_FIELDS: &str = "idReadable,summary,description";
const TAG_FIELDS: &str = "name";
const REPORTER_FIELDS: &str = "fullName";
const ATTACHMENT_FIELDS: &str = "name,url,mimeType";

const TAGS: &str = concatcp!("tags(", TAG_FIELDS, ")");
const CREATED: &str = "created";
const REPORTER: &str = concatcp!("reporter(", REPORTER_FIELDS, ")");
const ATTACHMENTS: &str = concatcp!("attachments(", ATTACHMENT_FIELDS, ")");

/// Which optional issue fields to request. The id, summary and description
/// are always included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpec {
    tags: bool,
    created: bool,
    reporter: bool,
    attachments: bool,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields used when viewing or downloading a single issue.
    pub fn for_issue() -> Self {
        Self::new().with_attachments()
    }

    /// Fields used by the tag listing.
    pub fn for_listing() -> Self {
        Self::new().with_tags().with_created().with_reporter()
    }

    pub fn with_tags(mut self) -> Self {
        self.tags = true;
        self
    }

    pub fn with_created(mut self) -> Self {
        self.created = true;
        self
    }

    pub fn with_reporter(mut self) -> Self {
        self.reporter = true;
        self
    }

    pub fn with_attachments(mut self) -> Self {
        self.attachments = true;
        self
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(BASE_FIELDS)?;
        let optional = [
            (self.tags, TAGS),
            (self.created, CREATED),
            (self.reporter, REPORTER),
            (self.attachments, ATTACHMENTS),
        ];
        for (_, selector) in optional.iter().filter(|(enabled, _)| *enabled) {
            write!(f, ",{selector}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_field_list() {
        assert_eq!(
            FieldSpec::new().to_string(),
            "idReadable,summary,description"
        );
    }

    #[test]
    fn test_issue_spec_requests_attachment_selectors() {
        assert_eq!(
            FieldSpec::for_issue().to_string(),
            "idReadable,summary,description,attachments(name,url,mimeType)"
        );
    }

    #[test]
    fn test_listing_spec_matches_tag_query_fields() {
        assert_eq!(
            FieldSpec::for_listing().to_string(),
            "idReadable,summary,description,tags(name),created,reporter(fullName)"
        );
    }

    #[test]
    fn test_order_is_fixed_regardless_of_builder_order() {
        let a = FieldSpec::new().with_attachments().with_tags();
        let b = FieldSpec::new().with_tags().with_attachments();
        assert_eq!(a.to_string(), b.to_string());
    }
}
