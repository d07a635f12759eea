mod attachment;
mod issue;
mod issue_id;
mod user;

pub use attachment::Attachment;
pub use issue::Issue;
pub use issue_id::IssueId;
pub use user::User;
