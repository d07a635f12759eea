pub mod attachments;
pub mod init;
pub mod issues;
