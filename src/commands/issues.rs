use colored::Colorize;
use tabled::Tabled;

use crate::cli::{IssueListArgs, IssueViewArgs};
use crate::client::YouTrackClient;
use crate::credentials::Credentials;
use crate::error::{Result, YouTrackError};
use crate::fields::FieldSpec;
use crate::output::{self, format_timestamp, truncate};
use crate::types::{Issue, IssueId};

const ISSUES_PATH: &str = "issues";

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Reporter")]
    reporter: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            title: truncate(&issue.title, 50),
            tags: issue.tags.join(", "),
            reporter: issue
                .reporter
                .as_ref()
                .and_then(|u| u.full_name.clone())
                .unwrap_or_default(),
            created: issue.created.map(format_timestamp).unwrap_or_default(),
        }
    }
}

/// Fetch a single issue with the requested fields.
pub async fn fetch_issue(
    client: &YouTrackClient,
    issue_id: &IssueId,
    credentials: &Credentials,
    fields: &FieldSpec,
) -> Result<Issue> {
    let path = format!("{ISSUES_PATH}/{issue_id}");
    client
        .get_json(&path, &[("fields", fields.to_string())], credentials)
        .await
}

/// Run `tag: <tag>` and return at most `limit` issues (a single page).
pub async fn list_issues_by_tag(
    client: &YouTrackClient,
    tag: &str,
    credentials: &Credentials,
    fields: &FieldSpec,
    limit: u32,
) -> Result<Vec<Issue>> {
    let query = [
        ("query", tag_query(tag)?),
        ("fields", fields.to_string()),
        ("$top", limit.to_string()),
    ];
    client.get_json(ISSUES_PATH, &query, credentials).await
}

/// Tag names containing spaces or commas are wrapped in `{}`. Braces have
/// no escape in the query language, so they are rejected.
fn tag_query(tag: &str) -> Result<String> {
    let tag = tag.trim();
    if tag.contains(['{', '}']) {
        return Err(YouTrackError::InvalidTag(tag.to_string()));
    }
    if tag.contains(|c: char| c.is_whitespace() || c == ',') {
        Ok(format!("tag: {{{tag}}}"))
    } else {
        Ok(format!("tag: {tag}"))
    }
}

pub async fn list(
    client: &YouTrackClient,
    credentials: &Credentials,
    args: IssueListArgs,
) -> Result<()> {
    let issues = list_issues_by_tag(
        client,
        &args.tag,
        credentials,
        &FieldSpec::for_listing(),
        args.limit,
    )
    .await?;

    if issues.is_empty() && !output::is_json_output() {
        output::print_message(&format!("No issues found with tag '{}'.", args.tag));
        return Ok(());
    }

    output::print_table(&issues, |issue| IssueRow::from(issue));

    Ok(())
}

pub async fn view(
    client: &YouTrackClient,
    credentials: &Credentials,
    args: IssueViewArgs,
) -> Result<()> {
    let id: IssueId = args.id.parse()?;
    let mut fields = FieldSpec::for_issue();
    if args.tags {
        fields = fields.with_tags();
    }

    let issue = fetch_issue(client, &id, credentials, &fields).await?;

    output::print_item(&issue, |issue| print_issue(client, issue, args.tags));

    Ok(())
}

/// Human-readable issue block shared by `view`, `download` and `fetch`.
pub fn print_issue(client: &YouTrackClient, issue: &Issue, show_tags: bool) {
    println!("{} {}", issue.id.bold(), issue.title);
    println!();

    if !issue.description.is_empty() {
        println!("{}", issue.description);
        println!();
    }

    if show_tags {
        let tags = if issue.tags.is_empty() {
            "-".to_string()
        } else {
            issue.tags.join(", ")
        };
        println!("Tags: {tags}");
        println!();
    }

    if issue.attachments.is_empty() {
        println!("No attachments found.");
        return;
    }

    println!("Attachments found:");
    for attachment in &issue.attachments {
        let url = client
            .resolve_url(&attachment.url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| attachment.url.clone());
        println!(
            "- {} ({}) {}",
            attachment.name,
            attachment.mime_type,
            url.bright_black()
        );
    }
}
