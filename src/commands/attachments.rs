use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use reqwest::Response;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{DownloadArgs, FetchArgs};
use crate::client::YouTrackClient;
use crate::commands::issues::{fetch_issue, print_issue};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::fields::FieldSpec;
use crate::output::{self, truncate};
use crate::types::{Attachment, Issue, IssueId};

/// Write buffer size used while streaming an attachment to disk.
const CHUNK_SIZE: usize = 8192;

#[derive(Tabled)]
struct AttachmentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    mime_type: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl AttachmentRow {
    fn new(client: &YouTrackClient, attachment: &Attachment) -> Self {
        let url = client
            .resolve_url(&attachment.url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| attachment.url.clone());
        Self {
            name: truncate(&attachment.name, 40),
            mime_type: attachment.mime_type.clone(),
            url: truncate(&url, 60),
        }
    }
}

/// Stream one attachment into `output_dir`, replacing any file of the same name.
///
/// The directory is created if missing. Nothing is written unless the server
/// answers `200 OK`.
pub async fn download_attachment(
    client: &YouTrackClient,
    attachment: &Attachment,
    credentials: &Credentials,
    output_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let url = client.resolve_url(&attachment.url)?;
    let mut response = client.get(url, &[], credentials).await?;

    let file_path = output_dir.join(attachment.file_name());
    match write_body(&mut response, &file_path).await {
        Ok(written) => {
            tracing::info!(path = %file_path.display(), bytes = written, "attachment saved");
            Ok(file_path)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&file_path);
            Err(e)
        }
    }
}

async fn write_body(response: &mut Response, file_path: &Path) -> Result<u64> {
    let mut file = BufWriter::with_capacity(CHUNK_SIZE, File::create(file_path)?);

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    file.flush()?;

    Ok(written)
}

/// Result of a single attachment download attempt
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DownloadResult {
    Success {
        name: String,
        path: PathBuf,
    },
    Failed {
        name: String,
        error: String,
    },
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadResult::Success { .. })
    }
}

/// Download each attachment in order. A failed file does not stop the rest.
pub async fn download_all(
    client: &YouTrackClient,
    attachments: &[Attachment],
    credentials: &Credentials,
    output_dir: &Path,
) -> Vec<DownloadResult> {
    let mut results = Vec::with_capacity(attachments.len());

    for attachment in attachments {
        let result = match download_attachment(client, attachment, credentials, output_dir).await {
            Ok(path) => DownloadResult::Success {
                name: attachment.name.clone(),
                path,
            },
            Err(e) => {
                tracing::warn!(
                    name = %attachment.name,
                    status = ?e.status(),
                    error = %e,
                    "attachment download failed"
                );
                DownloadResult::Failed {
                    name: attachment.name.clone(),
                    error: e.to_string(),
                }
            }
        };
        results.push(result);
    }

    results
}

pub fn print_download_results(results: &[DownloadResult]) {
    let success_count = results.iter().filter(|r| r.is_success()).count();
    let fail_count = results.len() - success_count;

    for result in results {
        match result {
            DownloadResult::Success { name, path } => {
                output::print_message(&format!("Downloaded {name}: {}", path.display()));
            }
            DownloadResult::Failed { name, error } => {
                eprintln!("Failed to download {name}: {error}");
            }
        }
    }

    if fail_count > 0 {
        output::print_message(&format!(
            "Downloaded {}/{} attachments ({} failed)",
            success_count,
            results.len(),
            fail_count
        ));
    }
}

pub async fn list(client: &YouTrackClient, credentials: &Credentials, issue_id: &str) -> Result<()> {
    let id: IssueId = issue_id.parse()?;
    let issue = fetch_issue(client, &id, credentials, &FieldSpec::for_issue()).await?;

    if issue.attachments.is_empty() && !output::is_json_output() {
        output::print_message(&format!("No attachments found for {}", issue.id));
        return Ok(());
    }

    output::print_table(&issue.attachments, |attachment| {
        AttachmentRow::new(client, attachment)
    });

    Ok(())
}

pub async fn download(
    client: &YouTrackClient,
    config: &Config,
    credentials: &Credentials,
    args: DownloadArgs,
) -> Result<()> {
    let output_dir = config.resolve_download_dir(args.output);
    fetch_and_download(client, credentials, &args.id, &output_dir).await
}

/// `youtrack fetch <ISSUE_ID> <TOKEN>`: credentials come from the command line only.
pub async fn fetch(client: &YouTrackClient, config: &Config, args: FetchArgs) -> Result<()> {
    let credentials = Credentials::bearer(args.api_token);
    let output_dir = config.resolve_download_dir(args.output);
    fetch_and_download(client, &credentials, &args.id, &output_dir).await
}

async fn fetch_and_download(
    client: &YouTrackClient,
    credentials: &Credentials,
    issue_id: &str,
    output_dir: &Path,
) -> Result<()> {
    let id: IssueId = issue_id.parse()?;
    let issue = fetch_issue(client, &id, credentials, &FieldSpec::for_issue()).await?;

    if output::is_json_output() {
        let results = download_all(client, &issue.attachments, credentials, output_dir).await;
        output::print_item(&DownloadReport::new(&issue, &results), |_| {});
        return Ok(());
    }

    print_issue(client, &issue, false);
    if issue.attachments.is_empty() {
        return Ok(());
    }

    let results = download_all(client, &issue.attachments, credentials, output_dir).await;
    print_download_results(&results);

    Ok(())
}

/// Single JSON document for `download`/`fetch` in `--json` mode.
#[derive(Serialize)]
struct DownloadReport<'a> {
    issue: &'a Issue,
    downloads: &'a [DownloadResult],
}

impl<'a> DownloadReport<'a> {
    fn new(issue: &'a Issue, downloads: &'a [DownloadResult]) -> Self {
        Self { issue, downloads }
    }
}
