//! Git plumbing for the capture pipeline. Every invocation passes the
//! repository explicitly via `git -C`, so nothing depends on the process
//! working directory.

use crate::capture::CaptureError;
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::process::Command;

const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "%H%x1f%an%x1f%aI%x1f%s";

#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub message: String,
}

async fn run_git(repo: &Path, args: &[&str]) -> Result<Vec<u8>, CaptureError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .stdin(std::process::Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        return Err(CaptureError::Git {
            args: args.iter().map(|s| s.to_string()).collect(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Parse one `--format=%H%x1f%an%x1f%aI%x1f%s` log line.
pub fn parse_log_line(line: &str) -> Result<CommitInfo, CaptureError> {
    let mut fields = line.trim_end().splitn(4, FIELD_SEP);
    let (hash, author, date, message) = match (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) {
        (Some(h), Some(a), Some(d), Some(m)) => (h, a, d, m),
        _ => {
            return Err(CaptureError::Parse(format!(
                "unexpected git log output: {:?}",
                line
            )))
        }
    };

    let date = DateTime::parse_from_rfc3339(date)
        .map_err(|e| CaptureError::Parse(format!("bad commit date {:?}: {}", date, e)))?
        .with_timezone(&Utc);

    Ok(CommitInfo {
        hash: hash.to_string(),
        author: author.to_string(),
        date,
        message: message.to_string(),
    })
}

/// Latest commit on `branch` touching `folder`, or `None` when the folder has
/// no history on that branch.
pub async fn latest_commit(
    repo: &Path,
    branch: &str,
    folder: &str,
) -> Result<Option<CommitInfo>, CaptureError> {
    let format = format!("--format={}", LOG_FORMAT);
    let stdout = run_git(
        repo,
        &["log", "-1", &format, branch, "--", folder],
    )
    .await?;

    let line = String::from_utf8_lossy(&stdout);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    parse_log_line(line).map(Some)
}

/// All file paths under `folder` at the given commit, repository-relative.
pub async fn list_tree(
    repo: &Path,
    hash: &str,
    folder: &str,
) -> Result<Vec<String>, CaptureError> {
    let stdout = run_git(
        repo,
        &["ls-tree", "-r", "--name-only", hash, "--", folder],
    )
    .await?;

    Ok(String::from_utf8_lossy(&stdout)
        .lines()
        .map(|l| l.to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

/// Raw contents of `path` at the given commit.
pub async fn show_file(repo: &Path, hash: &str, path: &str) -> Result<Vec<u8>, CaptureError> {
    let object = format!("{}:{}", hash, path);
    run_git(repo, &["show", &object]).await
}
