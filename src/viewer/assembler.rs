//! Builds one self-contained HTML document out of a snapshot's file set.
//!
//! The assembly is a sequence of pure string transformations over the entry
//! document: inject a `<base>` tag so relative asset references resolve
//! against the hosted snapshot, then inline every CSS file before `</head>`
//! and every JS file before `</body>`, preserving file-list order. The async
//! orchestrator only fetches content and threads it through the pure steps,
//! so the algorithm itself needs no rendering surface and no network to test.

use crate::viewer::service::{ServiceError, SnapshotService};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback when the snapshot has no entry HTML under its folder.
pub const EMPTY_DOCUMENT: &str = "<!DOCTYPE html><html><head></head><body></body></html>";

static HEAD_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<head(\s[^>]*)>").expect("head regex"));
static HTML_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<html(\s[^>]*)?>").expect("html regex"));

/// Select the entry HTML: the first file that is exactly `<folder>/index.html`
/// or deeper-suffixed `index.html` under the folder, in listing order.
pub fn select_entry<'a>(folder: &str, files: &'a [String]) -> Option<&'a str> {
    let prefix = format!("{}/", folder);
    files
        .iter()
        .find(|f| f.ends_with("index.html") && f.starts_with(&prefix))
        .map(String::as_str)
}

/// Insert exactly one `<base href="...">` tag. Tried in order, first match
/// wins: as first child of a bare `<head>`, right after an attributed
/// `<head ...>`, or inside a synthesized `<head>` following the `<html>` tag.
/// Nothing else in the document is altered.
pub fn inject_base_tag(html: &str, base_url: &str) -> String {
    let base_tag = format!("<base href=\"{}\">", base_url);

    if html.contains("<head>") {
        return html.replacen("<head>", &format!("<head>\n    {}", base_tag), 1);
    }

    if let Some(caps) = HEAD_OPEN_RE.captures(html) {
        let open = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let replacement = format!("{}\n    {}", open, base_tag);
        return html.replacen(open, &replacement, 1);
    }

    if let Some(caps) = HTML_OPEN_RE.captures(html) {
        let open = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let replacement = format!("{}\n<head>\n    {}\n</head>", open, base_tag);
        return html.replacen(open, &replacement, 1);
    }

    html.to_string()
}

/// Append a `<style>` block right before `</head>`. The `data-file` attribute
/// carries the original relative path for traceability. Documents without a
/// `</head>` silently drop the style block.
pub fn inline_css(html: &str, path: &str, css: &str) -> String {
    if !html.contains("</head>") {
        return html.to_string();
    }
    let style_tag = format!("<style data-file=\"{}\">\n{}\n</style>", path, css);
    html.replacen("</head>", &format!("{}\n</head>", style_tag), 1)
}

/// Heuristic double-inclusion check: a script is considered already referenced
/// when its base filename occurs anywhere in the document text. Intentionally
/// imprecise; a comment mentioning the filename also suppresses inlining.
pub fn script_already_referenced(html: &str, path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    html.contains(file_name)
}

/// Append a `<script>` block right before `</body>`. Documents without a
/// `</body>` silently drop the script block.
pub fn inline_js(html: &str, path: &str, js: &str) -> String {
    if !html.contains("</body>") {
        return html.to_string();
    }
    let script_tag = format!("<script data-file=\"{}\">\n{}\n</script>", path, js);
    html.replacen("</body>", &format!("{}\n</body>", script_tag), 1)
}

/// Assemble the full document for one snapshot. Reads each referenced file
/// exactly once; any read failure fails the whole build, no partial document
/// is ever returned.
pub async fn build_document(
    service: &dyn SnapshotService,
    hash: &str,
    folder: &str,
    files: &[String],
) -> Result<String, ServiceError> {
    let mut doc = match select_entry(folder, files) {
        Some(entry) => {
            let content = service.read_file(hash, entry).await?;
            if content.is_empty() {
                EMPTY_DOCUMENT.to_string()
            } else {
                content
            }
        }
        None => EMPTY_DOCUMENT.to_string(),
    };

    doc = inject_base_tag(&doc, &service.asset_base_url(hash, folder));

    let prefix = format!("{}/", folder);

    for path in files
        .iter()
        .filter(|f| f.starts_with(&prefix) && f.ends_with(".css"))
    {
        let css = service.read_file(hash, path).await?;
        doc = inline_css(&doc, path, &css);
    }

    for path in files
        .iter()
        .filter(|f| f.starts_with(&prefix) && f.ends_with(".js"))
    {
        if script_already_referenced(&doc, path) {
            continue;
        }
        let js = service.read_file(hash, path).await?;
        doc = inline_js(&doc, path, &js);
    }

    Ok(doc)
}
