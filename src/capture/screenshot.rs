//! Screenshot capture delegates to an external headless-browser command.
//! The configured program is invoked with two arguments: the path to the
//! extracted entry HTML and the destination PNG path. A missing command or a
//! failed run downgrades the snapshot to `has_screenshot = false`; it never
//! fails the capture.

use crate::capture::CaptureError;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

const SCREENSHOT_TIMEOUT_SECS: u64 = 60;

pub async fn capture(cmd: &str, entry_html: &Path, output: &Path) -> Result<(), CaptureError> {
    let child = Command::new(cmd)
        .arg(entry_html)
        .arg(output)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;

    let result = tokio::time::timeout(
        Duration::from_secs(SCREENSHOT_TIMEOUT_SECS),
        child.wait_with_output(),
    )
    .await;

    match result {
        Ok(Ok(output_data)) if output_data.status.success() => Ok(()),
        Ok(Ok(output_data)) => Err(CaptureError::Screenshot(
            String::from_utf8_lossy(&output_data.stderr).trim().to_string(),
        )),
        Ok(Err(e)) => Err(CaptureError::Io(e)),
        Err(_) => Err(CaptureError::Screenshot("screenshot command timed out".into())),
    }
}
