//! `download` command handler.

use std::io::{self, Write};

use anyhow::Result;
use rootlaunch_core::{DownloadEvent, extract_app_id, is_app_store_url};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Resolve a store link or bare numeric id to an application id.
pub fn parse_app_id(target: &str) -> Result<i64, CliError> {
    let target = target.trim();
    if let Ok(id) = target.parse::<i64>() {
        return Ok(id);
    }
    if is_app_store_url(target) {
        if let Some(id) = extract_app_id(target) {
            return Ok(id);
        }
    }
    Err(CliError::Arguments(format!(
        "'{target}' is neither an application id nor a store link"
    )))
}

/// Request the download, wait for it to settle and print every event as
/// a JSON line.
pub async fn execute(ctx: &mut CliContext, target: &str, version_id: i64) -> Result<i32> {
    let app_id = parse_app_id(target)?;
    info!(app_id, version_id, "Requesting download");

    ctx.downloads.request_download(app_id, version_id);
    ctx.downloads.shutdown().await;

    report_events(&mut ctx.download_events, &mut io::stdout().lock())?;
    Ok(0)
}

/// Write queued events to `out`, one JSON object per line.
///
/// A `DownloadFailed` event turns into [`CliError::Unavailable`] once all
/// events have been written.
fn report_events(
    events: &mut UnboundedReceiver<DownloadEvent>,
    out: &mut impl Write,
) -> Result<()> {
    let mut failure = None;
    while let Ok(event) = events.try_recv() {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
        if let DownloadEvent::DownloadFailed { error, .. } = event {
            failure = Some(error);
        }
    }

    match failure {
        Some(error) => Err(CliError::Unavailable(error).into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rootlaunch_core::DownloadId;
    use rootlaunch_core::ports::{ChannelDownloadEmitter, DownloadEventEmitterPort};

    use super::*;

    #[test]
    fn test_parses_bare_id() {
        assert_eq!(parse_app_id(" 544007664 ").unwrap(), 544_007_664);
    }

    #[test]
    fn test_parses_store_link() {
        let link = "https://apps.apple.com/us/app/idle-miner/id1116645064?l=en";
        assert_eq!(parse_app_id(link).unwrap(), 1_116_645_064);
    }

    #[test]
    fn test_rejects_other_text() {
        let err = parse_app_id("https://example.com/app").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_failed_event_exits_unavailable_after_printing() {
        let (emitter, mut rx) = ChannelDownloadEmitter::channel();
        let id = DownloadId::new(1, 2);
        emitter.emit(DownloadEvent::DownloadStarted { id: id.clone() });
        emitter.emit(DownloadEvent::DownloadFailed {
            id,
            error: "License refused: not purchased".into(),
        });

        let mut out = Vec::new();
        let err = report_events(&mut rx, &mut out).unwrap_err();

        let code = err.downcast_ref::<CliError>().map(CliError::exit_code);
        assert_eq!(code, Some(69));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_completed_download_succeeds() {
        let (emitter, mut rx) = ChannelDownloadEmitter::channel();
        emitter.emit(DownloadEvent::DownloadCompleted {
            id: DownloadId::new(1, 2),
            location: PathBuf::from("/tmp/1.ipa"),
        });

        let mut out = Vec::new();
        report_events(&mut rx, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("download_completed"));
    }
}
