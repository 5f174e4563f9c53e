//! Submission lifecycle controller.
//!
//! Owns every network round-trip and emits events for presentation layers.
//! Within one submission the chain is ordered: record store first, file
//! upload second (when present), roster refetch last. Submissions are not
//! serialized against each other; racing refetches resolve last-write-wins
//! over the whole roster at the consumer.

use crate::model::{AppEvent, InfoEvent, Submission};
use crate::store::StudentStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug)]
pub enum UiCommand {
    Submit(Submission),
    Refresh,
    Quit,
}

/// Fetch the raw record list and publish it. Failures are reported and
/// swallowed; the previous roster stays on screen.
async fn refresh(store: &dyn StudentStore, event_tx: &UnboundedSender<AppEvent>) {
    match store.fetch_students().await {
        Ok(records) => {
            let _ = event_tx.send(AppEvent::RosterFetched { records });
        }
        Err(e) => {
            let _ = event_tx.send(AppEvent::Info(InfoEvent::NetworkError {
                op: "fetch",
                detail: format!("{e:#}"),
            }));
        }
    }
}

/// Run one submission chain to completion. The caller has already reset the
/// draft; a failure here is diagnostic-only and never restores the form.
async fn run_submission(
    store: &dyn StudentStore,
    event_tx: &UnboundedSender<AppEvent>,
    submission: Submission,
) {
    if let Err(e) = store.store_record(&submission.record).await {
        let _ = event_tx.send(AppEvent::Info(InfoEvent::NetworkError {
            op: "store record",
            detail: format!("{e:#}"),
        }));
        return;
    }
    let _ = event_tx.send(AppEvent::Info(InfoEvent::RecordStored {
        name: submission.record.name.clone(),
    }));

    // File upload only after the record call completed.
    if let Some(file) = &submission.file {
        match store.upload_file(file).await {
            Ok(()) => {
                let _ = event_tx.send(AppEvent::Info(InfoEvent::FileUploaded {
                    file_name: file.file_name.clone(),
                }));
            }
            Err(e) => {
                let _ = event_tx.send(AppEvent::Info(InfoEvent::NetworkError {
                    op: "upload file",
                    detail: format!("{e:#}"),
                }));
                return;
            }
        }
    }

    refresh(store, event_tx).await;
}

/// Process UI commands until `Quit` (or the command channel closes), spawning
/// one task per submission so a slow store never blocks the next action.
pub async fn run_controller(
    store: Arc<dyn StudentStore>,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    // Initial load, same as later refetches.
    refresh(store.as_ref(), &event_tx).await;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Submit(submission) => {
                let store = store.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    run_submission(store.as_ref(), &event_tx, submission).await;
                });
            }
            UiCommand::Refresh => {
                let store = store.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    refresh(store.as_ref(), &event_tx).await;
                });
            }
            UiCommand::Quit => break,
        }
    }

    Ok(())
}
