use anyhow::Result;
use async_trait::async_trait;
use marksheet::controller::{run_controller, UiCommand};
use marksheet::draft::{pending_file_from_path, Draft};
use marksheet::model::{AppEvent, InfoEvent, PendingFile, StudentRecord, SUBJECTS};
use marksheet::roster::reconcile;
use marksheet::store::StudentStore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// In-memory store recording the order of every operation.
#[derive(Default)]
struct MemStore {
    records: Mutex<Vec<StudentRecord>>,
    ops: Mutex<Vec<String>>,
    fail_record: bool,
}

#[async_trait]
impl StudentStore for MemStore {
    async fn fetch_students(&self) -> Result<Vec<StudentRecord>> {
        self.ops.lock().unwrap().push("fetch".to_string());
        Ok(self.records.lock().unwrap().clone())
    }

    async fn store_record(&self, record: &StudentRecord) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("record:{}", record.name));
        if self.fail_record {
            anyhow::bail!("store unavailable");
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn upload_file(&self, file: &PendingFile) -> Result<()> {
        self.ops
            .lock()
            .unwrap()
            .push(format!("upload:{}", file.file_name));
        Ok(())
    }
}

async fn next_fetch(event_rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<StudentRecord> {
    loop {
        let ev = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
            .await
            .expect("event within timeout")
            .expect("channel open");
        if let AppEvent::RosterFetched { records } = ev {
            return records;
        }
    }
}

fn full_draft(name: &str, marks: &[&str]) -> Draft {
    let mut draft = Draft::new();
    draft.name = name.to_string();
    draft.standard = "7".to_string();
    for (i, m) in marks.iter().enumerate() {
        draft.set_manual_mark(i, *m);
    }
    draft
}

#[tokio::test]
async fn manual_submission_round_trips_through_the_store() {
    let store = Arc::new(MemStore::default());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let controller = tokio::spawn(run_controller(store.clone(), event_tx, cmd_rx));

    // Initial load against an empty store.
    assert!(next_fetch(&mut event_rx).await.is_empty());

    let mut draft = full_draft("Asha", &["1", "2", "3", "4", "5", "6"]);
    let submission = draft.build(false).expect("complete draft");
    cmd_tx.send(UiCommand::Submit(submission)).unwrap();
    draft.reset();

    let records = next_fetch(&mut event_rx).await;
    let roster = reconcile(records);
    assert_eq!(roster.len(), 1);
    let asha = roster.get("Asha").expect("stored and fetched back");
    assert_eq!(asha.standard, "7");
    assert_eq!(
        asha.marks,
        vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]
    );

    cmd_tx.send(UiCommand::Quit).unwrap();
    controller.await.unwrap().unwrap();
}

#[tokio::test]
async fn file_submission_stores_record_before_uploading() {
    let store = Arc::new(MemStore::default());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let controller = tokio::spawn(run_controller(store.clone(), event_tx, cmd_rx));
    let _ = next_fetch(&mut event_rx).await;

    let mut draft = Draft::new();
    draft
        .set_file(pending_file_from_path(Path::new("class7.csv")))
        .expect("csv accepted");
    let submission = draft.build(false).expect("file draft builds");
    cmd_tx.send(UiCommand::Submit(submission)).unwrap();
    draft.reset();

    let records = next_fetch(&mut event_rx).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "class7.csv");
    assert_eq!(records[0].standard, "N/A");
    assert_eq!(records[0].marks, vec![None; SUBJECTS.len()]);

    // The record store call precedes the upload, which precedes the refetch.
    let ops = store.ops.lock().unwrap().clone();
    assert_eq!(
        ops.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["fetch", "record:class7.csv", "upload:class7.csv", "fetch"]
    );

    cmd_tx.send(UiCommand::Quit).unwrap();
    controller.await.unwrap().unwrap();
}

#[tokio::test]
async fn failed_store_is_reported_and_the_reset_is_not_rolled_back() {
    let store = Arc::new(MemStore {
        fail_record: true,
        ..Default::default()
    });
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let controller = tokio::spawn(run_controller(store.clone(), event_tx, cmd_rx));
    let _ = next_fetch(&mut event_rx).await;

    let mut draft = full_draft("Ravi", &["9", "9", "9", "9", "9", "9"]);
    let submission = draft.build(false).expect("complete draft");
    cmd_tx.send(UiCommand::Submit(submission)).unwrap();
    // Optimistic reset happens at dispatch, before any network outcome.
    draft.reset();
    assert_eq!(draft, Draft::new());

    // The failure comes back as a diagnostic, not a fetch, and the form
    // stays cleared - the input is lost by design.
    let ev = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
        .await
        .expect("event within timeout")
        .expect("channel open");
    match ev {
        AppEvent::Info(InfoEvent::NetworkError { op, .. }) => assert_eq!(op, "store record"),
        other => panic!("expected network error, got {other:?}"),
    }
    assert_eq!(draft, Draft::new());
    assert!(store.records.lock().unwrap().is_empty());

    cmd_tx.send(UiCommand::Quit).unwrap();
    controller.await.unwrap().unwrap();
}
