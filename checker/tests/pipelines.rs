//! End-to-end tests over real files.

use std::fs;
use std::path::PathBuf;

use linegrid::logs::{LogEntry, LogLevel, LOG_BROADCASTER};
use linegrid::{
    export_matrix, parse_export, run_reconstruct, run_transpose, Layout, PipelineError,
    RenderedTable, SkipReason, TransposeOptions,
};
use linegrid::reconstruct::MAX_GROUP_COUNT;
use tempfile::{tempdir, TempDir};
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

fn write_files(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
    let dir = tempdir().unwrap();
    let paths = files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

/// Everything buffered on a subscription. Other tests share the global
/// broadcaster, so lagged gaps are skipped instead of ending the drain.
fn drain(rx: &mut Receiver<LogEntry>) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(entry) => entries.push(entry),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => return entries,
        }
    }
}

const DAY_ONE: &str = "\
CCCODE,C01
MERCHANT_NAME,ACME, INC.
TRN_DATE,2024-04-12
NO_TRN,2
CDATE,0412
TRANSACTION_NO,4
AMOUNT,1,250.00
CDATE,0412
TRANSACTION_NO,1
AMOUNT,20.00
Transaction,END
";

const DAY_TWO: &str = "\
CCCODE,C02
MERCHANT_NAME,BETA
TRN_DATE,2024-04-13
NO_TRN,1
CDATE,0413
TRANSACTION_NO,2
AMOUNT,5.00
TIP,1.00
junk line
";

#[tokio::test]
async fn transposer_single_line_files() {
    LOG_BROADCASTER.set_muted(true);
    let (_dir, paths) = write_files(&[("file1", "A,1"), ("file2", "A,2")]);

    let report = run_transpose(&paths, &TransposeOptions::default()).await.unwrap();

    assert_eq!(report.table.headers, vec!["file1 - Line 1", "file2 - Line 1"]);
    assert_eq!(report.table.rows.len(), 1);
    assert_eq!(report.table.rows[0], vec!["1", "2"]);
    assert_eq!(report.files.len(), 2);

    let csv = report.table.to_csv().unwrap();
    assert_eq!(
        csv,
        "\"Field\",\"file1 - Line 1\",\"file2 - Line 1\"\n\"Value 1\",\"1\",\"2\"\n"
    );
}

#[tokio::test]
async fn reconstruct_two_batches() {
    LOG_BROADCASTER.set_muted(true);
    let (_dir, paths) = write_files(&[("day1.txt", DAY_ONE), ("day2.txt", DAY_TWO)]);

    let report = run_reconstruct(&paths, &Layout::default()).await.unwrap();
    let result = &report.result;

    assert_eq!(result.record_count, 3);
    assert_eq!(result.gaps.missing, vec![3]);

    let matrix = &result.matrix;
    let keys: Vec<_> = matrix.keys().collect();
    assert_eq!(
        keys,
        vec![
            "CCCODE",
            "MERCHANT_NAME",
            "TRN_DATE",
            "NO_TRN",
            "CDATE",
            "TRANSACTION_NO",
            "AMOUNT",
            "TIP"
        ]
    );
    assert_eq!(matrix.get("TRANSACTION_NO").unwrap(), ["1", "2", "4"]);
    assert_eq!(matrix.get("AMOUNT").unwrap(), ["20.00", "5.00", "1,250.00"]);
    assert_eq!(matrix.get("TIP").unwrap(), ["", "1.00", ""]);
    assert_eq!(matrix.get("MERCHANT_NAME").unwrap(), ["ACME, INC.", "", "BETA"]);

    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].file, 1);
    assert_eq!(result.skipped[0].line, 9);
    assert_eq!(result.skipped[0].reason, SkipReason::MissingSeparator);
}

#[tokio::test]
async fn render_strips_commas_but_export_keeps_them() {
    LOG_BROADCASTER.set_muted(true);
    let (_dir, paths) = write_files(&[("day1.txt", DAY_ONE)]);

    let report = run_reconstruct(&paths, &Layout::default()).await.unwrap();
    let matrix = &report.result.matrix;

    let table = RenderedTable::from_matrix(matrix);
    let amount_row = table.rows.iter().find(|r| r[0] == "AMOUNT").unwrap();
    assert_eq!(amount_row[1..], ["20.00", "1250.00"]);

    let export = export_matrix(matrix);
    assert!(export.contains("AMOUNT,20.00,1,250.00\n"));
    assert!(export.starts_with("CCCODE,C01,\n"));
}

#[tokio::test]
async fn export_round_trip() {
    LOG_BROADCASTER.set_muted(true);
    let (_dir, paths) = write_files(&[("day2.txt", DAY_TWO)]);

    let report = run_reconstruct(&paths, &Layout::default()).await.unwrap();
    let matrix = &report.result.matrix;

    assert_eq!(&parse_export(&export_matrix(matrix)), matrix);
}

#[tokio::test]
async fn no_files_is_rejected() {
    let paths: Vec<PathBuf> = Vec::new();
    let err = run_reconstruct(&paths, &Layout::default()).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoInput));

    let err = run_transpose(&paths, &TransposeOptions::default()).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoInput));
}

#[tokio::test]
async fn unreadable_file_aborts_batch() {
    LOG_BROADCASTER.set_muted(true);
    let (dir, mut paths) = write_files(&[("day1.txt", DAY_ONE)]);
    paths.push(dir.path().join("missing.txt"));

    let err = run_reconstruct(&paths, &Layout::default()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Read { .. }));
}

#[tokio::test]
async fn invalid_layout_is_rejected_before_reading() {
    let layout = Layout {
        count_field: "TOTAL".to_string(),
        ..Layout::default()
    };
    let err = run_reconstruct(&[PathBuf::from("never-read.txt")], &layout)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Layout(_)));
}

#[tokio::test]
async fn gap_warning_is_broadcast() {
    LOG_BROADCASTER.set_muted(true);
    let mut rx = LOG_BROADCASTER.subscribe();
    let (_dir, paths) = write_files(&[("day1.txt", DAY_ONE)]);

    run_reconstruct(&paths, &Layout::default()).await.unwrap();

    assert!(drain(&mut rx).iter().any(|entry| {
        entry.level == LogLevel::Warning && entry.message == "Missing TRANSACTION_NO count: 2"
    }));
}

#[tokio::test]
async fn oversized_group_count_is_capped_with_warning() {
    LOG_BROADCASTER.set_muted(true);
    let mut rx = LOG_BROADCASTER.subscribe();
    let (_dir, paths) = write_files(&[(
        "huge.txt",
        "CCCODE,C09\nNO_TRN,1000000000000\nCDATE,0101\nTRANSACTION_NO,1\n",
    )]);

    let report = run_reconstruct(&paths, &Layout::default()).await.unwrap();
    let result = &report.result;

    assert_eq!(result.matrix.get("CCCODE").unwrap().len(), MAX_GROUP_COUNT);
    assert_eq!(result.clamped.len(), 1);
    assert!(drain(&mut rx).iter().any(|entry| {
        entry.level == LogLevel::Warning && entry.message.starts_with("huge.txt: group count")
    }));
}

#[tokio::test]
async fn read_failure_is_broadcast_as_error() {
    LOG_BROADCASTER.set_muted(true);
    let mut rx = LOG_BROADCASTER.subscribe();
    let (dir, mut paths) = write_files(&[("day1.txt", DAY_ONE)]);
    paths.push(dir.path().join("unreadable-day.txt"));

    run_transpose(&paths, &TransposeOptions::default()).await.unwrap_err();

    assert!(drain(&mut rx).iter().any(|entry| {
        entry.level == LogLevel::Error && entry.message.contains("unreadable-day.txt")
    }));
}

#[tokio::test]
async fn layout_failure_is_broadcast_as_error() {
    LOG_BROADCASTER.set_muted(true);
    let mut rx = LOG_BROADCASTER.subscribe();
    let layout = Layout {
        footer: "CCCODE".to_string(),
        ..Layout::default()
    };

    run_reconstruct(&[PathBuf::from("never-read.txt")], &layout)
        .await
        .unwrap_err();

    assert!(drain(&mut rx).iter().any(|entry| {
        entry.level == LogLevel::Error && entry.message.contains("CCCODE")
    }));
}
