//! End-to-end runs of the audit pipeline against real files on disk.

use std::fs;

use spiredeck::{
    DeckId, DeckVerdict, audit_deck_file, read_deck_file, write_deck_report, write_void_report,
};
use tempfile::tempdir;

fn deck_id() -> DeckId {
    "987654321".parse().unwrap()
}

#[test]
fn valid_deck_produces_a_pdf_report() {
    let dir = tempdir().unwrap();
    let deck_path = dir.path().join("deck.txt");
    fs::write(
        &deck_path,
        "Strike:1\nDefend:1\nFireball:3\nbad line\nWhirlwind:6\n",
    )
    .unwrap();

    let (stats, verdict) = audit_deck_file(&deck_path).unwrap();
    assert_eq!(verdict, DeckVerdict::Valid);
    assert_eq!(stats.valid_count, 4);
    assert_eq!(stats.total_cost, 11);
    assert_eq!(stats.invalid_records, vec!["bad line".to_string()]);

    let report_path = write_deck_report(dir.path(), deck_id(), &stats).unwrap();
    assert_eq!(
        report_path.file_name().unwrap().to_str().unwrap(),
        "SpireDeck_987654321.pdf"
    );
    let bytes = fs::read(&report_path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn overly_invalid_deck_gets_a_void_report() {
    let dir = tempdir().unwrap();
    let deck_path = dir.path().join("deck.txt");
    let mut body = String::from("Strike:1\n");
    for i in 0..11 {
        body.push_str(&format!("garbage entry {i}\n"));
    }
    fs::write(&deck_path, body).unwrap();

    let (stats, verdict) = audit_deck_file(&deck_path).unwrap();
    assert_eq!(verdict, DeckVerdict::Void);
    assert_eq!(stats.invalid_records.len(), 11);

    let report_path = write_void_report(dir.path(), deck_id()).unwrap();
    assert_eq!(
        report_path.file_name().unwrap().to_str().unwrap(),
        "SpireDeck_987654321(VOID).pdf"
    );
    let bytes = fs::read(&report_path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn oversized_deck_is_truncated_and_void() {
    let dir = tempdir().unwrap();
    let deck_path = dir.path().join("deck.txt");
    let mut body = String::new();
    for i in 0..1500 {
        body.push_str(&format!("Card{i}:2\n"));
    }
    fs::write(&deck_path, body).unwrap();

    let (stats, verdict) = audit_deck_file(&deck_path).unwrap();
    assert_eq!(verdict, DeckVerdict::Void);
    assert_eq!(stats.valid_count, 1001);
    assert_eq!(stats.total_cost, 2002);
    assert!(stats.invalid_records.is_empty());
}

#[test]
fn missing_deck_file_aborts_before_reporting() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let err = read_deck_file(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to open deck file"));
    // Nothing was rendered for the failed run.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
