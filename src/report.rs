//! PDF assembly for deck reports.
//!
//! A valid deck gets `SpireDeck_<id>.pdf` with the deck ID, total energy
//! cost, the histogram chart and any invalid records; a void deck gets
//! `SpireDeck_<id>(VOID).pdf` carrying only the void marker.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::chart::{ChartOptions, render_histogram};
use crate::deck::{DeckStats, DeckVerdict};
use crate::ident::DeckId;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CHART_SIDE_PT: f32 = 460.0;

/// Report file name for the given identifier and verdict.
pub fn report_file_name(id: DeckId, verdict: DeckVerdict) -> String {
    match verdict {
        DeckVerdict::Valid => format!("SpireDeck_{id}.pdf"),
        DeckVerdict::Void => format!("SpireDeck_{id}(VOID).pdf"),
    }
}

/// Render the full report for a valid deck and save it under `dir`.
pub fn write_deck_report(dir: &Path, id: DeckId, stats: &DeckStats) -> Result<PathBuf> {
    let mut doc = build_deck_document(id, stats)?;
    let path = dir.join(report_file_name(id, DeckVerdict::Valid));
    doc.save(&path)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(path)
}

/// Render the minimal void report and save it under `dir`.
pub fn write_void_report(dir: &Path, id: DeckId) -> Result<PathBuf> {
    let mut doc = build_void_document(id)?;
    let path = dir.join(report_file_name(id, DeckVerdict::Void));
    doc.save(&path)
        .with_context(|| format!("failed to write VOID report {}", path.display()))?;
    Ok(path)
}

/// Assemble the valid-deck document: ID and total-cost lines, the histogram
/// chart, and an invalid-card section only when records exist.
pub fn build_deck_document(id: DeckId, stats: &DeckStats) -> Result<Document> {
    let chart = render_histogram(&stats.histogram, &ChartOptions::default())?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let chart_id = doc.add_object(image_xobject(&chart));

    let mut ops: Vec<Operation> = Vec::new();
    let mut cursor = PAGE_HEIGHT - MARGIN;
    push_text(&mut ops, MARGIN, cursor, 14, &format!("Deck ID: {id}"));
    cursor -= 22.0;
    push_text(
        &mut ops,
        MARGIN,
        cursor,
        14,
        &format!("Total Energy Cost: {} energy", stats.total_cost),
    );
    cursor -= 16.0;

    let chart_x = (PAGE_WIDTH - CHART_SIDE_PT) / 2.0;
    let chart_y = cursor - CHART_SIDE_PT;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            CHART_SIDE_PT.into(),
            Object::Integer(0),
            Object::Integer(0),
            CHART_SIDE_PT.into(),
            chart_x.into(),
            chart_y.into(),
        ],
    ));
    ops.push(Operation::new("Do", vec!["Im1".into()]));
    ops.push(Operation::new("Q", vec![]));
    cursor = chart_y - 28.0;

    if !stats.invalid_records.is_empty() {
        push_text(&mut ops, MARGIN, cursor, 12, "Invalid Cards:");
        for record in &stats.invalid_records {
            cursor -= 16.0;
            push_text(&mut ops, MARGIN, cursor, 10, record);
        }
    }

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations: ops }.encode()?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => chart_id },
        },
        "MediaBox" => media_box(),
    });
    finish_document(&mut doc, pages_id, page_id);
    Ok(doc)
}

/// Assemble the void document: a single page carrying only the marker.
pub fn build_void_document(_id: DeckId) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut ops: Vec<Operation> = Vec::new();
    push_text(&mut ops, MARGIN, PAGE_HEIGHT - MARGIN, 36, "VOID");

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations: ops }.encode()?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
        "MediaBox" => media_box(),
    });
    finish_document(&mut doc, pages_id, page_id);
    Ok(doc)
}

fn media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ]
}

fn finish_document(doc: &mut Document, pages_id: lopdf::ObjectId, page_id: lopdf::ObjectId) {
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
}

fn push_text(ops: &mut Vec<Operation>, x: f32, y: f32, size: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec!["F1".into(), Object::Integer(size)],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Pack the chart into an uncompressed RGB image XObject.
fn image_xobject(chart: &DynamicImage) -> Stream {
    let rgb = chart.to_rgb8();
    let (width, height) = rgb.dimensions();
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        rgb.into_raw(),
    )
}
