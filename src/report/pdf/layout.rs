// src/report/pdf/layout.rs

use chrono::{DateTime, Utc};
use std::mem;

use crate::config::{PageGeometry, ReportConfig};
use crate::error::Result;
use crate::presentation::{prediction_color, risk_color, GcTint, Rgb};
use crate::report::common::{format_timestamp, report_rows, ReportRow};
use crate::risk::aggregate_risk;
use crate::types::ClassificationResponse;

const BLACK: Rgb = Rgb(15, 23, 42);
const MUTED: Rgb = Rgb(100, 116, 139);
const BORDER: Rgb = Rgb(203, 213, 225);
const HEADER_FILL: Rgb = Rgb(226, 232, 240);
const ROW_SHADE: Rgb = Rgb(248, 250, 252);

/// Column offsets from the left margin.
const COLUMNS: [f32; 5] = [6.0, 186.0, 276.0, 366.0, 456.0];
const TABLE_HEADER: [&str; 5] = ["Sequence ID", "Prediction", "Confidence", "GC Content", "Length"];
const SUMMARY_BOX_HEIGHT: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

/// One drawing instruction. `y` is measured downwards from the top edge; text
/// is positioned by its baseline, rectangles by their top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub ops: Vec<DrawOp>,
}

impl PdfPage {
    /// All text drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A laid-out report, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<PdfPage>,
}

/// Rough Helvetica advance width, good enough for centering.
pub fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Shorten `id` to `width` characters plus an ellipsis.
pub fn truncate_id(id: &str, width: usize) -> String {
    if id.chars().count() > width {
        let mut short: String = id.chars().take(width).collect();
        short.push_str("...");
        short
    } else {
        id.to_string()
    }
}

struct Layout<'g> {
    geometry: &'g PageGeometry,
    finished: Vec<PdfPage>,
    current: PdfPage,
    cursor: f32,
}

impl<'g> Layout<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            finished: Vec::new(),
            current: PdfPage::default(),
            cursor: geometry.margin_top,
        }
    }

    fn left(&self) -> f32 {
        self.geometry.margin_left
    }

    fn table_width(&self) -> f32 {
        self.geometry.width - 2.0 * self.geometry.margin_left
    }

    fn new_page(&mut self) {
        self.finished.push(mem::take(&mut self.current));
        self.cursor = self.geometry.margin_top;
    }

    /// Start a new page unless `height` more points fit above the bottom margin.
    fn ensure_room(&mut self, height: f32) -> bool {
        if self.cursor + height > self.geometry.content_bottom {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, font: Font, color: Rgb, text: impl Into<String>) {
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            size,
            font,
            color,
            text: text.into(),
        });
    }

    fn rect(&mut self, y: f32, height: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        let (x, width) = (self.left(), self.table_width());
        self.current.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.finished.push(self.current);
        self.finished
    }
}

/// Lay the report out on as many pages as the results need.
pub fn layout_document(
    response: &ClassificationResponse,
    generated_at: &DateTime<Utc>,
    config: &ReportConfig,
) -> Result<PdfDocument> {
    let sample = aggregate_risk(response)?;
    let geometry = &config.page;
    let mut layout = Layout::new(geometry);
    let left = layout.left();

    // 1. Title and metadata
    layout.text(left, layout.cursor, 18.0, Font::Bold, BLACK, "BAIO Classification Report");
    layout.cursor += 28.0;
    let metadata = [
        format!("Generated: {}", format_timestamp(generated_at)),
        format!("Model: {}", config.model_id),
        format!("Training Set: {}", config.training_set),
        format!("Source: {}", response.source),
    ];
    for line in metadata {
        layout.text(left, layout.cursor, 10.0, Font::Regular, MUTED, line);
        layout.cursor += 14.0;
    }
    layout.cursor += 8.0;

    // 2. Summary box
    let top = layout.cursor;
    layout.rect(top, SUMMARY_BOX_HEIGHT, None, Some(BORDER));
    layout.text(left + 10.0, top + 18.0, 12.0, Font::Bold, BLACK, "Summary");
    let counts = [
        (10.0, format!("Total Sequences: {}", response.total_sequences)),
        (190.0, format!("Virus: {}", response.virus_count)),
        (300.0, format!("Host: {}", response.host_count)),
        (410.0, format!("Novel: {}", response.novel_count)),
    ];
    for (offset, text) in counts {
        layout.text(left + offset, top + 36.0, 10.0, Font::Regular, BLACK, text);
    }
    layout.text(
        left + 10.0,
        top + 52.0,
        10.0,
        Font::Regular,
        BLACK,
        format!("Processing Time: {:.2}s", response.processing_time),
    );
    layout.text(
        left + 190.0,
        top + 52.0,
        10.0,
        Font::Bold,
        risk_color(sample.level),
        format!("Sample Risk: {}", sample.level.upper()),
    );
    layout.cursor += SUMMARY_BOX_HEIGHT + 24.0;

    // 3. Detailed results, header repeated on every page the table touches
    layout.text(left, layout.cursor, 13.0, Font::Bold, BLACK, "Detailed Results");
    layout.cursor += 12.0;
    layout.ensure_room(2.0 * geometry.row_height);
    table_header(&mut layout);

    for (index, row) in report_rows(response).iter().enumerate() {
        if layout.ensure_room(geometry.row_height) {
            table_header(&mut layout);
        }
        table_row(&mut layout, index, row, config.pdf_id_width);
    }

    // 4. Footers, once the page count is known
    let mut pages = layout.finish();
    let total = pages.len();
    let date = generated_at.format("%Y-%m-%d").to_string();
    for (index, page) in pages.iter_mut().enumerate() {
        let footer = format!("Page {} of {} - Generated {}", index + 1, total, date);
        let x = (geometry.width - approx_text_width(&footer, 8.0)) / 2.0;
        page.ops.push(DrawOp::Text {
            x,
            y: geometry.footer_y,
            size: 8.0,
            font: Font::Regular,
            color: MUTED,
            text: footer,
        });
    }
    log::debug!("PDF layout: {} rows on {} page(s)", response.detailed_results.len(), total);

    Ok(PdfDocument {
        width: geometry.width,
        height: geometry.height,
        pages,
    })
}

fn table_header(layout: &mut Layout<'_>) {
    let top = layout.cursor;
    let row_height = layout.geometry.row_height;
    let left = layout.left();
    layout.rect(top, row_height, Some(HEADER_FILL), None);
    for (offset, title) in COLUMNS.iter().zip(TABLE_HEADER) {
        layout.text(left + offset, top + row_height - 5.5, 9.0, Font::Bold, BLACK, title);
    }
    layout.cursor += row_height;
}

fn table_row(layout: &mut Layout<'_>, index: usize, row: &ReportRow<'_>, id_width: usize) {
    let top = layout.cursor;
    let row_height = layout.geometry.row_height;
    let left = layout.left();
    if index % 2 == 1 {
        layout.rect(top, row_height, Some(ROW_SHADE), None);
    }

    let baseline = top + row_height - 5.5;
    let result = row.result;
    let cells = [
        (truncate_id(&result.sequence_id, id_width), BLACK),
        (result.prediction.to_string(), prediction_color(&result.prediction)),
        (format!("{:.1}%", row.confidence_pct), BLACK),
        (format!("{:.1}%", row.gc_pct), GcTint::from_gc(result.gc_content).color()),
        (result.length.to_string(), BLACK),
    ];
    for (offset, (text, color)) in COLUMNS.iter().zip(cells) {
        layout.text(left + offset, baseline, 9.0, Font::Regular, color, text);
    }

    let bottom = top + row_height;
    let right = left + layout.table_width();
    layout.current.ops.push(DrawOp::Line {
        x1: left,
        y1: bottom,
        x2: right,
        y2: bottom,
        color: BORDER,
    });
    layout.cursor = bottom;
}
