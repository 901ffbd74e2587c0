// src/report/pdf/writer.rs
//
// Minimal PDF 1.4 serializer for laid-out reports. Output depends only on the
// document: no creation dates, no random ids, fixed object order.

use std::io::Write;

use super::layout::{DrawOp, Font, PdfDocument};
use crate::error::Result;
use crate::presentation::Rgb;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Serialize `doc` to PDF bytes.
///
/// Objects: catalog, page tree, the two Helvetica fonts, then a
/// (page, content stream) pair per page.
pub fn write_pdf(doc: &PdfDocument) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let page_ids: Vec<usize> = (0..doc.pages.len())
        .map(|i| FIRST_PAGE_ID + 2 * i)
        .collect();

    // 1. Catalog and page tree
    offsets.push(out.len());
    write!(
        out,
        "{CATALOG_ID} 0 obj\n<< /Type /Catalog /Pages {PAGES_ID} 0 R >>\nendobj\n"
    )?;

    offsets.push(out.len());
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    write!(
        out,
        "{PAGES_ID} 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_ids.len()
    )?;

    // 2. Fonts
    for (id, base) in [(FONT_REGULAR_ID, "Helvetica"), (FONT_BOLD_ID, "Helvetica-Bold")] {
        offsets.push(out.len());
        write!(
            out,
            "{id} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{base} /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;
    }

    // 3. Pages and their content streams
    for (page, &page_id) in doc.pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;
        offsets.push(out.len());
        write!(
            out,
            "{page_id} 0 obj\n<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 {FONT_REGULAR_ID} 0 R /F2 {FONT_BOLD_ID} 0 R >> >> \
             /Contents {content_id} 0 R >>\nendobj\n",
            num(doc.width),
            num(doc.height)
        )?;

        let stream = content_stream(&page.ops, doc.height);
        offsets.push(out.len());
        write!(out, "{content_id} 0 obj\n<< /Length {} >>\nstream\n", stream.len())?;
        out.extend_from_slice(stream.as_bytes());
        out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    // 4. Cross-reference table and trailer
    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
    for offset in &offsets {
        write!(out, "{offset:010} 00000 n \n")?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        offsets.len() + 1
    )?;

    Ok(out)
}

/// Translate top-down layout coordinates into PDF operators.
fn content_stream(ops: &[DrawOp], page_height: f32) -> String {
    let mut stream = String::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                let font_name = match font {
                    Font::Regular => "F1",
                    Font::Bold => "F2",
                };
                stream.push_str(&format!(
                    "BT /{font_name} {} Tf {} rg {} {} Td ({}) Tj ET\n",
                    num(*size),
                    color_components(color),
                    num(*x),
                    num(page_height - y),
                    escape_text(text)
                ));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                stream.push_str("q ");
                if let Some(fill) = fill {
                    stream.push_str(&format!("{} rg ", color_components(fill)));
                }
                if let Some(stroke) = stroke {
                    stream.push_str(&format!("{} RG 0.8 w ", color_components(stroke)));
                }
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, _) => "S",
                };
                stream.push_str(&format!(
                    "{} {} {} {} re {paint} Q\n",
                    num(*x),
                    num(page_height - y - height),
                    num(*width),
                    num(*height)
                ));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                stream.push_str(&format!(
                    "q {} RG 0.5 w {} {} m {} {} l S Q\n",
                    color_components(color),
                    num(*x1),
                    num(page_height - y1),
                    num(*x2),
                    num(page_height - y2)
                ));
            }
        }
    }
    stream
}

fn num(value: f32) -> String {
    format!("{value:.2}")
}

fn color_components(color: &Rgb) -> String {
    let (r, g, b) = color.unit();
    format!("{r:.3} {g:.3} {b:.3}")
}

/// Escape a string literal; characters outside printable ASCII become `?`.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            ' '..='~' => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::pdf::layout::PdfPage;

    fn one_page(ops: Vec<DrawOp>) -> PdfDocument {
        PdfDocument {
            width: 595.0,
            height: 842.0,
            pages: vec![PdfPage { ops }],
        }
    }

    #[test]
    fn test_document_structure() {
        let doc = one_page(vec![DrawOp::Text {
            x: 40.0,
            y: 50.0,
            size: 18.0,
            font: Font::Bold,
            color: Rgb(0, 0, 0),
            text: "Hello (world)".to_string(),
        }]);
        let bytes = write_pdf(&doc).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Type /Pages /Kids [5 0 R] /Count 1"));
        assert!(text.contains("BT /F2 18.00 Tf 0.000 0.000 0.000 rg 40.00 792.00 Td (Hello \\(world\\)) Tj ET"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let doc = one_page(vec![DrawOp::Rect {
            x: 40.0,
            y: 100.0,
            width: 515.0,
            height: 20.0,
            fill: Some(Rgb(255, 255, 255)),
            stroke: None,
        }]);
        let bytes = write_pdf(&doc).unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let xref_at = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_at..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 6);
        for (index, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", index + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()), "object {}", index + 1);
        }
        assert!(text.contains("40.00 722.00 515.00 20.00 re f Q"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("Müller"), "M?ller");
    }
}
