//! PDF renderer – takes a [`LayoutPlan`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API). Text is set in the builtin Helvetica
//! faces; section-heading rules are drawn as hairlines and list markers in
//! the left gutter.

use printpdf::*;

use crate::error::LayoutError;
use crate::plan::{LayoutPlan, PlanBox, PlanText};

const RULE_GRAY: f32 = 0.75;

/// Render a layout plan into PDF bytes.
pub fn render_pdf(plan: &LayoutPlan) -> Result<Vec<u8>, LayoutError> {
    let page_w = Mm(plan.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(plan.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&plan.title);

    let mut pages = Vec::new();
    for page_plan in &plan.pages {
        let mut ops = Vec::new();
        for pbox in &page_plan.boxes {
            render_box(&mut ops, pbox, plan.page_height_pt);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());
    if bytes.is_empty() {
        return Err(LayoutError::ExportFailed(
            "PDF serializer produced no output".to_string(),
        ));
    }
    Ok(bytes)
}

/// Convert a UTF-8 string to raw Windows-1252 bytes wrapped in a String so
/// printpdf writes them unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, one byte per glyph).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for the 0x80-0x9F range; printpdf
    // passes these bytes straight through, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn builtin_font(bold: bool, italic: bool) -> BuiltinFont {
    match (bold, italic) {
        (true, true) => BuiltinFont::HelveticaBoldOblique,
        (true, false) => BuiltinFont::HelveticaBold,
        (false, true) => BuiltinFont::HelveticaOblique,
        (false, false) => BuiltinFont::Helvetica,
    }
}

/// Recursively render a plan box and its children into PDF ops.
fn render_box(ops: &mut Vec<Op>, pbox: &PlanBox, page_height: f32) {
    // PDF coordinate system: origin at bottom-left; the plan uses top-left.
    let pdf_y = page_height - pbox.y;

    if pbox.rule {
        draw_rule(ops, pbox, pdf_y);
    }
    if let Some(text) = &pbox.text {
        draw_text(ops, pbox, text, pdf_y);
    }

    for child in &pbox.children {
        render_box(ops, child, page_height);
    }
}

fn draw_rule(ops: &mut Vec<Op>, pbox: &PlanBox, pdf_y: f32) {
    ops.push(Op::SetOutlineColor {
        col: Color::Rgb(Rgb {
            r: RULE_GRAY,
            g: RULE_GRAY,
            b: RULE_GRAY,
            icc_profile: None,
        }),
    });
    ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                LinePoint {
                    p: Point {
                        x: Pt(pbox.x),
                        y: Pt(pdf_y),
                    },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt(pbox.x + pbox.width),
                        y: Pt(pdf_y),
                    },
                    bezier: false,
                },
            ],
            is_closed: false,
        },
    });
}

fn draw_text(ops: &mut Vec<Op>, pbox: &PlanBox, text: &PlanText, pdf_y: f32) {
    let font = builtin_font(text.bold, text.italic);

    for line in &text.lines {
        if line.text.is_empty() {
            continue;
        }
        let text_x = pbox.x + line.x_offset;
        // Baseline ≈ top of line + ascender (approx 0.75 × font size).
        let text_y = pdf_y - line.y_offset - text.font_size * 0.75;

        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(text_x),
                y: Pt(text_y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(text.font_size),
            font,
        });
        ops.push(Op::SetLineHeight {
            lh: Pt(text.line_height),
        });
        ops.push(Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(to_winlatin(&line.text))],
            font,
        });
        ops.push(Op::EndTextSection);
    }

    // Bullet marker drawn in the gutter left of the box.
    if let Some(marker) = &text.marker {
        let marker_x = pbox.x - 16.0;
        let marker_y = pdf_y - text.font_size * 0.75;
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(marker_x),
                y: Pt(marker_y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(text.font_size),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(to_winlatin(marker))],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);
    }
}
