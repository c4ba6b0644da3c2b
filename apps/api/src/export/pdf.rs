//! PDF writer: one page per slice, content clipped to the margin box.
//!
//! Content is in CSS px with y growing downward; PDF user space is in points
//! with y growing upward from the bottom-left corner.

use chrono::{Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::export::encoding::to_winansi;
use crate::export::paginate::{PageGeometry, PageSlice};
use crate::layout::flow::{FragmentKind, LaidOutDocument, TextRun};
use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::layout::units::px_to_pt;
use crate::render::theme::Color;

const PRODUCER: &str = concat!("resume-api ", env!("CARGO_PKG_VERSION"));

/// Resource names and base fonts, in object order.
const FONTS: [(FontFamily, FontWeight, &[u8]); 6] = [
    (FontFamily::Sans, FontWeight::Regular, b"F1"),
    (FontFamily::Sans, FontWeight::Bold, b"F2"),
    (FontFamily::Serif, FontWeight::Regular, b"F3"),
    (FontFamily::Serif, FontWeight::Bold, b"F4"),
    (FontFamily::Mono, FontWeight::Regular, b"F5"),
    (FontFamily::Mono, FontWeight::Bold, b"F6"),
];

fn font_resource(font: FontFamily, weight: FontWeight) -> Name<'static> {
    let name = FONTS
        .iter()
        .find(|(f, w, _)| *f == font && *w == weight)
        .map_or(FONTS[0].2, |(_, _, name)| *name);
    Name(name)
}

/// Document info dictionary fields.
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    pub title: String,
    pub author: String,
}

/// Maps content px to page points for one slice.
struct PageTransform {
    page_height_pt: f32,
    margin_pt: f32,
    slice_top: f32,
}

impl PageTransform {
    fn x(&self, px: f32) -> f32 {
        self.margin_pt + px_to_pt(px)
    }

    /// PDF y of a content y on this page.
    fn y(&self, px: f32) -> f32 {
        self.page_height_pt - self.margin_pt - px_to_pt(px - self.slice_top)
    }
}

fn set_fill(content: &mut Content, color: Color) {
    let (r, g, b) = color.to_unit();
    content.set_fill_rgb(r, g, b);
}

/// Writes the paginated document to PDF bytes.
pub fn write_pdf(
    doc: &LaidOutDocument,
    slices: &[PageSlice],
    geometry: &PageGeometry,
    meta: &PdfMetadata,
) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let info_id = Ref::new(3);
    let mut next_ref = 4;
    let mut alloc = || {
        let id = Ref::new(next_ref);
        next_ref += 1;
        id
    };

    pdf.catalog(catalog_id).pages(page_tree_id);

    let font_ids: Vec<(Name<'static>, Ref)> = FONTS
        .iter()
        .map(|(family, weight, name)| {
            let id = alloc();
            pdf.type1_font(id)
                .base_font(Name(family.base_font(*weight).as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (Name(*name), id)
        })
        .collect();

    let (page_w_pt, page_h_pt) = geometry.paper.size_pt();
    let margin_pt = geometry.margin_pt();
    let content_w_pt = (page_w_pt - 2.0 * margin_pt).max(0.0);
    let content_h_pt = (page_h_pt - 2.0 * margin_pt).max(0.0);

    let mut page_ids = Vec::with_capacity(slices.len());
    for slice in slices {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let transform = PageTransform {
            page_height_pt: page_h_pt,
            margin_pt,
            slice_top: slice.top,
        };
        let mut content = Content::new();

        if doc.background != Color::WHITE {
            set_fill(&mut content, doc.background);
            content.rect(0.0, 0.0, page_w_pt, page_h_pt);
            content.fill_nonzero();
        }

        // Margin box: bands span it on every page.
        content.save_state();
        content.rect(margin_pt, margin_pt, content_w_pt, content_h_pt);
        content.clip_nonzero();
        content.end_path();
        for band in &doc.bands {
            set_fill(&mut content, band.color);
            content.rect(transform.x(band.x), margin_pt, px_to_pt(band.width), content_h_pt);
            content.fill_nonzero();
        }

        // Slice box: content below the break belongs to the next page.
        let slice_h_pt = px_to_pt(slice.height()).min(content_h_pt);
        content.save_state();
        content.rect(margin_pt, page_h_pt - margin_pt - slice_h_pt, content_w_pt, slice_h_pt);
        content.clip_nonzero();
        content.end_path();
        draw_slice(&mut content, doc, slice, &transform);
        content.restore_state();
        content.restore_state();

        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w_pt, page_h_pt));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, id) in &font_ids {
                fonts.pair(*name, *id);
            }
        }
        page.finish();
    }

    let count = page_ids.len() as i32;
    pdf.pages(page_tree_id).kids(page_ids).count(count);

    let now = Utc::now();
    pdf.document_info(info_id)
        .title(TextStr(&meta.title))
        .author(TextStr(&meta.author))
        .producer(TextStr(PRODUCER))
        .creation_date(
            Date::new(now.year() as u16)
                .month(now.month() as u8)
                .day(now.day() as u8)
                .hour(now.hour() as u8)
                .minute(now.minute() as u8)
                .second(now.second() as u8)
                .utc_offset_hour(0),
        );

    pdf.finish()
}

fn draw_slice(content: &mut Content, doc: &LaidOutDocument, slice: &PageSlice, t: &PageTransform) {
    for fragment in &doc.fragments {
        let rect = &fragment.rect;
        if !slice.intersects(rect.y, rect.height) {
            continue;
        }
        match &fragment.kind {
            FragmentKind::Fill { color, .. } => {
                let h = px_to_pt(rect.height);
                set_fill(content, *color);
                content.rect(t.x(rect.x), t.y(rect.y) - h, px_to_pt(rect.width), h);
                content.fill_nonzero();
            }
            FragmentKind::Text(run) => draw_text(content, rect.x, run, t),
        }
    }
}

fn draw_text(content: &mut Content, x: f32, run: &TextRun, t: &PageTransform) {
    let bytes = to_winansi(&run.text);
    if bytes.is_empty() {
        return;
    }
    set_fill(content, run.color);
    content.begin_text();
    content.set_font(font_resource(run.font, run.weight), px_to_pt(run.size));
    content.next_line(t.x(x), t.y(run.baseline));
    content.show(Str(&bytes));
    content.end_text();
}
