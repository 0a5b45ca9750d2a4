use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Minimal multi-page table writer (A4 landscape, Helvetica).
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 842.0,
            page_h: 595.0,
            margin: 36.0,
            row_h: 16.0,

            next_id,
            font_id,

            font_size: 8.0,
            header_font_size: 8.5,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        // Type1 Helvetica only covers Latin-1
        let bytes: Vec<u8> = text
            .chars()
            .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
            .collect();

        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32) {
        content.save_state();
        content.set_stroke_rgb(0.7, 0.7, 0.7);
        content.rect(x, y, w, self.row_h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;

        for (i, w) in col_widths.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let fitted = fit_text(text, *w, size);
            self.draw_text(content, x + 3.0, y + 4.5, size, &fitted);
            self.draw_cell_borders(content, x, y, *w);
            x += w;
        }
    }

    /// Column widths from header + content, scaled down to the page width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| text_width(h, self.header_font_size) + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(text_width(cell, self.font_size) + 8.0);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, subtitle: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 8.0,
            self.title_font_size,
            title,
        );

        if !subtitle.is_empty() {
            self.draw_text(
                content,
                self.margin,
                self.page_h - self.margin - 8.0,
                self.font_size,
                subtitle,
            );
        }

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin - 20.0,
            self.font_size,
            &pg,
        );
    }

    /// Multi-page table; the header row repeats on every page. An empty
    /// table still produces one page with the header.
    pub fn write_table(&mut self, title: &str, subtitle: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, subtitle, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &col_widths, &header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &col_widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Rough Helvetica width estimate.
fn text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * 0.55
}

/// Cut `text` so that it fits in a cell of width `w`.
fn fit_text(text: &str, w: f32, size: f32) -> String {
    let max_chars = ((w - 6.0) / (size * 0.55)).floor().max(1.0) as usize;
    crate::utils::formatting::truncate(text, max_chars)
}
