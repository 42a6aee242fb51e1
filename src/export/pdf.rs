// Minimal PDF 1.4 writer: text-only pages using the standard Type 1 fonts
// (no embedding), WinAnsi encoding. Enough for the tabular health report.

use crate::error::PipelineError;

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN_LEFT: u32 = 50;
const TOP_BASELINE: u32 = 790;
const LINE_HEIGHT: u32 = 16;
/// Lines that fit between the top baseline and the bottom margin.
pub const LINES_PER_PAGE: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Body,
    /// Fixed-width, for aligned table rows.
    Table,
}

impl TextStyle {
    fn font(self) -> (&'static str, u32) {
        match self {
            TextStyle::Title => ("F2", 18),
            TextStyle::Heading => ("F2", 13),
            TextStyle::Body => ("F1", 11),
            TextStyle::Table => ("F3", 10),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub style: TextStyle,
    pub text: String,
}

impl TextLine {
    pub fn new(style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Lays `lines` out top to bottom, starting a new page every LINES_PER_PAGE lines.
/// Fails when a line holds a character outside Latin-1.
pub fn render(lines: &[TextLine]) -> Result<Vec<u8>, PipelineError> {
    let mut pages: Vec<Vec<u8>> = Vec::new();
    for chunk in lines.chunks(LINES_PER_PAGE) {
        pages.push(page_content(chunk)?);
    }
    if pages.is_empty() {
        pages.push(Vec::new());
    }

    // 1 catalog, 2 page tree, 3-5 fonts, then (page, content) per page.
    let page_obj = |i: usize| 6 + 2 * i;
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(5 + 2 * pages.len());
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes());
    for base_font in ["Helvetica", "Helvetica-Bold", "Courier"] {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                base_font
            )
            .into_bytes(),
        );
    }
    for (i, content) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_obj(i) + 1
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }
    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    Ok(out)
}

fn page_content(lines: &[TextLine]) -> Result<Vec<u8>, PipelineError> {
    let mut content = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let (font, size) = line.style.font();
        let y = TOP_BASELINE - (i as u32) * LINE_HEIGHT;
        content.extend_from_slice(
            format!("BT /{} {} Tf {} {} Td (", font, size, MARGIN_LEFT, y).as_bytes(),
        );
        content.extend_from_slice(&encode_text(&line.text)?);
        content.extend_from_slice(b") Tj ET\n");
    }
    Ok(content)
}

/// Latin-1 bytes with PDF string-literal escapes applied.
pub fn encode_text(text: &str) -> Result<Vec<u8>, PipelineError> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' => out.push(b' '),
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            c => {
                return Err(PipelineError::Export(format!(
                    "character {:?} cannot be encoded in the report font",
                    c
                )));
            }
        }
    }
    Ok(out)
}
