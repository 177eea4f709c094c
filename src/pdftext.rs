use std::borrow::Cow;
use std::path::Path;

use pdf::content::Operation;
use pdf::file::File;
use pdf::object::Page;
use pdf::primitive::{PdfString, Primitive};
use tracing::{debug, trace};

use crate::error::RosterError;
use crate::extract::PdfBackend;

/// Kerning adjustments in a `TJ` array wider than this read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// Reads page text straight from content streams with the `pdf` crate.
///
/// Every positioned text run becomes its own line, ordered top to bottom and
/// then left to right, so each roster cell lands on a separate line.
pub struct PdfCrateBackend;

impl PdfBackend for PdfCrateBackend {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, RosterError> {
        let file = File::<Vec<u8>>::open(path)
            .map_err(|e| RosterError::Pdf(format!("{}: {}", path.display(), e)))?;

        let mut pages = Vec::new();
        for (i, page) in file.pages().enumerate() {
            let page =
                page.map_err(|e| RosterError::Pdf(format!("page {}: {}", i + 1, e)))?;
            let text = page_text(&page);
            debug!(page = i + 1, chars = text.len(), "read page");
            pages.push(text);
        }

        Ok(pages)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Walks content stream operators and yields one [`TextRun`] per
/// contiguous piece of text shown at a single position.
#[derive(Debug, Clone)]
struct TextRunParser<'src> {
    ops: std::slice::Iter<'src, Operation>,
    line_x: f32,
    line_y: f32,
    leading: f32,
}

impl<'src> TextRunParser<'src> {
    fn new(operations: &'src [Operation]) -> Self {
        TextRunParser {
            ops: operations.iter(),
            line_x: 0.0,
            line_y: 0.0,
            leading: 0.0,
        }
    }

    fn move_to(&self, operator: &str, operands: &[Primitive]) -> Option<(f32, f32)> {
        match (operator, operands) {
            ("Td" | "TD", [tx, ty]) => Some((self.line_x + number(tx), self.line_y + number(ty))),
            ("Tm", [_, _, _, _, e, f]) => Some((number(e), number(f))),
            ("T*" | "'" | "\"", _) => Some((self.line_x, self.line_y - self.leading)),
            _ => None,
        }
    }
}

impl<'src> Iterator for TextRunParser<'src> {
    type Item = TextRun;

    fn next(&mut self) -> Option<Self::Item> {
        let mut text = String::new();

        loop {
            let rest = self.ops.clone();
            let Some(Operation { operator, operands }) = self.ops.next() else {
                break;
            };

            if let Some((x, y)) = self.move_to(operator, operands) {
                if !text.is_empty() {
                    // Hand the buffered run back first; the move is replayed
                    // on the next call with an empty buffer.
                    self.ops = rest;
                    return Some(self.run(text));
                }
                if operator == "TD" {
                    if let [_, ty] = operands.as_slice() {
                        self.leading = -number(ty);
                    }
                }
                self.line_x = x;
                self.line_y = y;
            }

            match (operator.as_str(), operands.as_slice()) {
                ("BT", _) => {
                    text.clear();
                    self.line_x = 0.0;
                    self.line_y = 0.0;
                }
                ("TL", [tl]) => self.leading = number(tl),
                ("Tj" | "'", [Primitive::String(s)]) => text.push_str(&decode(s)),
                ("\"", [_, _, Primitive::String(s)]) => text.push_str(&decode(s)),
                ("TJ", [Primitive::Array(parts)]) => {
                    for part in parts {
                        match part {
                            Primitive::String(s) => text.push_str(&decode(s)),
                            other => {
                                if number(other) < TJ_SPACE_THRESHOLD {
                                    text.push(' ');
                                }
                            }
                        }
                    }
                }
                ("ET", _) => {
                    if !text.is_empty() {
                        return Some(self.run(text));
                    }
                }
                _ => continue,
            }
        }

        if text.is_empty() {
            None
        } else {
            Some(self.run(text))
        }
    }
}

impl<'src> TextRunParser<'src> {
    fn run(&self, text: String) -> TextRun {
        TextRun {
            x: self.line_x,
            y: self.line_y,
            text,
        }
    }
}

fn number(p: &Primitive) -> f32 {
    p.as_number().unwrap_or(0.0)
}

fn decode(s: &PdfString) -> Cow<'_, str> {
    s.as_str()
        .unwrap_or_else(|_| String::from_utf8_lossy(s.as_bytes()))
}

fn page_text(page: &Page) -> String {
    let content = match &page.contents {
        Some(c) => c,
        None => return String::new(),
    };

    let mut runs = TextRunParser::new(&content.operations).collect::<Vec<TextRun>>();
    trace!(runs = runs.len(), "collected text runs");

    // Top to bottom, then left to right
    runs.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut out = String::new();
    for run in runs {
        let line = run.text.trim();
        if line.is_empty() {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<Primitive>) -> Operation {
        Operation {
            operator: operator.to_string(),
            operands,
        }
    }

    fn string(s: &str) -> Primitive {
        Primitive::String(PdfString::new(s.as_bytes().into()))
    }

    #[test]
    fn each_positioned_run_is_separate() {
        let ops = vec![
            op("BT", vec![]),
            op("Td", vec![Primitive::Number(50.0), Primitive::Number(700.0)]),
            op("Tj", vec![string("Adams, Morgan")]),
            op("Td", vec![Primitive::Number(0.0), Primitive::Number(-14.0)]),
            op("Tj", vec![string("M")]),
            op("ET", vec![]),
        ];

        let runs: Vec<_> = TextRunParser::new(&ops).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Adams, Morgan");
        assert_eq!((runs[0].x, runs[0].y), (50.0, 700.0));
        assert_eq!(runs[1].text, "M");
        assert_eq!(runs[1].y, 686.0);
    }

    #[test]
    fn tj_arrays_join_and_wide_kerning_spaces() {
        let ops = vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Primitive::Array(vec![
                    string("Smi"),
                    Primitive::Integer(-20),
                    string("th,"),
                    Primitive::Number(-450.0),
                    string("Jane"),
                ])],
            ),
            op("ET", vec![]),
        ];

        let runs: Vec<_> = TextRunParser::new(&ops).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Smith, Jane");
    }

    #[test]
    fn empty_text_objects_yield_nothing() {
        let ops = vec![op("BT", vec![]), op("ET", vec![])];
        assert_eq!(TextRunParser::new(&ops).count(), 0);
    }
}
