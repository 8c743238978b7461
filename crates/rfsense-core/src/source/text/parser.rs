use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::bits::BitBuffer;
use crate::source::{CaptureEvent, CaptureSource, SourceError};

use super::error::TextSourceError;
use super::reader::capture_text;

/// `CaptureSource` over any buffered reader of text captures.
pub struct TextSource<R> {
    lines: Lines<R>,
    line: usize,
}

pub type TextFileSource = TextSource<BufReader<File>>;

impl<R: BufRead> TextSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl TextSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CaptureSource for TextSource<R> {
    fn next_capture(&mut self) -> Result<Option<CaptureEvent>, SourceError> {
        next_capture(&mut self.lines, &mut self.line).map_err(SourceError::from)
    }
}

fn next_capture<R: BufRead>(
    lines: &mut Lines<R>,
    line: &mut usize,
) -> Result<Option<CaptureEvent>, TextSourceError> {
    for raw in lines.by_ref() {
        let raw = raw?;
        *line += 1;
        let Some(text) = capture_text(&raw) else {
            continue;
        };
        let bits = text
            .parse::<BitBuffer>()
            .map_err(|source| TextSourceError::Parse {
                line: *line,
                source,
            })?;
        return Ok(Some(CaptureEvent { line: *line, bits }));
    }
    Ok(None)
}
