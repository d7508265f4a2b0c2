use crate::app::error::{Error, Result};
use crate::app::models::{Finding, TagKind};
use std::fs;
use std::path::Path;

/// Reads one file and returns its tagged lines in ascending line order.
///
/// The file is read in full and closed before any line is examined.
pub fn scan_file(path: &Path) -> Result<Vec<Finding>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Scan {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(scan_text(path, &file_name, &content))
}

pub fn scan_text(path: &Path, file_name: &str, content: &str) -> Vec<Finding> {
    physical_lines(content)
        .enumerate()
        .filter_map(|(line_number, line)| {
            TagKind::classify(line).map(|tag_kind| Finding {
                file_name: file_name.to_string(),
                path: path.to_path_buf(),
                line_number,
                text: strip_leading_spaces(line).to_string(),
                tag_kind,
            })
        })
        .collect()
}

/// Removes leading space characters. Tabs and other whitespace are kept.
pub fn strip_leading_spaces(line: &str) -> &str {
    line.trim_start_matches(' ')
}

/// Splits on `\r\n`, `\n` and `\r`. A final terminator does not start an
/// extra empty line.
pub fn physical_lines(content: &str) -> PhysicalLines<'_> {
    PhysicalLines { rest: content }
}

pub struct PhysicalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &self.rest[..idx];
                let terminator = if self.rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[idx + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
