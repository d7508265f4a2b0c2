use crate::app::error::Error;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Kind of annotation marker found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagKind {
    Todo,
    Fixme,
}

impl TagKind {
    pub const fn marker(self) -> &'static str {
        match self {
            TagKind::Todo => "TODO",
            TagKind::Fixme => "FIXME",
        }
    }

    /// Classifies a line by plain substring search.
    ///
    /// `FIXME` wins over `TODO` when both occur on the same line.
    pub fn classify(line: &str) -> Option<TagKind> {
        if line.contains(TagKind::Fixme.marker()) {
            Some(TagKind::Fixme)
        } else if line.contains(TagKind::Todo.marker()) {
            Some(TagKind::Todo)
        } else {
            None
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// One tagged line discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Base name of the file containing the line.
    pub file_name: String,
    pub path: PathBuf,
    /// Zero-based.
    pub line_number: usize,
    /// Line content with leading spaces removed.
    pub text: String,
    pub tag_kind: TagKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub todos: usize,
    pub fixmes: usize,
}

impl Summary {
    pub fn record(&mut self, finding: &Finding) {
        match finding.tag_kind {
            TagKind::Todo => self.todos += 1,
            TagKind::Fixme => self.fixmes += 1,
        }
    }
}

/// Everything a run produced: findings in traversal order plus the
/// per-entry problems that did not stop it.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub findings: Vec<Finding>,
    pub issues: Vec<Error>,
    pub summary: Summary,
}

impl ScanReport {
    pub fn collect<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<Finding, Error>>,
    {
        let mut report = ScanReport::default();
        for result in results {
            match result {
                Ok(finding) => {
                    report.summary.record(&finding);
                    report.findings.push(finding);
                }
                Err(err) => report.issues.push(err),
            }
        }
        report
    }
}
