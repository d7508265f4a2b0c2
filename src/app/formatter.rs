use crate::app::error::{walk_error_cause, Error};
use crate::app::filters::{
    FilterConfig, BUILTIN_EXCLUDED_DIRECTORIES, BUILTIN_EXCLUDED_FILETYPES,
};
use crate::app::models::{Finding, ScanReport, Summary};
use anyhow::Result;
use pathdiff::diff_paths;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    findings: &'a [Finding],
    summary: Summary,
    issues: Vec<String>,
    elapsed_secs: f64,
}

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_status(root: &Path, filters: &FilterConfig) -> String {
        let join = |items: &[String]| items.join(" ");
        let absolute = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

        format!(
            "[FIXXET] Searching in {} files (excluding files: {}) not in folders ({}) starting from root: {}",
            join(filters.extension_whitelist()),
            join(filters.excluded_filenames()),
            join(filters.excluded_directories()),
            absolute.display()
        )
    }

    pub fn generate_findings(findings: &[Finding]) -> String {
        let mut output = String::from("Found:");
        for finding in findings {
            output.push_str(&format!(
                "\n\t{} on line {}: {}",
                finding.file_name, finding.line_number, finding.text
            ));
        }
        output
    }

    pub fn generate_summary(summary: &Summary, elapsed: Duration) -> String {
        format!(
            "{} TODOs, {} FIXMEs in {:.4}s",
            summary.todos,
            summary.fixmes,
            elapsed.as_secs_f64()
        )
    }

    pub fn generate_issues(root: &Path, issues: &[Error]) -> String {
        if issues.is_empty() {
            return String::new();
        }

        let mut output = format!("{} problem(s) encountered:", issues.len());
        for issue in issues {
            output.push_str("\n\t");
            output.push_str(&describe_issue(root, issue));
        }
        output
    }

    pub fn format_text_output(root: &Path, report: &ScanReport, elapsed: Duration) -> String {
        let mut out = Self::generate_findings(&report.findings);
        out.push('\n');
        out.push_str(&Self::generate_summary(&report.summary, elapsed));

        let issues = Self::generate_issues(root, &report.issues);
        if !issues.is_empty() {
            out.push('\n');
            out.push_str(&issues);
        }
        out
    }

    pub fn format_json_output(
        root: &Path,
        report: &ScanReport,
        elapsed: Duration,
    ) -> Result<String> {
        let json = JsonReport {
            root,
            findings: &report.findings,
            summary: report.summary,
            issues: report
                .issues
                .iter()
                .map(|issue| describe_issue(root, issue))
                .collect(),
            elapsed_secs: elapsed.as_secs_f64(),
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }

    pub fn generate_filter_listing() -> String {
        let mut out = String::from("Filters:\n----------\nDirectories:");
        for dir in BUILTIN_EXCLUDED_DIRECTORIES {
            out.push_str(&format!("\n\t{}", dir));
        }
        out.push_str("\nExtensions:");
        for ext in BUILTIN_EXCLUDED_FILETYPES {
            out.push_str(&format!("\n\t{}", ext));
        }
        out
    }
}

/// Renders an issue with its path shown relative to the scan root.
fn describe_issue(root: &Path, issue: &Error) -> String {
    let relative = issue
        .path()
        .and_then(|path| diff_paths(path, root))
        .filter(|rel| !rel.as_os_str().is_empty());

    match (issue, relative) {
        (Error::Scan { source, .. }, Some(rel)) => format!("{}: {}", rel.display(), source),
        (Error::Traversal(err), Some(rel)) => {
            format!("{}: {}", rel.display(), walk_error_cause(err))
        }
        (_, Some(rel)) => format!("{}: {}", rel.display(), issue),
        (_, None) => issue.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::TagKind;
    use std::path::PathBuf;

    fn finding(file_name: &str, line_number: usize, text: &str, tag_kind: TagKind) -> Finding {
        Finding {
            file_name: file_name.to_string(),
            path: PathBuf::from("proj").join(file_name),
            line_number,
            text: text.to_string(),
            tag_kind,
        }
    }

    #[test]
    fn text_output_lists_findings_and_counts() {
        let report = ScanReport::collect(vec![
            Ok(finding("a.py", 0, "TODO fix this", TagKind::Todo)),
            Ok(finding("x.py", 1, "TODO: b FIXME: c", TagKind::Fixme)),
        ]);
        let out = OutputGenerator::format_text_output(
            Path::new("proj"),
            &report,
            Duration::from_millis(1500),
        );

        assert_eq!(
            out,
            "Found:\n\ta.py on line 0: TODO fix this\n\tx.py on line 1: TODO: b FIXME: c\n1 TODOs, 1 FIXMEs in 1.5000s"
        );
    }

    #[test]
    fn issues_are_listed_relative_to_root() {
        let report = ScanReport::collect(vec![Err(Error::Scan {
            path: PathBuf::from("proj/src/blob.py"),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ),
        })]);
        let out = OutputGenerator::format_text_output(Path::new("proj"), &report, Duration::ZERO);

        assert!(out.ends_with(
            "1 problem(s) encountered:\n\tsrc/blob.py: stream did not contain valid UTF-8"
        ));
        assert!(out.starts_with("Found:\n0 TODOs, 0 FIXMEs"));
    }

    #[test]
    fn traversal_issue_names_its_path_once() {
        let denied = ignore::Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        let report = ScanReport::collect(vec![Err(Error::Traversal(ignore::Error::WithDepth {
            depth: 1,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("proj/locked"),
                err: Box::new(denied),
            }),
        }))]);

        let issues = OutputGenerator::generate_issues(Path::new("proj"), &report.issues);
        assert_eq!(
            issues,
            "1 problem(s) encountered:\n\tlocked: permission denied"
        );
    }

    #[test]
    fn json_output_contains_findings_and_summary() {
        let report = ScanReport::collect(vec![Ok(finding("a.py", 0, "TODO x", TagKind::Todo))]);
        let json = OutputGenerator::format_json_output(Path::new("proj"), &report, Duration::ZERO)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["root"], "proj");
        assert_eq!(value["findings"][0]["file_name"], "a.py");
        assert_eq!(value["findings"][0]["line_number"], 0);
        assert_eq!(value["findings"][0]["tag_kind"], "TODO");
        assert_eq!(value["summary"]["todos"], 1);
        assert_eq!(value["summary"]["fixmes"], 0);
        assert!(value["issues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn filter_listing_names_every_builtin() {
        let listing = OutputGenerator::generate_filter_listing();
        assert!(listing.starts_with("Filters:\n----------\nDirectories:\n\t.git"));
        assert!(listing.contains("\nExtensions:\n\t.md"));
        assert_eq!(
            listing.lines().filter(|l| l.starts_with('\t')).count(),
            BUILTIN_EXCLUDED_DIRECTORIES.len() + BUILTIN_EXCLUDED_FILETYPES.len()
        );
    }

    #[cfg(unix)]
    #[test]
    fn status_line_mentions_filters() {
        let filters = FilterConfig::new(
            vec![".py".to_string(), ".json".to_string()],
            vec!["build".to_string()],
            vec!["skip.py".to_string()],
        )
        .unwrap();
        let status = OutputGenerator::generate_status(Path::new("/tmp/proj"), &filters);
        assert_eq!(
            status,
            "[FIXXET] Searching in .py .json files (excluding files: skip.py) not in folders (build) starting from root: /tmp/proj"
        );
    }
}
