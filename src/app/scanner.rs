use crate::app::error::{Error, Result};
use crate::app::filters::FilterConfig;
use crate::app::lines::scan_file;
use crate::app::models::Finding;
use ignore::{DirEntry, Walk, WalkBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the walker moves through the tree. None of these filter entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Descend into symlinked directories. Symlinked files are scanned
    /// either way.
    pub follow_links: bool,
    /// Sort siblings by file name instead of using directory listing order.
    pub sorted: bool,
    /// Also honour `.gitignore` files.
    pub git_ignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            sorted: false,
            git_ignore: false,
        }
    }
}

/// Depth-first stream of findings below a root directory.
///
/// Files are scanned one at a time as the iterator is advanced. Errors for a
/// single file or directory are yielded in place and the walk continues.
pub struct Traversal {
    root: PathBuf,
    walker: Walk,
    print_filenames: bool,
    pending: std::vec::IntoIter<Finding>,
}

impl Traversal {
    pub fn new(
        root: impl Into<PathBuf>,
        filters: &FilterConfig,
        options: &WalkOptions,
    ) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::PathNotFound(root));
        }

        let filters = Arc::new(filters.clone());
        let print_filenames = filters.print_filenames();

        let mut builder = WalkBuilder::new(&root);
        builder
            .standard_filters(false)
            .git_ignore(options.git_ignore)
            .follow_links(options.follow_links);

        if options.sorted {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        // The root itself is never passed to the filter.
        builder.filter_entry(move |entry| keep_entry(&filters, entry));

        Ok(Self {
            root,
            walker: builder.build(),
            print_filenames,
            pending: Vec::new().into_iter(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn keep_entry(filters: &FilterConfig, entry: &DirEntry) -> bool {
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    let keep = if is_dir {
        match entry.file_name().to_str() {
            Some(name) => filters.allows_dir(name),
            None => true,
        }
    } else {
        filters.allows_file(entry.path())
    };

    if !keep {
        log::debug!(
            "Skipping {} {}",
            if is_dir { "directory" } else { "file" },
            entry.path().display()
        );
    }
    keep
}

/// Whether an unfollowed symlink points at a regular file.
fn resolve_link(path: &Path) -> Result<bool> {
    std::fs::metadata(path)
        .map(|meta| meta.is_file())
        .map_err(|source| Error::Scan {
            path: path.to_path_buf(),
            source,
        })
}

impl Iterator for Traversal {
    type Item = Result<Finding>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(finding) = self.pending.next() {
                return Some(Ok(finding));
            }

            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(Error::Traversal(err))),
            };

            if entry.depth() == 0 {
                continue;
            }
            match entry.file_type() {
                Some(ft) if ft.is_file() => {}
                Some(ft) if ft.is_symlink() => match resolve_link(entry.path()) {
                    Ok(true) => {}
                    Ok(false) => {
                        log::debug!("Skipping link to non-file {}", entry.path().display());
                        continue;
                    }
                    Err(err) => return Some(Err(err)),
                },
                _ => continue,
            }

            if self.print_filenames {
                println!("{}", entry.file_name().to_string_lossy());
            }
            log::debug!("Scanning {}", entry.path().display());

            match scan_file(entry.path()) {
                Ok(findings) => self.pending = findings.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
