use crate::app::cli::RunArgs;
use crate::app::filters::FilterConfig;
use crate::app::scanner::WalkOptions;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validated inputs for one scan.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub filters: FilterConfig,
    pub walk: WalkOptions,
    pub json_output: bool,
}

/// Flattens repeated flag values, dropping duplicates but keeping order.
fn merge_tokens(values: Option<Vec<String>>) -> Vec<String> {
    let mut combined = values.unwrap_or_default();
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

pub fn resolve_config(args: RunArgs) -> Result<RuntimeConfig> {
    let filters = FilterConfig::new(
        merge_tokens(args.whitelist_ext),
        merge_tokens(args.exclude_dir),
        merge_tokens(args.exclude_file),
    )
    .context("Failed to build filters from command line")?
    .with_print_filenames(args.print_filenames);

    Ok(RuntimeConfig {
        root: args.root.unwrap_or_else(|| PathBuf::from(".")),
        filters,
        walk: WalkOptions {
            follow_links: !args.no_follow_links,
            sorted: args.sorted,
            git_ignore: args.git_ignore,
        },
        json_output: args.json,
    })
}
