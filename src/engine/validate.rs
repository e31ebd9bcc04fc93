//! Option validation, run once before any service call or file work.

use std::collections::HashSet;
use std::path::Path;

use crate::engine::tools::parse_combination;
use crate::{CoalescerError, Opts, Result};

fn check_dir(path: &Path, flag: &str, problems: &mut Vec<String>) {
    if path.as_os_str().is_empty() {
        problems.push(format!("{flag} is not defined"));
        return;
    }
    match std::fs::metadata(path) {
        Err(_) => problems.push(format!(
            "directory {} given by {flag} does not exist",
            path.display()
        )),
        Ok(meta) if !meta.is_dir() => problems.push(format!(
            "{} given by {flag} is not a directory",
            path.display()
        )),
        Ok(_) => {}
    }
}

fn check_url(raw: &str, problems: &mut Vec<String>) {
    match reqwest::Url::parse(raw) {
        Err(e) => problems.push(format!("cannot parse facebox url {raw:?}: {e}")),
        Ok(url) if url.host_str().is_none() => problems.push(format!(
            "malformed facebox url {raw:?}; try something like http://localhost:8080"
        )),
        Ok(_) => {}
    }
}

fn check_combination(raw: &str, problems: &mut Vec<String>) {
    let names = parse_combination(raw);
    if names.len() == 1 {
        problems.push(
            "combine needs at least two names to match multiple people in each picture"
                .to_string(),
        );
    }
    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            problems.push(format!("combine lists {name} more than once"));
        }
    }
}

/// Collect every problem with `opts` and fail with one [`CoalescerError::Config`] listing them all.
pub fn validate_opts(opts: &Opts) -> Result<()> {
    let mut problems = Vec::new();

    check_dir(&opts.people_dir, "peopledir", &mut problems);
    check_dir(&opts.pics_dir, "picsdir", &mut problems);
    if !opts.people_dir.as_os_str().is_empty() && opts.people_dir == opts.pics_dir {
        problems.push("peopledir and picsdir cannot point to the same directory".to_string());
    }
    check_url(&opts.facebox_url, &mut problems);
    check_combination(&opts.combine, &mut problems);
    if opts.num_workers == 0 {
        problems.push("workers must be at least 1".to_string());
    }

    if problems.is_empty() {
        return Ok(());
    }
    Err(CoalescerError::Config(problems.join("; ")))
}
