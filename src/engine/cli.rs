//! CLI command handler: layer the settings, connect to the service, sort, report.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::Opts;
use crate::coalesce::coalesce_with;
use crate::engine::arg_parser::Cli;
use crate::engine::progress::{create_counter, refresh_bar, update_progress_bar};
use crate::pipeline::log_report;
use crate::recognizer::FaceboxClient;
use crate::utils::{apply_file_to_opts, facebox_url_from_env, load_coalescer_toml, setup_logging};

/// Overwrite opts field from the CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Defaults → `coalescer.toml` in `cwd` → env / `.env` (service URL) → CLI flags.
pub fn build_opts(cli: &Cli, cwd: &Path) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = load_coalescer_toml(cwd) {
        apply_file_to_opts(&file, &mut opts);
    }
    if let Some(url) = facebox_url_from_env(cwd) {
        opts.facebox_url = url;
    }
    apply_cli_opt!(cli, opts, people_dir => people_dir);
    apply_cli_opt!(cli, opts, pics_dir => pics_dir);
    apply_cli_opt!(cli, opts, output_dir => output_dir);
    apply_cli_opt!(cli, opts, facebox_url => facebox_url);
    apply_cli_opt!(cli, opts, confidence => confidence);
    apply_cli_opt!(cli, opts, combine => combine);
    apply_cli_opt!(cli, opts, cooldown => cooldown);
    apply_cli_opt!(cli, opts, rigid => rigid);
    apply_cli_opt!(cli, opts, workers => num_workers);
    apply_cli_opt!(cli, opts, timeout => timeout_secs);
    apply_cli_opt!(cli, opts, list => list_paths);
    apply_cli_opt!(cli, opts, verbose => verbose);
    opts
}

/// Run a sort with the Facebox client. Fatal errors come back as `Err`; per-file failures are
/// only reported.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let opts = build_opts(cli, &cwd);
    setup_logging(opts.verbose);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let client = FaceboxClient::new(&opts.facebox_url, Duration::from_secs(opts.timeout_secs))
        .context("set up recognition client")?;

    let bar = opts.verbose.then(|| {
        let b = create_counter("Coalescing");
        refresh_bar(&b);
        b
    });
    let report = coalesce_with(&opts, Arc::new(client), |_| {
        if let Some(ref b) = bar {
            update_progress_bar(b, 1);
        }
    })?;
    if bar.is_some() {
        eprintln!();
    }

    log_report(&report, opts.list_paths, &opts.output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("coalescer.toml"),
            "[settings]\npicsdir = \"from_file\"\nworkers = 3\nconfidence = 80\n",
        )
        .unwrap();
        let cli = Cli::parse_from(["coalescer", "--picsdir", "from_cli", "--confidence", "70"]);
        let opts = build_opts(&cli, dir.path());
        assert_eq!(opts.pics_dir, PathBuf::from("from_cli"));
        assert_eq!(opts.confidence, 70.0);
        assert_eq!(opts.num_workers, 3);
    }
}
