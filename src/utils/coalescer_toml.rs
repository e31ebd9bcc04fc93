//! Load `coalescer.toml` from a directory (CLI only). The lib takes everything through [`Opts`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct CoalescerToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    peopledir: Option<String>,
    picsdir: Option<String>,
    output_dir: Option<String>,
    faceboxurl: Option<String>,
    confidence: Option<f64>,
    combine: Option<String>,
    cooldown: Option<bool>,
    rigid: Option<bool>,
    workers: Option<usize>,
    timeout: Option<u64>,
    verbose: Option<bool>,
    list: Option<bool>,
}

/// Load `coalescer.toml` from `dir` if present. None if missing; parse errors are logged and ignored.
pub fn load_coalescer_toml(dir: &Path) -> Option<CoalescerToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_coalescer_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_coalescer_toml(s: &str) -> Result<CoalescerToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($file:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(v) = $file.$file_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file settings to opts (only the keys present). Call before applying env and CLI.
pub fn apply_file_to_opts(file: &CoalescerToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref p) = s.peopledir {
        opts.people_dir = PathBuf::from(p);
    }
    if let Some(ref p) = s.picsdir {
        opts.pics_dir = PathBuf::from(p);
    }
    if let Some(ref p) = s.output_dir {
        opts.output_dir = PathBuf::from(p);
    }
    apply_file_opt!(s, opts, faceboxurl => facebox_url);
    apply_file_opt!(s, opts, confidence => confidence);
    apply_file_opt!(s, opts, combine => combine);
    apply_file_opt!(s, opts, cooldown => cooldown);
    apply_file_opt!(s, opts, rigid => rigid);
    apply_file_opt!(s, opts, workers => num_workers);
    apply_file_opt!(s, opts, timeout => timeout_secs);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, list => list_paths);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_only_present_keys() {
        let file = parse_coalescer_toml(
            r#"
            [settings]
            picsdir = "pics"
            confidence = 70
            combine = "bill,mark"
            workers = 4
            "#,
        )
        .unwrap();
        let mut opts = Opts {
            people_dir: PathBuf::from("people"),
            ..Opts::default()
        };
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.people_dir, PathBuf::from("people"));
        assert_eq!(opts.pics_dir, PathBuf::from("pics"));
        assert_eq!(opts.confidence, 70.0);
        assert_eq!(opts.combine, "bill,mark");
        assert_eq!(opts.num_workers, 4);
        assert!(opts.cooldown);
    }

    #[test]
    fn empty_file_is_valid() {
        let file = parse_coalescer_toml("").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.num_workers, crate::utils::config::Defaults::WORKERS);
    }
}
