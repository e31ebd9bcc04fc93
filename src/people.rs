//! People directory: build the registry of reference photos and teach them to the service.

use log::{debug, info};
use std::path::Path;
use std::time::Duration;
use walkdir::WalkDir;

use crate::engine::tools::{is_os_hidden_file, person_key, sniff_image};
use crate::recognizer::Recognizer;
use crate::{CoalescerError, PersonRegistry, Result};

/// Scan the top level of `people_dir` (subdirectories are skipped). Every file must be a
/// JPEG/PNG named `<name>_<anything>.<ext>`; OS metadata files are ignored.
pub fn scan_people(people_dir: &Path) -> Result<PersonRegistry> {
    let mut people = PersonRegistry::new();
    let walker = WalkDir::new(people_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| {
            CoalescerError::Config(format!("reading {}: {e}", people_dir.display()))
        })?;
        if !entry.file_type().is_file() || is_os_hidden_file(entry.path()) {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        let bytes = std::fs::read(entry.path()).map_err(|e| CoalescerError::io(entry.path(), e))?;
        if sniff_image(&bytes).is_none() {
            return Err(CoalescerError::Config(format!(
                "{} in the people dir is not a jpeg or png image",
                entry.path().display()
            )));
        }
        let name = person_key(&filename)?.to_string();
        people.entry(name).or_default().push(filename);
    }
    debug!(
        "people: {}",
        people.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok(people)
}

/// Teach every reference photo, sequentially. Any failure aborts: a missing sample would
/// skew every later match. Sleeps `cooldown` afterwards when given. Returns the sample count.
pub fn teach_people<R: Recognizer + ?Sized>(
    recognizer: &R,
    people_dir: &Path,
    people: &PersonRegistry,
    cooldown: Option<Duration>,
) -> Result<usize> {
    let mut taught = 0;
    for (name, files) in people {
        for filename in files {
            let path = people_dir.join(filename);
            let bytes = std::fs::read(&path).map_err(|e| CoalescerError::io(&path, e))?;
            recognizer.teach(&bytes, filename, name)?;
            debug!("taught {} as {}", filename, name);
            taught += 1;
        }
    }
    info!("Taught {} photos of {} people", taught, people.len());
    if let Some(pause) = cooldown {
        info!("Cooling down for {:?} so the service can assimilate", pause);
        std::thread::sleep(pause);
    }
    Ok(taught)
}
