//! Matching policy: which folders a checked photo is copied into.
//!
//! Single mode copies into the folder of every registered person with a qualifying face.
//! Combined mode is all-or-nothing: one copy into the shared folder when every combination
//! name has a qualifying face, none otherwise.

use log::warn;

use crate::engine::tools::{normalize_confidence, parse_combination};
use crate::{CoalescerError, Destination, MatchConfig, Opts, PersonRegistry, RecognizedFace, Result};

/// Build the run's [`MatchConfig`]. Fails when a combination name has no reference photos.
pub fn build_match_config(opts: &Opts, people: PersonRegistry) -> Result<MatchConfig> {
    let combination = parse_combination(&opts.combine);
    if combination.len() == 1 {
        return Err(CoalescerError::Config(
            "combine needs at least two names".to_string(),
        ));
    }
    let unknown: Vec<&str> = combination
        .iter()
        .filter(|name| !people.contains_key(name.as_str()))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(CoalescerError::Config(format!(
            "combine names without reference photos: {}",
            unknown.join(", ")
        )));
    }
    if opts.rigid && combination.is_empty() {
        warn!("rigid only applies to combined matching; ignoring it");
    }
    Ok(MatchConfig {
        threshold: normalize_confidence(opts.confidence),
        combined_dir_name: combination.join("_"),
        rigid: opts.rigid && !combination.is_empty(),
        people,
        combination,
    })
}

fn qualifies(face: &RecognizedFace, threshold: f64) -> bool {
    face.matched && face.confidence >= threshold
}

/// Destinations for one photo. Empty means no match; the caller decides how to report it.
pub fn decide(faces: &[RecognizedFace], config: &MatchConfig) -> Vec<Destination> {
    if config.combined_mode() {
        decide_combined(faces, config)
    } else {
        decide_single(faces, config)
    }
}

fn decide_single(faces: &[RecognizedFace], config: &MatchConfig) -> Vec<Destination> {
    let mut out: Vec<Destination> = Vec::new();
    for face in faces {
        if !qualifies(face, config.threshold) || !config.people.contains_key(&face.name) {
            continue;
        }
        let dest = Destination::Person(face.name.clone());
        if !out.contains(&dest) {
            out.push(dest);
        }
    }
    out
}

fn decide_combined(faces: &[RecognizedFace], config: &MatchConfig) -> Vec<Destination> {
    let all_present = config.combination.iter().all(|name| {
        faces
            .iter()
            .any(|f| qualifies(f, config.threshold) && &f.name == name)
    });
    if !all_present {
        return Vec::new();
    }
    if config.rigid {
        let only_members = faces
            .iter()
            .all(|f| qualifies(f, config.threshold) && config.combination.contains(&f.name));
        if !only_members {
            return Vec::new();
        }
    }
    vec![Destination::Combined(config.combined_dir_name.clone())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> PersonRegistry {
        names
            .iter()
            .map(|n| (n.to_string(), vec![format!("{n}_1.jpg")]))
            .collect()
    }

    #[test]
    fn duplicate_faces_copy_once() {
        let config = build_match_config(&Opts::default(), people(&["bill"])).unwrap();
        let faces = [
            RecognizedFace::matched("bill", 0.9),
            RecognizedFace::matched("bill", 0.8),
        ];
        assert_eq!(decide(&faces, &config), vec![Destination::Person(
            "bill".into()
        )]);
    }

    #[test]
    fn unregistered_name_is_ignored() {
        let config = build_match_config(&Opts::default(), people(&["bill"])).unwrap();
        let faces = [RecognizedFace::matched("steve", 0.9)];
        assert!(decide(&faces, &config).is_empty());
    }

    #[test]
    fn unmatched_face_is_ignored_even_with_high_confidence() {
        let config = build_match_config(&Opts::default(), people(&["bill"])).unwrap();
        let faces = [RecognizedFace {
            matched: false,
            ..RecognizedFace::matched("bill", 0.99)
        }];
        assert!(decide(&faces, &config).is_empty());
    }

    #[test]
    fn rigid_rejects_strangers() {
        let opts = Opts {
            combine: "bill,mark".into(),
            rigid: true,
            ..Opts::default()
        };
        let config = build_match_config(&opts, people(&["bill", "mark"])).unwrap();
        let mut faces = vec![
            RecognizedFace::matched("bill", 0.7),
            RecognizedFace::matched("mark", 0.7),
        ];
        assert_eq!(decide(&faces, &config), vec![Destination::Combined(
            "bill_mark".into()
        )]);
        faces.push(RecognizedFace {
            matched: false,
            ..RecognizedFace::default()
        });
        assert!(decide(&faces, &config).is_empty());
    }

    #[test]
    fn rigid_is_dropped_in_single_mode() {
        let opts = Opts {
            rigid: true,
            ..Opts::default()
        };
        let config = build_match_config(&opts, people(&["bill"])).unwrap();
        assert!(!config.rigid);
    }
}
