use coalescer::engine::{normalize_confidence, parse_combination, person_key, validate_opts};
use coalescer::{
    CoalescerError, Destination, Opts, PersonRegistry, RecognizedFace, build_match_config, decide,
};
use rstest::rstest;
use std::path::PathBuf;

fn registry(names: &[&str]) -> PersonRegistry {
    names
        .iter()
        .map(|n| (n.to_string(), vec![format!("{n}_1.jpg")]))
        .collect()
}

// --- normalize_confidence ---

#[rstest]
#[case::typical(70.0, 0.70)]
#[case::lower_bound(1.0, 0.01)]
#[case::upper_bound(99.0, 0.99)]
#[case::zero_falls_back(0.0, 0.50)]
#[case::negative_falls_back(-5.0, 0.50)]
#[case::hundred_falls_back(100.0, 0.50)]
#[case::way_over_falls_back(150.0, 0.50)]
fn test_normalize_confidence(#[case] raw: f64, #[case] expected: f64) {
    assert!((normalize_confidence(raw) - expected).abs() < 1e-9);
}

// --- person_key ---

#[rstest]
#[case("bill_1.jpg", "bill")]
#[case("mark_and_bill.png", "mark")]
#[case("anne-marie_beach_2019.jpg", "anne-marie")]
fn test_person_key(#[case] filename: &str, #[case] expected: &str) {
    assert_eq!(person_key(filename).unwrap(), expected);
}

#[rstest]
#[case("bill.jpg")]
#[case("_bill.jpg")]
#[case::parent_dir(".._1.png")]
#[case::current_dir("._1.png")]
#[case::backslash("a\\b_1.png")]
fn test_person_key_rejects(#[case] filename: &str) {
    assert!(matches!(person_key(filename), Err(CoalescerError::Config(_))));
}

// --- parse_combination ---

#[test]
fn test_parse_combination() {
    assert!(parse_combination("").is_empty());
    assert_eq!(parse_combination("pepe,julia"), vec!["pepe", "julia"]);
    assert_eq!(parse_combination(" pepe , ,julia,"), vec!["pepe", "julia"]);
}

// --- validate_opts ---

fn valid_opts(dir: &std::path::Path) -> Opts {
    let people = dir.join("people_dir");
    let pics = dir.join("pics_dir");
    std::fs::create_dir_all(&people).unwrap();
    std::fs::create_dir_all(&pics).unwrap();
    Opts {
        people_dir: people,
        pics_dir: pics,
        facebox_url: "http://localhost:8080".into(),
        confidence: 70.0,
        combine: "pepe,julia".into(),
        ..Opts::default()
    }
}

#[test]
fn test_validate_happy_path() {
    let dir = tempfile::tempdir().unwrap();
    validate_opts(&valid_opts(dir.path())).unwrap();
}

#[test]
fn test_validate_rejects_missing_people_dir() {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        people_dir: PathBuf::new(),
        ..valid_opts(dir.path())
    };
    assert!(matches!(validate_opts(&opts), Err(CoalescerError::Config(_))));
}

#[test]
fn test_validate_rejects_same_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let base = valid_opts(dir.path());
    let opts = Opts {
        pics_dir: base.people_dir.clone(),
        ..base
    };
    match validate_opts(&opts) {
        Err(CoalescerError::Config(msg)) => assert!(msg.contains("same directory")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_nonexistent_and_file_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir");
    std::fs::write(&file, b"x").unwrap();
    let opts = Opts {
        people_dir: dir.path().join("nope"),
        pics_dir: file,
        ..valid_opts(dir.path())
    };
    match validate_opts(&opts) {
        Err(CoalescerError::Config(msg)) => {
            assert!(msg.contains("does not exist"));
            assert!(msg.contains("is not a directory"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[rstest]
#[case("")]
#[case("localhost")]
#[case("localhost:8080")]
#[case("http://")]
fn test_validate_rejects_bad_url(#[case] url: &str) {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        facebox_url: url.to_string(),
        ..valid_opts(dir.path())
    };
    assert!(matches!(validate_opts(&opts), Err(CoalescerError::Config(_))));
}

#[test]
fn test_validate_rejects_single_combination_name() {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        combine: "pepe".into(),
        ..valid_opts(dir.path())
    };
    assert!(matches!(validate_opts(&opts), Err(CoalescerError::Config(_))));
}

#[test]
fn test_validate_rejects_duplicate_combination_name() {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        combine: "pepe,pepe".into(),
        ..valid_opts(dir.path())
    };
    assert!(matches!(validate_opts(&opts), Err(CoalescerError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_workers() {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        num_workers: 0,
        ..valid_opts(dir.path())
    };
    assert!(matches!(validate_opts(&opts), Err(CoalescerError::Config(_))));
}

// --- build_match_config ---

#[test]
fn test_match_config_transforms() {
    let opts = Opts {
        confidence: 70.0,
        combine: "pepe,julia".into(),
        ..Opts::default()
    };
    let config = build_match_config(&opts, registry(&["pepe", "julia"])).unwrap();
    assert!((config.threshold - 0.70).abs() < 1e-9);
    assert!(config.combined_mode());
    assert_eq!(config.combined_dir_name, "pepe_julia");
    assert_eq!(config.destinations(), vec![Destination::Combined(
        "pepe_julia".into()
    )]);
}

#[test]
fn test_match_config_rejects_unknown_combination_name() {
    let opts = Opts {
        combine: "bill,steve".into(),
        ..Opts::default()
    };
    match build_match_config(&opts, registry(&["bill", "mark"])) {
        Err(CoalescerError::Config(msg)) => assert!(msg.contains("steve")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_single_mode_destinations_are_every_person() {
    let config = build_match_config(&Opts::default(), registry(&["bill", "mark"])).unwrap();
    assert!(!config.combined_mode());
    assert_eq!(config.destinations(), vec![
        Destination::Person("bill".into()),
        Destination::Person("mark".into()),
    ]);
}

// --- decide: single mode ---

#[test]
fn test_single_mode_one_person() {
    let config = build_match_config(&Opts::default(), registry(&["bill", "mark"])).unwrap();
    let faces = [RecognizedFace::matched("bill", 0.70)];
    assert_eq!(decide(&faces, &config), vec![Destination::Person(
        "bill".into()
    )]);
}

#[test]
fn test_single_mode_two_people() {
    let config = build_match_config(&Opts::default(), registry(&["bill", "mark"])).unwrap();
    let faces = [
        RecognizedFace::matched("bill", 0.70),
        RecognizedFace::matched("mark", 0.70),
    ];
    assert_eq!(decide(&faces, &config), vec![
        Destination::Person("bill".into()),
        Destination::Person("mark".into()),
    ]);
}

#[test]
fn test_single_mode_threshold_is_inclusive() {
    let opts = Opts {
        confidence: 70.0,
        ..Opts::default()
    };
    let config = build_match_config(&opts, registry(&["bill", "mark"])).unwrap();
    let faces = [
        RecognizedFace::matched("bill", 0.70),
        RecognizedFace::matched("mark", 0.69),
    ];
    assert_eq!(decide(&faces, &config), vec![Destination::Person(
        "bill".into()
    )]);
}

#[test]
fn test_single_mode_no_faces() {
    let config = build_match_config(&Opts::default(), registry(&["bill"])).unwrap();
    assert!(decide(&[], &config).is_empty());
}

// --- decide: combined mode ---

fn combined(names: &str) -> coalescer::MatchConfig {
    let opts = Opts {
        combine: names.into(),
        ..Opts::default()
    };
    build_match_config(&opts, registry(&["bill", "mark", "steve"])).unwrap()
}

#[test]
fn test_combined_mode_partial_is_no_match() {
    let config = combined("bill,mark");
    let faces = [RecognizedFace::matched("bill", 0.70)];
    assert!(decide(&faces, &config).is_empty());
}

#[test]
fn test_combined_mode_all_present_copies_once() {
    let config = combined("bill,mark");
    let faces = [
        RecognizedFace::matched("mark", 0.70),
        RecognizedFace::matched("steve", 0.90),
        RecognizedFace::matched("bill", 0.70),
    ];
    assert_eq!(decide(&faces, &config), vec![Destination::Combined(
        "bill_mark".into()
    )]);
}

#[test]
fn test_combined_mode_low_confidence_member_is_no_match() {
    let config = combined("bill,mark");
    let faces = [
        RecognizedFace::matched("bill", 0.70),
        RecognizedFace::matched("mark", 0.10),
    ];
    assert!(decide(&faces, &config).is_empty());
}
