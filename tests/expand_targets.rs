use std::error::Error;
use std::fs;

use watchmon::config::{MonitorDefinition, MonitorKey, SearchDefinition};
use watchmon::errors::ErrorMode;
use watchmon::watch::{expand_all, expand_definition};

type TestResult = Result<(), Box<dyn Error>>;

fn defn(name: &str, searches: Vec<SearchDefinition>) -> MonitorDefinition {
    MonitorDefinition {
        key: MonitorKey {
            source: "test.yaml".into(),
            name: name.into(),
        },
        skipped: vec![],
        started: vec![],
        commands: vec![],
        completed: vec![],
        error: vec![],
        searches,
    }
}

fn search(paths: Vec<String>) -> SearchDefinition {
    SearchDefinition {
        name: None,
        paths,
        patterns: vec![],
    }
}

#[test]
fn recursive_glob_with_n_matches_produces_n_targets() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("src/nested"))?;
    fs::write(dir.path().join("src/one.py"), "")?;
    fs::write(dir.path().join("src/nested/two.py"), "")?;
    fs::write(dir.path().join("src/readme.md"), "")?;

    let pattern = dir
        .path()
        .join("src/**/*.py")
        .to_string_lossy()
        .into_owned();
    let monitor = defn("build", vec![search(vec![pattern])]);

    let targets = expand_definition(&monitor, ErrorMode::Lenient)?;
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.key == monitor.key));

    Ok(())
}

#[test]
fn empty_glob_is_skipped_leniently_but_fatal_in_strict() -> TestResult {
    let dir = tempfile::tempdir()?;
    let missing = dir
        .path()
        .join("nothing/**/*.py")
        .to_string_lossy()
        .into_owned();
    let existing = dir.path().to_string_lossy().into_owned();

    let monitor = defn("build", vec![search(vec![missing, existing])]);

    // Lenient: the empty glob is reported and skipped; the remaining
    // glob still yields its target.
    let targets = expand_definition(&monitor, ErrorMode::Lenient)?;
    assert_eq!(targets.len(), 1);

    assert!(expand_definition(&monitor, ErrorMode::Strict).is_err());

    Ok(())
}

#[test]
fn targets_are_attributed_to_their_owning_definition() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("a"))?;
    fs::create_dir_all(dir.path().join("b"))?;

    let a_path = dir.path().join("a").to_string_lossy().into_owned();
    let b_path = dir.path().join("b").to_string_lossy().into_owned();

    let defn_a = defn("alpha", vec![search(vec![a_path.clone()])]);
    let defn_b = defn("beta", vec![search(vec![b_path.clone()])]);

    let targets = expand_all(&[defn_a.clone(), defn_b.clone()], ErrorMode::Lenient)?;
    assert_eq!(targets.len(), 2);

    let owner_of_a = targets
        .iter()
        .find(|t| t.path.to_string_lossy() == a_path)
        .unwrap();
    assert_eq!(owner_of_a.key, defn_a.key);

    let owner_of_b = targets
        .iter()
        .find(|t| t.path.to_string_lossy() == b_path)
        .unwrap();
    assert_eq!(owner_of_b.key, defn_b.key);

    Ok(())
}

#[test]
fn invalid_pattern_skips_search_leniently_but_fatal_in_strict() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().to_string_lossy().into_owned();

    let monitor = defn(
        "build",
        vec![SearchDefinition {
            name: None,
            paths: vec![path],
            patterns: vec!["[unclosed".into()],
        }],
    );

    let targets = expand_definition(&monitor, ErrorMode::Lenient)?;
    assert!(targets.is_empty());

    assert!(expand_definition(&monitor, ErrorMode::Strict).is_err());

    Ok(())
}
