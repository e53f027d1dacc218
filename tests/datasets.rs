use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use bbox_dataset::{
    generate_datasets, read_dataset_file, scan_datasets, DatasetError, ExistingFolderPolicy,
    GeneratorConfig, COORD_MAX,
};

fn config(root: &Path, sizes: Vec<usize>, folders: usize) -> GeneratorConfig {
    GeneratorConfig {
        root: root.to_path_buf(),
        sizes,
        folders,
        seed: None,
        on_existing: ExistingFolderPolicy::Stop,
    }
}

/// Every file under `root`, relative to it.
fn tree(root: &Path) -> BTreeSet<PathBuf> {
    let mut out = BTreeSet::new();
    for folder in fs::read_dir(root).unwrap() {
        let folder = folder.unwrap().path();
        out.insert(folder.strip_prefix(root).unwrap().to_path_buf());
        if folder.is_dir() {
            for file in fs::read_dir(&folder).unwrap() {
                let file = file.unwrap().path();
                out.insert(file.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    out
}

#[test]
fn one_folder_two_sizes() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let report = generate_datasets(&config(temp.path(), vec![100, 500], 1)).unwrap();
    assert_eq!(report.rows, 600);

    let expected: BTreeSet<PathBuf> = ["data_1", "data_1/100.csv", "data_1/500.csv"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(tree(temp.path()), expected);

    for size in [100, 500] {
        let path = temp.path().join(format!("data_1/{size}.csv"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), size);
        assert!(text.ends_with("\r\n"));
        assert_eq!(text.matches("\r\n").count(), size);

        for (i, line) in text.lines().enumerate() {
            let fields: Vec<u32> = line.split(',').map(|f| f.parse().unwrap()).collect();
            assert_eq!(fields.len(), 5, "{line}");
            assert_eq!(fields[0] as usize, i + 1);

            let (x_min, y_min, x_max, y_max) = (fields[1], fields[2], fields[3], fields[4]);
            assert!(x_min < x_max && x_max <= COORD_MAX, "{line}");
            assert!(y_min <= y_max && y_max <= COORD_MAX, "{line}");
        }
    }
}

#[test]
fn repeated_runs_share_structure() {
    let a = tempfile::tempdir().expect("create temp dir");
    let b = tempfile::tempdir().expect("create temp dir");

    generate_datasets(&config(a.path(), vec![1000, 10], 2)).unwrap();
    generate_datasets(&config(b.path(), vec![1000, 10], 2)).unwrap();

    assert_eq!(tree(a.path()), tree(b.path()));

    let first = fs::read_to_string(a.path().join("data_1/1000.csv")).unwrap();
    let second = fs::read_to_string(b.path().join("data_1/1000.csv")).unwrap();
    assert_eq!(first.lines().count(), second.lines().count());
    assert_ne!(first, second);
}

#[test]
fn seeded_runs_are_identical() {
    let a = tempfile::tempdir().expect("create temp dir");
    let b = tempfile::tempdir().expect("create temp dir");

    for root in [a.path(), b.path()] {
        let config = GeneratorConfig {
            seed: Some(2024),
            ..config(root, vec![50], 2)
        };
        generate_datasets(&config).unwrap();
    }

    for file in ["data_1/50.csv", "data_2/50.csv"] {
        assert_eq!(
            fs::read(a.path().join(file)).unwrap(),
            fs::read(b.path().join(file)).unwrap()
        );
    }
}

#[test]
fn existing_first_folder_stops_everything() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir(temp.path().join("data_1")).unwrap();

    let err = generate_datasets(&config(temp.path(), vec![100, 500], 3)).unwrap_err();
    assert!(matches!(err, DatasetError::FolderExists { .. }), "{err:?}");

    let expected: BTreeSet<PathBuf> = [PathBuf::from("data_1")].into_iter().collect();
    assert_eq!(tree(temp.path()), expected);
}

#[test]
fn skip_leaves_existing_folder_alone() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir(temp.path().join("data_1")).unwrap();
    fs::write(temp.path().join("data_1/keep.txt"), "mine").unwrap();

    let config = GeneratorConfig {
        on_existing: ExistingFolderPolicy::Skip,
        ..config(temp.path(), vec![10], 3)
    };
    let report = generate_datasets(&config).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.files.len(), 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("data_1/keep.txt")).unwrap(),
        "mine"
    );
    assert!(!temp.path().join("data_1/10.csv").exists());
    assert!(temp.path().join("data_2/10.csv").exists());
    assert!(temp.path().join("data_3/10.csv").exists());
}

#[test]
fn scanner_accepts_generated_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    generate_datasets(&config(temp.path(), vec![250, 5, 0], 3)).unwrap();

    let summaries = scan_datasets(temp.path(), 3, &[5, 250, 0]).unwrap();
    assert_eq!(summaries.len(), 9);

    let order: Vec<(usize, usize)> = summaries.iter().map(|s| (s.folder, s.size)).collect();
    assert_eq!(
        order,
        vec![
            (1, 5),
            (1, 250),
            (1, 0),
            (2, 5),
            (2, 250),
            (2, 0),
            (3, 5),
            (3, 250),
            (3, 0)
        ]
    );
    for s in &summaries {
        assert_eq!(s.rows, s.size);
    }

    let rows = read_dataset_file(&temp.path().join("data_2/250.csv")).unwrap();
    let indices: Vec<u64> = rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, (1..=250).collect::<Vec<u64>>());
}
