//! End-to-end tests for dataset-facade
//!
//! Runs the full preparation pipeline against local fixtures.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use dataset_facade::{
    load_series, load_windows, read_npz, FileFetcher, Group, NpzStore, PrepareConfigBuilder,
    Preparer, SourceUrls,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use zip::write::FileOptions;
use zip::ZipWriter;

fn gzip(text: &str) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap()
}

fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn kdd_line(service: &str, label: &str) -> String {
    let numbers = vec!["0"; 37].join(",");
    format!("0,tcp,{},SF,{},{}", service, numbers, label)
}

fn write_fixtures(dir: &Path) {
    let kdd = [
        kdd_line("http", "normal."),
        kdd_line("smtp", "normal."),
        kdd_line("smtp", "neptune."),
    ]
    .join("\n");
    fs::write(dir.join("kdd.gz"), gzip(&kdd)).unwrap();
    fs::write(dir.join("covtype.gz"), gzip("1,1,2\n2,2,4\n")).unwrap();
    fs::write(dir.join("sat.trn"), "1 1 1\n2 2 2\n").unwrap();
    fs::write(dir.join("sat.tst"), "3 3 4\n").unwrap();
    fs::write(dir.join("shuttle.trn"), "1 1\n").unwrap();
    fs::write(dir.join("shuttle.tst"), "2 3\n").unwrap();

    fs::write(
        dir.join("nab.zip"),
        zip_of(&[
            (
                "NAB-master/data/realKnownCause/machine_temperature.csv",
                "timestamp,value\n2013-12-02 21:15:00,73.96\n2013-12-02 21:20:00,74.93\n",
            ),
            (
                "NAB-master/labels/combined_windows.json",
                r#"{"realKnownCause/machine_temperature.csv": [["2013-12-10 06:25:00.000000", "2013-12-12 05:35:00.000000"]]}"#,
            ),
            ("NAB-master/nab/runner.py", "pass"),
        ]),
    )
    .unwrap();

    fs::write(dir.join("darpa.csv.zip"), zip_of(&[("darpa.csv", "1,2,3,0\n")])).unwrap();
}

fn urls() -> SourceUrls {
    SourceUrls {
        kddcup: "kdd.gz".into(),
        covtype: "covtype.gz".into(),
        sat_trn: "sat.trn".into(),
        sat_tst: "sat.tst".into(),
        shuttle_trn: "shuttle.trn".into(),
        shuttle_tst: "shuttle.tst".into(),
        nab_archive: "file://nab.zip".into(),
    }
}

#[test]
fn test_prepare_every_group() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let out = dir.path().join("in");

    let config = PrepareConfigBuilder::new()
        .output_root(&out)
        .seed(42)
        .toy_sizes(100, 10)
        .sources(urls())
        .graph_archives(vec![dir.path().join("darpa.csv.zip")])
        .build()
        .unwrap();
    let preparer = Preparer::with_parts(
        config,
        Box::new(FileFetcher::with_base(dir.path())),
        Box::new(NpzStore::new(&out)),
    );

    let report = preparer.run(&Group::ALL).unwrap();

    let names: Vec<&str> = report.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "http", "smtp", "covtype", "sat1", "sat3", "shuttle", "blobs", "circles", "moons",
            "s-curve", "swiss-roll", "two_blobs",
        ]
    );
    for saved in &report.datasets {
        assert!(saved.path.exists(), "{} missing", saved.path.display());
    }

    let smtp = read_npz(&out.join("real/smtp.npz")).unwrap();
    assert_eq!(smtp.n_rows(), 2);
    assert_eq!(smtp.n_anomalies(), 1);

    let moons = read_npz(&out.join("toy/moons.npz")).unwrap();
    assert_eq!(moons.n_rows(), 110);
    assert_eq!(moons.n_anomalies(), 10);

    let blobs = read_npz(&out.join("examples/two_blobs.npz")).unwrap();
    assert_eq!(blobs.n_rows(), 10_050);

    assert_eq!(report.directories.len(), 2);
    assert!(out.join("graph/darpa.csv").exists());

    let windows = load_windows(&out.join("nab/labels/combined_windows.json")).unwrap();
    let key = ("realKnownCause".to_string(), "machine_temperature".to_string());
    assert_eq!(windows[&key].len(), 1);

    let (timestamps, values) =
        load_series(&out.join("nab/data/realKnownCause/machine_temperature.csv")).unwrap();
    assert_eq!(timestamps.len(), 2);
    assert!((values[1] - 74.93).abs() < 1e-9);
    assert!(!out.join("nab/nab").exists());
}

#[test]
fn test_seeded_runs_match() {
    let dir = tempfile::tempdir().unwrap();

    let run = |sub: &str| {
        let out = dir.path().join(sub);
        let config = PrepareConfigBuilder::new()
            .output_root(&out)
            .seed(9)
            .toy_sizes(60, 6)
            .build()
            .unwrap();
        let preparer = Preparer::with_parts(
            config,
            Box::new(FileFetcher::new()),
            Box::new(NpzStore::new(&out)),
        );
        preparer.run(&[Group::Toy]).unwrap();
        read_npz(&out.join("toy/swiss-roll.npz")).unwrap()
    };

    assert_eq!(run("a"), run("b"));
}
