//! Plain-text summaries printed after each command.

use std::fmt::Write;

use dataset_facade::{Dataset, PrepareReport};

/// Tabular summary of a preparation run.
pub fn render_report(report: &PrepareReport) -> String {
    let mut out = String::new();
    if !report.datasets.is_empty() {
        let _ = writeln!(
            out,
            "{:<9} {:<12} {:>8} {:>9} {:>10}  {}",
            "GROUP", "NAME", "ROWS", "FEATURES", "ANOMALIES", "PATH"
        );
        for d in &report.datasets {
            let _ = writeln!(
                out,
                "{:<9} {:<12} {:>8} {:>9} {:>10}  {}",
                d.group.to_string(),
                d.name,
                d.rows,
                d.features,
                d.anomalies,
                d.path.display()
            );
        }
    }
    for dir in &report.directories {
        let _ = writeln!(
            out,
            "{:<9} {:<12} {:>8} files  {}",
            dir.group.to_string(),
            dir.source,
            dir.files,
            dir.path.display()
        );
    }
    if out.is_empty() {
        out.push_str("nothing prepared\n");
    }
    out
}

/// One-dataset summary for `inspect`.
pub fn render_dataset(dataset: &Dataset) -> String {
    format!(
        "name:          {}\nrows:          {}\nfeatures:      {}\nanomalies:     {}\ncontamination: {:.4}\n",
        dataset.name,
        dataset.n_rows(),
        dataset.n_features(),
        dataset.n_anomalies(),
        dataset.contamination()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_facade::{Group, SavedDataset, UnpackedDir};
    use std::path::PathBuf;

    #[test]
    fn test_render_report() {
        let report = PrepareReport {
            datasets: vec![SavedDataset {
                group: Group::Real,
                name: "shuttle".into(),
                path: PathBuf::from("in/real/shuttle.npz"),
                rows: 46464,
                features: 9,
                anomalies: 878,
            }],
            directories: vec![UnpackedDir {
                group: Group::Nab,
                source: "nab".into(),
                path: PathBuf::from("in/nab"),
                files: 59,
            }],
        };
        let text = render_report(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("GROUP"));
        assert!(lines[1].contains("shuttle"));
        assert!(lines[1].contains("46464"));
        assert!(lines[1].ends_with("in/real/shuttle.npz"));
        assert!(lines[2].contains("59 files"));
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&PrepareReport::default()), "nothing prepared\n");
    }

    #[test]
    fn test_render_dataset() {
        let ds = Dataset::from_rows(
            "moons",
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![5.0, 5.0], vec![0.5, 0.5]],
            vec![false, false, true, false],
        )
        .unwrap();
        let text = render_dataset(&ds);
        assert!(text.contains("rows:          4"));
        assert!(text.contains("anomalies:     1"));
        assert!(text.contains("contamination: 0.2500"));
    }
}
