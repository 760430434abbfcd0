//! Real-world corpora: KDD Cup 99, Covertype, Statlog Satellite and Shuttle.
//!
//! Rows keep their source order; these datasets are not shuffled.

use dataset_api::SourceUrls;
use dataset_spi::{Dataset, DatasetSource, Fetcher, Group, LabelRule, Result};
use tracing::info;

use crate::decompress::reader_for;
use crate::table::{parse_kdd, parse_uci};

/// Concatenate text payloads, making sure each part ends with a newline.
fn concat_parts(parts: Vec<Vec<u8>>) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(Vec::len).sum::<usize>() + parts.len());
    for part in parts {
        out.extend_from_slice(&part);
        if !part.ends_with(b"\n") && !part.is_empty() {
            out.push(b'\n');
        }
    }
    out
}

/// Fetch and decode every URL, then join them into one table.
fn fetch_joined(fetcher: &dyn Fetcher, urls: &[&str]) -> Result<Vec<u8>> {
    let mut parts = Vec::with_capacity(urls.len());
    for url in urls {
        let raw = fetcher.fetch(url)?;
        let mut decoded = Vec::new();
        std::io::copy(&mut reader_for(&raw)?, &mut decoded)?;
        parts.push(decoded);
    }
    Ok(concat_parts(parts))
}

/// KDD Cup 99 network connections, split into `http` and `smtp` traffic.
#[derive(Debug, Clone)]
pub struct KddCup {
    url: String,
}

impl KddCup {
    pub const SERVICES: [&'static str; 2] = ["http", "smtp"];

    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }
}

impl DatasetSource for KddCup {
    fn name(&self) -> &str {
        "kddcup"
    }

    fn group(&self) -> Group {
        Group::Real
    }

    fn build(&self, fetcher: &dyn Fetcher) -> Result<Vec<Dataset>> {
        info!(url = %self.url, "fetching kddcup");
        let raw = fetcher.fetch(&self.url)?;
        let reader = reader_for(&raw)?;
        parse_kdd(reader, &Self::SERVICES)
    }
}

/// One named class split of a UCI table.
#[derive(Debug, Clone)]
pub struct UciSplit {
    pub name: String,
    pub rule: LabelRule,
}

impl UciSplit {
    pub fn new(name: &str, normal: &[i64], anomalous: &[i64]) -> Self {
        Self {
            name: name.to_string(),
            rule: LabelRule::new(normal.to_vec(), anomalous.to_vec()),
        }
    }
}

/// A UCI table assembled from one or more files, yielding one dataset per split.
#[derive(Debug, Clone)]
pub struct UciTable {
    name: String,
    urls: Vec<String>,
    delimiter: u8,
    splits: Vec<UciSplit>,
}

impl UciTable {
    pub fn new(name: &str, urls: &[&str], delimiter: u8, splits: Vec<UciSplit>) -> Self {
        Self {
            name: name.to_string(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
            delimiter,
            splits,
        }
    }

    /// Forest cover type: spruce/fir (2) against cottonwood/willow (4).
    pub fn covtype(urls: &SourceUrls) -> Self {
        Self::new(
            "covtype",
            &[urls.covtype.as_str()],
            b',',
            vec![UciSplit::new("covtype", &[2], &[4])],
        )
    }

    /// Landsat satellite image patches, training and test files joined.
    pub fn satellite(urls: &SourceUrls) -> Self {
        Self::new(
            "satellite",
            &[urls.sat_trn.as_str(), urls.sat_tst.as_str()],
            b' ',
            vec![
                UciSplit::new("sat1", &[1, 3, 4, 5, 6, 7], &[2]),
                UciSplit::new("sat3", &[1, 3, 6, 7], &[2, 4, 5]),
            ],
        )
    }

    /// Space shuttle radiator positions; the training file is `.Z` compressed.
    pub fn shuttle(urls: &SourceUrls) -> Self {
        Self::new(
            "shuttle",
            &[urls.shuttle_trn.as_str(), urls.shuttle_tst.as_str()],
            b' ',
            vec![UciSplit::new("shuttle", &[1, 4], &[2, 3, 5, 7])],
        )
    }
}

impl DatasetSource for UciTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> Group {
        Group::Real
    }

    fn build(&self, fetcher: &dyn Fetcher) -> Result<Vec<Dataset>> {
        info!(source = %self.name, files = self.urls.len(), "fetching uci table");
        let urls: Vec<&str> = self.urls.iter().map(String::as_str).collect();
        let text = fetch_joined(fetcher, &urls)?;
        self.splits
            .iter()
            .map(|split| parse_uci(&split.name, text.as_slice(), self.delimiter, &split.rule))
            .collect()
    }
}

/// Every real-world source in output order.
pub fn real_sources(urls: &SourceUrls) -> Vec<Box<dyn DatasetSource>> {
    vec![
        Box::new(KddCup::new(&urls.kddcup)),
        Box::new(UciTable::covtype(urls)),
        Box::new(UciTable::satellite(urls)),
        Box::new(UciTable::shuttle(urls)),
    ]
}
