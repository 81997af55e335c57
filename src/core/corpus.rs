//! Loading, fetching and caching of release information.
//!
//! Release information consists of `versions.json`, `checksums.json` and
//! `files.json`, plus a `checksums.txt` listing the SHA-256 of each document.
//! Downloaded documents are verified against `checksums.txt` before anything
//! is written to the cache.
//!
//! # Public API
//! - [`Fetch`]: Byte source for remote documents, [`HttpFetcher`] in production
//! - [`ReleaseCache`]: Cache directory for one endpoint and release tag
//! - [`load_corpus_from_dir`], [`write_corpus`]: Directory I/O
//! - [`load_corpus`]: Online/offline resolution used by `analyze`

use crate::core::error::{AnalyzerError, Result};
use crate::core::scanner::bytes_checksum;
use crate::core::vcf::{ChecksumsDocument, Corpus, FilesDocument, VersionsDocument};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const VERSIONS_JSON: &str = "versions.json";
pub const CHECKSUMS_JSON: &str = "checksums.json";
pub const FILES_JSON: &str = "files.json";
pub const CHECKSUMS_TXT: &str = "checksums.txt";
pub const DOCUMENTS: [&str; 3] = [CHECKSUMS_JSON, FILES_JSON, VERSIONS_JSON];

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of remote bytes.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Fetching {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| AnalyzerError::download(url, e.to_string()))?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| AnalyzerError::download(url, e.to_string()))?;
        Ok(bytes)
    }
}

/// Cache location for one release endpoint and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCache {
    dir: PathBuf,
}

impl ReleaseCache {
    /// `<cache_root>/release-information/<md5(base_url)>/<tag>`
    pub fn new(cache_root: &Path, base_url: &str, tag: &str) -> Self {
        let url_hash = format!("{:x}", md5::compute(base_url.as_bytes()));
        Self {
            dir: cache_root
                .join("release-information")
                .join(url_hash)
                .join(tag),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All three documents are present.
    pub fn is_complete(&self) -> bool {
        DOCUMENTS.iter().all(|name| self.dir.join(name).is_file())
    }

    pub fn load(&self) -> Result<Corpus> {
        load_corpus_from_dir(&self.dir)
    }

    /// Download every document, verify it against `checksums.txt`, then store
    /// all of them. Nothing is written unless every document verifies.
    pub fn refresh(&self, base_url: &str, fetcher: &dyn Fetch) -> Result<()> {
        let base_url = base_url.trim_end_matches('/');
        let checksums_txt = fetcher.fetch(&format!("{base_url}/{CHECKSUMS_TXT}"))?;
        let expected = parse_checksums_txt(&String::from_utf8_lossy(&checksums_txt));

        let mut documents = Vec::with_capacity(DOCUMENTS.len());
        for name in DOCUMENTS {
            let bytes = fetcher.fetch(&format!("{base_url}/{name}"))?;
            verify_checksum(name, &bytes, &expected)?;
            documents.push((name, bytes));
        }

        fs::create_dir_all(&self.dir)?;
        for (name, bytes) in documents {
            fs::write(self.dir.join(name), bytes)?;
        }
        fs::write(self.dir.join(CHECKSUMS_TXT), checksums_txt)?;
        log::debug!("Cached release information in {}", self.dir.display());
        Ok(())
    }
}

/// Parse `sha256sum`-style lines: `<hex>  <filename>`.
pub fn parse_checksums_txt(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let checksum = parts.next()?;
            let name = parts.next()?.trim_start_matches('*');
            Some((name.to_string(), checksum.to_lowercase()))
        })
        .collect()
}

pub fn format_checksums_txt(entries: &BTreeMap<String, String>) -> String {
    entries
        .iter()
        .map(|(name, checksum)| format!("{checksum}  {name}\n"))
        .collect()
}

fn verify_checksum(name: &str, bytes: &[u8], expected: &BTreeMap<String, String>) -> Result<()> {
    let expected = expected.get(name).ok_or_else(|| {
        AnalyzerError::corpus_malformed(CHECKSUMS_TXT, format!("no entry for {name}"))
    })?;
    let actual = bytes_checksum(bytes);
    if &actual != expected {
        return Err(AnalyzerError::checksum_mismatch(name, expected, actual));
    }
    Ok(())
}

fn read_document<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path).map_err(|e| {
        AnalyzerError::corpus_unavailable(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| AnalyzerError::corpus_malformed(name, e.to_string()))
}

/// Read the three documents from `dir`. When a `checksums.txt` is present,
/// the documents are verified against it first.
pub fn load_corpus_from_dir(dir: &Path) -> Result<Corpus> {
    let checksums_txt = dir.join(CHECKSUMS_TXT);
    if checksums_txt.is_file() {
        let expected = parse_checksums_txt(&fs::read_to_string(&checksums_txt)?);
        for name in DOCUMENTS {
            let path = dir.join(name);
            let bytes = fs::read(&path).map_err(|e| AnalyzerError::file_read(&path, e))?;
            verify_checksum(name, &bytes, &expected)?;
        }
    }

    let versions: VersionsDocument = read_document(dir, VERSIONS_JSON)?;
    let checksums: ChecksumsDocument = read_document(dir, CHECKSUMS_JSON)?;
    let files: FilesDocument = read_document(dir, FILES_JSON)?;
    let corpus = Corpus::from_documents(versions, checksums, files)?;
    log::debug!(
        "Loaded release information for {} versions from {}",
        corpus.versions().len(),
        dir.display()
    );
    Ok(corpus)
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(value)?;
    json.push(b'\n');
    Ok(json)
}

/// Write the three documents and a matching `checksums.txt` into `dir`.
pub fn write_corpus(corpus: &Corpus, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let (versions, checksums, files) = corpus.to_documents();
    let documents = [
        (CHECKSUMS_JSON, to_pretty_json(&checksums)?),
        (FILES_JSON, to_pretty_json(&files)?),
        (VERSIONS_JSON, to_pretty_json(&versions)?),
    ];

    let mut sums = BTreeMap::new();
    let mut written = Vec::new();
    for (name, bytes) in documents {
        sums.insert(name.to_string(), bytes_checksum(&bytes));
        let path = dir.join(name);
        fs::write(&path, bytes)?;
        written.push(path);
    }

    let path = dir.join(CHECKSUMS_TXT);
    fs::write(&path, format_checksums_txt(&sums))?;
    written.push(path);
    Ok(written)
}

/// Resolve the release information for `analyze`.
///
/// Offline mode only reads the cache. Online mode refreshes the cache and
/// falls back to a previously cached copy when the network is unavailable.
pub fn load_corpus(
    cache: &ReleaseCache,
    base_url: &str,
    offline: bool,
    fetcher: &dyn Fetch,
) -> Result<Corpus> {
    if offline {
        if !cache.is_complete() {
            return Err(AnalyzerError::corpus_unavailable(format!(
                "no cached release information in {}, run without --offline",
                cache.dir().display()
            )));
        }
        return cache.load();
    }

    match cache.refresh(base_url, fetcher) {
        Ok(()) => cache.load(),
        Err(AnalyzerError::Download { url, reason }) => {
            if cache.is_complete() {
                log::warn!("Could not download {url} ({reason}), using cached release information");
                cache.load()
            } else {
                Err(AnalyzerError::corpus_unavailable(format!(
                    "failed to download {url} ({reason}), check network"
                )))
            }
        }
        Err(e) => Err(e),
    }
}
