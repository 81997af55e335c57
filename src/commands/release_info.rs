use crate::core::{
    corpus::write_corpus,
    error::{AnalyzerError, Result},
    print_success,
    scanner::IgnoredComponents,
    vcf::{Corpus, CorpusBuilder},
    version::Version,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Build release information from a directory holding one masterfiles tree
/// per version, each named after its version (`3.21.0/`, `3.24.0b1/`, ...).
pub fn generate_release_information(
    releases_dir: &Path,
    ignored: &IgnoredComponents,
) -> Result<Corpus> {
    if !releases_dir.is_dir() {
        return Err(AnalyzerError::path_not_found(releases_dir));
    }

    let mut entries = fs::read_dir(releases_dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut builder = CorpusBuilder::new();
    let mut added = 0;
    for entry in entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            log::warn!("Skipping {}: name is not valid UTF-8", path.display());
            continue;
        };
        if let Err(e) = Version::parse(name) {
            log::warn!("Skipping {}: {e}", path.display());
            continue;
        }

        builder.add_tree(&path, name, ignored)?;
        added += 1;
    }

    if added == 0 {
        return Err(AnalyzerError::corpus_unavailable(format!(
            "no release directories found in {}",
            releases_dir.display()
        )));
    }
    Ok(builder.build())
}

pub fn execute_generate_release_information(
    releases_dir: PathBuf,
    output_dir: Option<PathBuf>,
    ignored_path_components: Vec<String>,
) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let ignored = IgnoredComponents::with_extra(ignored_path_components);

    let corpus = generate_release_information(&releases_dir, &ignored)?;
    let written = write_corpus(&corpus, &output_dir)?;
    for path in &written {
        log::debug!("Wrote {}", path.display());
    }

    print_success(&format!(
        "Generated release information for {} versions in {}",
        corpus.versions().len(),
        output_dir.display()
    ));
    Ok(())
}
