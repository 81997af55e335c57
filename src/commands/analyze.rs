use crate::core::{
    classifier::{classify, AnalyzedFileSet},
    config::{AnalyzeContext, AnalyzerConfig},
    corpus::{load_corpus, load_corpus_from_dir, HttpFetcher, ReleaseCache},
    detector::{detect_reference_version, VersionsData},
    error::{AnalyzerError, Result},
    markers::{candidate_roots, has_marker_files, policy_root},
    print_warning,
    report::{render_json, render_text},
    vcf::{Corpus, TreeIndex},
    version::Version,
};
use std::path::PathBuf;

/// Command-line options of `analyze`. Unset values fall back to the config file.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub parent: bool,
    pub reference_version: Option<String>,
    pub masterfiles_dir: Option<String>,
    pub ignored_path_components: Vec<String>,
    pub offline: bool,
    pub release_info_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub files: AnalyzedFileSet,
    pub versions_data: VersionsData,
}

fn ensure_directory(context: &AnalyzeContext) -> Result<()> {
    if !context.path.is_dir() {
        return Err(AnalyzerError::path_not_found(&context.path));
    }
    Ok(())
}

/// Run the analysis pipeline: scan, detect, classify, denormalize.
///
/// When no reference version is given or detected, the tree must still look
/// like a policy set, otherwise nearby candidates are suggested.
pub fn analyze_policy_set(context: &AnalyzeContext, corpus: &Corpus) -> Result<Analysis> {
    ensure_directory(context)?;
    if corpus.is_empty() {
        return Err(AnalyzerError::corpus_unavailable(
            "release information contains no versions",
        ));
    }

    if let Some(version) = &context.reference_version {
        Version::parse(version)?;
        if !corpus.has_version(version) {
            return Err(AnalyzerError::unknown_reference_version(version));
        }
    }

    let tree = TreeIndex::scan(&context.path, &context.ignored, &context.normalizer)?;
    log::debug!("Scanned {} files in {}", tree.len(), context.path.display());

    let (detected, versions_data) = detect_reference_version(&tree, corpus);
    let reference_version = context.reference_version.clone().or(detected);

    if reference_version.is_none() {
        let dirname = context.normalizer.masterfiles_dirname();
        let root = policy_root(
            &context.path,
            context.normalizer.is_parent_layout(),
            dirname,
        );
        if !has_marker_files(&root) {
            let candidates = candidate_roots(&context.path, dirname)
                .into_iter()
                .filter(|candidate| candidate != &root)
                .collect();
            return Err(AnalyzerError::not_a_policy_set(&context.path, candidates));
        }
    }

    let files =
        classify(&tree, corpus, reference_version.as_deref()).denormalize(&context.normalizer);
    Ok(Analysis {
        files,
        versions_data,
    })
}

pub fn execute_analyze(options: AnalyzeOptions) -> Result<()> {
    let mut config = AnalyzerConfig::load_or_default()?;
    if options.cache_dir.is_some() {
        config.cache_dir = options.cache_dir.clone();
    }

    let masterfiles_dirname = options
        .masterfiles_dir
        .clone()
        .unwrap_or_else(|| config.masterfiles_dirname.clone());
    let mut extra_ignored = config.extra_ignored_path_components.clone();
    extra_ignored.extend(options.ignored_path_components.iter().cloned());

    let context = AnalyzeContext::new(
        &options.path,
        options.parent,
        &masterfiles_dirname,
        &extra_ignored,
        options.reference_version.clone(),
    );
    // Checked before the corpus is loaded so a bad path never triggers a download
    ensure_directory(&context)?;

    let corpus = match &options.release_info_dir {
        Some(dir) => load_corpus_from_dir(dir)?,
        None => {
            let cache = ReleaseCache::new(
                &config.cache_root(),
                &config.release_base_url,
                &config.release_tag,
            );
            load_corpus(
                &cache,
                &config.release_base_url,
                options.offline,
                &HttpFetcher::default(),
            )?
        }
    };

    let analysis = analyze_policy_set(&context, &corpus)?;

    if options.json {
        println!("{}", render_json(&analysis.files)?);
        return Ok(());
    }

    if analysis.files.reference_version.is_none() {
        print_warning("Could not detect a reference version, use --reference-version to set one");
    }
    print!(
        "{}",
        render_text(&analysis.files, &analysis.versions_data, options.verbose)
    );
    Ok(())
}
