use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::*, tree::*};
use policy_analyzer::core::config::{DEFAULT_RELEASE_BASE_URL, DEFAULT_RELEASE_TAG};
use policy_analyzer::core::{load_corpus_from_dir, write_corpus, ReleaseCache};

#[cfg(test)]
mod analyze_command_tests {
    use super::*;

    #[test]
    fn test_analyze_unmodified_release() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_22)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.22.0"))
            .stdout(assertions::has_category_count("Unmodified", 4))
            .stdout(assertions::has_category_count("Modified", 0))
            .stdout(assertions::has_category_count("Missing", 0))
            .stdout(assertions::has_category_count("Not from any version", 0));

        Ok(())
    }

    #[test]
    fn test_analyze_reports_local_changes() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_customized_policy_set(&policy)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.22.0"))
            .stdout(assertions::has_category_count("Unmodified", 2))
            .stdout(assertions::has_category_count("Modified", 1))
            .stdout(assertions::has_entry("update.cf"))
            .stdout(assertions::has_category_count("Moved or renamed", 1))
            .stdout(assertions::has_entry("lib/renamed.cf <- lib/new.cf"))
            .stdout(assertions::has_category_count("Missing", 0))
            .stdout(assertions::has_category_count("Not from any version", 1))
            .stdout(assertions::has_entry("custom.cf"));

        Ok(())
    }

    #[test]
    fn test_analyze_annotates_files_from_other_versions() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_mixed_policy_set(&policy)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.21.0"))
            .stdout(assertions::has_category_count("From a different version", 1))
            .stdout(assertions::has_entry("lib/files.cf (3.22.0)"));

        Ok(())
    }

    #[test]
    fn test_analyze_explicit_reference_version() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_22)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .args(["--reference-version", "3.21.0"])
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.21.0"))
            .stdout(assertions::has_category_count("Unmodified", 1))
            .stdout(assertions::has_entry("lib/old.cf"));

        Ok(())
    }

    #[test]
    fn test_analyze_unknown_reference_version_fails() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_22)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .args(["--reference-version", "3.99.0"])
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Reference version 3.99.0 not found in release information",
            ));

        Ok(())
    }

    #[test]
    fn test_analyze_json_output() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_customized_policy_set(&policy)?;

        let mut cmd = analyzer_command(fixture.home())?;
        let output = cmd
            .arg("analyze")
            .arg(&policy)
            .arg("--json")
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(json["reference_version"], "3.22.0");
        let files = &json["files"];
        assert_eq!(
            files["unmodified"],
            serde_json::json!(["lib/files.cf", "promises.cf"])
        );
        assert_eq!(files["modified"], serde_json::json!(["update.cf"]));
        assert_eq!(
            files["moved_or_renamed"],
            serde_json::json!([{"path": "lib/renamed.cf", "origin": "lib/new.cf"}])
        );
        assert_eq!(files["not_from_any_version"], serde_json::json!(["custom.cf"]));
        assert_eq!(files["missing"], serde_json::json!([]));
        assert_eq!(files["different_version"], serde_json::json!([]));

        Ok(())
    }

    #[test]
    fn test_analyze_verbose_lists_unmodified_and_votes() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_21)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--verbose")
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.21.0"))
            .stdout(assertions::has_entry("lib/old.cf"))
            .stdout(predicate::str::contains("Version votes:"))
            .stdout(predicate::str::contains("3.21.0: 4"));

        Ok(())
    }

    #[test]
    fn test_analyze_parent_layout() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let project = fixture.policy_dir();
        create_policy_set(&project.join("masterfiles"), RELEASE_3_22)?;
        write_file(&project, "README.md", "project notes\n")?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&project)
            .arg("--parent")
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.22.0"))
            .stdout(assertions::has_category_count("Unmodified", 4))
            .stdout(assertions::has_entry("README.md"));

        Ok(())
    }

    #[test]
    fn test_analyze_suggests_policy_set_location() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let project = fixture.policy_dir();
        write_file(&project.join("masterfiles"), "promises.cf", "bundle common mine\n")?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&project)
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .failure()
            .stderr(assertions::not_a_policy_set())
            .stderr(predicate::str::contains("Did you mean"))
            .stderr(predicate::str::contains("masterfiles"));

        Ok(())
    }

    #[test]
    fn test_analyze_missing_path_fails() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(fixture.tree.join("does-not-exist"))
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path does not exist"));

        Ok(())
    }

    #[test]
    fn test_analyze_offline_without_cache_fails() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_22)?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--offline")
            .arg("--cache-dir")
            .arg(fixture.tree.join("empty-cache"))
            .assert()
            .failure()
            .stderr(assertions::release_information_unavailable())
            .stderr(predicate::str::contains("run without --offline"));

        Ok(())
    }

    #[test]
    fn test_analyze_offline_uses_cache() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_21)?;

        let cache_root = fixture.tree.join("cache-root");
        let cache = ReleaseCache::new(&cache_root, DEFAULT_RELEASE_BASE_URL, DEFAULT_RELEASE_TAG);
        write_corpus(&load_corpus_from_dir(&fixture.release_info)?, cache.dir())?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .arg("--offline")
            .arg("--cache-dir")
            .arg(&cache_root)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.21.0"));

        Ok(())
    }

    #[test]
    fn test_analyze_ignored_path_components() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let policy = fixture.policy_dir();
        create_policy_set(&policy, RELEASE_3_22)?;
        write_file(&policy, "build/output.cf", "generated\n")?;
        write_file(&policy, ".git/HEAD", "ref: refs/heads/main\n")?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&policy)
            .args(["--ignored-path-components", "build/"])
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_category_count("Not from any version", 0));

        Ok(())
    }

    #[test]
    fn test_analyze_reads_config_file() -> anyhow::Result<()> {
        let fixture = setup_release_information()?;
        let project = fixture.policy_dir();
        create_policy_set(&project.join("mpf"), RELEASE_3_22)?;
        write_file(
            fixture.home(),
            "config/policy-analyzer/config.json",
            r#"{"masterfiles_dirname": "mpf"}"#,
        )?;

        let mut cmd = analyzer_command(fixture.home())?;
        cmd.arg("analyze")
            .arg(&project)
            .arg("-p")
            .arg("--release-info-dir")
            .arg(&fixture.release_info)
            .assert()
            .success()
            .stdout(assertions::has_reference_version("3.22.0"))
            .stdout(assertions::has_category_count("Unmodified", 4));

        Ok(())
    }
}
