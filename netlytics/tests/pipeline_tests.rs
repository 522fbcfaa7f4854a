use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway copy of the demo LinkedIn export.
struct NetlyticsTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl NetlyticsTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/linkedin_export");

        let dest = tmp.path().join("linkedin_export");
        Self::copy_dir(&project_root, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn netlytics(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("netlytics"));
        cmd.current_dir(&self.root)
            .env_remove("NETLYTICS_RAW_PATH")
            .env_remove("NETLYTICS_CLEANED_PATH")
            .env_remove("NETLYTICS_REPORT_PATH");
        cmd
    }

    fn raw(&self, file: &str) -> PathBuf {
        self.root.join("data/raw").join(file)
    }

    fn report(&self) -> Result<serde_json::Value> {
        let content = fs::read_to_string(self.root.join("outputs/pipeline_report.json"))?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn source<'a>(report: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    report["sources"]
        .as_array()?
        .iter()
        .find(|s| s["source"] == name)
}

#[test]
fn test_run_cleans_every_source() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;

    env.netlytics()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    let cleaned = env.root.join("data/cleaned");
    for file in [
        "invitations_cleaned.csv",
        "connections_cleaned.csv",
        "messages_cleaned.csv",
        "guide_messages_cleaned.csv",
        "learning_messages_cleaned.csv",
        "comments_cleaned.csv",
    ] {
        assert!(cleaned.join(file).is_file(), "{file} not written");
    }

    let report = env.report()?;
    assert_eq!(report["success"], true);
    assert_eq!(report["counts"]["succeeded"], 6);

    let connections = source(&report, "connections").context("connections missing")?;
    assert_eq!(connections["report"]["rows_in"], 5);
    assert_eq!(connections["report"]["rows_out"], 3);
    assert_eq!(connections["report"]["empty_rows_removed"], 1);
    assert_eq!(connections["report"]["duplicates_removed"], 1);
    assert_eq!(connections["report"]["datetime_parse_failures"], 1);

    let invitations = source(&report, "invitations").context("invitations missing")?;
    assert_eq!(invitations["report"]["duplicates_removed"], 1);
    Ok(())
}

#[test]
fn test_no_plaintext_pii_in_outputs() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;
    env.netlytics().arg("run").assert().success();

    let forbidden = [
        "Lovelace",
        "Hopper",
        "grace@navy.example",
        "linkedin.com/in/",
        "refer you",
        "analytical engine",
    ];
    let mut scanned = 0;
    for entry in walkdir::WalkDir::new(env.root.join("data/cleaned")) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let content = fs::read_to_string(entry.path())?;
        for needle in forbidden {
            assert!(
                !content.contains(needle),
                "{} leaks '{}'",
                entry.path().display(),
                needle
            );
        }
        scanned += 1;
    }
    assert_eq!(scanned, 6);
    Ok(())
}

#[test]
fn test_messages_header_and_features() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;
    env.netlytics()
        .args(["run", "--select", "messages"])
        .assert()
        .success();

    let content = fs::read_to_string(env.root.join("data/cleaned/messages_cleaned.csv"))?;
    let mut lines = content.lines();
    let header = lines.next().context("empty output")?;
    insta::assert_snapshot!(header, @"conversation_id,conversation_title_hash,from_hash,sender_profile_url_hash,to_hash,recipient_profile_urls_hash,date,subject_hash,content_hash,folder,source_table,has_referral_keyword,has_interview_keyword,has_positive_keyword,has_negative_keyword,conversation_depth");

    let first: Vec<&str> = lines.next().context("no rows")?.split(',').collect();
    assert_eq!(first[6], "2023-01-08T09:30:00Z");
    assert_eq!(first[8].len(), 8);
    assert_eq!(first[10], "messages");
    assert_eq!(first[11], "true");
    assert_eq!(first[15], "2");
    Ok(())
}

#[test]
fn test_missing_input_fails_unless_skipped() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;
    fs::remove_file(env.raw("guide_messages.csv"))?;
    fs::remove_file(env.raw("Comments.csv"))?;

    env.netlytics()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing_input"));

    env.netlytics()
        .args(["run", "--skip-missing"])
        .assert()
        .success();

    let report = env.report()?;
    assert_eq!(report["counts"]["skipped"], 2);
    assert_eq!(report["counts"]["succeeded"], 4);
    assert_eq!(
        source(&report, "comments").context("comments missing")?["status"],
        "skipped"
    );
    Ok(())
}

#[test]
fn test_header_collision_fails_only_that_source() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;
    fs::write(
        env.raw("Connections.csv"),
        "First Name,first-name,Last Name,Connected On\nGrace,G,Hopper,05 Jan 2023\n",
    )?;

    env.netlytics()
        .args(["run", "--skip-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema_drift"));

    let report = env.report()?;
    let connections = source(&report, "connections").context("connections missing")?;
    assert_eq!(connections["status"], "failed");
    assert_eq!(connections["error"]["kind"], "schema_drift");
    assert_eq!(report["counts"]["succeeded"], 5);
    Ok(())
}

#[test]
fn test_report_and_clean_commands() -> Result<()> {
    let env = NetlyticsTestEnv::new()?;

    env.netlytics()
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report not found"));

    env.netlytics().arg("run").assert().success();
    env.netlytics()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("guide_messages").and(predicate::str::contains("succeeded")));

    env.netlytics()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Artifact removed"));
    assert!(!env.root.join("data/cleaned").exists());
    assert!(!env.root.join("outputs/pipeline_report.json").exists());
    assert!(env.raw("messages.csv").exists());
    Ok(())
}
