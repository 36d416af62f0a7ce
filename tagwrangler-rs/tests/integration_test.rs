//! Integration tests for the tagwrangler CLI using fixture vaults.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to a fixture vault.
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

/// Run the CLI against `vault` and return (stdout, stderr, exit code).
fn run_at(vault: &Path, args: &[&str]) -> (String, String, i32) {
    let binary = env!("CARGO_BIN_EXE_tagwrangler");

    let output = Command::new(binary)
        .arg("--vault")
        .arg(vault)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tagwrangler");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run the CLI against a read-only fixture vault.
fn run_tagwrangler(vault: &str, args: &[&str]) -> (String, String, i32) {
    run_at(&fixture_path(vault), args)
}

/// Run and parse stdout as JSON, asserting success.
fn run_json(vault: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_at(vault, args);
    assert_eq!(code, 0, "stderr: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Writable copy of a fixture vault.
fn scratch_vault(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_path(name), dir.path());
    dir
}

fn read(vault: &Path, note: &str) -> String {
    std::fs::read_to_string(vault.join(note)).unwrap()
}

fn tag_count(tags: &Value, name: &str) -> Option<u64> {
    tags["tags"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["tag"] == name)
        .and_then(|t| t["count"].as_u64())
}

mod notes_command {
    use super::*;

    #[test]
    fn lists_visible_notes() {
        let (stdout, _, code) = run_tagwrangler("tags", &["notes"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("\"count\": 6"));
        assert!(stdout.contains("projects/Alpha.md"));
        assert!(!stdout.contains(".obsidian"));
        assert!(!stdout.contains("hidden"));
    }

    #[test]
    fn untagged_filter() {
        let json = run_json(&fixture_path("tags"), &["notes", "--untagged"]);
        assert_eq!(json["count"], 1);
        assert_eq!(json["notes"][0]["path"], "Welcome.md");
    }

    #[test]
    fn folder_filter_includes_subfolders() {
        let json = run_json(&fixture_path("tags"), &["notes", "--folder", "projects"]);
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn root_only_filter() {
        let json = run_json(&fixture_path("tags"), &["notes", "--root-only"]);
        let paths: Vec<&str> = json["notes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["Broken.md", "Welcome.md"]);
    }

    #[test]
    fn search_matches_title() {
        let json = run_json(&fixture_path("tags"), &["notes", "--search", "project alpha"]);
        assert_eq!(json["count"], 1);
        assert_eq!(json["notes"][0]["title"], "Project Alpha");
    }

    #[test]
    fn tag_filter_is_normalized() {
        let json = run_json(&fixture_path("tags"), &["notes", "--tag", "#MEETING"]);
        assert_eq!(json["count"], 3);
    }
}

mod show_command {
    use super::*;

    #[test]
    fn show_note() {
        let json = run_json(&fixture_path("tags"), &["show", "projects/Alpha.md"]);
        assert_eq!(json["title"], "Project Alpha");
        assert_eq!(json["frontmatter"]["status"], "active");
        assert_eq!(
            json["tags"],
            serde_json::json!(["draft", "javascript", "meeting", "project/work"])
        );
    }

    #[test]
    fn malformed_frontmatter_is_empty() {
        let json = run_json(&fixture_path("tags"), &["show", "Broken.md"]);
        assert_eq!(json["frontmatter"], serde_json::json!({}));
        assert_eq!(json["tags"], serde_json::json!(["recovered"]));
    }

    #[test]
    fn show_not_found() {
        let (_, stderr, code) = run_tagwrangler("tags", &["show", "Missing.md"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("not found"));
    }
}

mod tags_command {
    use super::*;

    #[test]
    fn lists_all_tags() {
        let json = run_json(&fixture_path("tags"), &["tags"]);
        assert_eq!(json["total"], 11);
        assert_eq!(json["tags"][0]["tag"], "meeting");
        assert_eq!(tag_count(&json, "meeting"), Some(3));
        assert_eq!(tag_count(&json, "draft"), Some(2));
        assert_eq!(tag_count(&json, "hidden"), None);
    }

    #[test]
    fn search_and_notes() {
        let json = run_json(&fixture_path("tags"), &["tags", "--search", "proj", "--sort", "name", "--with-notes"]);
        assert_eq!(json["total"], 2);
        assert_eq!(json["tags"][0]["tag"], "project/home");
        assert_eq!(json["tags"][0]["notes"], serde_json::json!(["projects/Beta.md"]));
    }

    #[test]
    fn hierarchy() {
        let json = run_json(&fixture_path("tags"), &["hierarchy"]);
        assert_eq!(json["hierarchy"], serde_json::json!({"project": ["home", "work"]}));
    }

    #[test]
    fn folders() {
        let json = run_json(&fixture_path("tags"), &["folders"]);
        assert_eq!(
            json["folders"],
            serde_json::json!(["journal", "projects", "projects/archive"])
        );
    }
}

mod analysis_commands {
    use super::*;

    #[test]
    fn stats() {
        let json = run_json(&fixture_path("tags"), &["stats"]);
        assert_eq!(json["total_notes"], 6);
        assert_eq!(json["total_unique_tags"], 11);
        assert_eq!(json["notes_with_tags"], 5);
        assert_eq!(json["notes_without_tags"], 1);
        assert_eq!(json["avg_tags_per_note"], 2.5);
        assert_eq!(json["orphan_count"], 8);
        assert_eq!(json["top_tags"][0]["tag"], "meeting");
        assert_eq!(json["top_tags"][1]["tag"], "draft");
        assert_eq!(json["top_tags"][2]["tag"], "js");
    }

    #[test]
    fn similar_default_threshold() {
        let json = run_json(&fixture_path("tags"), &["similar"]);
        let pairs = json["pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0]["tag_a"], "color");
        assert_eq!(pairs[0]["tag_b"], "colour");
    }

    #[test]
    fn similar_rejects_out_of_range_threshold() {
        let (_, _, code) = run_tagwrangler("tags", &["similar", "--threshold", "120"]);
        assert_eq!(code, 5);
    }

    #[test]
    fn co_occurrence() {
        let json = run_json(&fixture_path("tags"), &["co-occurrence"]);
        assert_eq!(json["min_count"], 2);
        assert_eq!(
            json["pairs"],
            serde_json::json!([
                {"tag_a": "draft", "tag_b": "meeting", "count": 2},
                {"tag_a": "js", "tag_b": "meeting", "count": 2}
            ])
        );
    }

    #[test]
    fn orphans_with_threshold() {
        let json = run_json(&fixture_path("tags"), &["orphans"]);
        assert_eq!(json["count"], 8);

        let json = run_json(&fixture_path("tags"), &["orphans", "--threshold", "2"]);
        assert_eq!(json["count"], 10);
    }

    #[test]
    fn config_file_sets_defaults() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "similarity_threshold = 30.0\n").unwrap();

        let json = run_json(
            &fixture_path("tags"),
            &["--config", config.to_str().unwrap(), "similar"],
        );
        let pairs = json["pairs"].as_array().unwrap();
        assert!(pairs.iter().any(|p| p["tag_a"] == "javascript" && p["tag_b"] == "js"));
    }
}

mod output_formats {
    use super::*;

    #[test]
    fn yaml_output() {
        let (stdout, _, code) = run_tagwrangler("tags", &["--yaml", "stats"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("total_notes: 6"));
    }

    #[test]
    fn toml_output() {
        let (stdout, _, code) = run_tagwrangler("tags", &["--toml", "stats"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("total_notes = 6"));
    }

    #[test]
    fn formats_conflict() {
        let (_, _, code) = run_tagwrangler("tags", &["--json", "--yaml", "stats"]);
        assert_ne!(code, 0);
    }
}

mod vault_errors {
    use super::*;

    #[test]
    fn missing_vault() {
        let (_, stderr, code) = run_tagwrangler("does-not-exist", &["stats"]);
        assert_eq!(code, 3);
        assert!(stderr.contains("Vault not found"));
    }

    #[test]
    fn undecodable_file_is_skipped() {
        let vault = scratch_vault("tags");
        std::fs::write(vault.path().join("Binary.md"), [0xff, 0xfe, 0x00, 0x23]).unwrap();

        let json = run_json(vault.path(), &["skipped"]);
        assert_eq!(json["count"], 1);
        assert_eq!(json["skipped"][0]["path"], "Binary.md");

        let json = run_json(vault.path(), &["notes"]);
        assert_eq!(json["count"], 6);
    }
}

mod mutation_commands {
    use super::*;

    #[test]
    fn rename_rewrites_frontmatter() {
        let vault = scratch_vault("tags");
        let json = run_json(vault.path(), &["rename", "js", "javascript"]);
        assert_eq!(json["modified"], 2);

        let beta = read(vault.path(), "projects/Beta.md");
        assert!(beta.contains("- javascript"));
        assert!(!beta.contains("- js\n"));
        assert!(beta.ends_with("Chores list.\n\n#draft #meeting\n"));

        // Inline body tags are never rewritten.
        let journal = read(vault.path(), "journal/2024-01-01.md");
        assert!(journal.contains("#js"));
        assert!(journal.starts_with("---\ntags:\n- journal\n- color\n---\n"));

        let tags = run_json(vault.path(), &["tags"]);
        assert_eq!(tag_count(&tags, "javascript"), Some(2));
        assert_eq!(tag_count(&tags, "js"), Some(1));
    }

    #[test]
    fn rename_dry_run_writes_nothing() {
        let vault = scratch_vault("tags");
        let before = read(vault.path(), "projects/Beta.md");

        let json = run_json(vault.path(), &["rename", "js", "javascript", "--dry-run"]);
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["would_modify"], 2);
        assert_eq!(read(vault.path(), "projects/Beta.md"), before);
    }

    #[test]
    fn rename_rejects_empty_tag() {
        let vault = scratch_vault("tags");
        let (_, _, code) = run_at(vault.path(), &["rename", "js", "#"]);
        assert_eq!(code, 5);
    }

    #[test]
    fn merge_into_target() {
        let vault = scratch_vault("tags");
        let json = run_json(vault.path(), &["merge", "color", "colour", "--into", "colour"]);
        assert_eq!(json["modified"], 2);

        let tags = run_json(vault.path(), &["tags"]);
        assert_eq!(tag_count(&tags, "colour"), Some(2));
        assert_eq!(tag_count(&tags, "color"), None);

        // Legacy `tag` key is replaced by a `tags` list.
        let gamma = read(vault.path(), "projects/archive/Gamma.md");
        assert!(!gamma.contains("tag:"));
        assert!(gamma.contains("tags:\n- colour\n- archive\n"));
    }

    #[test]
    fn delete_keeps_other_spellings() {
        let vault = scratch_vault("tags");
        let json = run_json(vault.path(), &["delete", "draft"]);
        // Beta carries `draft` only inline, but is still rewritten.
        assert_eq!(json["modified"], 2);

        let alpha = read(vault.path(), "projects/Alpha.md");
        assert!(alpha.contains("- JavaScript"));
        assert!(!alpha.contains("draft"));
        assert!(alpha.contains("status: active"));
    }

    #[test]
    fn add_to_folder() {
        let vault = scratch_vault("tags");
        let json = run_json(vault.path(), &["add", "reviewed", "--folder", "projects"]);
        assert_eq!(json["modified"], 3);

        let notes = run_json(vault.path(), &["notes", "--tag", "reviewed"]);
        assert_eq!(notes["count"], 3);
    }

    #[test]
    fn add_to_untagged_note_creates_frontmatter() {
        let vault = scratch_vault("tags");
        let json = run_json(vault.path(), &["add", "inbox", "--note", "Welcome.md"]);
        assert_eq!(json["modified"], 1);
        assert!(read(vault.path(), "Welcome.md").starts_with("---\ntags:\n- inbox\n---\nWelcome to the vault."));
    }

    #[test]
    fn unreadable_frontmatter_is_left_alone() {
        let vault = scratch_vault("tags");
        let before = read(vault.path(), "Broken.md");

        let (_, stderr, code) = run_at(vault.path(), &["rename", "recovered", "found"]);
        assert_eq!(code, 5);
        assert!(stderr.contains("Invalid frontmatter in Broken.md"));
        assert_eq!(read(vault.path(), "Broken.md"), before);

        let (_, _, code) = run_at(vault.path(), &["add", "inbox", "--note", "Broken.md"]);
        assert_eq!(code, 5);
        assert_eq!(read(vault.path(), "Broken.md"), before);

        // set-frontmatter replaces the block outright.
        run_json(vault.path(), &["set-frontmatter", "Broken.md", "--data", "tags: [fixed]"]);
        assert_eq!(read(vault.path(), "Broken.md"), "---\ntags:\n- fixed\n---\nStill readable. #recovered\n");
    }

    #[test]
    fn add_to_missing_note() {
        let vault = scratch_vault("tags");
        let (_, _, code) = run_at(vault.path(), &["add", "inbox", "--note", "Nope.md"]);
        assert_eq!(code, 2);
    }

    #[test]
    fn apply_rules_reports_invalid_lines() {
        let vault = scratch_vault("tags");
        let (stdout, stderr, code) = run_at(
            vault.path(),
            &["apply-rules", "--rules", "colour -> color\nnot a rule\na -> b -> c\n"],
        );
        assert_eq!(code, 0);
        assert!(stderr.contains("Invalid rule: a -> b -> c"));

        let json: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["modified"], 1);
        assert_eq!(json["errors"], serde_json::json!(["Invalid rule: a -> b -> c"]));
    }

    #[test]
    fn apply_rules_from_file() {
        let vault = scratch_vault("tags");
        let rules = vault.path().join("rules.txt");
        std::fs::write(&rules, "js -> javascript\n\ndraft -> wip\n").unwrap();

        let json = run_json(vault.path(), &["apply-rules", "--file", rules.to_str().unwrap()]);
        assert_eq!(json["modified"], 4);
    }

    #[test]
    fn set_frontmatter_replaces_block() {
        let vault = scratch_vault("tags");
        run_json(
            vault.path(),
            &["set-frontmatter", "Welcome.md", "--data", "title: Hello\ntags: [fresh]"],
        );

        let json = run_json(vault.path(), &["show", "Welcome.md"]);
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["tags"], serde_json::json!(["fresh"]));
    }

    #[test]
    fn set_frontmatter_rejects_non_mapping() {
        let vault = scratch_vault("tags");
        let before = read(vault.path(), "projects/Alpha.md");

        let (_, stderr, code) = run_at(
            vault.path(),
            &["set-frontmatter", "projects/Alpha.md", "--data", "- a\n- b"],
        );
        assert_eq!(code, 5);
        assert!(stderr.contains("Validation"));
        assert_eq!(read(vault.path(), "projects/Alpha.md"), before);
    }

    #[test]
    fn set_frontmatter_empty_clears_block() {
        let vault = scratch_vault("tags");
        run_json(vault.path(), &["set-frontmatter", "projects/Alpha.md", "--data", ""]);
        assert_eq!(read(vault.path(), "projects/Alpha.md"), "Kickoff notes. #meeting\n");
    }
}
