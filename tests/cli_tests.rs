//! End-to-end CLI test suite.
//!
//! Each test drives the binary through its public interface against an
//! isolated temporary notes directory.

mod common;

use common::{TestEnv, org_note};
use predicates::prelude::*;

// ===========================================
// sync command tests
// ===========================================
mod sync_tests {
    use super::*;

    #[test]
    fn test_sync_creates_db() {
        let env = TestEnv::new();
        env.write_note("a.org", &org_note("T1", "Alpha", ""));

        env.cmd()
            .arg("sync")
            .assert()
            .success()
            .stdout(predicate::str::contains("Synced 1 file(s)"));

        assert!(env.db_path().exists(), "store database should be created");
    }

    #[test]
    fn test_sync_single_file() {
        let env = TestEnv::new();
        let path = env.write_note(
            "a.org",
            &org_note("T1", "Alpha", "* Heading\n:PROPERTIES:\n:ID: H1\n:END:\n"),
        );

        env.cmd()
            .arg("sync")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 nodes"));
    }

    #[test]
    fn test_sync_missing_file_fails() {
        let env = TestEnv::new();
        env.cmd()
            .arg("sync")
            .arg(env.notes_dir().join("absent.org"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("absent.org"));
    }

    #[test]
    fn test_sync_continues_past_bad_files() {
        let env = TestEnv::new();
        env.write_note("good.org", &org_note("T1", "Good", ""));
        // UTF-16 BOM: unreadable, but must not sink the batch.
        std::fs::write(env.notes_dir().join("bad.org"), [0xFF, 0xFE, 0x00]).unwrap();

        env.cmd()
            .arg("sync")
            .assert()
            .success()
            .stdout(predicate::str::contains("Synced 1 file(s)"))
            .stderr(predicate::str::contains("bad.org"));
    }

    #[test]
    fn test_sync_prunes_deleted_files() {
        let env = TestEnv::new();
        let path = env.write_note("a.org", &org_note("T1", "Alpha", ""));
        env.cmd().arg("sync").assert().success();

        std::fs::remove_file(&path).unwrap();
        env.cmd()
            .arg("sync")
            .assert()
            .success()
            .stdout(predicate::str::contains("Pruned 1 deleted file(s)"));

        env.cmd()
            .arg("find")
            .arg("Alpha")
            .assert()
            .success()
            .stdout(predicate::str::contains("No nodes found"));
    }

    #[test]
    fn test_sync_routes_journal_entries() {
        let env = TestEnv::new();
        env.write_journal(
            "2026-08-30.org",
            ":PROPERTIES:\n:ID: J1\n:END:\n#+TITLE: 2026-08-30\n#+FILETAGS: :daily:\n",
        );

        env.cmd().arg("sync").assert().success();

        // Journal entries carry tags but never appear in the node listing.
        env.cmd()
            .arg("tags")
            .assert()
            .success()
            .stdout(predicate::str::contains("daily"));
        env.cmd()
            .arg("ls")
            .assert()
            .success()
            .stdout(predicate::str::contains("J1").not());
    }
}

// ===========================================
// new command tests
// ===========================================
mod new_tests {
    use super::*;

    #[test]
    fn test_new_creates_note() {
        let env = TestEnv::new();
        env.cmd()
            .arg("new")
            .arg("My First Note")
            .assert()
            .success()
            .stdout(predicate::str::contains("my-first-note.org"));

        assert!(env.notes_dir().join("my-first-note.org").exists());

        env.cmd()
            .arg("find")
            .arg("First")
            .assert()
            .success()
            .stdout(predicate::str::contains("My First Note"));
    }

    #[test]
    fn test_new_existing_title_is_found_not_duplicated() {
        let env = TestEnv::new();
        env.cmd().arg("new").arg("Same Title").assert().success();
        env.cmd()
            .arg("new")
            .arg("Same Title")
            .assert()
            .success()
            .stdout(predicate::str::contains("same-title.org"));

        let org_files = std::fs::read_dir(env.notes_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "org"))
            .count();
        assert_eq!(org_files, 1, "second invocation must not create a file");
    }

    #[test]
    fn test_new_finds_note_in_subdirectory() {
        let env = TestEnv::new();
        let sub = env.notes_dir().join("area");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("deep.org"), org_note("D1", "Deep Note", "")).unwrap();
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("new")
            .arg("Deep Note")
            .assert()
            .success()
            .stdout(predicate::str::contains("area"))
            .stdout(predicate::str::contains("deep.org"));

        // Found, not re-created at the notes root.
        assert!(!env.notes_dir().join("deep-note.org").exists());
    }

    #[test]
    fn test_new_without_title_fails() {
        let env = TestEnv::new();
        env.cmd()
            .arg("new")
            .assert()
            .failure()
            .stderr(predicate::str::contains("title"));
    }

    #[test]
    fn test_new_journal_creates_dated_entry() {
        let env = TestEnv::new();
        env.cmd().arg("new").arg("--journal").assert().success();

        let entries: Vec<_> = std::fs::read_dir(env.journal_dir())
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name();
        let name = name.to_string_lossy();
        assert!(name.ends_with(".org"), "journal entry name: {name}");
    }

    #[test]
    fn test_new_journal_is_idempotent_per_day() {
        let env = TestEnv::new();
        env.cmd().arg("new").arg("--journal").assert().success();
        env.cmd().arg("new").arg("--journal").assert().success();

        let entries = std::fs::read_dir(env.journal_dir()).unwrap().count();
        assert_eq!(entries, 1);
    }
}

// ===========================================
// link command tests
// ===========================================
mod link_tests {
    use super::*;

    #[test]
    fn test_link_prints_org_link_by_title() {
        let env = TestEnv::new();
        env.write_note("target.org", &org_note("T9", "Target Note", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("link")
            .arg("Target Note")
            .assert()
            .success()
            .stdout(predicate::str::contains("[[id:T9][Target Note]]"));
    }

    #[test]
    fn test_link_by_id() {
        let env = TestEnv::new();
        env.write_note("target.org", &org_note("T9", "Target Note", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("link")
            .arg("T9")
            .assert()
            .success()
            .stdout(predicate::str::contains("[[id:T9][Target Note]]"));
    }

    #[test]
    fn test_link_unknown_target_fails() {
        let env = TestEnv::new();
        env.cmd().arg("sync").assert().success();
        env.cmd()
            .arg("link")
            .arg("nothing-here")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no node found"));
    }

    #[test]
    fn test_link_ambiguous_title_fails() {
        let env = TestEnv::new();
        env.write_note("a.org", &org_note("T1", "Same", ""));
        env.write_note("b.org", &org_note("T2", "Same", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("link")
            .arg("Same")
            .assert()
            .failure()
            .stderr(predicate::str::contains("ambiguous"));
    }

    #[test]
    fn test_link_into_appends_and_resyncs() {
        let env = TestEnv::new();
        let source = env.write_note("source.org", &org_note("S1", "Source Note", ""));
        env.write_note("target.org", &org_note("T9", "Target Note", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("link")
            .arg("Target Note")
            .arg("--into")
            .arg(&source)
            .assert()
            .success();

        let content = std::fs::read_to_string(&source).unwrap();
        assert!(content.contains("[[id:T9][Target Note]]"));

        // The edge is visible without a separate sync pass.
        env.cmd()
            .arg("backlinks")
            .arg("Target Note")
            .assert()
            .success()
            .stdout(predicate::str::contains("Source Note"));
    }
}

// ===========================================
// rm command tests
// ===========================================
mod rm_tests {
    use super::*;

    #[test]
    fn test_rm_purges_rows_and_deletes_file() {
        let env = TestEnv::new();
        let path = env.write_note("gone.org", &org_note("T1", "Doomed", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("rm")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Purged 1 row(s)"));

        assert!(!path.exists(), "file should be deleted");
        env.cmd()
            .arg("find")
            .arg("Doomed")
            .assert()
            .success()
            .stdout(predicate::str::contains("No nodes found"));
    }

    #[test]
    fn test_rm_keep_file_leaves_file_on_disk() {
        let env = TestEnv::new();
        let path = env.write_note("kept.org", &org_note("T1", "Kept", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd()
            .arg("rm")
            .arg(&path)
            .arg("--keep-file")
            .assert()
            .success();

        assert!(path.exists(), "file should survive --keep-file");
        env.cmd()
            .arg("find")
            .arg("Kept")
            .assert()
            .success()
            .stdout(predicate::str::contains("No nodes found"));
    }

    #[test]
    fn test_rm_clears_links_and_tags() {
        let env = TestEnv::new();
        let path = env.write_note(
            "linked.org",
            &org_note("T1", "Linked", "[[id:T2][the other]]\n"),
        );
        env.write_note("other.org", &org_note("T2", "Other", ""));
        env.cmd().arg("sync").assert().success();

        env.cmd().arg("rm").arg(&path).assert().success();

        env.cmd()
            .arg("backlinks")
            .arg("Other")
            .assert()
            .success()
            .stdout(predicate::str::contains("No nodes found"));
    }
}

// ===========================================
// query command tests
// ===========================================
mod query_tests {
    use super::*;

    fn seeded_env() -> TestEnv {
        let env = TestEnv::new();
        env.write_note(
            "project.org",
            "\
:PROPERTIES:
:ID: T1
:END:
#+TITLE: Project
#+FILETAGS: :proj:

* Graph databases :reading:
:PROPERTIES:
:ID: H1
:END:
See [[id:T2][the other topic]].
",
        );
        env.write_note("other.org", &org_note("T2", "Other", ""));
        env.cmd().arg("sync").assert().success();
        env
    }

    #[test]
    fn test_find_substring_case_insensitive() {
        let env = seeded_env();
        env.cmd()
            .arg("find")
            .arg("graph")
            .assert()
            .success()
            .stdout(predicate::str::contains("Graph databases"))
            .stdout(predicate::str::contains("Other").not());
    }

    #[test]
    fn test_find_json_output() {
        let env = seeded_env();
        env.cmd()
            .arg("find")
            .arg("Graph")
            .arg("--format")
            .arg("json")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"data\""))
            .stdout(predicate::str::contains("\"id\": \"H1\""));
    }

    #[test]
    fn test_backlinks_include_master_edges() {
        let env = seeded_env();
        // H1's master edge points at its topic T1.
        env.cmd()
            .arg("backlinks")
            .arg("Project")
            .assert()
            .success()
            .stdout(predicate::str::contains("Graph databases"));
    }

    #[test]
    fn test_backlinks_follow_body_references() {
        let env = seeded_env();
        env.cmd()
            .arg("backlinks")
            .arg("T2")
            .assert()
            .success()
            .stdout(predicate::str::contains("Graph databases"));
    }

    #[test]
    fn test_tags_lists_counts() {
        let env = seeded_env();
        env.cmd()
            .arg("tags")
            .assert()
            .success()
            .stdout(predicate::str::contains("proj"))
            .stdout(predicate::str::contains("reading"));
    }

    #[test]
    fn test_ls_lists_all_nodes() {
        let env = seeded_env();
        env.cmd()
            .arg("ls")
            .assert()
            .success()
            .stdout(predicate::str::contains("Project"))
            .stdout(predicate::str::contains("Graph databases"))
            .stdout(predicate::str::contains("Other"));
    }

    #[test]
    fn test_ls_filters_by_tag() {
        let env = seeded_env();
        env.cmd()
            .arg("ls")
            .arg("--tag")
            .arg("reading")
            .assert()
            .success()
            .stdout(predicate::str::contains("Graph databases"))
            .stdout(predicate::str::contains("Other").not());
    }

    #[test]
    fn test_inherited_tags_reach_headings() {
        let env = seeded_env();
        // proj is a filetag; the heading inherits it.
        env.cmd()
            .arg("ls")
            .arg("--tag")
            .arg("proj")
            .assert()
            .success()
            .stdout(predicate::str::contains("Graph databases"));
    }
}

// ===========================================
// completions command tests
// ===========================================
mod completions_tests {
    use super::*;

    #[test]
    fn test_completions_bash() {
        let env = TestEnv::new();
        env.cmd()
            .arg("completions")
            .arg("bash")
            .assert()
            .success()
            .stdout(predicate::str::contains("loam"));
    }
}
