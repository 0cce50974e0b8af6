//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};

use stagecommit::LinePrompter;

/// A staged diff touching one Rust file.
pub const TEXT_DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n\
index 1111111..2222222 100644\n\
--- a/src/lib.rs\n\
+++ b/src/lib.rs\n\
@@ -1 +1,2 @@\n\
 pub mod a;\n\
+pub mod b;\n";

/// Prompter fed from a fixed string of answers, one per line.
pub fn answers(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
    LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository on `main` with one initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
        }

        let test_repo = Self { dir, repo };
        test_repo.write("README.md", "# test\n");
        test_repo.stage("README.md");
        test_repo.commit_index("init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Add a file to the index.
    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(rel)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index on HEAD.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch at HEAD.
    pub fn branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo.branch(name, &head, false).expect("Failed to create branch");
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD")
            .message()
            .expect("Commit message is not UTF-8")
            .to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.count()
    }

    /// Add a bare repository as `origin` and return it.
    pub fn add_bare_origin(&self) -> (tempfile::TempDir, Repository) {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        let bare = Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");
        self.repo
            .remote("origin", remote_dir.path().to_str().expect("Invalid remote path"))
            .expect("Failed to add origin remote");
        (remote_dir, bare)
    }
}
