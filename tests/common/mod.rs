//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

/// A throwaway git repository for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Signature with an explicit epoch so author/tagger dates are
    /// deterministic.
    fn signature_at(&self, epoch: i64) -> Signature<'static> {
        Signature::new("Test User", "test@example.com", &Time::new(epoch, 0))
            .expect("Failed to create signature")
    }

    /// Create a commit authored at `epoch`. Returns the commit OID.
    pub fn commit_at(&self, message: &str, epoch: i64) -> Oid {
        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{message}\n{epoch}"))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = self.signature_at(epoch);
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create an annotated tag with a tagger date at `epoch`.
    pub fn tag_at(&self, name: &str, target: Oid, message: &str, epoch: i64) {
        let object = self
            .repo
            .find_object(target, None)
            .expect("Failed to find tag target");
        self.repo
            .tag(name, &object, &self.signature_at(epoch), message, false)
            .expect("Failed to create annotated tag");
    }

    /// Create a lightweight tag (no tagger, no message).
    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self
            .repo
            .find_object(target, None)
            .expect("Failed to find tag target");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Failed to create lightweight tag");
    }
}
