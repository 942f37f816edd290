#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prints the content of the file given as its only argument
pub const CAT_PROGRAM: &str = "#!/bin/sh\ncat \"$1\"\n";

/// Prints its only argument
pub const ECHO_PROGRAM: &str = "#!/bin/sh\necho \"$1\"\n";

/// Prints its input file and exits with a failing exit code
pub const CAT_AND_FAIL_PROGRAM: &str = "#!/bin/sh\ncat \"$1\"\nexit 3\n";

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Workspace {
        Workspace {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn program(&self, name: &str, script: &str) -> PathBuf {
        let path = self.file(name, script);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}
