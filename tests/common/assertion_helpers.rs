//! Assertion helpers for testing

use std::path::Path;

/// Assert that a file exists
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!($path.exists(), "File should exist: {}", $path.display());
    };
    ($path:expr, $msg:expr) => {
        assert!($path.exists(), "{}: {}", $msg, $path.display());
    };
}

/// Assert that a file does not exist
#[macro_export]
macro_rules! assert_file_not_exists {
    ($path:expr) => {
        assert!(
            !$path.exists(),
            "File should not exist: {}",
            $path.display()
        );
    };
    ($path:expr, $msg:expr) => {
        assert!(!$path.exists(), "{}: {}", $msg, $path.display());
    };
}

/// Assert that `marker` was created in exactly the listed repository directories.
pub fn assert_ran_only_in(root: &Path, all: &[&str], ran: &[&str], marker: &str) {
    for dir in all {
        let path = root.join(dir).join(marker);
        if ran.contains(dir) {
            assert_file_exists!(path, "Command should have run");
        } else {
            assert_file_not_exists!(path, "Command should not have run");
        }
    }
}

/// Assert that every non-blank line of `output` starts with `banner`.
pub fn assert_lines_tagged(output: &str, banner: &str) {
    let tagged: Vec<_> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!tagged.is_empty(), "Expected some output");
    for line in tagged {
        assert!(
            line.starts_with(banner),
            "Line should start with {banner}: {line}"
        );
    }
}
