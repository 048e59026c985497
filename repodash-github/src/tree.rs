//! Directory listing order

use repodash_core::FileEntry;
use std::cmp::Ordering;

/// Directories first, then files; case-insensitive by name within each group
///
/// Names differing only in case fall back to a byte-wise comparison so the
/// order is total.
pub fn sort_file_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use repodash_core::FileKind;

    fn entry(name: &str, kind: FileKind) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            sha: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn test_directories_before_files_alphabetically() {
        let mut entries = vec![
            entry("README.md", FileKind::File),
            entry("src", FileKind::Dir),
            entry("Cargo.toml", FileKind::File),
            entry(".github", FileKind::Dir),
            entry("benches", FileKind::Dir),
            entry("build.rs", FileKind::File),
        ];

        sort_file_entries(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![".github", "benches", "src", "build.rs", "Cargo.toml", "README.md"]
        );
    }

    #[test]
    fn test_case_only_differences_are_deterministic() {
        let mut entries = vec![entry("readme", FileKind::File), entry("README", FileKind::File)];
        sort_file_entries(&mut entries);
        assert_eq!(entries[0].name, "README");
        assert_eq!(entries[1].name, "readme");
    }
}
