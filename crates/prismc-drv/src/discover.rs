//! Directory scan and interactive file selection: the core never
//! enumerates directories itself, so this is where that happens.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{DriverError, DriverResult};

/// Every `.prsm`-suffixed entry directly inside `dir`, non-recursive, in
/// the order `read_dir` yields them.
pub fn find_source_files(dir: &Path) -> DriverResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| DriverError::DirectoryUnreadable(dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DriverError::DirectoryUnreadable(dir.to_path_buf(), e))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("prsm") {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(DriverError::NoSourceFiles(dir.to_path_buf()));
    }
    Ok(files)
}

/// Resolves a caller-supplied index (`--non-interactive <index>`)
/// against `files` without touching stdin.
pub fn select_by_index(files: &[PathBuf], index: usize) -> DriverResult<PathBuf> {
    files
        .get(index)
        .cloned()
        .ok_or(DriverError::SelectionOutOfRange {
            index,
            count: files.len(),
        })
}

/// Prints the numbered file list to `prompt_out` and reads a selection
/// from `input`. Takes generic `Write`/`BufRead` handles rather than
/// hard-wiring stdout/stdin so tests can drive the prompt without a
/// real terminal.
pub fn prompt_for_selection(
    files: &[PathBuf],
    mut prompt_out: impl std::io::Write,
    input: &mut impl BufRead,
) -> DriverResult<PathBuf> {
    for (i, path) in files.iter().enumerate() {
        let _ = writeln!(prompt_out, "  [{}] {}", i, path.display());
    }
    let _ = writeln!(prompt_out, "select a file by number:");

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(DriverError::SelectionReadFailed)?;
    let index: usize = line
        .trim()
        .parse()
        .map_err(|_| DriverError::SelectionNotANumber(line.trim().to_string()))?;

    select_by_index(files, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn finds_only_prsm_files_non_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.prsm");
        touch(tmp.path(), "b.prsm");
        touch(tmp.path(), "readme.txt");
        fs::create_dir(tmp.path().join("nested")).unwrap();
        touch(&tmp.path().join("nested"), "c.prsm");

        let mut files = find_source_files(tmp.path()).unwrap();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "prsm"));
    }

    #[test]
    fn empty_directory_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_source_files(tmp.path()),
            Err(DriverError::NoSourceFiles(_))
        ));
    }

    #[test]
    fn missing_directory_is_reported() {
        let missing = PathBuf::from("/does/not/exist/anywhere");
        assert!(matches!(
            find_source_files(&missing),
            Err(DriverError::DirectoryUnreadable(_, _))
        ));
    }

    #[test]
    fn select_by_index_rejects_out_of_range() {
        let files = vec![PathBuf::from("a.prsm")];
        assert!(select_by_index(&files, 0).is_ok());
        assert!(matches!(
            select_by_index(&files, 1),
            Err(DriverError::SelectionOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn prompt_reads_a_valid_index() {
        let files = vec![PathBuf::from("a.prsm"), PathBuf::from("b.prsm")];
        let mut out = Vec::new();
        let mut input = Cursor::new(b"1\n".to_vec());
        let chosen = prompt_for_selection(&files, &mut out, &mut input).unwrap();
        assert_eq!(chosen, PathBuf::from("b.prsm"));
        assert!(String::from_utf8(out).unwrap().contains("[1] b.prsm"));
    }

    #[test]
    fn prompt_rejects_non_numeric_input() {
        let files = vec![PathBuf::from("a.prsm")];
        let mut out = Vec::new();
        let mut input = Cursor::new(b"not-a-number\n".to_vec());
        assert!(matches!(
            prompt_for_selection(&files, &mut out, &mut input),
            Err(DriverError::SelectionNotANumber(_))
        ));
    }
}
