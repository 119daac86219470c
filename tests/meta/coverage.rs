//! Keeps tests/unit in step with src: one test file per source file, no strays,
//! and no test file without a test in it

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Harness roots and module declarations carry no behaviour of their own
    fn is_structural(relative: &str) -> bool {
        matches!(relative, "main.rs" | "lib.rs") || relative.ends_with("mod.rs")
    }

    fn mirrored_trees() -> (BTreeSet<String>, BTreeSet<String>) {
        let sources = rust_paths_under(Path::new(SRC_ROOT)).expect("src is readable");
        let units = rust_paths_under(Path::new(UNIT_ROOT)).unwrap_or_default();
        (sources, units)
    }

    // Tests every source module has a unit test file at the same relative path
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (sources, units) = mirrored_trees();

        let untested: Vec<String> = sources
            .iter()
            .filter(|path| !is_structural(path) && !units.contains(*path))
            .map(|path| format!("  src/{path} has no tests/unit/{path}"))
            .collect();

        assert!(untested.is_empty(), "Untested modules:\n{}", untested.join("\n"));
    }

    // Tests no unit test file outlives the module it covered
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (sources, units) = mirrored_trees();

        let stray: Vec<String> = units
            .iter()
            .filter(|path| !is_structural(path) && !sources.contains(*path))
            .map(|path| format!("  tests/unit/{path} has no src/{path}"))
            .collect();

        assert!(stray.is_empty(), "Stray unit tests:\n{}", stray.join("\n"));
    }

    // Tests every non-structural file under tests/ declares at least one test
    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_paths_under(Path::new("tests")).expect("tests is readable");

        let empty: Vec<String> = files
            .iter()
            .filter(|path| {
                let name = Path::new(path).file_name().and_then(|n| n.to_str());
                !matches!(name, Some("main.rs" | "mod.rs"))
            })
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  tests/{path}"))
            .collect();

        assert!(empty.is_empty(), "Test files without tests:\n{}", empty.join("\n"));
    }

    // Relative paths of directories and .rs files below `root`
    fn rust_paths_under(root: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(root)
                    .map_err(io::Error::other)?
                    .to_string_lossy()
                    .into_owned();

                if path.is_dir() {
                    found.insert(relative);
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.insert(relative);
                }
            }
        }

        Ok(found)
    }
}
