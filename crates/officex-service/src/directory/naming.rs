//! Name suffixing for `KEEP_BOTH` conflict resolution.

/// `name` with a ` (n)` suffix, placed before a file's extension.
///
/// `report.pdf` becomes `report (1).pdf`; folders and extensionless names
/// take the suffix at the end.
pub fn suffixed_name(name: &str, n: usize, is_file: bool) -> String {
    if is_file {
        if let Some((stem, ext)) = name.rsplit_once('.').filter(|(stem, _)| !stem.is_empty()) {
            return format!("{stem} ({n}).{ext}");
        }
    }
    format!("{name} ({n})")
}

/// First suffixed variant of `name` for which `taken` is false.
pub fn next_free_name(name: &str, is_file: bool, taken: impl Fn(&str) -> bool) -> String {
    (1..)
        .map(|n| suffixed_name(name, n, is_file))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_before_extension() {
        assert_eq!(suffixed_name("report.pdf", 1, true), "report (1).pdf");
        assert_eq!(suffixed_name("archive.tar.gz", 2, true), "archive.tar (2).gz");
        assert_eq!(suffixed_name(".env", 1, true), ".env (1)");
        assert_eq!(suffixed_name("Docs", 3, false), "Docs (3)");
        assert_eq!(suffixed_name("v1.2", 1, false), "v1.2 (1)");
    }

    #[test]
    fn test_next_free_name_skips_taken() {
        let taken = ["a (1).txt", "a (2).txt"];
        let name = next_free_name("a.txt", true, |c| taken.contains(&c));
        assert_eq!(name, "a (3).txt");
    }
}
