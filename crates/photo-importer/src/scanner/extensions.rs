use std::path::Path;

/// Raw photo and cinema raw formats the importer picks up, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "3fr", "ari", "arw", "bay", "braw", "cap", "cr2", "cr3", "cri", "crw", "dcr", "dcs", "dng",
    "drf", "eip", "erf", "fff", "gpr", "iiq", "jxs", "k25", "kdc", "mdc", "mef", "mos", "mrw",
    "nef", "nrw", "orf", "pef", "ptx", "pxn", "r3d", "raf", "raw", "rw2", "rwl", "rwz", "sr2",
    "srf", "srw", "tco", "x3f",
];

pub fn is_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_any_case() {
        assert!(is_allowed_extension(Path::new("IMG_0001.CR2")));
        assert!(is_allowed_extension(Path::new("img_0001.cr2")));
        assert!(is_allowed_extension(Path::new("A001_C002.R3D")));
        assert!(is_allowed_extension(Path::new("clip.braw")));
    }

    #[test]
    fn test_rejected_extensions() {
        assert!(!is_allowed_extension(Path::new("notes.txt")));
        assert!(!is_allowed_extension(Path::new("IMG_0001.JPG")));
        assert!(!is_allowed_extension(Path::new("cr2")));
        assert!(!is_allowed_extension(Path::new("archive.cr2.zip")));
    }

    #[test]
    fn test_allow_list_is_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for ext in ALLOWED_EXTENSIONS {
            assert_eq!(*ext, ext.to_ascii_lowercase());
            assert!(seen.insert(*ext), "duplicate extension {}", ext);
        }
    }
}
