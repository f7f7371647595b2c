//! File format classification.
//!
//! Extensions are always compared lower-cased and without their leading dot,
//! so `".TAP"`, `"tap"` and `" Tap "` all name the same format.

use std::collections::{BTreeMap, BTreeSet};

/// Normalize a user-supplied extension (`".TZX"` → `"tzx"`).
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Normalized extension of a filename; empty if there is none. Leading dots
/// of hidden files don't separate an extension.
///
/// ```
/// use zxorg_config::extension_of;
/// assert_eq!(extension_of("Elite (1985)(Firebird).TZX"), "tzx");
/// assert_eq!(extension_of(".hidden"), "");
/// ```
pub fn extension_of(filename: &str) -> String {
    let name = filename.trim().trim_start_matches('.');
    name.rsplit_once('.').map(|(_, ext)| normalize_extension(ext)).unwrap_or_default()
}

/// Extension classification tables and the extension → display-label map.
///
/// Processable formats are emulator images that get parsed and placed in the
/// taxonomy; generic formats are documents and scans that are only displayed.
/// Archives overlap with processable (`zip` is both).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormatTable {
    pub processable: BTreeSet<String>,
    pub archive: BTreeSet<String>,
    pub generic: BTreeSet<String>,
    pub labels: BTreeMap<String, String>,
    pub default_label: String,
}
impl Default for FormatTable {
    fn default() -> Self {
        let set = |exts: &[&str]| -> BTreeSet<String> { exts.iter().map(|ext| ext.to_string()).collect() };
        let labels = [
            ("tap", "TAPs"),
            ("tzx", "TZXs"),
            ("z80", "Z80s"),
            ("sna", "SNAs"),
            ("dsk", "DISCOS"),
            ("trd", "DISCOS"),
            ("scl", "DISCOS"),
            ("img", "OTROS"),
            ("zip", "OTROS"),
        ];
        Self {
            processable: set(&["tap", "tzx", "z80", "sna", "dsk", "trd", "scl", "img", "zip"]),
            archive: set(&["zip", "rar", "7z"]),
            generic: set(&["pdf", "jpg", "jpeg", "png", "gif", "bmp", "txt", "doc", "docx", "xls", "xlsx"]),
            labels: labels.iter().map(|(ext, label)| (ext.to_string(), label.to_string())).collect(),
            default_label: "OTROS".to_string(),
        }
    }
}
impl FormatTable {
    pub fn is_processable(&self, extension: &str) -> bool {
        self.processable.contains(&normalize_extension(extension))
    }

    pub fn is_archive(&self, extension: &str) -> bool {
        self.archive.contains(&normalize_extension(extension))
    }

    pub fn is_generic(&self, extension: &str) -> bool {
        self.generic.contains(&normalize_extension(extension))
    }

    /// Files that are shown to the user at all: processable or generic.
    pub fn is_displayable(&self, extension: &str) -> bool {
        self.is_processable(extension) || self.is_generic(extension)
    }

    /// Display label (and file-type folder name) for an extension.
    ///
    /// Mapped extensions use their label. Generic formats are labelled with
    /// their upper-cased extension (`"pdf"` → `"PDF"`). Anything else falls
    /// back to the default label.
    pub fn label(&self, extension: &str) -> String {
        let extension = normalize_extension(extension);
        if let Some(label) = self.labels.get(&extension) {
            return label.clone();
        }
        match self.generic.contains(&extension) {
            true => extension.to_uppercase(),
            false => self.default_label.clone(),
        }
    }

    /// Re-key every table by its normalized extension. When two label keys
    /// normalize to the same extension, the one not already in normal form
    /// (`".TAP"` over `"tap"`) was written by the user and wins.
    pub(crate) fn normalize(&mut self) {
        let normalize_set = |set: &BTreeSet<String>| -> BTreeSet<String> { set.iter().map(|ext| normalize_extension(ext)).collect() };
        self.processable = normalize_set(&self.processable);
        self.archive = normalize_set(&self.archive);
        self.generic = normalize_set(&self.generic);
        let (normal, spelled): (Vec<_>, Vec<_>) = self.labels.iter().partition(|(ext, _)| normalize_extension(ext) == **ext);
        self.labels = normal
            .into_iter()
            .chain(spelled)
            .map(|(ext, label)| (normalize_extension(ext), label.trim().to_string()))
            .collect();
        self.default_label = self.default_label.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".TAP", "tap")]
    #[case("tzx", "tzx")]
    #[case(" .Z80 ", "z80")]
    #[case("", "")]
    fn test_normalize_extension(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_extension(input), expected);
    }

    #[rstest]
    #[case("Game (1985)(Pub).TAP", "tap")]
    #[case("archive.tar.gz", "gz")]
    #[case("README", "")]
    #[case(".hidden", "")]
    #[case("Dotted.Title (1990)(Pub).z80", "z80")]
    fn test_extension_of(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(extension_of(filename), expected);
    }

    #[rstest]
    #[case("tap", "TAPs")]
    #[case(".TZX", "TZXs")]
    #[case("trd", "DISCOS")]
    #[case("zip", "OTROS")]
    #[case("pdf", "PDF")]
    #[case("rar", "OTROS")]
    #[case("unknown", "OTROS")]
    fn test_label(#[case] extension: &str, #[case] expected: &str) {
        assert_eq!(FormatTable::default().label(extension), expected);
    }

    #[test]
    fn test_classification() {
        let formats = FormatTable::default();
        assert!(formats.is_processable(".zip"));
        assert!(formats.is_archive("ZIP"));
        assert!(!formats.is_processable("rar"));
        assert!(formats.is_archive("rar"));
        assert!(formats.is_generic("jpeg"));
        assert!(formats.is_displayable("pdf"));
        assert!(!formats.is_displayable("rar"));
        assert!(!formats.is_displayable("exe"));
    }

    #[test]
    fn test_normalize_tables() {
        let mut formats = FormatTable {
            processable: [".TAP".to_string()].into(),
            labels: [(".Tap".to_string(), " Cintas ".to_string())].into(),
            ..FormatTable::default()
        };
        formats.normalize();
        assert!(formats.processable.contains("tap"));
        assert_eq!(formats.label("tap"), "Cintas");
    }
}
