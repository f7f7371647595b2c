use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// `Title (Year)(Publisher)...` anchored at the start of the filename. The title
// is lazy so that parentheses inside the title don't swallow the year block.
regex!(
    TOSEC_REGEX,
    r"^(?P<title>.*?)\s*\((?P<year>\d{4}(?:-\d{4})?|(?i:19xx|20xx))\)\((?P<publisher>.*?)\)"
);
regex!(VERSION_MARKER_REGEX, r"(?i)\s+v\.?\s?\d+(?:\.\d+)*(?:\s?beta|\s?alpha)?$");
regex!(PART_MARKER_REGEX, r"(?i)(?:\s*-\s*|\s+)(?:part|episode)\s*\d+$");
regex!(ILLEGAL_CHARS_REGEX, r#"[<>:"/\\|?*]"#);
