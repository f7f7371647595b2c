use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// `START - END`: two segments of 1 to 12 non-whitespace characters, each
// starting with a letter or digit, joined by exactly one " - ".
regex!(
    RANGE_FOLDER_REGEX,
    r"^(?P<start>[\p{L}\p{N}]\S{0,11}) - (?P<end>[\p{L}\p{N}]\S{0,11})$"
);
