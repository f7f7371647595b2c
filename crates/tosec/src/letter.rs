//! Alphabetic bucketing of titles.

/// Bucket for titles that start with a digit (or have no letters at all).
pub const NUMERIC_BUCKET: &str = "123";

/// Returns the alphabetic bucket a title is filed under.
///
/// Scans left to right skipping punctuation and whitespace: the first letter
/// found is the bucket (upper-cased), unless a digit is found first, in which
/// case the bucket is [`NUMERIC_BUCKET`].
///
/// ```
/// use zxorg_tosec::letter_bucket;
/// assert_eq!(letter_bucket("3D Game"), "123");
/// assert_eq!(letter_bucket("Zzyzx"), "Z");
/// assert_eq!(letter_bucket("'Allo 'Allo!"), "A");
/// assert_eq!(letter_bucket(""), "123");
/// ```
pub fn letter_bucket(title: &str) -> String {
    for c in title.chars() {
        if c.is_alphabetic() {
            return c.to_uppercase().collect();
        }
        if c.is_numeric() {
            break;
        }
    }
    NUMERIC_BUCKET.to_string()
}
