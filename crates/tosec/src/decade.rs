/// Bucket for years that predate the first tracked decade.
pub const UNDATED_DECADE: &str = "19XX";

/// Returns the decade folder a year is filed under, e.g. `2013 → "2010-2019"`.
/// Years below 1980 all share [`UNDATED_DECADE`].
///
/// ```
/// use zxorg_tosec::decade_bucket;
/// assert_eq!(decade_bucket(2013), "2010-2019");
/// assert_eq!(decade_bucket(1979), "19XX");
/// ```
pub fn decade_bucket(year: u16) -> String {
    if year < 1980 {
        return UNDATED_DECADE.to_string();
    }
    let start = (year / 10) * 10;
    format!("{start}-{}", start + 9)
}
