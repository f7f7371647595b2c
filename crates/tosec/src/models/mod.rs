mod category;
mod era;
mod parsed;

pub use self::category::Category;
pub use self::era::Era;
pub use self::parsed::ParsedFilename;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('-', "").replace('_', "").replace(' ', "")
}
