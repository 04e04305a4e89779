use crate::error::{RetimeError, RtResult};
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// On-disk interchange formats for event tracks.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrackFormat {
    Csv,
    Json,
}

impl TrackFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> RtResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                RetimeError::UnsupportedFormat(format!(
                    "'{}' has no file extension",
                    path.display()
                ))
            })?;

        TrackFormat::from_str(ext).map_err(|_| {
            RetimeError::UnsupportedFormat(format!(
                "'{}' (expected .csv or .json)",
                path.display()
            ))
        })
    }
}
