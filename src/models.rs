use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Deserializer};

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.filter(|s| !s.trim().is_empty()))
}

/// Tracker APIs report the year as a number; hand-written files use a string.
fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Number(0)) | None => None,
        Some(Year::Number(n)) => Some(n.to_string()),
        Some(Year::Text(s)) => Some(s).filter(|s| !s.trim().is_empty()),
    })
}

// --- Release metadata ---

/// Metadata describing one release, as supplied by the caller.
///
/// Only `album` is required. Unknown keys in the source document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub artist: Option<String>,
    pub album: String,
    #[serde(default, deserialize_with = "year_as_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub media: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub remaster: Option<String>,
}

impl ReleaseInfo {
    pub fn new(album: impl Into<String>) -> Self {
        ReleaseInfo {
            album: album.into(),
            ..Default::default()
        }
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn remaster(mut self, remaster: impl Into<String>) -> Self {
        self.remaster = Some(remaster.into());
        self
    }
}

// --- Output format ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Flac,
    Cbr320,
    V0,
    V2,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Flac, Format::Cbr320, Format::V0, Format::V2];

    /// Tag shown in the directory suffix, e.g. `V0` in `[V0]`.
    pub fn tag(self) -> &'static str {
        match self {
            Format::Flac => "FLAC",
            Format::Cbr320 => "320",
            Format::V0 => "V0",
            Format::V2 => "V2",
        }
    }

    /// File extension of transcoded files, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Flac => "flac",
            Format::Cbr320 | Format::V0 | Format::V2 => "mp3",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        match Format::ALL.iter().find(|f| f.tag().eq_ignore_ascii_case(s)) {
            Some(format) => Ok(*format),
            None => bail!(
                "Unknown format: {s:?}. Supported: {}",
                Format::ALL.map(Format::tag).join(", ")
            ),
        }
    }
}
