use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{DEFAULT_SEGMENT_BYTES, Limits};
use crate::models::{Format, ReleaseInfo};
use crate::scan;

pub const VARIOUS_ARTISTS: &str = "Various Artists";
const VARIOUS_ARTISTS_SHORT: &str = "VA";

/// Optional parts of a basename, in the order they are given up when a name is too long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Media,
    Year,
    Remaster,
    Artist,
}

impl Field {
    const DROP_ORDER: [Field; 4] = [Field::Media, Field::Year, Field::Remaster, Field::Artist];

    fn name(self) -> &'static str {
        match self {
            Field::Media => "media",
            Field::Year => "year",
            Field::Remaster => "remaster",
            Field::Artist => "artist",
        }
    }

    /// Remove the field, returning whether anything was there.
    fn clear(self, info: &mut ReleaseInfo) -> bool {
        let slot = match self {
            Field::Media => &mut info.media,
            Field::Year => &mut info.year,
            Field::Remaster => &mut info.remaster,
            Field::Artist => &mut info.artist,
        };
        slot.take().is_some()
    }
}

/// Format tag as it appears at the end of a directory name: `V0` -> `[V0]`.
pub fn suffix(tag: &str) -> String {
    format!("[{tag}]")
}

/// Build `artist - album (remaster)[year][media]`, leaving out absent parts.
/// An album without any other field is returned as-is.
pub fn basename(info: &ReleaseInfo) -> String {
    let mut name = match &info.artist {
        Some(artist) => format!("{artist} - {}", info.album),
        None => info.album.clone(),
    };
    if let Some(remaster) = &info.remaster {
        name.push_str(&format!(" ({remaster})"));
    }
    if let Some(year) = &info.year {
        name.push_str(&format!("[{year}]"));
    }
    if let Some(media) = &info.media {
        name.push_str(&format!("[{media}]"));
    }
    name
}

/// Replace or remove characters that are invalid in file names.
fn replace_illegal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            ':' => out.push(','),
            '*' | '/' | '\\' | '"' | '?' | '<' | '>' | '|' | '\0' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Cut `s` to at most `max_bytes` bytes without splitting a character.
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Make `name` safe to use as a single path component of at most `max_bytes` bytes.
///
/// `:` becomes `,`, other reserved characters are dropped, leading dots and
/// surrounding whitespace are trimmed. Applying it twice changes nothing.
pub fn suitable_basename_with(name: &str, max_bytes: usize) -> String {
    let replaced = replace_illegal(name);
    let trimmed = replaced
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end();
    truncate_bytes(trimmed, max_bytes).trim_end().to_string()
}

/// [`suitable_basename_with`] capped at the usual 255-byte component limit.
pub fn suitable_basename(name: &str) -> String {
    suitable_basename_with(name, DEFAULT_SEGMENT_BYTES)
}

/// Directory for a transcode of `source_dir` into `format`, under `dest_root`.
///
/// With `smart` set, the name is shortened until every transcoded file of the
/// release fits the path budget; see [`fit_name`]. Without it the full name is
/// used, cut at the segment limit ahead of the format suffix so that `[TAG]`
/// always survives. Uses the default [`Limits`].
pub fn transcode_dir(
    source_dir: &Path,
    dest_root: &Path,
    format: Format,
    smart: bool,
    info: &ReleaseInfo,
) -> Result<PathBuf> {
    transcode_dir_with(source_dir, dest_root, format, smart, info, &Limits::default())
}

pub fn transcode_dir_with(
    source_dir: &Path,
    dest_root: &Path,
    format: Format,
    smart: bool,
    info: &ReleaseInfo,
    limits: &Limits,
) -> Result<PathBuf> {
    let name = if smart {
        let budget = name_budget(source_dir, format, limits)?;
        fit_name(info, format.tag(), budget)
    } else {
        let tag_suffix = suffix(format.tag());
        let room = limits.segment_bytes.saturating_sub(tag_suffix.len());
        let base = suitable_basename_with(&basename(info), room);
        format!("{base}{tag_suffix}")
    };
    tracing::info!(name = %name, smart, "transcode directory");
    Ok(dest_root.join(name))
}

/// Bytes left for the directory name once the longest file inside it is accounted for.
fn name_budget(source_dir: &Path, format: Format, limits: &Limits) -> Result<usize> {
    let files = scan::audio_files(source_dir)?;
    let reserved = match scan::longest_output_path(&files, format) {
        0 => {
            tracing::warn!(dir = %source_dir.display(), "no audio files found");
            0
        }
        // separator between directory and file
        longest => longest + 1,
    };
    let budget = limits
        .max_path_bytes
        .saturating_sub(reserved)
        .min(limits.segment_bytes);
    tracing::debug!(files = files.len(), reserved, budget, "name budget");
    Ok(budget)
}

/// Shortest acceptable name for `info` + `[tag]` within `budget` bytes.
///
/// "Various Artists" is always written as "VA" and is never dropped. Otherwise
/// media, year, remaster and artist are dropped in that order until the name
/// fits. If it is still too long the album is truncated, keeping at least its
/// first character. An album with nothing legal in it leaves just the prefix
/// and `[tag]`.
pub fn fit_name(info: &ReleaseInfo, tag: &str, budget: usize) -> String {
    let tag_suffix = suffix(tag);
    let render = |info: &ReleaseInfo| {
        suitable_basename_with(&format!("{}{tag_suffix}", basename(info)), usize::MAX)
    };

    let mut info = info.clone();
    let various = info.artist.as_deref() == Some(VARIOUS_ARTISTS);
    if various {
        info.artist = Some(VARIOUS_ARTISTS_SHORT.to_string());
    }

    let mut name = render(&info);
    for field in Field::DROP_ORDER {
        if name.len() <= budget {
            return name;
        }
        if various && field == Field::Artist {
            continue;
        }
        if field.clear(&mut info) {
            tracing::debug!(field = field.name(), "dropping field to shorten name");
            name = render(&info);
        }
    }
    if name.len() <= budget {
        return name;
    }

    // only the album and possibly "VA" are left
    let prefix = info
        .artist
        .as_deref()
        .map(|artist| format!("{artist} - "))
        .unwrap_or_default();
    let album = suitable_basename_with(&info.album, usize::MAX);
    let room = budget.saturating_sub(prefix.len() + tag_suffix.len());
    let mut kept = truncate_bytes(&album, room).trim_end();
    if kept.is_empty() {
        kept = album.chars().next().map_or("", |c| &album[..c.len_utf8()]);
    }
    tracing::debug!(kept = kept.len(), album = album.len(), "truncating album");
    format!("{prefix}{kept}{tag_suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_order_is_least_significant_first() {
        let names: Vec<_> = Field::DROP_ORDER.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["media", "year", "remaster", "artist"]);
    }

    #[test]
    fn clear_reports_presence() {
        let mut info = ReleaseInfo::new("album").year("2000");
        assert!(Field::Year.clear(&mut info));
        assert!(!Field::Year.clear(&mut info));
        assert!(!Field::Media.clear(&mut info));
        assert_eq!(info.year, None);
    }

    #[test]
    fn replace_illegal_keeps_other_characters() {
        assert_eq!(replace_illegal("a:b*c"), "a,bc");
        assert_eq!(replace_illegal("(g)h+i_0%"), "(g)h+i_0%");
    }

    #[test]
    fn album_without_legal_characters_leaves_only_the_suffix() {
        assert_eq!(fit_name(&ReleaseInfo::new("???"), "V0", 2), "[V0]");
        assert_eq!(fit_name(&ReleaseInfo::new("..."), "V0", 2), "[V0]");
        let info = ReleaseInfo::new("<>").artist("Various Artists");
        assert_eq!(fit_name(&info, "V0", 2), "VA - [V0]");
    }
}
