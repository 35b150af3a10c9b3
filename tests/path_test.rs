use transname::models::ReleaseInfo;
use transname::path::{basename, fit_name, suffix, suitable_basename, suitable_basename_with};

fn full_info() -> ReleaseInfo {
    ReleaseInfo::new("album")
        .artist("artist")
        .year("2000")
        .media("CD")
        .remaster("remaster")
}

#[test]
fn suffix_wraps_tag_in_brackets() {
    assert_eq!(suffix("FLAC"), "[FLAC]");
    assert_eq!(suffix("320"), "[320]");
    assert_eq!(suffix("V0"), "[V0]");
    assert_eq!(suffix(""), "[]");
}

#[test]
fn basename_all_fields() {
    assert_eq!(basename(&full_info()), "artist - album (remaster)[2000][CD]");
}

#[test]
fn basename_no_remaster() {
    let info = ReleaseInfo::new("album").artist("artist").year("2000").media("CD");
    assert_eq!(basename(&info), "artist - album[2000][CD]");
}

#[test]
fn basename_no_remaster_no_media() {
    let info = ReleaseInfo::new("album").artist("artist").year("2000");
    assert_eq!(basename(&info), "artist - album[2000]");
}

#[test]
fn basename_artist_and_album() {
    let info = ReleaseInfo::new("album").artist("artist");
    assert_eq!(basename(&info), "artist - album");
}

#[test]
fn basename_album_alone() {
    assert_eq!(basename(&ReleaseInfo::new("album")), "album");
}

#[test]
fn basename_each_field_is_independent() {
    let mut no_year = full_info();
    no_year.year = None;
    assert_eq!(basename(&no_year), "artist - album (remaster)[CD]");

    let mut no_media = full_info();
    no_media.media = None;
    assert_eq!(basename(&no_media), "artist - album (remaster)[2000]");
}

#[test]
fn basename_without_artist_keeps_other_fields() {
    let info = ReleaseInfo::new("album").year("2000").media("WEB");
    assert_eq!(basename(&info), "album[2000][WEB]");
}

#[test]
fn suitable_ascii_unchanged() {
    let name = "Artist - Album (2000) [FLAC]";
    assert_eq!(suitable_basename(name), name);
}

#[test]
fn suitable_japanese_unchanged() {
    let name = "Nihon Kogakuin College (日本工学院専門学校) - (1985) Pink Papaia {NKS MD8503A 24-96 Vinyl} [FLAC]";
    assert_eq!(suitable_basename(name), name);
}

#[test]
fn suitable_illegal_characters() {
    let name = "fi:l*e/p\"a?t>h|.t<xt \0_abc<d>e%f/(g)h+i_0.txt";
    assert_eq!(suitable_basename(name), "fi,lepath.txt _abcde%f(g)h+i_0.txt");
}

#[test]
fn suitable_trims_leading_dots_and_whitespace() {
    assert_eq!(suitable_basename("..hidden"), "hidden");
    assert_eq!(suitable_basename(" . .name  "), "name");
    assert_eq!(suitable_basename("a.b."), "a.b.");
}

#[test]
fn suitable_is_idempotent() {
    for name in [
        "fi:l*e/p\"a?t>h|.t<xt \0_abc<d>e%f/(g)h+i_0.txt",
        " . ?.odd: name ",
        "日本:語",
    ] {
        let once = suitable_basename(name);
        assert_eq!(suitable_basename(&once), once);
    }
}

#[test]
fn suitable_truncates_to_255_bytes() {
    let long = "a".repeat(300);
    assert_eq!(suitable_basename(&long).len(), 255);
}

#[test]
fn suitable_truncates_on_char_boundary() {
    // 3 bytes per character
    let name = "日".repeat(100);
    let result = suitable_basename_with(&name, 10);
    assert_eq!(result, "日日日");
}

#[test]
fn suitable_truncation_drops_trailing_space() {
    assert_eq!(suitable_basename_with("abc def", 4), "abc");
}

#[test]
fn fit_keeps_full_name_when_it_fits() {
    assert_eq!(fit_name(&full_info(), "V0", 100), "artist - album (remaster)[2000][CD][V0]");
}

#[test]
fn fit_drops_media_first() {
    let budget = "artist - album (remaster)[2000][V0]".len();
    assert_eq!(fit_name(&full_info(), "V0", budget), "artist - album (remaster)[2000][V0]");
}

#[test]
fn fit_drops_year_then_remaster_then_artist() {
    let budget = "artist - album (remaster)[V0]".len();
    assert_eq!(fit_name(&full_info(), "V0", budget), "artist - album (remaster)[V0]");

    let budget = "artist - album[V0]".len();
    assert_eq!(fit_name(&full_info(), "V0", budget), "artist - album[V0]");

    let budget = "album[V0]".len();
    assert_eq!(fit_name(&full_info(), "V0", budget), "album[V0]");
}

#[test]
fn fit_truncates_album_as_last_resort() {
    assert_eq!(fit_name(&full_info(), "V0", 7), "alb[V0]");
}

#[test]
fn fit_never_returns_empty_album() {
    assert_eq!(fit_name(&full_info(), "V0", 2), "a[V0]");
}

#[test]
fn fit_abbreviates_various_artists() {
    let info = ReleaseInfo::new("Album").artist("Various Artists");
    assert_eq!(fit_name(&info, "FLAC", 100), "VA - Album[FLAC]");

    let info = ReleaseInfo::new("Album").artist("various artists");
    assert_eq!(fit_name(&info, "FLAC", 100), "various artists - Album[FLAC]");
}

#[test]
fn fit_measures_sanitized_name() {
    let info = ReleaseInfo::new("a?b?c?d").artist("x");
    // "x - abcd[V0]" is 12 bytes once the question marks are gone
    assert_eq!(fit_name(&info, "V0", 12), "x - abcd[V0]");
}

#[test]
fn suitable_is_idempotent_when_truncating() {
    for (name, max_bytes, expected) in [
        ("abc def", 4, "abc"),
        ("ab 日本", 5, "ab"),
        ("日本 語", 4, "日"),
        (" .x: y z", 4, "x, y"),
    ] {
        let once = suitable_basename_with(name, max_bytes);
        assert_eq!(once, expected);
        assert_eq!(suitable_basename_with(&once, max_bytes), once);
    }
}

#[test]
fn fit_keeps_va_when_album_is_truncated() {
    let album = "a".repeat(100);
    let info = ReleaseInfo::new(album.as_str())
        .artist("Various Artists")
        .year("2000");
    let budget = album.len() + "[V0]".len() + 2;

    let name = fit_name(&info, "V0", budget);
    assert!(name.starts_with("VA - "), "{name}");
    assert!(name.ends_with("[V0]"));
    assert_eq!(name.len(), budget);
}

#[test]
fn fit_keeps_va_instead_of_dropping_it() {
    let info = ReleaseInfo::new("Album").artist("Various Artists").year("2000");
    assert_eq!(fit_name(&info, "V0", "VA - Album[V0]".len()), "VA - Album[V0]");
}
