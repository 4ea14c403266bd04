//! Recognizing translator visits and pulling the typed phrase out of them.

use url::Url;

/// Coarse SQL `LIKE` filters; [`extract_phrase`] does the precise matching
pub const LIKE_PATTERNS: [&str; 2] = ["%translate.google.%", "%deepl.com%translator%"];

const SOURCE_LANG: &str = "en";

/// Phrase an English → `target_lang` translation was requested for, if
/// `raw_url` is such a request.
pub fn extract_phrase(raw_url: &str, target_lang: &str) -> Option<String> {
    let url = Url::parse(raw_url).ok()?;
    let host = url.host_str()?;

    let phrase = if host.starts_with("translate.google.") {
        google_phrase(&url, target_lang)
    } else if host == "deepl.com" || host.ends_with(".deepl.com") {
        deepl_phrase(&url, target_lang)
    } else {
        None
    }?;

    let phrase = phrase.trim();
    (!phrase.is_empty()).then(|| phrase.to_string())
}

/// `?sl=en&tl=pl&text=...`
fn google_phrase(url: &Url, target_lang: &str) -> Option<String> {
    let mut source = None;
    let mut target = None;
    let mut text = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "sl" => source = Some(value.into_owned()),
            "tl" => target = Some(value.into_owned()),
            "text" => text = Some(value.into_owned()),
            _ => {}
        }
    }

    if source.as_deref() != Some(SOURCE_LANG) || !same_lang(target.as_deref()?, target_lang) {
        return None;
    }

    text
}

/// `/translator#en/pl/...`
fn deepl_phrase(url: &Url, target_lang: &str) -> Option<String> {
    if !url.path().contains("translator") {
        return None;
    }

    let mut parts = url.fragment()?.splitn(3, '/');
    let source = parts.next()?;
    let target = parts.next()?;
    let encoded = parts.next()?;

    if source != SOURCE_LANG || !same_lang(target, target_lang) {
        return None;
    }

    let plus_decoded = encoded.replace('+', " ");
    let decoded = urlencoding::decode(&plus_decoded).ok()?;
    Some(decoded.into_owned())
}

/// `pl` matches `pl` and `pl-PL`
fn same_lang(candidate: &str, expected: &str) -> bool {
    candidate
        .split(['-', '_'])
        .next()
        .is_some_and(|lang| lang.eq_ignore_ascii_case(expected))
}
