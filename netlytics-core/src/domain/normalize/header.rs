// netlytics-core/src/domain/normalize/header.rs

/// Converts a raw header into a canonical snake_case key.
///
/// Runs of non-alphanumeric characters become a single `_`, a lowercase or digit
/// followed by an uppercase letter starts a new word (`inviterProfileUrl` ->
/// `inviter_profile_url`), and the result never starts or ends with `_`.
/// Only ASCII letters and digits survive; the function is idempotent.
pub fn canonicalize_header(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    let mut boundary = false;

    for c in name.trim().chars() {
        if !c.is_ascii_alphanumeric() {
            boundary = true;
            prev = None;
            continue;
        }

        if let Some(p) = prev
            && c.is_ascii_uppercase()
            && (p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            boundary = true;
        }

        if boundary && !out.is_empty() {
            out.push('_');
        }
        boundary = false;
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    out
}

/// True when any `_`-separated token of `column` equals one of `hints`.
pub fn has_token(column: &str, hints: &[&str]) -> bool {
    column.split('_').any(|token| hints.contains(&token))
}

/// Hints shorter than this match whole tokens only (`to` must not hit `total`).
const MIN_SUBSTRING_HINT: usize = 3;

/// True when `column` contains one of `hints` anywhere, so run-together
/// headers like `emailaddress` or `firstname` still match. Short hints fall
/// back to [`has_token`].
pub fn mentions_hint(column: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| {
        if hint.len() < MIN_SUBSTRING_HINT {
            has_token(column, &[hint])
        } else {
            column.contains(hint)
        }
    })
}
