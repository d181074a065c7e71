//! Slug derivation and validation for blog posts and galleries.
//!
//! Titles on the site are mostly Russian, so derivation transliterates
//! Cyrillic with a fixed table before reducing the text to `[a-z0-9-]`.

use rand::Rng;
use validator::ValidationError;

/// Minimum slug length accepted from clients.
pub const MIN_SLUG_LEN: usize = 3;

/// Derived slugs are cut to this many characters before any suffix.
pub const MAX_DERIVED_SLUG_LEN: usize = 50;

/// Upper bound (exclusive) of the random collision suffix.
pub const SUFFIX_RANGE: u32 = 1000;

/// Cyrillic -> Latin transliteration table (lowercase only).
const TRANSLIT: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "yo"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
    ('і', "i"),
    ('ї', "yi"),
    ('є', "ye"),
    ('ґ', "g"),
];

fn transliterate(c: char) -> Option<&'static str> {
    TRANSLIT.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}

/// Reduce a title to slug form.
///
/// Lowercases, drops anything that is not ASCII alphanumeric, Cyrillic,
/// whitespace or a hyphen, transliterates Cyrillic, turns whitespace and
/// underscores into single hyphens and truncates to
/// [`MAX_DERIVED_SLUG_LEN`]. The result can be shorter than
/// [`MIN_SLUG_LEN`] (or empty); use [`candidate_from_title`] when a valid
/// slug is required.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        let mut buf = [0u8; 4];
        let piece: &str;
        if c.is_ascii_alphanumeric() {
            piece = c.encode_utf8(&mut buf);
        } else if let Some(latin) = transliterate(c) {
            piece = latin;
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
            continue;
        } else {
            continue;
        }

        if piece.is_empty() {
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push_str(piece);
    }

    if out.len() > MAX_DERIVED_SLUG_LEN {
        out.truncate(MAX_DERIVED_SLUG_LEN);
    }
    out.trim_end_matches('-').to_string()
}

/// Derive a slug that always passes [`validate_slug`].
///
/// Titles that reduce to fewer than [`MIN_SLUG_LEN`] characters get
/// `fallback` prepended and a random suffix appended.
pub fn candidate_from_title(title: &str, fallback: &str) -> String {
    let base = slugify(title);
    if base.len() >= MIN_SLUG_LEN {
        return base;
    }
    let prefix = if base.is_empty() {
        fallback.to_string()
    } else {
        format!("{fallback}-{base}")
    };
    with_random_suffix(&prefix)
}

/// Append `-<0..999>` to a slug that collided with an existing row.
pub fn with_random_suffix(slug: &str) -> String {
    let n = rand::rng().random_range(0..SUFFIX_RANGE);
    format!("{slug}-{n}")
}

/// Check a client-supplied slug: at least 3 characters of `[a-z0-9-]`.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.chars().count() < MIN_SLUG_LEN {
        return Err(format!("must be at least {MIN_SLUG_LEN} characters"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("may contain only lowercase latin letters, digits and hyphens".into());
    }
    Ok(())
}

/// `validator` adapter for [`validate_slug`].
pub fn validate_slug_field(slug: &str) -> Result<(), ValidationError> {
    validate_slug(slug).map_err(|message| {
        let mut err = ValidationError::new("slug");
        err.message = Some(message.into());
        err
    })
}
