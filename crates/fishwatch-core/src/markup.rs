//! Tag stripping for provider text.
//!
//! The provider embeds HTML fragments in its description fields. Before
//! display, every `<...>` run is removed with a single global substitution
//! of `<[^>]+>`. This is NOT an HTML sanitizer: entities such as `&amp;`
//! pass through unchanged, and malformed markup is only removed when it
//! matches the pattern. Rendered output must still be escaped.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Any angle-bracket-delimited run with at least one character inside.
#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is a valid constant"));

/// Remove every `<...>` tag from `input`, left to right, non-overlapping.
///
/// Returns the input borrowed when nothing matched. Idempotent.
pub fn strip_tags(input: &str) -> Cow<'_, str> {
    TAG.replace_all(input, "")
}
