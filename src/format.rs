//! Line codec for the on-disk configuration format
//!
//! A configuration file is line-oriented text: one header line followed by
//! one line per item.
//!
//! ```text
//! @conff:<version>
//! $config <digest> <kind>~<value>
//! ```
//!
//! The value is everything after the first `~`, taken verbatim. It may be
//! empty and may itself contain `~` characters; only the first `~` on a
//! line is structural.

use crate::item::{Item, Kind};

/// Tag opening the header line.
const HEADER_TAG: &str = "@conff";

/// Tag opening every item line.
const ITEM_TAG: &str = "$config";

/// Returns true if `text` is a non-empty run of ASCII digits.
pub(crate) fn is_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Decodes the header line, returning the declared format version.
///
/// The line must split on `:` into exactly the tag and a non-empty
/// all-digit version; anything else is a malformed header.
pub(crate) fn decode_header(line: &str) -> Option<i32> {
    let (tag, version) = line.split_once(':')?;
    if tag != HEADER_TAG || !is_integer(version) {
        return None;
    }
    version.parse().ok()
}

/// Encodes the header line for the given format version.
pub(crate) fn encode_header(version: i32) -> String {
    format!("{HEADER_TAG}:{version}\n")
}

/// Decodes one item line, or `None` if the line is malformed.
///
/// The metadata before the first `~` must be exactly three space-separated
/// tokens: the item tag, a non-empty digest, and an all-digit kind code.
/// Kind codes outside the persisted set reject the line.
pub(crate) fn decode_item(line: &str) -> Option<Item> {
    let (meta, value) = line.split_once('~')?;

    let tokens: Vec<&str> = meta.split(' ').collect();
    if tokens.len() != 3 || tokens[0] != ITEM_TAG || tokens[1].is_empty() {
        return None;
    }
    if !is_integer(tokens[2]) {
        return None;
    }

    let kind = Kind::from_code(tokens[2].parse().ok()?)?;

    Some(Item {
        kind,
        digest: tokens[1].to_string(),
        raw_value: value.to_string(),
    })
}

/// Encodes one item as a newline-terminated line.
///
/// Returns `None` for `Kind::Unset`, which has no on-disk representation;
/// the store never holds such items.
pub(crate) fn encode_item(item: &Item) -> Option<String> {
    let code = item.kind.code()?;
    Some(format!(
        "{ITEM_TAG} {} {}~{}\n",
        item.digest, code, item.raw_value
    ))
}
