/// Strips byte-order marks and zero-width spaces and collapses inner
/// whitespace, keeping the header's original casing.
pub(crate) fn clean_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn header_key(value: &str) -> String {
    clean_header(value).to_ascii_lowercase()
}
