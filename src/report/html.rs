use quick_xml::escape::{escape, resolve_html5_entity, unescape_with};

/// Decodes the HTML entities the Q&A API leaves in titles (`&#39;`, `&quot;`, `&hellip;`).
/// Text with a malformed entity is returned unchanged.
pub fn decode_entities(text: &str) -> String {
    match unescape_with(text, resolve_html5_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!("Keeping raw title {:?}: {}", text, e);
            text.to_string()
        }
    }
}

pub fn escape_html(text: &str) -> String {
    escape(text).into_owned()
}
