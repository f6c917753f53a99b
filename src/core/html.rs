// src/core/html.rs
// Low-level HTML string helpers for the host product page.
// Deliberately naive: no DOM, no nesting awareness. Tag and attribute
// names are matched case-insensitively on ASCII; attribute values are
// matched verbatim.

/// Byte span of the next opening tag `<name ...>` at or after `from`.
/// Skips closing tags, comments and anything that does not start with
/// an ASCII letter.
pub fn next_open_tag(s: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        let start = s[i..].find('<')? + i;
        let after = start + 1;
        if after < bytes.len() && bytes[after].is_ascii_alphabetic() {
            let end = s[start..].find('>')? + start + 1;
            return Some((start, end));
        }
        i = start + 1;
    }
    None
}

/// Tag name of an opening tag span like `<div class="x">`.
pub fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<');
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Value of `attr` inside an opening tag, or None if absent.
/// Handles `attr="v"`, `attr='v'` and bare `attr=v`; a valueless
/// attribute yields an empty string.
pub fn attr_value_ci(tag: &str, attr: &str) -> Option<String> {
    let lc = to_lowercase_fast(tag);
    let attr_lc = to_lowercase_fast(attr);
    let bytes = lc.as_bytes();

    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&attr_lc) {
        let at = from + rel;
        from = at + 1;

        // Word boundaries: preceded by whitespace, followed by '=', ws, '>' or '/'.
        let before_ok = at > 0 && bytes[at - 1].is_ascii_whitespace();
        let after = at + attr_lc.len();
        let after_ok = after >= bytes.len()
            || matches!(bytes[after], b'=' | b'>' | b'/')
            || bytes[after].is_ascii_whitespace();
        if !before_ok || !after_ok {
            continue;
        }

        // Skip whitespace up to '='
        let mut j = after;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'=' {
            return Some(String::new());
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() {
            return Some(String::new());
        }

        // Quoted or bare value, read from the original (non-lowercased) tag
        return Some(match bytes[j] {
            q @ (b'"' | b'\'') => {
                let rest = &tag[j + 1..];
                let end = rest.find(q as char).unwrap_or(rest.len());
                rest[..end].to_string()
            }
            _ => {
                let rest = &tag[j..];
                let end = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .unwrap_or(rest.len());
                rest[..end].to_string()
            }
        });
    }
    None
}

/// True if the tag's `class` attribute contains `token` as a whole
/// whitespace-separated class name.
pub fn has_class_token(tag: &str, token: &str) -> bool {
    match attr_value_ci(tag, "class") {
        Some(classes) => classes.split_ascii_whitespace().any(|c| c == token),
        None => false,
    }
}

/// Opening-tag span of the first element whose `id` equals `id` exactly.
pub fn find_by_id(doc: &str, id: &str) -> Option<(usize, usize)> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_open_tag(doc, pos) {
        if attr_value_ci(&doc[s..e], "id").as_deref() == Some(id) {
            return Some((s, e));
        }
        pos = e;
    }
    None
}

/// Value of `attr` on the first element that carries it, in document order.
pub fn find_attr_value(doc: &str, attr: &str) -> Option<String> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_open_tag(doc, pos) {
        if let Some(v) = attr_value_ci(&doc[s..e], attr) {
            return Some(v);
        }
        pos = e;
    }
    None
}

/// Text content of the element whose opening tag spans `(open_s, open_e)`:
/// everything up to the first matching close tag, with nested tags
/// stripped. Unclosed elements yield an empty string.
pub fn inner_text(doc: &str, open_s: usize, open_e: usize) -> String {
    let name = tag_name(&doc[open_s..open_e]);
    let close = format!("</{}", to_lowercase_fast(name));
    let lc = to_lowercase_fast(&doc[open_e..]);
    match lc.find(&close) {
        Some(rel) => strip_tags(normalize_entities(&doc[open_e..open_e + rel])),
        None => String::new(),
    }
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Minimal HTML entity decoding: handle `&nbsp;` and `&amp;` only.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_tag_skips_closers_and_comments() {
        let doc = "text </div> <!-- note --> <span data-x=1>hi</span>";
        let (s, e) = next_open_tag(doc, 0).unwrap();
        assert_eq!(&doc[s..e], "<span data-x=1>");
        assert_eq!(tag_name(&doc[s..e]), "span");
    }

    #[test]
    fn attr_value_quoting_variants() {
        assert_eq!(
            attr_value_ci(r#"<div data-price="49,90">"#, "data-price").as_deref(),
            Some("49,90")
        );
        assert_eq!(
            attr_value_ci("<div data-weight='600'>", "data-weight").as_deref(),
            Some("600")
        );
        assert_eq!(
            attr_value_ci("<div data-width=12>", "data-width").as_deref(),
            Some("12")
        );
        assert_eq!(attr_value_ci("<div data-other=1>", "data-width"), None);
    }

    #[test]
    fn attr_name_is_word_bounded() {
        // data-weight must not match data-weight-unit's prefix... but a tag
        // carrying both should still resolve the exact name.
        let tag = r#"<div data-weight-unit="g" data-weight="600">"#;
        assert_eq!(attr_value_ci(tag, "data-weight").as_deref(), Some("600"));
    }

    #[test]
    fn class_token_matching() {
        let tag = r#"<span class="money product-price big">"#;
        assert!(has_class_token(tag, "product-price"));
        assert!(!has_class_token(tag, "price"));
    }

    #[test]
    fn find_by_id_is_exact() {
        let doc = r#"<div id="other"></div><div id="calculador-frete"></div>"#;
        assert!(find_by_id(doc, "calculador-frete").is_some());
        assert!(find_by_id(doc, "Calculador-Frete").is_none());
    }

    #[test]
    fn inner_text_strips_nested_markup() {
        let doc = r#"<span class="price"><b>R$</b> 1.234,56</span>"#;
        let (s, e) = next_open_tag(doc, 0).unwrap();
        assert_eq!(inner_text(doc, s, e), "R$ 1.234,56");
    }
}
