use std::collections::BTreeMap;

/// Inline style declarations keyed by camel-cased property name.
///
/// Custom properties (`--name`) keep their name as written.
pub type StyleMap = BTreeMap<String, String>;

/// Parse an inline `key: value; key: value` style attribute.
///
/// Malformed declarations (no colon, empty key or empty value) are dropped
/// one by one; the rest of the attribute still applies.
pub fn parse_style(input: &str) -> StyleMap {
    let mut style = StyleMap::new();

    for declaration in input.split(';').map(str::trim).filter(|d| !d.is_empty()) {
        let Some((key, value)) = declaration.split_once(':') else {
            log::debug!("Dropping style declaration without colon: {:?}", declaration);
            continue;
        };

        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            log::debug!("Dropping empty style declaration: {:?}", declaration);
            continue;
        }

        let key = if is_custom_property(key) {
            key.to_string()
        } else {
            to_camel_case(key)
        };
        style.insert(key, value.to_string());
    }

    style
}

/// Serialize a style map back into an inline `style` attribute value.
pub fn to_css(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(key, value)| {
            if is_custom_property(key) {
                format!("{}:{}", key, value)
            } else {
                format!("{}:{}", to_kebab_case(key), value)
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn is_custom_property(key: &str) -> bool {
    key.starts_with("--")
}

fn to_camel_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut upper_next = false;

    for ch in key.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

fn to_kebab_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len() + 4);

    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            result.push('-');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}
