//! Identifier normalization for generated field names.

/// Converts a human-readable label to lowerCamelCase.
///
/// Any run of non-alphanumeric characters separates words. Each word is
/// title-cased, the words are concatenated, and the first character is
/// lowercased. A leading digit gets a `_` prefix.
#[must_use]
pub fn to_lower_camel_case(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut capitalize_next = true;

    for c in label.chars() {
        if !c.is_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    let mut chars = result.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_numeric() => format!("_{result}"),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Returns the field name for a command parameter.
///
/// Falls back to `param<index>` when the label is absent or normalizes to
/// nothing.
#[must_use]
pub fn param_field_name(label: Option<&str>, index: u32) -> String {
    let name = label.map(to_lower_camel_case).unwrap_or_default();
    if name.is_empty() {
        format!("param{index}")
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("Max Speed"), "maxSpeed");
        assert_eq!(to_lower_camel_case("param_rate-limit"), "paramRateLimit");
        assert_eq!(to_lower_camel_case("param__rate--limit"), "paramRateLimit");
        assert_eq!(to_lower_camel_case("YAW ANGLE"), "yawAngle");
        assert_eq!(to_lower_camel_case("latitude"), "latitude");
    }

    #[test]
    fn test_to_lower_camel_case_edges() {
        assert_eq!(to_lower_camel_case(""), "");
        assert_eq!(to_lower_camel_case("  -_ "), "");
        assert_eq!(to_lower_camel_case("3d mode"), "_3dMode");
        assert_eq!(to_lower_camel_case("2nd-stage burn"), "_2ndStageBurn");
        assert_eq!(to_lower_camel_case("_leading"), "leading");
    }

    #[test]
    fn test_param_field_name() {
        assert_eq!(param_field_name(Some("Max Speed"), 1), "maxSpeed");
        assert_eq!(param_field_name(Some("Lat & Lon"), 2), "latLon");
        assert_eq!(param_field_name(None, 3), "param3");
        assert_eq!(param_field_name(Some("   "), 4), "param4");
    }
}
