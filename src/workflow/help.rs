use crate::models::{Catalog, ConfigField};

/// camelCase field name to the scanner CLI's kebab-case flag: a separator is
/// inserted before each uppercase letter, which is then lowercased. No other
/// punctuation handling.
pub fn flag_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Help table rows in form-field order: (`--flag`, description). Fields the
/// catalog has no help text for are omitted.
pub fn help_rows(catalog: &Catalog) -> Vec<(String, String)> {
    ConfigField::ALL
        .iter()
        .filter_map(|field| {
            catalog
                .help
                .get(field.name())
                .map(|text| (format!("--{}", flag_name(field.name())), text.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_name_transform() {
        assert_eq!(flag_name("baseUrl"), "base-url");
        assert_eq!(flag_name("allowCorsWildcardPublic"), "allow-cors-wildcard-public");
        assert_eq!(flag_name("openapi"), "openapi");
        assert_eq!(flag_name(""), "");
    }

    #[test]
    fn test_help_rows_follow_field_order() {
        let mut catalog = Catalog::default();
        catalog.help.insert("logLevel".into(), "Log verbosity".into());
        catalog.help.insert("baseUrl".into(), "Target base URL".into());

        let rows = help_rows(&catalog);
        assert_eq!(rows.len(), 2);
        // baseUrl precedes logLevel in the form, regardless of map order.
        assert_eq!(rows[0].0, "--base-url");
        assert_eq!(rows[1].0, "--log-level");
        assert_eq!(rows[1].1, "Log verbosity");
    }
}
