//! Identifier casing conventions applied during introspection.

use serde::Deserialize;

/// Naming convention for identifiers emitted by `introspect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IdentifierCasing {
    /// `created_at`
    #[default]
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `createdAt`
    #[serde(rename = "camelCase")]
    CamelCase,
    /// Keep identifiers exactly as the database reports them
    #[serde(rename = "preserve")]
    Preserve,
}

impl IdentifierCasing {
    /// Apply the convention to a database identifier.
    pub fn apply(self, ident: &str) -> String {
        match self {
            IdentifierCasing::Preserve => ident.to_string(),
            IdentifierCasing::SnakeCase => {
                let words = split_words(ident);
                words.join("_")
            }
            IdentifierCasing::CamelCase => {
                let words = split_words(ident);
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(word);
                    } else {
                        let mut chars = word.chars();
                        if let Some(first) = chars.next() {
                            out.extend(first.to_uppercase());
                            out.push_str(chars.as_str());
                        }
                    }
                }
                out
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierCasing::SnakeCase => "snake_case",
            IdentifierCasing::CamelCase => "camelCase",
            IdentifierCasing::Preserve => "preserve",
        }
    }
}

/// Split an identifier into lowercase words. Understands `snake_case`,
/// `kebab-case` and `camelCase`/`PascalCase` boundaries.
fn split_words(ident: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in ident.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
        } else if c.is_uppercase() {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
            current.extend(c.to_lowercase());
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::IdentifierCasing;

    #[test]
    fn snake_case_from_snake() {
        assert_eq!(
            IdentifierCasing::SnakeCase.apply("created_at"),
            "created_at"
        );
    }

    #[test]
    fn snake_case_from_camel() {
        assert_eq!(
            IdentifierCasing::SnakeCase.apply("createdAt"),
            "created_at"
        );
        assert_eq!(
            IdentifierCasing::SnakeCase.apply("InvoiceDetail"),
            "invoice_detail"
        );
    }

    #[test]
    fn camel_case_from_snake() {
        assert_eq!(
            IdentifierCasing::CamelCase.apply("total_amount"),
            "totalAmount"
        );
        assert_eq!(IdentifierCasing::CamelCase.apply("id"), "id");
    }

    #[test]
    fn preserve_keeps_input() {
        assert_eq!(
            IdentifierCasing::Preserve.apply("WeIrD_Name"),
            "WeIrD_Name"
        );
    }

    #[test]
    fn kebab_and_spaces_are_boundaries() {
        assert_eq!(
            IdentifierCasing::SnakeCase.apply("due-date"),
            "due_date"
        );
        assert_eq!(
            IdentifierCasing::CamelCase.apply("unit price"),
            "unitPrice"
        );
    }

    #[test]
    fn default_is_snake_case() {
        assert_eq!(IdentifierCasing::default(), IdentifierCasing::SnakeCase);
    }
}
