//! Ordered keyword rules mapping a transaction concept to a category label.
//!
//! No LLM, no fuzzy scoring — lowercase substring matching covers the
//! recurring merchants in a personal statement. Rule order is part of the
//! contract: the first rule with a keyword hit wins, so broad buckets go
//! after specific ones.

/// One category and the lowercase substrings that select it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// An ordered rule list plus the label used when nothing matches.
/// Static configuration: built once, never mutated while classifying.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRuleSet {
    rules: Vec<CategoryRule>,
    default_label: String,
}

impl CategoryRuleSet {
    pub fn new(rules: Vec<CategoryRule>, default_label: impl Into<String>) -> Self {
        Self {
            rules,
            default_label: default_label.into(),
        }
    }

    /// Assign exactly one category label to a normalized concept.
    /// Pure and total: an unmatched concept gets the default label.
    pub fn classify(&self, concept: &str) -> &str {
        let concept = concept.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| concept.contains(kw.as_str())) {
                return &rule.label;
            }
        }
        &self.default_label
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }
}

impl Default for CategoryRuleSet {
    /// Built-in rule set for Spanish bank exports.
    fn default() -> Self {
        Self::new(
            vec![
                CategoryRule::new(
                    "Comida y Supermercado",
                    &[
                        "restaurante",
                        "bar",
                        "comida",
                        "supermercado",
                        "mercadona",
                        "carrefour",
                        "lidl",
                        "burger",
                        "pizza",
                    ],
                ),
                CategoryRule::new(
                    "Ocio y Entretenimiento",
                    &["cine", "teatro", "netflix", "spotify", "hbo", "juego"],
                ),
                CategoryRule::new(
                    "Viajes y Transporte",
                    &["vuelo", "hotel", "airbnb", "tren", "renfe", "uber", "taxi"],
                ),
                CategoryRule::new(
                    "Hogar y Servicios",
                    &["alquiler", "hipoteca", "luz", "agua", "gas", "internet"],
                ),
                CategoryRule::new(
                    "Ingresos",
                    &["nomina", "n\u{f3}mina", "transferencia recibida", "abono"],
                ),
            ],
            "Otros",
        )
    }
}
