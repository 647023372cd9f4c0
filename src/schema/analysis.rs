use serde_json::{json, Value};

/// Domain synonym equivalence classes applied at index time. Each entry is
/// one comma-separated class in the store's synonym-filter format.
pub const SYNONYM_CLASSES: &[&str] = &[
    "apartment, flat, unit",
    "villa, house, bungalow",
    "bhk, bedroom",
    "sqft, square feet, sq ft",
    "metro, subway, train",
    "school, education, college",
    "hospital, medical, healthcare",
];

/// Name of the custom analyzer applied to property text fields
pub const PROPERTY_ANALYZER: &str = "property_analyzer";

/// Analysis settings for the property index: standard tokenizer, then
/// lowercase → asciifolding → stopwords → synonyms → stemmer. The chain is
/// deterministic and idempotent: re-analyzing already-normalized text is a
/// no-op.
pub fn analysis_settings() -> Value {
    json!({
        "analysis": {
            "analyzer": {
                PROPERTY_ANALYZER: {
                    "type": "custom",
                    "tokenizer": "standard",
                    "filter": [
                        "lowercase",
                        "asciifolding",
                        "property_stop",
                        "property_synonym",
                        "property_stemmer"
                    ]
                }
            },
            "filter": {
                "property_stop": {
                    "type": "stop",
                    "stopwords": "_english_"
                },
                "property_synonym": {
                    "type": "synonym",
                    "synonyms": SYNONYM_CLASSES
                },
                "property_stemmer": {
                    "type": "stemmer",
                    "language": "english"
                }
            }
        }
    })
}
