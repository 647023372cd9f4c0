use serde_json::{json, Value};

use crate::models::EMBEDDING_DIMENSION;

use super::analysis::{analysis_settings, PROPERTY_ANALYZER};

/// Full mapping of the property index: analyzed text fields, keyword
/// facets, geo point, nested nearby amenities and the dense embedding
/// vector.
pub fn properties_mapping() -> Value {
    json!({
        "settings": analysis_settings(),
        "mappings": {
            "properties": {
                "property_id": {"type": "keyword"},
                "name": {
                    "type": "text",
                    "analyzer": PROPERTY_ANALYZER,
                    "fields": {
                        "keyword": {"type": "keyword"},
                        "suggest": {
                            "type": "completion",
                            "analyzer": "simple"
                        }
                    }
                },
                "description": {
                    "type": "text",
                    "analyzer": PROPERTY_ANALYZER
                },
                "property_type": {
                    "type": "keyword",
                    "fields": {
                        "text": {"type": "text"}
                    }
                },
                "bedrooms": {"type": "integer"},
                "bathrooms": {"type": "integer"},
                "floor": {"type": "integer"},
                "total_floors": {"type": "integer"},
                "area_sqft": {"type": "float"},
                "carpet_area_sqft": {"type": "float"},
                "price": {"type": "float"},
                "price_per_sqft": {"type": "float"},
                "currency": {"type": "keyword"},
                "property_status": {"type": "keyword"},
                "furnishing": {"type": "keyword"},

                // Geo-location for geo-search
                "geo_location": {"type": "geo_point"},
                "address": {
                    "type": "object",
                    "properties": {
                        "locality": {
                            "type": "text",
                            "fields": {"keyword": {"type": "keyword"}}
                        },
                        "city": {
                            "type": "text",
                            "fields": {"keyword": {"type": "keyword"}}
                        },
                        "state": {
                            "type": "text",
                            "fields": {"keyword": {"type": "keyword"}}
                        },
                        "pincode": {"type": "keyword"},
                        "place_id": {"type": "keyword"}
                    }
                },

                // Builder, project and sourcing platform
                "builder_name": {
                    "type": "keyword",
                    "fields": {"text": {"type": "text"}}
                },
                "project_name": {
                    "type": "keyword",
                    "fields": {"text": {"type": "text"}}
                },
                "platform_name": {
                    "type": "keyword",
                    "fields": {"text": {"type": "text"}}
                },
                "platform_focus": {"type": "text"},
                "target_audience": {"type": "text"},
                "special_features": {"type": "text"},

                "amenities": {"type": "keyword"},

                "nearby_amenities": {
                    "type": "nested",
                    "properties": {
                        "name": {"type": "text"},
                        "type": {"type": "keyword"},
                        "distance_km": {"type": "float"},
                        "rating": {"type": "float"},
                        "address": {"type": "text"},
                        "place_id": {"type": "keyword"}
                    }
                },

                "image_urls": {"type": "keyword"},

                // AI generated content
                "ai_summary": {"type": "text"},
                "ai_highlights": {"type": "text"},
                "ai_recommendations": {"type": "text"},

                // Vector embedding for similarity ranking
                "embedding": {
                    "type": "dense_vector",
                    "dims": EMBEDDING_DIMENSION,
                    "index": true,
                    "similarity": "cosine"
                },

                // Combined text the embedding is generated from
                "combined_text": {"type": "text"},

                "created_at": {"type": "date"},
                "updated_at": {"type": "date"}
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_field_shape() {
        let mapping = properties_mapping();
        let embedding = mapping
            .pointer("/mappings/properties/embedding")
            .unwrap();
        assert_eq!(embedding["type"], "dense_vector");
        assert_eq!(embedding["dims"], 768);
        assert_eq!(embedding["similarity"], "cosine");
    }

    #[test]
    fn test_nearby_amenities_nested() {
        let mapping = properties_mapping();
        let nested = mapping
            .pointer("/mappings/properties/nearby_amenities")
            .unwrap();
        assert_eq!(nested["type"], "nested");
        assert_eq!(nested["properties"]["distance_km"]["type"], "float");
    }

    #[test]
    fn test_geo_and_analyzer_declared() {
        let mapping = properties_mapping();
        assert_eq!(
            mapping.pointer("/mappings/properties/geo_location/type").unwrap(),
            "geo_point"
        );
        assert_eq!(
            mapping.pointer("/mappings/properties/name/analyzer").unwrap(),
            PROPERTY_ANALYZER
        );
        assert!(mapping
            .pointer("/settings/analysis/analyzer/property_analyzer")
            .is_some());
    }

    #[test]
    fn test_ranking_fields_declared() {
        // Every field the ranking clauses reference resolves to a declared
        // mapping entry.
        let mapping = properties_mapping();
        for path in [
            "/mappings/properties/name",
            "/mappings/properties/description",
            "/mappings/properties/property_type",
            "/mappings/properties/address/properties/city",
            "/mappings/properties/address/properties/locality",
            "/mappings/properties/amenities",
            "/mappings/properties/combined_text",
            "/mappings/properties/target_audience",
            "/mappings/properties/special_features",
            "/mappings/properties/platform_focus",
        ] {
            assert!(mapping.pointer(path).is_some(), "missing {path}");
        }
    }
}
