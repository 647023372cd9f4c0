use serde_json::{json, Value};

/// Mapping of the conversation history index
pub fn conversations_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "session_id": {"type": "keyword"},
                "user_id": {"type": "keyword"},
                "timestamp": {"type": "date"},
                "role": {"type": "keyword"},
                "message": {"type": "text"},
                "context": {"type": "object"},
                "search_results": {"type": "object"}
            }
        }
    })
}

/// Mapping of the contact inquiry index
pub fn inquiries_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "inquiry_id": {"type": "keyword"},
                "property_id": {"type": "keyword"},
                "user_name": {"type": "text"},
                "user_email": {"type": "keyword"},
                "user_phone": {"type": "keyword"},
                "inquiry_type": {"type": "keyword"},
                "message": {"type": "text"},
                "preferred_contact_method": {"type": "keyword"},
                "budget_range": {"type": "text"},
                "move_in_date": {"type": "date"},
                "additional_requirements": {"type": "text"},
                "status": {"type": "keyword"},
                "priority": {"type": "keyword"},
                "created_at": {"type": "date"},
                "updated_at": {"type": "date"},
                "property_details": {"type": "object"}
            }
        }
    })
}

/// Mapping of the site visit index
pub fn site_visits_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "visit_id": {"type": "keyword"},
                "property_id": {"type": "keyword"},
                "user_name": {"type": "text"},
                "user_email": {"type": "keyword"},
                "user_phone": {"type": "keyword"},
                "preferred_date": {"type": "date"},
                "preferred_time": {"type": "keyword"},
                "confirmed_date": {"type": "date"},
                "confirmed_time": {"type": "keyword"},
                "group_size": {"type": "integer"},
                "special_requirements": {"type": "text"},
                "status": {"type": "keyword"},
                "created_at": {"type": "date"},
                "updated_at": {"type": "date"},
                "property_details": {"type": "object"}
            }
        }
    })
}
