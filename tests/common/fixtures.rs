use etchkit::{DeviceType, RequestLocation};
use serde_json::{Value, json};

/// A post/user/site context shaped like the host's normalized objects.
pub fn blog_context() -> Value {
    json!({
        "post": {
            "id": 42,
            "title": "Hello World",
            "excerpt": "<p>An <strong>early</strong> look at the new theme</p>",
            "price": 1234.5,
            "published": "2024-03-09 14:05:00",
            "tags": ["rust", "templates", "cms"],
            "meta": { "featured": "1", "rating": "4.5" }
        },
        "user": {
            "name": "Alice",
            "roles": ["editor"],
            "loggedIn": true
        },
        "site": {
            "name": "Etch Demo",
            "url": "https://example.test"
        },
        "team": [
            { "name": "Ana", "role": "lead" },
            "guest",
            { "name": "Bo", "role": "dev" }
        ]
    })
}

/// A single product page visited by a logged-in editor on a phone.
pub fn product_page() -> RequestLocation {
    RequestLocation {
        page_types: vec!["singular".to_string()],
        post_type: Some("product".to_string()),
        post_id: Some(42),
        terms: vec!["product_cat:shoes".to_string()],
        user_roles: vec!["editor".to_string()],
        device: Some(DeviceType::Mobile),
        url: "https://example.test/shop/red-shoes".to_string(),
        post_date: Some("2024-03-09 14:05:00".to_string()),
        now: Some("2024-06-01 09:00:00".to_string()),
        ..RequestLocation::default()
    }
}

/// `{"type": ..., "conditions": [[leaf, ...], ...]}` in the stored shape.
pub fn filter(filter_type: &str, scopes: Vec<Vec<Value>>) -> Value {
    let scopes: Vec<Value> = scopes
        .into_iter()
        .map(|leaves| json!({ "conditions": leaves }))
        .collect();
    json!({ "type": filter_type, "conditions": scopes })
}

pub fn leaf(param: &str, operator: &str, value: Value) -> Value {
    json!({ "param": param, "operator": operator, "value": value })
}
