//! Request bodies and query strings accepted by the REST API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lootforge_domain::Rarity;

/// `POST /api/adventure`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdventureRequest {
    pub user_id: Uuid,
}

/// `POST /api/forge_lootbox`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeLootboxRequest {
    pub user_id: Uuid,
    pub material_ids: Vec<Uuid>,
}

/// `?user_id=` query string for the read endpoints.
///
/// Kept as a raw string so a missing or malformed id can be reported with a
/// message instead of a generic rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIdQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// `POST /api/prize_types`, also the entry format of a prize catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePrizeTypeRequest {
    pub name: String,
    pub rarity: Rarity,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forge_request_parses_material_ids() {
        let json = r#"{
            "user_id": "6f1c1f5e-8a64-4c55-9a43-0f4dbb1f6a10",
            "material_ids": ["0b9f1a3c-3f1e-4f7a-9c3e-1a2b3c4d5e6f"]
        }"#;
        let request: ForgeLootboxRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.material_ids.len(), 1);
    }

    #[test]
    fn catalog_entry_uses_rarity_names() {
        let json = r#"[{"name": "Dragon Egg", "rarity": "Legendary", "quantity": 1}]"#;
        let entries: Vec<CreatePrizeTypeRequest> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].rarity, Rarity::Legendary);
    }

    #[test]
    fn user_query_allows_missing_id() {
        let query: UserIdQuery = serde_json::from_str("{}").unwrap();
        assert!(query.user_id.is_none());
    }
}
