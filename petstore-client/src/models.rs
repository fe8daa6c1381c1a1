//! Wire types of the Petstore API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PetStatus,
}

/// Body of `POST /pets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body of `PUT /pets/{id}`. Only the fields that are set get sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
}

/// Query parameters of `GET /pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPets {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub status: Option<PetStatus>,
}

impl ListPets {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub pet_id: i64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Body of `POST /store/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub pet_id: i64,
    pub quantity: u32,
}

/// Pet counts keyed by status, as returned by `GET /store/inventory`.
pub type Inventory = BTreeMap<String, i64>;

/// Error body the API sends along with failure statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_log::test;

    use super::*;

    #[test]
    fn test_new_pet_omits_unset_fields() {
        let pet = NewPet {
            name: "Buddy".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&pet).unwrap(), json!({"name": "Buddy"}));
    }

    #[test]
    fn test_pet_defaults() {
        let pet: Pet = serde_json::from_value(json!({"id": 3, "name": "Rex"})).unwrap();
        assert_eq!(pet.status, PetStatus::Available);
        assert!(pet.tags.is_empty());
        assert_eq!(pet.age, None);
    }

    #[test]
    fn test_order_wire_names() {
        let order = NewOrder {
            pet_id: 42,
            quantity: 1,
        };
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({"petId": 42, "quantity": 1})
        );
    }

    #[test]
    fn test_list_pets_query() {
        assert!(ListPets::default().to_query().is_empty());

        let params = ListPets {
            limit: Some(10),
            offset: Some(0),
            status: Some(PetStatus::Available),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "10".to_string()),
                ("offset", "0".to_string()),
                ("status", "available".to_string()),
            ]
        );
    }

    #[test]
    fn test_status_wire_format() {
        let update = PetUpdate {
            status: Some(PetStatus::Sold),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"status": "sold"}));
    }
}
