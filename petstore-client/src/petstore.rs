//! Typed Petstore operations on top of [`ApiClient`].

use crate::{
    client::ApiClient,
    error::ClientError,
    models::{Inventory, ListPets, NewOrder, NewPet, Order, Pet, PetUpdate},
    transport::{ReqwestTransport, Transport},
};

#[derive(Debug, Clone)]
pub struct PetstoreApi<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> PetstoreApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        PetstoreApi { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// `GET /pets`
    pub fn list_pets(&self, params: &ListPets) -> Result<Vec<Pet>, ClientError> {
        self.client.get_with_query("/pets", params.to_query())
    }

    /// `POST /pets`
    pub fn create_pet(&self, pet: &NewPet) -> Result<Pet, ClientError> {
        self.client.post("/pets", pet)
    }

    /// `GET /pets/{id}`
    pub fn get_pet(&self, id: i64) -> Result<Pet, ClientError> {
        self.client.get(&format!("/pets/{id}"))
    }

    /// `PUT /pets/{id}`
    pub fn update_pet(&self, id: i64, update: &PetUpdate) -> Result<Pet, ClientError> {
        self.client.put(&format!("/pets/{id}"), update)
    }

    /// `DELETE /pets/{id}`
    pub fn delete_pet(&self, id: i64) -> Result<(), ClientError> {
        // some servers echo the deleted pet, which we don't need
        self.client
            .delete::<serde_json::Value>(&format!("/pets/{id}"))
            .map(|_| ())
    }

    /// `GET /store/inventory`
    pub fn get_inventory(&self) -> Result<Inventory, ClientError> {
        self.client.get("/store/inventory")
    }

    /// `POST /store/orders`
    pub fn place_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        self.client.post("/store/orders", order)
    }
}
