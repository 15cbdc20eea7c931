//! [`Command`] definition.

pub mod create_apartment;
pub mod create_room;
pub mod delete_apartment;
pub mod delete_media;
pub mod delete_room;
pub mod update_apartment;
pub mod update_room;
pub mod upload_images;
pub mod upload_media;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_apartment::CreateApartment, create_room::CreateRoom,
    delete_apartment::DeleteApartment, delete_media::DeleteMedia,
    delete_room::DeleteRoom, update_apartment::UpdateApartment,
    update_room::UpdateRoom, upload_images::UploadImages,
    upload_media::UploadMedia,
};

#[cfg(test)]
pub(crate) mod test {
    //! Shared helpers of [`Command`] tests.

    use crate::{
        domain::{apartment, room},
        infra::{gateway::local::MemoryStorage, Local},
        Config, Service,
    };

    /// Creates a new [`Service`] over an empty in-memory [`Local`] gateway.
    pub(crate) fn service() -> Service<Local<MemoryStorage>> {
        Service::new(Config::default(), Local::new(MemoryStorage::default()))
    }

    /// Returns [`apartment::Details`] with the provided name.
    pub(crate) fn apartment(name: &str) -> apartment::Details {
        serde_json::from_value(serde_json::json!({
            "district": "Downtown",
            "name": name,
            "address": "1 Some Street",
        }))
        .unwrap()
    }

    /// Returns [`room::Details`] of a room in the provided apartment.
    pub(crate) fn room(apartment_id: u64, number: &str) -> room::Details {
        serde_json::from_value(serde_json::json!({
            "apartmentId": apartment_id,
            "roomNumber": number,
            "floor": 3,
            "area": 25.5,
            "rent": 2800,
        }))
        .unwrap()
    }
}
