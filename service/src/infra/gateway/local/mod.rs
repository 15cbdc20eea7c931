//! Local [`Gateway`] persisting whole collections into a [`Storage`].

mod storage;

use std::sync::Arc;

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError, From};
use tokio::sync::Mutex;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{Apartment, Entity, EntityDraft, Room},
    infra::gateway::{self, Gateway},
};

pub use self::storage::{FileStorage, MemoryStorage, Storage};

/// [`Entity`] persisted by the [`Local`] gateway.
pub trait Collection: Entity {
    /// Key of the blob storing the whole collection.
    const KEY: &'static str;
}

impl Collection for Apartment {
    const KEY: &'static str = "apartment_data";
}

impl Collection for Room {
    const KEY: &'static str = "room_data";
}

/// [`Gateway`] keeping whole collections as JSON blobs in a [`Storage`].
///
/// Every operation reads and writes a whole collection.
#[derive(Clone, Debug)]
pub struct Local<S> {
    /// [`Storage`] of the collections.
    storage: S,

    /// Lock serializing read-modify-write cycles over the collections.
    lock: Arc<Mutex<()>>,
}

impl<S: Storage> Local<S> {
    /// Creates a new [`Local`] gateway over the provided [`Storage`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            lock: Arc::default(),
        }
    }

    /// Loads the whole collection of `E`ntities.
    async fn load<E: Collection>(&self) -> Result<Vec<E>, Traced<Error>> {
        let Some(blob) = self
            .storage
            .load(E::KEY)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?
        else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&blob)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Stores the whole collection of `E`ntities.
    async fn save<E: Collection>(
        &self,
        entities: &[E],
    ) -> Result<(), Traced<Error>> {
        let blob = serde_json::to_vec(entities)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        self.storage
            .store(E::KEY, blob)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl<S, E> Gateway<Select<By<Vec<E>, ()>>> for Local<S>
where
    S: Storage,
    E: Collection,
{
    type Ok = Vec<E>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<E>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        self.load()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl<S, E> Gateway<Select<By<Option<E>, E::Id>>> for Local<S>
where
    S: Storage,
    E: Collection,
{
    type Ok = Option<E>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<E>, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let _guard = self.lock.lock().await;

        Ok(self
            .load::<E>()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?
            .into_iter()
            .find(|e| e.id() == id))
    }
}

impl<S, D> Gateway<Insert<D>> for Local<S>
where
    S: Storage,
    D: EntityDraft<Entity: Collection>,
{
    type Ok = D::Entity;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<D>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut entities = self
            .load::<D::Entity>()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?;

        let next_id = entities
            .iter()
            .map(|e| Into::<u64>::into(e.id()))
            .max()
            .unwrap_or(0)
            + 1;
        let entity =
            D::Entity::from_draft(next_id.into(), draft, DateTime::now());
        entities.push(entity.clone());

        self.save(&entities)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?;

        log::debug!(
            "inserted `{}` entry with ID {next_id}",
            <D::Entity as Entity>::COLLECTION,
        );
        Ok(entity)
    }
}

impl<S, D> Gateway<Update<(<D::Entity as Entity>::Id, D)>> for Local<S>
where
    S: Storage,
    D: EntityDraft<Entity: Collection>,
{
    type Ok = D::Entity;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(<D::Entity as Entity>::Id, D)>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut entities = self
            .load::<D::Entity>()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?;

        let entity = entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| Error::Missing {
                collection: <D::Entity as Entity>::COLLECTION,
                id: id.into(),
            })
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;
        entity.apply(draft, DateTime::now());
        let entity = entity.clone();

        self.save(&entities)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?;

        Ok(entity)
    }
}

impl<S, E> Gateway<Delete<By<E, E::Id>>> for Local<S>
where
    S: Storage,
    E: Collection,
{
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let _guard = self.lock.lock().await;

        let mut entities = self
            .load::<E>()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?;
        let before = entities.len();
        entities.retain(|e| e.id() != id);
        if entities.len() == before {
            log::debug!("no `{}` entry with ID {id} to delete", E::COLLECTION);
            return Ok(());
        }

        self.save(&entities)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

/// [`Local`] gateway error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Storage`] I/O failed.
    #[display("Storage error: {_0}")]
    Io(std::io::Error),

    /// Stored collection cannot be (de)serialized.
    #[display("Malformed stored collection: {_0}")]
    Json(serde_json::Error),

    /// Entry to update doesn't exist.
    #[display("No `{collection}` entry with ID {id}")]
    #[from(ignore)]
    Missing {
        /// Name of the collection.
        collection: &'static str,

        /// ID of the missing entry.
        id: u64,
    },
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select, Update};

    use crate::{
        domain::{apartment, Apartment},
        infra::Gateway as _,
    };

    use super::{Local, MemoryStorage, Storage as _};

    fn draft(name: &str) -> apartment::Details {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "address": "1 Some Street",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn inserts_with_next_id() {
        let local = Local::new(MemoryStorage::default());

        let first = local.execute(Insert(draft("Sun"))).await.unwrap();
        let second = local.execute(Insert(draft("Lake"))).await.unwrap();

        assert_eq!(first.id, apartment::Id::from(1));
        assert_eq!(second.id, apartment::Id::from(2));
        assert!(first.create_time.is_some());
        assert!(first.update_time.is_some());
    }

    #[tokio::test]
    async fn keeps_counting_after_deleting_lower_id() {
        let local = Local::new(MemoryStorage::default());
        let first = local.execute(Insert(draft("Sun"))).await.unwrap();
        let second = local.execute(Insert(draft("Lake"))).await.unwrap();

        local
            .execute(Delete(By::<Apartment, _>::new(first.id)))
            .await
            .unwrap();
        let third = local.execute(Insert(draft("Hill"))).await.unwrap();

        assert_eq!(third.id, apartment::Id::from(u64::from(second.id) + 1));
    }

    #[tokio::test]
    async fn reuses_id_of_deleted_max() {
        let local = Local::new(MemoryStorage::default());
        drop(local.execute(Insert(draft("Sun"))).await.unwrap());
        let last = local.execute(Insert(draft("Lake"))).await.unwrap();

        local
            .execute(Delete(By::<Apartment, _>::new(last.id)))
            .await
            .unwrap();
        let next = local.execute(Insert(draft("Hill"))).await.unwrap();

        assert_eq!(next.id, last.id);
    }

    #[tokio::test]
    async fn selects_and_updates() {
        let local = Local::new(MemoryStorage::default());
        let created = local.execute(Insert(draft("Sun"))).await.unwrap();

        let updated = local
            .execute(Update((created.id, draft("Sun Plaza"))))
            .await
            .unwrap();
        let found = local
            .execute(Select(By::<Option<Apartment>, _>::new(created.id)))
            .await
            .unwrap();

        assert_eq!(updated.details.name.to_string(), "Sun Plaza");
        assert_eq!(updated.create_time, created.create_time);
        assert_eq!(found, Some(updated));
    }

    #[tokio::test]
    async fn updating_missing_fails() {
        let local = Local::new(MemoryStorage::default());

        let res = local
            .execute(Update((apartment::Id::from(9), draft("Ghost"))))
            .await;

        assert!(res.is_err(), "updating missing entry must fail");
    }

    #[tokio::test]
    async fn lists_empty_collection() {
        let local = Local::new(MemoryStorage::default());

        let all = local
            .execute(Select(By::<Vec<Apartment>, ()>::new(())))
            .await
            .unwrap();

        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn stores_under_collection_key() {
        let storage = MemoryStorage::default();
        let local = Local::new(storage.clone());

        drop(local.execute(Insert(draft("Sun"))).await.unwrap());

        let blob = storage.load("apartment_data").await.unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(stored[0]["name"], "Sun");
        assert_eq!(stored[0]["id"], 1);
    }
}
