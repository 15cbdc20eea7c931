//! [`Command`] for deleting an [`Apartment`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{apartment, Apartment, Room},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Apartment`].
///
/// [`Apartment`]s still having [`Room`]s cannot be deleted.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteApartment {
    /// ID of the [`Apartment`] to delete.
    pub id: apartment::Id,
}

impl<Gw> Command<DeleteApartment> for Service<Gw>
where
    Gw: Gateway<
            Select<By<Option<Apartment>, apartment::Id>>,
            Ok = Option<Apartment>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Select<By<Vec<Room>, ()>>,
            Ok = Vec<Room>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Delete<By<Apartment, apartment::Id>>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(
        &self,
        cmd: DeleteApartment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteApartment { id } = cmd;

        _ = self
            .gateway()
            .execute(Select(By::<Option<Apartment>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        let rooms = self
            .gateway()
            .execute(Select(By::<Vec<Room>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .iter()
            .filter(|r| r.details.apartment_id == id)
            .count();
        if rooms > 0 {
            return Err(tracerr::new!(E::HasRooms { id, rooms }));
        }

        self.gateway()
            .execute(Delete(By::<Apartment, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Apartment(id: {id})` deleted");
        Ok(())
    }
}

/// Error of [`DeleteApartment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Apartment`] doesn't exist.
    #[display("`Apartment(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] apartment::Id),

    /// [`Apartment`] still has [`Room`]s.
    #[display("`Apartment(id: {id})` still has {rooms} room(s)")]
    #[from(ignore)]
    HasRooms {
        /// ID of the [`Apartment`].
        id: apartment::Id,

        /// Number of [`Room`]s in the [`Apartment`].
        rooms: usize,
    },
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::{test, CreateApartment, CreateRoom},
        domain::Apartment,
        infra::Gateway as _,
        Command as _,
    };

    use super::{DeleteApartment, ExecutionError};

    #[tokio::test]
    async fn deletes_empty_apartment() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();

        svc.execute(DeleteApartment { id: sun.id }).await.unwrap();

        let left = svc
            .gateway()
            .execute(Select(By::<Vec<Apartment>, _>::new(())))
            .await
            .unwrap();
        assert!(left.is_empty());
    }

    #[tokio::test]
    async fn rejects_apartment_with_rooms() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        drop(
            svc.execute(CreateRoom {
                details: test::room(sun.id.into(), "A-101"),
            })
            .await
            .unwrap(),
        );

        let err = svc
            .execute(DeleteApartment { id: sun.id })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::HasRooms { rooms: 1, .. },
        ));
    }
}
