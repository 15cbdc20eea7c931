//! [`Command`] for creating a new [`Room`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{apartment, room, Apartment, Room},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Room`] in an existing [`Apartment`].
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`room::Details`] of a new [`Room`].
    pub details: room::Details,
}

impl<Gw> Command<CreateRoom> for Service<Gw>
where
    Gw: Gateway<
            Select<By<Option<Apartment>, apartment::Id>>,
            Ok = Option<Apartment>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Insert<room::Details>,
            Ok = Room,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom { details } = cmd;

        let apartment_id = details.apartment_id;
        _ = self
            .gateway()
            .execute(Select(By::<Option<Apartment>, _>::new(apartment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ApartmentNotExists(apartment_id))
            .map_err(tracerr::wrap!())?;

        self.gateway()
            .execute(Insert(details))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Apartment`] the [`Room`] belongs to doesn't exist.
    #[display("`Apartment(id: {_0})` does not exist")]
    #[from(ignore)]
    ApartmentNotExists(#[error(not(source))] apartment::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{test, CreateApartment},
        domain::room,
        Command as _,
    };

    use super::{CreateRoom, ExecutionError};

    #[tokio::test]
    async fn creates_room_in_apartment() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();

        let created = svc
            .execute(CreateRoom {
                details: test::room(sun.id.into(), "A-101"),
            })
            .await
            .unwrap();

        assert_eq!(created.id, room::Id::from(1));
        assert_eq!(created.details.apartment_id, sun.id);
    }

    #[tokio::test]
    async fn rejects_unknown_apartment() {
        let svc = test::service();

        let err = svc
            .execute(CreateRoom {
                details: test::room(3, "A-101"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ApartmentNotExists(_)));
    }
}
