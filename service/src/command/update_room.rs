//! [`Command`] for updating an existing [`Room`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{apartment, room, Apartment, Room},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Room`].
#[derive(Clone, Debug)]
pub struct UpdateRoom {
    /// ID of the [`Room`] to update.
    pub id: room::Id,

    /// New [`room::Details`] of the [`Room`].
    pub details: room::Details,
}

impl<Gw> Command<UpdateRoom> for Service<Gw>
where
    Gw: Gateway<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Select<By<Option<Apartment>, apartment::Id>>,
            Ok = Option<Apartment>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Update<(room::Id, room::Details)>,
            Ok = Room,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(&self, cmd: UpdateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoom { id, details } = cmd;

        let room = self
            .gateway()
            .execute(Select(By::<Option<Room>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        let apartment_id = details.apartment_id;
        if room.details.apartment_id != apartment_id {
            _ = self
                .gateway()
                .execute(Select(By::<Option<Apartment>, _>::new(apartment_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ApartmentNotExists(apartment_id))
                .map_err(tracerr::wrap!())?;
        }

        self.gateway()
            .execute(Update((id, details)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] room::Id),

    /// [`Apartment`] the [`Room`] is moved to doesn't exist.
    #[display("`Apartment(id: {_0})` does not exist")]
    #[from(ignore)]
    ApartmentNotExists(#[error(not(source))] apartment::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{test, CreateApartment, CreateRoom},
        Command as _,
    };

    use super::{ExecutionError, UpdateRoom};

    #[tokio::test]
    async fn updates_room() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        let room = svc
            .execute(CreateRoom {
                details: test::room(sun.id.into(), "A-101"),
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateRoom {
                id: room.id,
                details: test::room(sun.id.into(), "A-102"),
            })
            .await
            .unwrap();

        assert_eq!(updated.details.room_number.to_string(), "A-102");
        assert_eq!(updated.create_time, room.create_time);
    }

    #[tokio::test]
    async fn rejects_moving_into_unknown_apartment() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        let room = svc
            .execute(CreateRoom {
                details: test::room(sun.id.into(), "A-101"),
            })
            .await
            .unwrap();

        let err = svc
            .execute(UpdateRoom {
                id: room.id,
                details: test::room(42, "A-101"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ApartmentNotExists(_)));
    }
}
