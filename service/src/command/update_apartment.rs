//! [`Command`] for updating an existing [`Apartment`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{apartment, Apartment},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Apartment`].
#[derive(Clone, Debug)]
pub struct UpdateApartment {
    /// ID of the [`Apartment`] to update.
    pub id: apartment::Id,

    /// New [`apartment::Details`] of the [`Apartment`].
    pub details: apartment::Details,
}

impl<Gw> Command<UpdateApartment> for Service<Gw>
where
    Gw: Gateway<
            Select<By<Option<Apartment>, apartment::Id>>,
            Ok = Option<Apartment>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Update<(apartment::Id, apartment::Details)>,
            Ok = Apartment,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = Apartment;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(
        &self,
        cmd: UpdateApartment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateApartment { id, details } = cmd;

        _ = self
            .gateway()
            .execute(Select(By::<Option<Apartment>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        self.gateway()
            .execute(Update((id, details)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateApartment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Apartment`] doesn't exist.
    #[display("`Apartment(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] apartment::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{test, CreateApartment},
        domain::apartment,
        Command as _,
    };

    use super::{ExecutionError, UpdateApartment};

    #[tokio::test]
    async fn updates_existing() {
        let svc = test::service();
        let created = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateApartment {
                id: created.id,
                details: test::apartment("Sun Plaza"),
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.details.name.to_string(), "Sun Plaza");
    }

    #[tokio::test]
    async fn fails_on_missing() {
        let svc = test::service();

        let err = svc
            .execute(UpdateApartment {
                id: apartment::Id::from(7),
                details: test::apartment("Ghost"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NotExists(id) if *id == apartment::Id::from(7),
        ));
    }
}
