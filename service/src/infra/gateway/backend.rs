//! [`Backend`] dispatching to the configured [`Gateway`].

use common::operations::{By, Delete, Insert, Select, Update, Upload};
use tracerr::Traced;

use crate::domain::{
    upload::{self, Media},
    Entity, EntityDraft,
};

#[cfg(feature = "http")]
use super::Http;
use super::{
    local::{Collection, FileStorage},
    Error, Gateway, Local,
};

/// [`Gateway`] selected at runtime.
#[derive(Clone, Debug)]
pub enum Backend {
    /// REST API.
    #[cfg(feature = "http")]
    Http(Http),

    /// Collections stored in local files.
    Local(Local<FileStorage>),
}

/// Executes the provided operation on the active [`Backend`] variant.
macro_rules! dispatch {
    ($self:ident, $op:expr) => {
        match $self {
            #[cfg(feature = "http")]
            Self::Http(gw) => gw.execute($op).await,
            Self::Local(gw) => gw.execute($op).await,
        }
    };
}

impl<E: Collection> Gateway<Select<By<Vec<E>, ()>>> for Backend {
    type Ok = Vec<E>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Select<By<Vec<E>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        dispatch!(self, op)
    }
}

impl<E: Collection> Gateway<Select<By<Option<E>, E::Id>>> for Backend {
    type Ok = Option<E>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Select<By<Option<E>, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        dispatch!(self, op)
    }
}

impl<D> Gateway<Insert<D>> for Backend
where
    D: EntityDraft<Entity: Collection>,
{
    type Ok = D::Entity;
    type Err = Traced<Error>;

    async fn execute(&self, op: Insert<D>) -> Result<Self::Ok, Self::Err> {
        dispatch!(self, op)
    }
}

impl<D> Gateway<Update<(<D::Entity as Entity>::Id, D)>> for Backend
where
    D: EntityDraft<Entity: Collection>,
{
    type Ok = D::Entity;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Update<(<D::Entity as Entity>::Id, D)>,
    ) -> Result<Self::Ok, Self::Err> {
        dispatch!(self, op)
    }
}

impl<E: Collection> Gateway<Delete<By<E, E::Id>>> for Backend {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Delete<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        dispatch!(self, op)
    }
}

impl Gateway<Upload<Media>> for Backend {
    type Ok = upload::Url;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Upload<Media>,
    ) -> Result<Self::Ok, Self::Err> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(gw) => gw.execute(op).await,
            Self::Local(_) => {
                drop(op);
                Err(unsupported())
            }
        }
    }
}

impl Gateway<Upload<Vec<upload::File>>> for Backend {
    type Ok = Vec<upload::Url>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Upload<Vec<upload::File>>,
    ) -> Result<Self::Ok, Self::Err> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(gw) => gw.execute(op).await,
            Self::Local(_) => {
                drop(op);
                Err(unsupported())
            }
        }
    }
}

impl Gateway<Delete<upload::Url>> for Backend {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Delete<upload::Url>,
    ) -> Result<Self::Ok, Self::Err> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(gw) => gw.execute(op).await,
            Self::Local(_) => {
                drop(op);
                Err(unsupported())
            }
        }
    }
}

/// Returns the error of a file operation the [`Local`] gateway has no
/// counterpart for.
fn unsupported() -> Traced<Error> {
    tracerr::new!(Error::Unsupported("File upload"))
}
