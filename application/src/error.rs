//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{
        create_room, delete_apartment, update_apartment, update_room,
        upload_media,
    },
    controller::{
        form::{LoadError, SubmitError},
        UnknownField,
    },
    domain::upload,
    infra::gateway,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Console [`Error`] shown to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided [`Code`] and message.
    #[must_use]
    pub fn new(code: Code, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new("INTERNAL_ERROR", msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for gateway::Error {
    fn try_as_error(&self) -> Option<Error> {
        use gateway::http::Error as Http;

        Some(match self {
            Self::Http(Http::Network(_) | Http::Status(_)) => {
                Error::new("NETWORK_ERROR", self.to_string())
            }
            Self::Http(Http::Api { message, .. }) => {
                Error::new("API_ERROR", message.clone())
            }
            Self::Http(Http::NoData) => return None,
            Self::Local(_) => Error::new("STORAGE_ERROR", self.to_string()),
            Self::Unsupported(_) => {
                Error::new("UNSUPPORTED", self.to_string())
            }
        })
    }
}

impl AsError for create_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::ApartmentNotExists(_) => {
                Some(Error::new("APARTMENT_NOT_EXISTS", self.to_string()))
            }
        }
    }
}

impl AsError for update_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::NotExists(_) => {
                Some(Error::new("ROOM_NOT_EXISTS", self.to_string()))
            }
            Self::ApartmentNotExists(_) => {
                Some(Error::new("APARTMENT_NOT_EXISTS", self.to_string()))
            }
        }
    }
}

impl AsError for update_apartment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::NotExists(_) => {
                Some(Error::new("APARTMENT_NOT_EXISTS", self.to_string()))
            }
        }
    }
}

impl AsError for delete_apartment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::NotExists(_) => {
                Some(Error::new("APARTMENT_NOT_EXISTS", self.to_string()))
            }
            Self::HasRooms { .. } => {
                Some(Error::new("APARTMENT_HAS_ROOMS", self.to_string()))
            }
        }
    }
}

impl AsError for upload_media::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::FileConstraint(e) => e.try_as_error(),
        }
    }
}

impl AsError for upload::ConstraintError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("FILE_CONSTRAINT", self.to_string()))
    }
}

impl AsError for UnknownField {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("UNKNOWN_FIELD", self.to_string()))
    }
}

impl AsError for LoadError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.try_as_error(),
            Self::NotFound { .. } => {
                Some(Error::new("NOT_FOUND", self.to_string()))
            }
        }
    }
}

impl<C, U> AsError for SubmitError<C, U>
where
    C: AsError + fmt::Display,
    U: AsError + fmt::Display,
{
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Validation(violations) => {
                Some(Error::new("VALIDATION_FAILED", violations.to_string()))
            }
            Self::Malformed(_) => {
                Some(Error::new("MALFORMED_INPUT", self.to_string()))
            }
            Self::Create(e) => Some(e.as_error()),
            Self::Update(e) => Some(e.as_error()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::upload::ConstraintError, infra::gateway};

    use super::AsError as _;

    #[test]
    fn maps_api_errors_to_their_message() {
        let err = gateway::Error::Http(gateway::http::Error::Api {
            code: 500,
            message: "Apartment name is taken".into(),
        });

        let err = err.as_error();

        assert_eq!(err.code, "API_ERROR");
        assert_eq!(err.to_string(), "[API_ERROR]: Apartment name is taken");
    }

    #[test]
    fn maps_unknown_errors_to_internal() {
        let err = gateway::Error::Http(gateway::http::Error::NoData);

        assert_eq!(err.as_error().code, "INTERNAL_ERROR");
    }

    #[test]
    fn keeps_trace_of_traced_errors() {
        let err = tracerr::new!(ConstraintError::Empty);

        let err = err.as_error();

        assert_eq!(err.code, "FILE_CONSTRAINT");
        assert!(err.backtrace.is_some());
    }
}
