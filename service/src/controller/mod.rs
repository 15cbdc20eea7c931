//! Controllers driving the list and form screens of the console.
//!
//! Controllers own the screen state and talk to a view only through the
//! [`Notify`] family of traits, so any front end may render them.

pub mod form;
pub mod list;

use derive_more::{Display, Error};

pub use self::{
    form::{Editable, FormController, FormView, Mode},
    list::{ListController, ListView, Listing},
};

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Level {
    /// Operation succeeded.
    #[display("success")]
    Success,

    /// Operation failed.
    #[display("error")]
    Error,
}

/// Transient message shown to the user.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("[{level}] {message}")]
pub struct Notice {
    /// [`Level`] of this [`Notice`].
    pub level: Level,

    /// Text of this [`Notice`].
    pub message: String,
}

impl Notice {
    /// Creates a new [`Level::Success`] [`Notice`].
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Creates a new [`Level::Error`] [`Notice`].
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// View receiving [`Notice`]s and loading state from a controller.
pub trait Notify {
    /// Shows the provided [`Notice`].
    fn notify(&mut self, notice: Notice);

    /// Shows or hides the loading indicator.
    fn set_loading(&mut self, loading: bool);
}

/// Field unknown to the controller it was addressed to.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("Unknown field `{_0}`")]
pub struct UnknownField(#[error(not(source))] pub String);

/// Token of a request issued by a controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token(u64);

/// Issuer of monotonically increasing request [`Token`]s.
#[derive(Clone, Copy, Debug, Default)]
struct Sequence {
    /// Latest issued [`Token`] number.
    latest: u64,
}

impl Sequence {
    /// Issues a new [`Token`], outdating all the previous ones.
    fn issue(&mut self) -> Token {
        self.latest += 1;
        Token(self.latest)
    }

    /// Indicates whether the provided [`Token`] is the latest issued one.
    fn is_latest(&self, token: Token) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
pub(crate) mod test {
    //! Shared helpers of controller tests.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{
        form::ValidationResult,
        infra::{gateway::local::MemoryStorage, Gateway, Local},
    };

    use super::{FormView, ListView, Listing, Notice, Notify};

    /// [`Gateway`] recording the number of operations it executed.
    #[derive(Debug)]
    pub(crate) struct Recording {
        /// Underlying [`Local`] gateway.
        inner: Local<MemoryStorage>,

        /// Number of executed operations.
        calls: AtomicUsize,
    }

    impl Default for Recording {
        fn default() -> Self {
            Self {
                inner: Local::new(MemoryStorage::default()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Recording {
        /// Returns the number of operations executed so far.
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<Op> Gateway<Op> for Recording
    where
        Local<MemoryStorage>: Gateway<Op>,
    {
        type Ok = <Local<MemoryStorage> as Gateway<Op>>::Ok;
        type Err = <Local<MemoryStorage> as Gateway<Op>>::Err;

        async fn execute(&self, op: Op) -> Result<Self::Ok, Self::Err> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.execute(op).await
        }
    }

    /// View recording everything it was told.
    #[derive(Debug, Default)]
    pub(crate) struct View {
        /// IDs of the items of every rendered listing.
        pub(crate) renders: Vec<Vec<u64>>,

        /// Shown notices.
        pub(crate) notices: Vec<Notice>,

        /// Marked form fields.
        pub(crate) marks: Vec<(&'static str, ValidationResult)>,

        /// Indicator whether the loading indicator is shown.
        pub(crate) loading: bool,

        /// Number of requested navigations away from a form.
        pub(crate) navigations: usize,
    }

    impl Notify for View {
        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }

        fn set_loading(&mut self, loading: bool) {
            self.loading = loading;
        }
    }

    impl<E: crate::domain::Entity> ListView<E> for View {
        fn render(&mut self, listing: &Listing<'_, E>) {
            self.renders
                .push(listing.items.iter().map(|e| e.id().into()).collect());
        }
    }

    impl FormView for View {
        fn mark_field(
            &mut self,
            field: &'static str,
            result: &ValidationResult,
        ) {
            self.marks.push((field, result.clone()));
        }

        fn navigate_away(&mut self) {
            self.navigations += 1;
        }
    }
}
