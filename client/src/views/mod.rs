//! Page view-state, independent of any UI framework.
//!
//! Pages keep one of these per screen and feed it actions as requests start
//! and settle; rendering only reads the state.

use shared::{Customer, FollowUp, Hierarchy, Id, Interaction, Loan, Payment, User};

mod detail;
mod form;
mod list;

pub use detail::{DetailAction, DetailState, Mode};
pub use form::FormState;
pub use list::{ListAction, ListState, LoadStatus};

/// Anything a list can show and delete by id.
pub trait Entity {
    fn id(&self) -> &Id;
}

macro_rules! entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &Id {
                &self.id
            }
        })*
    };
}

entity!(User, Hierarchy, Customer, Loan, Payment, Interaction, FollowUp);
