//! Entities as the API returns them, and the payloads it accepts.

mod customer;
mod follow_up;
mod hierarchy;
mod interaction;
mod loan;
mod payment;
mod user;

pub use customer::*;
pub use follow_up::*;
pub use hierarchy::*;
pub use interaction::*;
pub use loan::*;
pub use payment::*;
pub use user::*;
