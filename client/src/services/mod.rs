//! One service per REST resource.
//!
//! Each service dereferences to its [`Resource`] for the CRUD calls and adds
//! the resource's own actions on top.

use crate::api::ApiClient;

mod customers;
mod follow_ups;
mod hierarchies;
mod interactions;
mod loans;
mod payments;
mod resource;
mod users;

pub use customers::CustomerService;
pub use follow_ups::FollowUpService;
pub use hierarchies::HierarchyService;
pub use interactions::InteractionService;
pub use loans::LoanService;
pub use payments::PaymentService;
pub use resource::Resource;
pub use users::UserService;

macro_rules! service {
    ($(#[$meta:meta])* $name:ident, $entity:ty, $payload:ty, $base:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq)]
        pub struct $name {
            resource: $crate::services::Resource<$entity, $payload>,
        }

        impl $name {
            pub const BASE: &'static str = $base;

            pub fn new(client: $crate::api::ApiClient) -> Self {
                Self {
                    resource: $crate::services::Resource::new(client, $base),
                }
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::services::Resource<$entity, $payload>;

            fn deref(&self) -> &Self::Target {
                &self.resource
            }
        }
    };
}
pub(crate) use service;

/// Every service, built over one client.
#[derive(Clone, PartialEq)]
pub struct Services {
    pub users: UserService,
    pub hierarchies: HierarchyService,
    pub customers: CustomerService,
    pub loans: LoanService,
    pub payments: PaymentService,
    pub interactions: InteractionService,
    pub follow_ups: FollowUpService,
}

impl Services {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            users: UserService::new(client.clone()),
            hierarchies: HierarchyService::new(client.clone()),
            customers: CustomerService::new(client.clone()),
            loans: LoanService::new(client.clone()),
            payments: PaymentService::new(client.clone()),
            interactions: InteractionService::new(client.clone()),
            follow_ups: FollowUpService::new(client.clone()),
        }
    }
}
