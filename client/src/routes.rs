//! Browser routes.
//!
//! `Route::parse` and `Route::to_path` round-trip for every route; anything
//! unrecognised parses to [`Route::NotFound`].

use shared::{capabilities, Action, Capabilities, Id, Resource, User};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Customers,
    CustomerNew,
    CustomerDetail(Id),
    CustomerEdit(Id),
    Loans,
    LoanNew { customer: Option<Id> },
    LoanDetail(Id),
    LoanEdit(Id),
    LoanPayments(Id),
    Payments,
    PaymentNew { loan: Option<Id> },
    PaymentEdit(Id),
    Interactions,
    InteractionNew { customer: Option<Id> },
    InteractionDetail(Id),
    InteractionEdit(Id),
    FollowUps,
    FollowUpNew { customer: Option<Id> },
    FollowUpDetail(Id),
    FollowUpEdit(Id),
    Users,
    UserNew,
    UserEdit(Id),
    Hierarchies,
    HierarchyNew,
    HierarchyEdit(Id),
    NotFound,
}

impl Route {
    /// Parse a path with an optional query string, e.g. `/payments/new?loan=3`.
    pub fn parse(location: &str) -> Route {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let param = |name: &str| query_param(query, name);

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["customers"] => Route::Customers,
            ["customers", "new"] => Route::CustomerNew,
            ["customers", id] => Route::CustomerDetail(Id::from(*id)),
            ["customers", id, "edit"] => Route::CustomerEdit(Id::from(*id)),
            ["loans"] => Route::Loans,
            ["loans", "new"] => Route::LoanNew {
                customer: param("customer"),
            },
            ["loans", id] => Route::LoanDetail(Id::from(*id)),
            ["loans", id, "edit"] => Route::LoanEdit(Id::from(*id)),
            ["loans", id, "payments"] => Route::LoanPayments(Id::from(*id)),
            ["payments"] => Route::Payments,
            ["payments", "new"] => Route::PaymentNew { loan: param("loan") },
            ["payments", id, "edit"] => Route::PaymentEdit(Id::from(*id)),
            ["interactions"] => Route::Interactions,
            ["interactions", "new"] => Route::InteractionNew {
                customer: param("customer"),
            },
            ["interactions", id] => Route::InteractionDetail(Id::from(*id)),
            ["interactions", id, "edit"] => Route::InteractionEdit(Id::from(*id)),
            ["follow-ups"] => Route::FollowUps,
            ["follow-ups", "new"] => Route::FollowUpNew {
                customer: param("customer"),
            },
            ["follow-ups", id] => Route::FollowUpDetail(Id::from(*id)),
            ["follow-ups", id, "edit"] => Route::FollowUpEdit(Id::from(*id)),
            ["users"] => Route::Users,
            ["users", "new"] => Route::UserNew,
            ["users", id, "edit"] => Route::UserEdit(Id::from(*id)),
            ["hierarchies"] => Route::Hierarchies,
            ["hierarchies", "new"] => Route::HierarchyNew,
            ["hierarchies", id, "edit"] => Route::HierarchyEdit(Id::from(*id)),
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        let with = |base: &str, key: &str, id: &Option<Id>| match id {
            Some(id) => format!("{base}?{key}={id}"),
            None => base.to_string(),
        };

        match self {
            Route::Login => "/login".into(),
            Route::Home => "/".into(),
            Route::Customers => "/customers".into(),
            Route::CustomerNew => "/customers/new".into(),
            Route::CustomerDetail(id) => format!("/customers/{id}"),
            Route::CustomerEdit(id) => format!("/customers/{id}/edit"),
            Route::Loans => "/loans".into(),
            Route::LoanNew { customer } => with("/loans/new", "customer", customer),
            Route::LoanDetail(id) => format!("/loans/{id}"),
            Route::LoanEdit(id) => format!("/loans/{id}/edit"),
            Route::LoanPayments(id) => format!("/loans/{id}/payments"),
            Route::Payments => "/payments".into(),
            Route::PaymentNew { loan } => with("/payments/new", "loan", loan),
            Route::PaymentEdit(id) => format!("/payments/{id}/edit"),
            Route::Interactions => "/interactions".into(),
            Route::InteractionNew { customer } => with("/interactions/new", "customer", customer),
            Route::InteractionDetail(id) => format!("/interactions/{id}"),
            Route::InteractionEdit(id) => format!("/interactions/{id}/edit"),
            Route::FollowUps => "/follow-ups".into(),
            Route::FollowUpNew { customer } => with("/follow-ups/new", "customer", customer),
            Route::FollowUpDetail(id) => format!("/follow-ups/{id}"),
            Route::FollowUpEdit(id) => format!("/follow-ups/{id}/edit"),
            Route::Users => "/users".into(),
            Route::UserNew => "/users/new".into(),
            Route::UserEdit(id) => format!("/users/{id}/edit"),
            Route::Hierarchies => "/hierarchies".into(),
            Route::HierarchyNew => "/hierarchies/new".into(),
            Route::HierarchyEdit(id) => format!("/hierarchies/{id}/edit"),
            Route::NotFound => "/404".into(),
        }
    }

    /// `/` shows the customer list.
    pub fn canonical(self) -> Route {
        match self {
            Route::Home => Route::Customers,
            other => other,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::NotFound)
    }

    /// What the user must be allowed to do to open this route.
    pub fn requirement(&self) -> Option<(Resource, Action)> {
        let need = |resource, action| Some((resource, action));
        match self {
            Route::Login | Route::Home | Route::NotFound => None,
            Route::Customers | Route::CustomerDetail(_) => need(Resource::Customers, Action::View),
            Route::CustomerNew => need(Resource::Customers, Action::Create),
            Route::CustomerEdit(_) => need(Resource::Customers, Action::Edit),
            Route::Loans | Route::LoanDetail(_) => need(Resource::Loans, Action::View),
            Route::LoanPayments(_) => need(Resource::Loans, Action::ViewPayments),
            Route::LoanNew { .. } => need(Resource::Loans, Action::Create),
            Route::LoanEdit(_) => need(Resource::Loans, Action::Edit),
            Route::Payments => need(Resource::Payments, Action::View),
            Route::PaymentNew { .. } => need(Resource::Payments, Action::Create),
            Route::PaymentEdit(_) => need(Resource::Payments, Action::Edit),
            Route::Interactions | Route::InteractionDetail(_) => {
                need(Resource::Interactions, Action::View)
            }
            Route::InteractionNew { .. } => need(Resource::Interactions, Action::Create),
            Route::InteractionEdit(_) => need(Resource::Interactions, Action::Edit),
            Route::FollowUps | Route::FollowUpDetail(_) => need(Resource::FollowUps, Action::View),
            Route::FollowUpNew { .. } => need(Resource::FollowUps, Action::Create),
            Route::FollowUpEdit(_) => need(Resource::FollowUps, Action::Edit),
            Route::Users => need(Resource::Users, Action::View),
            Route::UserNew => need(Resource::Users, Action::Create),
            Route::UserEdit(_) => need(Resource::Users, Action::Edit),
            Route::Hierarchies => need(Resource::Hierarchies, Action::View),
            Route::HierarchyNew => need(Resource::Hierarchies, Action::Create),
            Route::HierarchyEdit(_) => need(Resource::Hierarchies, Action::Edit),
        }
    }

    pub fn allows(&self, user: &User) -> bool {
        match self.requirement() {
            Some((resource, action)) => capabilities(user, resource).can(action),
            None => true,
        }
    }

    /// Where a form route goes after a successful save. `saved` is the id of
    /// the created or updated entity.
    pub fn after_save(&self, saved: &Id) -> Route {
        match self {
            Route::CustomerNew => Route::Customers,
            Route::CustomerEdit(_) => Route::CustomerDetail(saved.clone()),
            Route::LoanNew { .. } | Route::LoanEdit(_) => Route::LoanDetail(saved.clone()),
            Route::PaymentNew { loan: Some(loan) } => Route::LoanPayments(loan.clone()),
            Route::PaymentNew { loan: None } | Route::PaymentEdit(_) => Route::Payments,
            Route::InteractionNew { .. } | Route::InteractionEdit(_) => {
                Route::InteractionDetail(saved.clone())
            }
            Route::FollowUpNew { .. } | Route::FollowUpEdit(_) => Route::FollowUpDetail(saved.clone()),
            Route::UserNew | Route::UserEdit(_) => Route::Users,
            Route::HierarchyNew | Route::HierarchyEdit(_) => Route::Hierarchies,
            other => other.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn query_param(query: &str, name: &str) -> Option<Id> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(Id::from)
}

/// Links one list row offers, each present only when the row's
/// capabilities allow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLinks {
    pub view: Option<Route>,
    pub edit: Option<Route>,
    pub payments: Option<Route>,
    pub delete: bool,
}

impl RowLinks {
    /// `caps` should be resolved for `Resource::Loan(status)`.
    pub fn loan(caps: &Capabilities, id: &Id) -> Self {
        Self {
            view: caps.can(Action::View).then(|| Route::LoanDetail(id.clone())),
            edit: caps.can(Action::Edit).then(|| Route::LoanEdit(id.clone())),
            payments: caps
                .can(Action::ViewPayments)
                .then(|| Route::LoanPayments(id.clone())),
            delete: caps.can(Action::Delete),
        }
    }

    /// Payments have no detail page.
    pub fn payment(caps: &Capabilities, id: &Id) -> Self {
        Self {
            edit: caps.can(Action::Edit).then(|| Route::PaymentEdit(id.clone())),
            delete: caps.can(Action::Delete),
            ..Self::default()
        }
    }

    pub fn interaction(caps: &Capabilities, id: &Id) -> Self {
        Self {
            view: caps.can(Action::View).then(|| Route::InteractionDetail(id.clone())),
            edit: caps.can(Action::Edit).then(|| Route::InteractionEdit(id.clone())),
            delete: caps.can(Action::Delete),
            ..Self::default()
        }
    }

    pub fn follow_up(caps: &Capabilities, id: &Id) -> Self {
        Self {
            view: caps.can(Action::View).then(|| Route::FollowUpDetail(id.clone())),
            edit: caps.can(Action::Edit).then(|| Route::FollowUpEdit(id.clone())),
            delete: caps.can(Action::Delete),
            ..Self::default()
        }
    }
}

/// Sidebar entries the user may open, in display order.
pub fn navigation(user: &User) -> Vec<(Route, &'static str)> {
    [
        (Route::Customers, "Customers"),
        (Route::Loans, "Loans"),
        (Route::Payments, "Payments"),
        (Route::Interactions, "Interactions"),
        (Route::FollowUps, "Follow-ups"),
        (Route::Users, "Users"),
        (Route::Hierarchies, "Hierarchies"),
    ]
    .into_iter()
    .filter(|(route, _)| route.allows(user))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FollowUpStatus, LoanStatus, Role};

    fn user(role: Role) -> User {
        User {
            id: Id::from("1"),
            username: "u".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            phone_number: None,
            is_active: true,
            date_joined: None,
        }
    }

    #[test]
    fn test_round_trip() {
        let id = Id::from("17");
        let routes = vec![
            Route::Login,
            Route::Customers,
            Route::CustomerNew,
            Route::CustomerDetail(id.clone()),
            Route::CustomerEdit(id.clone()),
            Route::Loans,
            Route::LoanNew { customer: None },
            Route::LoanNew { customer: Some(id.clone()) },
            Route::LoanDetail(id.clone()),
            Route::LoanEdit(id.clone()),
            Route::LoanPayments(id.clone()),
            Route::Payments,
            Route::PaymentNew { loan: Some(id.clone()) },
            Route::PaymentEdit(id.clone()),
            Route::Interactions,
            Route::InteractionNew { customer: Some(id.clone()) },
            Route::InteractionDetail(id.clone()),
            Route::InteractionEdit(id.clone()),
            Route::FollowUps,
            Route::FollowUpNew { customer: None },
            Route::FollowUpDetail(id.clone()),
            Route::FollowUpEdit(id.clone()),
            Route::Users,
            Route::UserNew,
            Route::UserEdit(id.clone()),
            Route::Hierarchies,
            Route::HierarchyNew,
            Route::HierarchyEdit(id),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_path()), route, "{route}");
        }
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/").canonical(), Route::Customers);
        assert_eq!(Route::parse("/reports"), Route::NotFound);
        assert_eq!(Route::parse("/users/3"), Route::NotFound);
        assert_eq!(Route::parse("/loans/3/delete"), Route::NotFound);
    }

    #[test]
    fn test_query_preselects() {
        assert_eq!(
            Route::parse("/payments/new?loan=9&x=1"),
            Route::PaymentNew { loan: Some(Id::from("9")) }
        );
        assert_eq!(Route::parse("/payments/new?loan="), Route::PaymentNew { loan: None });
    }

    #[test]
    fn test_customer_create_returns_to_list() {
        assert_eq!(Route::CustomerNew.after_save(&Id::from("5")), Route::Customers);
        assert_eq!(
            Route::CustomerEdit(Id::from("5")).after_save(&Id::from("5")),
            Route::CustomerDetail(Id::from("5"))
        );
        assert_eq!(Route::Customers.to_path(), "/customers");
    }

    #[test]
    fn test_navigation_follows_capabilities() {
        let agent: Vec<_> = navigation(&user(Role::CallingAgent)).into_iter().map(|(_, l)| l).collect();
        assert!(!agent.contains(&"Users"));
        assert!(agent.contains(&"Loans"));
        assert_eq!(navigation(&user(Role::SuperManager)).len(), 7);
        assert!(!Route::CustomerNew.allows(&user(Role::CallingAgent)));
    }

    #[test]
    fn test_calling_agent_loan_row_links() {
        let id = Id::from("12");
        let caps = capabilities(&user(Role::CallingAgent), Resource::Loan(LoanStatus::Active));
        let links = RowLinks::loan(&caps, &id);
        assert_eq!(links.view, Some(Route::LoanDetail(id.clone())));
        assert_eq!(links.payments, Some(Route::LoanPayments(id.clone())));
        assert_eq!(links.edit, None);
        assert!(!links.delete);
        assert!(Route::LoanPayments(id).allows(&user(Role::CallingAgent)));
    }

    #[test]
    fn test_super_manager_loan_row_links() {
        let id = Id::from("12");
        let caps = capabilities(&user(Role::SuperManager), Resource::Loan(LoanStatus::Pending));
        let links = RowLinks::loan(&caps, &id);
        assert_eq!(links.edit, Some(Route::LoanEdit(id.clone())));
        assert_eq!(links.payments, Some(Route::LoanPayments(id)));
        assert!(links.delete);
    }

    #[test]
    fn test_edit_links_for_payments_interactions_follow_ups() {
        let id = Id::from("3");
        let agent = user(Role::CallingAgent);
        let manager = user(Role::Manager);

        let payment = RowLinks::payment(&capabilities(&agent, Resource::Payments), &id);
        assert_eq!(payment, RowLinks::default());
        let payment = RowLinks::payment(&capabilities(&manager, Resource::Payments), &id);
        assert_eq!(payment.edit, Some(Route::PaymentEdit(id.clone())));
        assert_eq!(payment.view, None);

        let interaction = RowLinks::interaction(&capabilities(&agent, Resource::Interactions), &id);
        assert_eq!(interaction.edit, Some(Route::InteractionEdit(id.clone())));
        assert!(!interaction.delete);

        let follow_up = RowLinks::follow_up(
            &capabilities(&agent, Resource::FollowUp(FollowUpStatus::Pending)),
            &id,
        );
        assert_eq!(follow_up.view, Some(Route::FollowUpDetail(id.clone())));
        assert_eq!(follow_up.edit, Some(Route::FollowUpEdit(id)));
    }

    #[test]
    fn test_edit_routes_return_to_the_record() {
        let saved = Id::from("8");
        assert_eq!(Route::PaymentEdit(saved.clone()).after_save(&saved), Route::Payments);
        assert_eq!(
            Route::InteractionEdit(saved.clone()).after_save(&saved),
            Route::InteractionDetail(saved.clone())
        );
        assert_eq!(
            Route::FollowUpEdit(saved.clone()).after_save(&saved),
            Route::FollowUpDetail(saved.clone())
        );
        assert!(!Route::PaymentEdit(saved).allows(&user(Role::CallingAgent)));
    }
}
