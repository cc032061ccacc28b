//! Role-based presentation guards.
//!
//! Every page asks [`capabilities`] which actions to render instead of
//! comparing role strings inline. The server enforces authorization again;
//! these rules only decide what the UI offers.

use std::collections::BTreeSet;

use crate::{FollowUpStatus, LoanStatus, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    ViewPayments,
    Approve,
    Restructure,
    WriteOff,
    RecordPayment,
    Complete,
    Reschedule,
    ScheduleFollowUp,
}

/// What the user is looking at. Collection variants answer for list pages
/// and their rows; entity variants carry the state that gates actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Hierarchies,
    Customers,
    Loans,
    Loan(LoanStatus),
    Payments,
    Interactions,
    Interaction { open: bool },
    FollowUps,
    FollowUp(FollowUpStatus),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Action>);

impl Capabilities {
    pub fn can(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    fn grant(&mut self, action: Action, allowed: bool) {
        if allowed {
            self.0.insert(action);
        }
    }
}

pub fn capabilities(user: &User, resource: Resource) -> Capabilities {
    let mut caps = Capabilities::default();
    if !user.is_active {
        return caps;
    }

    use Role::*;
    let role = user.role;
    let senior = matches!(role, SuperManager | Manager);
    let field_staff = senior || role == CollectionOfficer;

    match resource {
        Resource::Users | Resource::Hierarchies => {
            caps.grant(Action::View, senior);
            caps.grant(Action::Create, role == SuperManager);
            caps.grant(Action::Edit, role == SuperManager);
            caps.grant(Action::Delete, role == SuperManager);
        }
        Resource::Customers => {
            caps.grant(Action::View, true);
            caps.grant(Action::Create, field_staff);
            caps.grant(Action::Edit, field_staff);
            caps.grant(Action::Delete, senior);
            caps.grant(Action::ScheduleFollowUp, true);
        }
        Resource::Loans => {
            loan_basics(&mut caps, role);
        }
        Resource::Loan(status) => {
            loan_basics(&mut caps, role);
            caps.grant(Action::Approve, senior && status == LoanStatus::Pending);
            caps.grant(
                Action::Restructure,
                senior && matches!(status, LoanStatus::Active | LoanStatus::Defaulted),
            );
            caps.grant(
                Action::WriteOff,
                role == SuperManager
                    && matches!(
                        status,
                        LoanStatus::Active | LoanStatus::Defaulted | LoanStatus::Restructured
                    ),
            );
            caps.grant(
                Action::RecordPayment,
                field_staff
                    && matches!(
                        status,
                        LoanStatus::Active | LoanStatus::Defaulted | LoanStatus::Restructured
                    ),
            );
        }
        Resource::Payments => {
            caps.grant(Action::View, true);
            caps.grant(Action::Create, field_staff);
            caps.grant(Action::Edit, senior);
            caps.grant(Action::Delete, senior);
        }
        Resource::Interactions => {
            interaction_basics(&mut caps, senior);
        }
        Resource::Interaction { open } => {
            interaction_basics(&mut caps, senior);
            caps.grant(Action::Complete, open);
        }
        Resource::FollowUps => {
            follow_up_basics(&mut caps, senior);
        }
        Resource::FollowUp(status) => {
            follow_up_basics(&mut caps, senior);
            let pending = status == FollowUpStatus::Pending;
            caps.grant(Action::Complete, pending);
            caps.grant(Action::Reschedule, pending);
        }
    }

    caps
}

fn loan_basics(caps: &mut Capabilities, role: Role) {
    let senior = matches!(role, Role::SuperManager | Role::Manager);
    caps.grant(Action::View, true);
    caps.grant(Action::ViewPayments, true);
    caps.grant(Action::Create, senior || role == Role::CollectionOfficer);
    caps.grant(Action::Edit, senior);
    caps.grant(Action::Delete, role == Role::SuperManager);
}

fn interaction_basics(caps: &mut Capabilities, senior: bool) {
    caps.grant(Action::View, true);
    caps.grant(Action::Create, true);
    caps.grant(Action::Edit, true);
    caps.grant(Action::Delete, senior);
    caps.grant(Action::ScheduleFollowUp, true);
}

fn follow_up_basics(caps: &mut Capabilities, senior: bool) {
    caps.grant(Action::View, true);
    caps.grant(Action::Create, true);
    caps.grant(Action::Edit, true);
    caps.grant(Action::Delete, senior);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Id;

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
    fn test_calling_agent_on_loans_list() {
        let caps = capabilities(&user(Role::CallingAgent), Resource::Loans);
        assert!(caps.can(Action::View));
        assert!(caps.can(Action::ViewPayments));
        assert!(!caps.can(Action::Edit));
        assert!(!caps.can(Action::Delete));
        assert!(!caps.can(Action::Create));
    }

    #[test]
    fn test_approve_only_pending_for_managers() {
        let manager = user(Role::Manager);
        assert!(capabilities(&manager, Resource::Loan(LoanStatus::Pending)).can(Action::Approve));
        assert!(!capabilities(&manager, Resource::Loan(LoanStatus::Active)).can(Action::Approve));
        assert!(!capabilities(&user(Role::CollectionOfficer), Resource::Loan(LoanStatus::Pending))
            .can(Action::Approve));
    }

    #[test]
    fn test_terminal_loans_offer_no_business_actions() {
        let boss = user(Role::SuperManager);
        for status in [LoanStatus::Paid, LoanStatus::WrittenOff] {
            let caps = capabilities(&boss, Resource::Loan(status));
            assert!(!caps.can(Action::Approve));
            assert!(!caps.can(Action::Restructure));
            assert!(!caps.can(Action::WriteOff));
            assert!(!caps.can(Action::RecordPayment));
            assert!(caps.can(Action::View));
        }
    }

    #[test]
    fn test_write_off_is_super_manager_only() {
        let status = LoanStatus::Defaulted;
        assert!(capabilities(&user(Role::SuperManager), Resource::Loan(status)).can(Action::WriteOff));
        assert!(!capabilities(&user(Role::Manager), Resource::Loan(status)).can(Action::WriteOff));
        assert!(capabilities(&user(Role::Manager), Resource::Loan(status)).can(Action::Restructure));
    }

    #[test]
    fn test_reschedule_only_while_pending() {
        let agent = user(Role::CallingAgent);
        assert!(capabilities(&agent, Resource::FollowUp(FollowUpStatus::Pending)).can(Action::Reschedule));
        assert!(!capabilities(&agent, Resource::FollowUp(FollowUpStatus::Completed)).can(Action::Reschedule));
        assert!(!capabilities(&agent, Resource::FollowUp(FollowUpStatus::Cancelled)).can(Action::Complete));
    }

    #[test]
    fn test_interaction_completes_once() {
        let agent = user(Role::CallingAgent);
        assert!(capabilities(&agent, Resource::Interaction { open: true }).can(Action::Complete));
        assert!(!capabilities(&agent, Resource::Interaction { open: false }).can(Action::Complete));
    }

    #[test]
    fn test_user_admin_pages() {
        assert!(!capabilities(&user(Role::CallingAgent), Resource::Users).can(Action::View));
        let manager = capabilities(&user(Role::Manager), Resource::Users);
        assert!(manager.can(Action::View));
        assert!(!manager.can(Action::Create));
        assert!(capabilities(&user(Role::SuperManager), Resource::Hierarchies).can(Action::Delete));
    }

    #[test]
    fn test_inactive_user_gets_nothing() {
        let mut inactive = user(Role::SuperManager);
        inactive.is_active = false;
        assert!(capabilities(&inactive, Resource::Customers).is_empty());
    }
}
