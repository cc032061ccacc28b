mod support;

use collections_client::views::{ListAction, ListState, LoadStatus};
use collections_client::{Method, Services};
use serde_json::json;
use shared::{Customer, Id, Loan};
use support::{assert_request, customer_json, loan_json, page, Harness};

async fn load(services: &Services, state: &mut ListState<Loan>, ticket: u64) {
    state.reduce(ListAction::Load { ticket });
    match services.loans.get_all(state.request()).await {
        Ok(page) => state.reduce(ListAction::Loaded { ticket, page }),
        Err(e) => state.reduce(ListAction::Failed {
            ticket,
            message: e.user_message(),
        }),
    }
}

#[tokio::test]
async fn test_page_and_filter_reach_the_request() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    let mut state = ListState::new(10);

    h.transport
        .respond(200, page(vec![loan_json(1, "active")], 25))
        .respond(200, page(vec![loan_json(21, "active"), loan_json(22, "defaulted")], 25))
        .respond(200, page(vec![loan_json(3, "pending")], 1));

    load(&services, &mut state, 1).await;
    state.reduce(ListAction::GoToPage(3));
    load(&services, &mut state, 2).await;

    let request = h.transport.last();
    assert_request(&request, Method::Get, "loans/");
    assert_eq!(
        request.query,
        vec![
            ("page".to_string(), "3".to_string()),
            ("page_size".to_string(), "10".to_string()),
        ]
    );
    let ids: Vec<&str> = state.rows().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["21", "22"]);

    state.reduce(ListAction::SetFilter {
        key: "status".into(),
        value: Some("pending".into()),
    });
    load(&services, &mut state, 3).await;

    let request = h.transport.last();
    assert_eq!(
        request.query,
        vec![
            ("status".to_string(), "pending".to_string()),
            ("page".to_string(), "1".to_string()),
            ("page_size".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(state.rows().len(), 1);
    assert_eq!(state.status, LoadStatus::Loaded);
}

#[tokio::test]
async fn test_load_failure_surfaces_message() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    let mut state = ListState::new(10);
    h.transport.fail("connection refused");

    load(&services, &mut state, 1).await;
    assert_eq!(
        state.status,
        LoadStatus::Failed("Something went wrong. Please try again.".into())
    );
}

#[tokio::test]
async fn test_delete_confirmation_flow() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    let mut state: ListState<Customer> = ListState::new(10);

    h.transport
        .respond(200, page(vec![customer_json(1, "Ann"), customer_json(2, "Ben")], 2))
        .respond(400, json!({"detail": "Customer has active loans."}))
        .respond_empty(204);

    state.reduce(ListAction::Load { ticket: 1 });
    let first = services.customers.get_all(state.request()).await.unwrap();
    state.reduce(ListAction::Loaded { ticket: 1, page: first });

    let id = Id::from("1");
    for _ in 0..2 {
        state.reduce(ListAction::DeleteStarted(id.clone()));
        assert_eq!(state.rows().len(), 2, "row stays while the delete is pending");
        match services.customers.delete(&id).await {
            Ok(()) => state.reduce(ListAction::DeleteSucceeded(id.clone())),
            Err(e) => state.reduce(ListAction::DeleteFailed {
                id: id.clone(),
                message: e.user_message(),
            }),
        }
        if state.error.is_some() {
            assert_eq!(state.rows().len(), 2);
            assert_eq!(state.error.as_deref(), Some("Customer has active loans."));
        }
    }

    assert_request(&h.transport.last(), Method::Delete, "customers/1/");
    let names: Vec<&str> = state.rows().iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Ben"]);
}

#[tokio::test]
async fn test_nested_lists() {
    let h = Harness::signed_in("a", "r");
    let services = Services::new(&h.client);
    h.transport
        .respond(200, page(vec![loan_json(7, "active")], 1))
        .respond(200, page(vec![], 0));

    let loans = services
        .customers
        .loans(&Id::from("4"), &shared::ListQuery::new().page(1))
        .await
        .unwrap();
    assert_eq!(loans.results[0].display_reference(), "LN-0007");
    assert_request(&h.transport.last(), Method::Get, "customers/4/loans/");

    let payments = services
        .loans
        .payments(&Id::from("7"), &shared::ListQuery::new())
        .await
        .unwrap();
    assert_eq!(payments.count, 0);
    assert_request(&h.transport.last(), Method::Get, "loans/7/payments/");
}
