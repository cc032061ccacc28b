use collections_client::views::Entity;
use collections_client::Route;
use yew::prelude::*;

use crate::app::AppContext;
use crate::services::toasts::Toast;

pub mod customers;
pub mod follow_ups;
pub mod hierarchies;
pub mod interactions;
pub mod loans;
pub mod login;
pub mod not_found;
pub mod payments;
pub mod users;

/// The page for a route the user is allowed to open.
pub fn switch(route: &Route) -> Html {
    match route.clone() {
        Route::Login => html! { <login::LoginPage /> },
        Route::Home | Route::Customers => html! { <customers::CustomerListPage /> },
        Route::CustomerNew => html! { <customers::CustomerFormPage /> },
        Route::CustomerEdit(id) => html! { <customers::CustomerFormPage id={Some(id)} /> },
        Route::CustomerDetail(id) => html! { <customers::CustomerDetailPage {id} /> },
        Route::Loans => html! { <loans::LoanListPage /> },
        Route::LoanNew { customer } => html! { <loans::LoanFormPage {customer} /> },
        Route::LoanEdit(id) => html! { <loans::LoanFormPage id={Some(id)} /> },
        Route::LoanDetail(id) => html! { <loans::LoanDetailPage {id} /> },
        Route::LoanPayments(id) => html! { <loans::LoanPaymentsPage {id} /> },
        Route::Payments => html! { <payments::PaymentListPage /> },
        Route::PaymentNew { loan } => html! { <payments::PaymentFormPage {loan} /> },
        Route::PaymentEdit(id) => html! { <payments::PaymentFormPage id={Some(id)} /> },
        Route::Interactions => html! { <interactions::InteractionListPage /> },
        Route::InteractionNew { customer } => html! { <interactions::InteractionFormPage {customer} /> },
        Route::InteractionDetail(id) => html! { <interactions::InteractionDetailPage {id} /> },
        Route::InteractionEdit(id) => html! { <interactions::InteractionFormPage id={Some(id)} /> },
        Route::FollowUps => html! { <follow_ups::FollowUpListPage /> },
        Route::FollowUpNew { customer } => html! { <follow_ups::FollowUpFormPage {customer} /> },
        Route::FollowUpDetail(id) => html! { <follow_ups::FollowUpDetailPage {id} /> },
        Route::FollowUpEdit(id) => html! { <follow_ups::FollowUpFormPage id={Some(id)} /> },
        Route::Users => html! { <users::UserListPage /> },
        Route::UserNew => html! { <users::UserFormPage /> },
        Route::UserEdit(id) => html! { <users::UserFormPage id={Some(id)} /> },
        Route::Hierarchies => html! { <hierarchies::HierarchyListPage /> },
        Route::HierarchyNew => html! { <hierarchies::HierarchyFormPage /> },
        Route::HierarchyEdit(id) => html! { <hierarchies::HierarchyFormPage id={Some(id)} /> },
        Route::NotFound => html! { <not_found::NotFoundPage /> },
    }
}

/// After a form saves: toast, then go where the current route says.
pub(crate) fn on_saved<T: Entity + 'static>(app: &AppContext, message: &'static str) -> Callback<T> {
    let app = app.clone();
    Callback::from(move |saved: T| {
        app.notify(Toast::success(message));
        app.navigator.push(app.route.after_save(saved.id()));
    })
}

pub(crate) fn navigate_to(app: &AppContext, route: Route) -> Callback<()> {
    let navigator = app.navigator.clone();
    Callback::from(move |_: ()| navigator.push(route.clone()))
}

/// A definition list row for detail pages.
pub(crate) fn detail_row(label: &str, value: Html) -> Html {
    html! {
        <div class="detail-row">
            <dt>{label.to_string()}</dt>
            <dd>{value}</dd>
        </div>
    }
}

pub(crate) fn detail_text(label: &str, value: impl ToString) -> Html {
    detail_row(label, html! { {value.to_string()} })
}

pub(crate) fn text_or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("—")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_shows_dash() {
        assert_eq!(text_or_dash(&None), "—");
        assert_eq!(text_or_dash(&Some("   ".into())), "—");
        assert_eq!(text_or_dash(&Some(" Nairobi ".into())), "Nairobi");
    }
}
