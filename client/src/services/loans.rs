use shared::{Id, ListQuery, Loan, LoanPayload, Paginated, Payment, RestructurePayload, WriteOffPayload};

use crate::error::ApiResult;

super::service!(
    /// Loans. Status only changes through `approve`, `restructure` and
    /// `write_off`.
    LoanService,
    Loan,
    LoanPayload,
    "loans/"
);

impl LoanService {
    pub async fn payments(&self, id: &Id, query: &ListQuery) -> ApiResult<Paginated<Payment>> {
        self.nested_page(id, "payments", query).await
    }

    pub async fn approve(&self, id: &Id) -> ApiResult<()> {
        self.action::<()>(id, "approve", None).await
    }

    pub async fn restructure(&self, id: &Id, payload: &RestructurePayload) -> ApiResult<()> {
        self.action(id, "restructure", Some(payload)).await
    }

    pub async fn write_off(&self, id: &Id, payload: &WriteOffPayload) -> ApiResult<()> {
        self.action(id, "write_off", Some(payload)).await
    }
}
