use shared::{Customer, CustomerPayload, Id, Interaction, ListQuery, Loan, Paginated};

use crate::error::ApiResult;

super::service!(CustomerService, Customer, CustomerPayload, "customers/");

impl CustomerService {
    pub async fn loans(&self, id: &Id, query: &ListQuery) -> ApiResult<Paginated<Loan>> {
        self.nested_page(id, "loans", query).await
    }

    pub async fn interactions(&self, id: &Id, query: &ListQuery) -> ApiResult<Paginated<Interaction>> {
        self.nested_page(id, "interactions", query).await
    }
}
