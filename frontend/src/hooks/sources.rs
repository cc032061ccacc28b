use collections_client::services::{CustomerService, LoanService, Resource};
use collections_client::ApiResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Id, Interaction, ListQuery, Loan, Paginated, Payment};
use std::future::Future;
use std::pin::Pin;

pub type ApiFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>>>>;

/// Where a table gets its rows and sends its deletes.
pub trait ListSource<T>: Clone + PartialEq + 'static {
    fn fetch(&self, query: ListQuery) -> ApiFuture<Paginated<T>>;
    fn remove(&self, id: Id) -> ApiFuture<()>;
}

/// Where a detail page loads its entity.
pub trait DetailSource<T>: Clone + PartialEq + 'static {
    fn fetch_one(&self, id: Id) -> ApiFuture<T>;
}

impl<T, P> ListSource<T> for Resource<T, P>
where
    T: DeserializeOwned + 'static,
    P: Serialize + 'static,
{
    fn fetch(&self, query: ListQuery) -> ApiFuture<Paginated<T>> {
        let resource = self.clone();
        Box::pin(async move { resource.get_all(&query).await })
    }

    fn remove(&self, id: Id) -> ApiFuture<()> {
        let resource = self.clone();
        Box::pin(async move { resource.delete(&id).await })
    }
}

impl<T, P> DetailSource<T> for Resource<T, P>
where
    T: DeserializeOwned + 'static,
    P: Serialize + 'static,
{
    fn fetch_one(&self, id: Id) -> ApiFuture<T> {
        let resource = self.clone();
        Box::pin(async move { resource.get_by_id(&id).await })
    }
}

/// A customer's loans. Deletes go to `loans/{id}/`.
#[derive(Clone, PartialEq)]
pub struct CustomerLoans {
    pub customers: CustomerService,
    pub loans: LoanService,
    pub customer: Id,
}

impl ListSource<Loan> for CustomerLoans {
    fn fetch(&self, query: ListQuery) -> ApiFuture<Paginated<Loan>> {
        let source = self.clone();
        Box::pin(async move { source.customers.loans(&source.customer, &query).await })
    }

    fn remove(&self, id: Id) -> ApiFuture<()> {
        let loans = self.loans.clone();
        Box::pin(async move { loans.delete(&id).await })
    }
}

/// A customer's interaction history.
#[derive(Clone, PartialEq)]
pub struct CustomerInteractions {
    pub customers: CustomerService,
    pub interactions: Resource<Interaction, shared::InteractionPayload>,
    pub customer: Id,
}

impl ListSource<Interaction> for CustomerInteractions {
    fn fetch(&self, query: ListQuery) -> ApiFuture<Paginated<Interaction>> {
        let source = self.clone();
        Box::pin(async move { source.customers.interactions(&source.customer, &query).await })
    }

    fn remove(&self, id: Id) -> ApiFuture<()> {
        let interactions = self.interactions.clone();
        Box::pin(async move { interactions.delete(&id).await })
    }
}

/// Payments recorded against one loan.
#[derive(Clone, PartialEq)]
pub struct LoanPayments {
    pub loans: LoanService,
    pub payments: Resource<Payment, shared::PaymentPayload>,
    pub loan: Id,
}

impl ListSource<Payment> for LoanPayments {
    fn fetch(&self, query: ListQuery) -> ApiFuture<Paginated<Payment>> {
        let source = self.clone();
        Box::pin(async move { source.loans.payments(&source.loan, &query).await })
    }

    fn remove(&self, id: Id) -> ApiFuture<()> {
        let payments = self.payments.clone();
        Box::pin(async move { payments.delete(&id).await })
    }
}
