//! Service layer enforcing the mailing list integrity rules on top of `models`.
//! - Uniqueness and foreign-key existence are checked before any write.
//! - Country/City deletes are restricted by customers; Country/Section deletes
//!   cascade to their promotions, Country to its cities, Section to its subscriptions.
//! - `MailingListStore` bundles the connection and every operation.

pub mod errors;
pub mod country_service;
pub mod city_service;
pub mod section_service;
pub mod customer_service;
pub mod promotion_service;
pub mod queries;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use store::MailingListStore;
