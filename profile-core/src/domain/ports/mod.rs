//! Domain ports for the hexagonal boundary.

mod user_data_service;

#[cfg(test)]
pub use user_data_service::MockUserDataService;
pub use user_data_service::{UserDataService, UserDataServiceError};
