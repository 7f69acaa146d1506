pub mod database;
pub mod secrets;
pub mod store;

pub use database::MongoDb;
pub use secrets::{DbCredentials, SecretsClient};
pub use store::NewsStore;
