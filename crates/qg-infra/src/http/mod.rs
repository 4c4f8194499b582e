pub mod registration_client;

pub use registration_client::HttpRegistrationClient;
