pub mod account_service;
pub mod gateway;
pub mod offer_service;
pub mod payment_service;
pub mod stats_service;
