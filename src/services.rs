pub mod auth;
pub mod dispatcher;
pub mod hierarchy;
pub mod inventory_service;
