pub mod auth;
pub mod catalog;
pub mod facility;
pub mod inventory;
pub mod product;
pub mod requests;
pub mod schema;
pub mod subarea;
