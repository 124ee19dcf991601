pub mod db_utils;
pub mod envelope;
pub mod error;
