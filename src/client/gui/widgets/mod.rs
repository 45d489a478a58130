pub mod alert;
pub mod status_badge;
