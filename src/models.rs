pub mod dashboard;
pub mod period;
pub mod view;
