pub mod dashboard_repo;
pub use dashboard_repo::{DashboardRepository, MetricsSource};

#[cfg(test)]
pub mod stub_source;
