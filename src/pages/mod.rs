mod dashboard;
mod landing;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
