pub mod app;
pub mod dashboard;
pub mod login;

pub use app::render_app;
pub use dashboard::render_dashboard;
pub use login::render_login;
