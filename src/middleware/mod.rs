pub mod error_catcher;

pub use error_catcher::ErrorCatcher;
