pub mod config;
pub mod fallback;
pub mod intent;
pub mod response;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use fallback::*;
pub use intent::*;
pub use response::*;
pub use text::*;
pub use types::*;
