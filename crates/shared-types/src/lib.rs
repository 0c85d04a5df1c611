pub mod content;
pub mod error;
pub mod feature_flags;
pub mod fetch;
pub mod navigation;
pub mod profile;
pub mod role;
pub mod session;

pub use content::*;
pub use error::*;
pub use feature_flags::*;
pub use fetch::*;
pub use navigation::*;
pub use profile::*;
pub use role::*;
pub use session::*;
