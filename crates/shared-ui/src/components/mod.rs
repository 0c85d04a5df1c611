// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod empty_state;
pub mod form;
pub mod input;
pub mod skeleton;

// Primitive wrappers
pub mod dialog;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use dialog::*;
pub use empty_state::*;
pub use form::*;
pub use input::*;
pub use skeleton::*;
pub use toast::*;
