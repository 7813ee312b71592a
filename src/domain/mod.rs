pub mod announcement;
pub mod event;
pub mod contact;
pub mod timestamp;

pub use announcement::*;
pub use event::*;
pub use contact::*;
