pub mod announcement_repository;
pub mod contact_repository;
pub mod event_repository;

pub use announcement_repository::AnnouncementRepository;
pub use contact_repository::ContactMessageRepository;
pub use event_repository::EventRepository;
