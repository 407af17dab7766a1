pub mod analytics;
pub mod avatar;
pub mod faculty;
pub mod printing;
pub mod student;

pub use analytics::AnalyticsService;
pub use avatar::AvatarService;
pub use faculty::FacultyService;
pub use printing::PrintingService;
pub use student::StudentService;
