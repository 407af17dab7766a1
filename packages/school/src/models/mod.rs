pub mod analytics;
pub mod avatar;
pub mod faculty;
pub mod shared;
pub mod student;
