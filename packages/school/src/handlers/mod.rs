pub mod analytics;
pub mod avatar;
pub mod faculty;
pub mod info;
pub mod student;
