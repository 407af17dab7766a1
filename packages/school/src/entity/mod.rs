pub mod avatar;
pub mod faculty;
pub mod student;
