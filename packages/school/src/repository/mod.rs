mod avatar;
mod faculty;
mod student;

pub use avatar::{AvatarRepository, NewAvatar};
pub use faculty::FacultyRepository;
pub use student::StudentRepository;
