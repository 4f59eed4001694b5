pub mod announcement;
pub mod member;
