pub mod grade;
pub mod group;
pub mod report;
pub mod seed;
pub mod student;
pub mod subject;
pub mod teacher;
