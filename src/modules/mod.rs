pub mod classes;
pub mod navigation;
pub mod sections;
pub mod students;
