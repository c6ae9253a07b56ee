//! Command-line utilities for administrative tasks that should not be
//! exposed over the API, such as seeding demo data.

pub mod seeder;
