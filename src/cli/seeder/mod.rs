//! Database seeding module for populating demo data.
//!
//! This module provides functionality to seed the database with classes,
//! sections, and fake students.
//!
//! # Module Structure
//!
//! - [`classes`] - Class generation and insertion
//! - [`sections`] - Section generation and insertion
//! - [`students`] - Student generation with fake contact data
//! - [`models`] - Data structures for seeding configuration
//!
//! # Usage
//!
//! ```ignore
//! use classtrack::cli::seeder::{SeedConfig, seed_all};
//!
//! let config = SeedConfig::default(); // 10 classes, 3 sections each, 5 students per section
//! seed_all(&db, config).await?;
//! ```
//!
//! # Performance
//!
//! - Parallel data generation using Rayon
//! - Batch inserts with multi-value INSERT statements

pub mod classes;
pub mod models;
pub mod sections;
pub mod students;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;

/// Seeds the entire database with classes, sections, and students
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Classes: {}", config.classes);
    println!("   - Sections per class: {}", config.sections_per_class);
    println!(
        "   - Students per section: {} ({} total)",
        config.students_per_section,
        config.total_students()
    );

    let class_ids = classes::seed_classes(db, config.classes).await?;
    let section_ids =
        sections::seed_sections(db, &class_ids, config.sections_per_class).await?;

    let sections_with_class =
        build_section_context(&class_ids, &section_ids, config.sections_per_class);
    let student_count =
        students::seed_students(db, &sections_with_class, config.students_per_section).await?;

    println!(
        "\n✅ Seeding complete! Created {} classes, {} sections, {} students in {:?}",
        class_ids.len(),
        section_ids.len(),
        student_count,
        start_time.elapsed()
    );

    Ok(())
}

/// Clears all seeded data from the database
pub async fn clear_seeded_data(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all seeded data...");

    // Order matters due to foreign keys: students -> sections -> classes
    students::clear_students(db).await?;
    sections::clear_sections(db).await?;
    classes::clear_classes(db).await?;

    println!("✅ All seeded data cleared in {:?}", start_time.elapsed());
    Ok(())
}

/// Builds (section_id, class_id) pairs for student assignment.
/// Section ids come back in generation order, grouped by class.
fn build_section_context(
    class_ids: &[uuid::Uuid],
    section_ids: &[uuid::Uuid],
    sections_per_class: usize,
) -> Vec<(uuid::Uuid, uuid::Uuid)> {
    let mut result = Vec::with_capacity(section_ids.len());

    for (class_idx, &class_id) in class_ids.iter().enumerate() {
        let start = class_idx * sections_per_class;
        let end = start + sections_per_class;

        for &section_id in &section_ids[start..end] {
            result.push((section_id, class_id));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_build_section_context_groups_by_class() {
        let class_ids: Vec<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();
        let section_ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();

        let context = build_section_context(&class_ids, &section_ids, 3);

        assert_eq!(context.len(), 6);
        assert!(context[..3].iter().all(|&(_, c)| c == class_ids[0]));
        assert!(context[3..].iter().all(|&(_, c)| c == class_ids[1]));
        assert_eq!(context[0].0, section_ids[0]);
        assert_eq!(context[5].0, section_ids[5]);
    }
}
