use fake::Fake;
use fake::faker::address::en::*;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::StudentSeed;

fn email_slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' {
                Some('.')
            } else {
                None
            }
        })
        .collect()
}

/// Generates one student with globally unique email and phone number.
/// The running index keeps uniqueness even when fake names repeat.
fn generate_student(class_id: Uuid, section_id: Uuid, index: usize) -> StudentSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let name = format!("{} {}", first_name, last_name);

    let building: String = BuildingNumber().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let state: String = StateAbbr().fake();
    let zip: String = ZipCode().fake();

    StudentSeed {
        email: format!("{}.{}@classtrack.test", email_slug(&name), index),
        phone_number: format!("+1-555-{:07}", index),
        name,
        address: format!("{} {}, {}, {} {}", building, street, city, state, zip),
        class_id,
        section_id,
    }
}

/// Generates student data in parallel for (section_id, class_id) pairs
pub fn generate_students(
    sections_with_class: &[(Uuid, Uuid)],
    students_per_section: usize,
) -> Vec<StudentSeed> {
    let mut students: Vec<StudentSeed> = sections_with_class
        .par_iter()
        .enumerate()
        .flat_map(|(section_idx, &(section_id, class_id))| {
            (0..students_per_section)
                .map(|i| {
                    let index = section_idx * students_per_section + i;
                    generate_student(class_id, section_id, index)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    // Student names carry a live unique index; fake names can repeat, so
    // disambiguate duplicates with a running suffix.
    let mut seen = std::collections::HashSet::new();
    for (index, student) in students.iter_mut().enumerate() {
        if !seen.insert(student.name.clone()) {
            student.name = format!("{} {}", student.name, index);
            seen.insert(student.name.clone());
        }
    }

    students
}

/// Seeds students into the database for given sections
pub async fn seed_students(
    db: &PgPool,
    sections_with_class: &[(Uuid, Uuid)],
    students_per_section: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let total_students = sections_with_class.len() * students_per_section;
    println!(
        "🎓 Seeding {} students ({} per section)...",
        total_students, students_per_section
    );

    let students = generate_students(sections_with_class, students_per_section);
    let inserted = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts students in batches
pub async fn insert_students_batch(
    db: &PgPool,
    students: &[StudentSeed],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<usize, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO students (name, email, phone_number, address, class_id, section_id) VALUES ",
    );

    for (i, _) in students.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5,
            param_idx + 6
        ));
    }

    let mut q = sqlx::query(&query);
    for student in students {
        q = q
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.phone_number)
            .bind(&student.address)
            .bind(student.class_id)
            .bind(student.section_id);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected() as usize)
}

/// Clears all students from the database
pub async fn clear_students(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing students...");

    let result = sqlx::query("DELETE FROM students")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} students in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
