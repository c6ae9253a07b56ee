use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::SectionSeed;

const SECTION_NAMES: [&str; 10] = [
    "Section A",
    "Section B",
    "Section C",
    "Section D",
    "Section E",
    "Section F",
    "Section G",
    "Section H",
    "Section I",
    "Section J",
];

/// Generates section data for classes
pub fn generate_sections(class_ids: &[Uuid], sections_per_class: usize) -> Vec<SectionSeed> {
    class_ids
        .par_iter()
        .flat_map(|&class_id| {
            (0..sections_per_class)
                .map(|i| {
                    let name = if i < SECTION_NAMES.len() {
                        SECTION_NAMES[i].to_string()
                    } else {
                        format!("Section {}", i + 1)
                    };

                    SectionSeed { name, class_id }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Seeds sections into the database for given classes
pub async fn seed_sections(
    db: &PgPool,
    class_ids: &[Uuid],
    sections_per_class: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let total_sections = class_ids.len() * sections_per_class;
    println!(
        "🌿 Seeding {} sections ({} per class)...",
        total_sections, sections_per_class
    );

    let sections = generate_sections(class_ids, sections_per_class);
    let section_ids = insert_sections_batch(db, &sections).await?;

    println!(
        "   ✓ Inserted {} sections in {:?}",
        section_ids.len(),
        start_time.elapsed()
    );

    Ok(section_ids)
}

/// Inserts sections in batches
pub async fn insert_sections_batch(
    db: &PgPool,
    sections: &[SectionSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(sections.len());

    for chunk in sections.chunks(BATCH_SIZE) {
        let ids = insert_sections_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_sections_chunk(
    tx: &mut Transaction<'_, Postgres>,
    sections: &[SectionSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO sections (name, class_id) VALUES ");

    for (i, _) in sections.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for section in sections {
        q = q.bind(&section.name).bind(section.class_id);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all sections from the database
pub async fn clear_sections(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing sections...");

    let result = sqlx::query("DELETE FROM sections")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} sections in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sections_per_class() {
        let class_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let sections = generate_sections(&class_ids, 3);

        assert_eq!(sections.len(), 6);
        let for_first: Vec<_> = sections
            .iter()
            .filter(|s| s.class_id == class_ids[0])
            .collect();
        assert_eq!(for_first.len(), 3);

        let names: Vec<_> = for_first.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Section A"));
        assert!(names.contains(&"Section B"));
        assert!(names.contains(&"Section C"));
    }
}
