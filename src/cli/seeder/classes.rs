use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::ClassSeed;

/// Generates class data: "Class 1" through "Class N"
pub fn generate_classes(count: usize) -> Vec<ClassSeed> {
    (1..=count)
        .map(|i| ClassSeed {
            name: format!("Class {}", i),
        })
        .collect()
}

/// Seeds classes into the database
pub async fn seed_classes(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes...", count);

    let classes = generate_classes(count);
    let class_ids = insert_classes_batch(db, &classes).await?;

    println!(
        "   ✓ Inserted {} classes in {:?}",
        class_ids.len(),
        start_time.elapsed()
    );

    Ok(class_ids)
}

/// Inserts classes in batches
pub async fn insert_classes_batch(
    db: &PgPool,
    classes: &[ClassSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(classes.len());

    for chunk in classes.chunks(BATCH_SIZE) {
        let ids = insert_classes_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_classes_chunk(
    tx: &mut Transaction<'_, Postgres>,
    classes: &[ClassSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if classes.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO classes (name) VALUES ");

    for (i, _) in classes.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        query.push_str(&format!("(${})", i + 1));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for class in classes {
        q = q.bind(&class.name);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Clears all classes from the database
pub async fn clear_classes(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing classes...");

    let result = sqlx::query("DELETE FROM classes")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} classes in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
