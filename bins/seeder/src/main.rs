//! Seeds the system-wide expense categories.
//!
//! Safe to run repeatedly: categories that already exist are skipped.
//!
//! Usage: cargo run --bin seeder

use sea_orm::DatabaseConnection;
use spendwatch_db::CategoryRepository;
use spendwatch_db::repositories::CreateCategoryInput;

/// Name, description, icon, and color of each system category.
const SYSTEM_CATEGORIES: [(&str, &str, &str, &str); 8] = [
    ("Food & Dining", "Groceries, restaurants, and takeaway", "utensils", "#F97316"),
    ("Transportation", "Fuel, transit, and ride hailing", "car", "#3B82F6"),
    ("Shopping", "Clothing, electronics, and household items", "shopping-bag", "#EC4899"),
    ("Entertainment", "Movies, events, and subscriptions", "film", "#8B5CF6"),
    ("Bills & Utilities", "Electricity, water, internet, and phone", "file-text", "#EF4444"),
    ("Healthcare", "Medicine, doctor visits, and insurance", "heart", "#10B981"),
    ("Education", "Courses, books, and tuition", "book", "#F59E0B"),
    ("Others", "Anything that fits nowhere else", "more-horizontal", "#6B7280"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = spendwatch_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding system categories...");
    seed_system_categories(&db).await;

    println!("Seeding complete!");
}

async fn seed_system_categories(db: &DatabaseConnection) {
    let categories = CategoryRepository::new(db.clone());

    let mut inserted = 0;
    for (name, description, icon, color_code) in SYSTEM_CATEGORIES {
        match categories.find_system_by_name(name).await {
            Ok(Some(_)) => {
                println!("  {name} already exists, skipping...");
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("Failed to look up category {name}: {e}");
                continue;
            }
        }

        let input = CreateCategoryInput {
            name: name.to_string(),
            description: Some(description.to_string()),
            icon: Some(icon.to_string()),
            color_code: Some(color_code.to_string()),
            user_id: None,
        };
        match categories.create(input).await {
            Ok(_) => inserted += 1,
            Err(e) => eprintln!("Failed to insert category {name}: {e}"),
        }
    }
    println!("  Inserted {inserted} categories");
}
