//! # Seed Data Generator
//!
//! Populates the database with test books and delivery tariffs for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 books (default)
//! cargo run -p maktaba-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p maktaba-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p maktaba-db --bin seed -- --db ./data/maktaba.db
//! ```
//!
//! ## Generated Data
//! - Books built from a title/author pool with deterministic pricing and
//!   stock, so two runs against fresh databases produce the same catalog
//! - A delivery tariff for each of the 58 wilayas, priced by distance band

use chrono::Utc;
use std::env;
use uuid::Uuid;

use maktaba_core::wilaya::{wilaya_name, WILAYA_COUNT};
use maktaba_core::Book;
use maktaba_db::{Database, DbConfig};

/// Title/author pool for realistic catalog data.
const TITLES: &[(&str, &str)] = &[
    ("Nedjma", "Kateb Yacine"),
    ("Le Fils du pauvre", "Mouloud Feraoun"),
    ("La Grande Maison", "Mohammed Dib"),
    ("L'Incendie", "Mohammed Dib"),
    ("Le Métier à tisser", "Mohammed Dib"),
    ("La Colline oubliée", "Mouloud Mammeri"),
    ("L'Opium et le Bâton", "Mouloud Mammeri"),
    ("Ce que le jour doit à la nuit", "Yasmina Khadra"),
    ("L'Attentat", "Yasmina Khadra"),
    ("Les Hirondelles de Kaboul", "Yasmina Khadra"),
    ("Meursault, contre-enquête", "Kamel Daoud"),
    ("Zabor ou Les Psaumes", "Kamel Daoud"),
    ("La Dernière Nuit du Raïs", "Yasmina Khadra"),
    ("Mémoires d'un fou", "Rachid Boudjedra"),
    ("La Répudiation", "Rachid Boudjedra"),
    ("L'Amour, la fantasia", "Assia Djebar"),
    ("Femmes d'Alger dans leur appartement", "Assia Djebar"),
    ("Nulle part dans la maison de mon père", "Assia Djebar"),
    ("Le Quai aux Fleurs ne répond plus", "Malek Haddad"),
    ("Je t'offrirai une gazelle", "Malek Haddad"),
    ("Les Chercheurs d'os", "Tahar Djaout"),
    ("Le Dernier Été de la raison", "Tahar Djaout"),
    ("La Gardienne des ombres", "Waciny Laredj"),
    ("Les Ailes de la reine", "Waciny Laredj"),
    ("Rue Darwin", "Boualem Sansal"),
    ("Le Serment des barbares", "Boualem Sansal"),
    ("2084 : La fin du monde", "Boualem Sansal"),
    ("Au commencement était la mer", "Maïssa Bey"),
    ("Bleu blanc vert", "Maïssa Bey"),
    ("L'Étranger", "Albert Camus"),
    ("La Peste", "Albert Camus"),
    ("Le Premier Homme", "Albert Camus"),
];

/// Publishers for the generated catalog.
const PUBLISHERS: &[&str] = &["Casbah", "Barzakh", "Chihab", "ENAG", "Média-Plus", "Sédia"];

/// Doorstep delivery price bands in centimes, indexed by distance from the
/// coast (rough bands, for test data only).
const TARIFF_BANDS: &[(i64, i64)] = &[
    (40_000, 25_000), // north
    (60_000, 40_000), // highlands
    (90_000, 60_000), // deep south
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug for query-level logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./maktaba_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Maktaba Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of books to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./maktaba_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Maktaba Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Books:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.books().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} books", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate books
    println!();
    println!("Generating books...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let book = generate_book(seed);

        if let Err(e) = db.books().insert(&book).await {
            eprintln!("Failed to insert {}: {}", book.title, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} books...", generated);
        }
    }

    // Generate delivery tariffs
    println!();
    println!("Generating delivery tariffs...");

    for wilaya_id in 1..=WILAYA_COUNT as i64 {
        let (doorstep, stop_desk) = tariff_for(wilaya_id);
        db.delivery_prices()
            .upsert(wilaya_id, doorstep, stop_desk)
            .await?;
    }
    println!("  {} wilayas priced", WILAYA_COUNT);

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} books in {:?}", generated, elapsed);

    // Verify
    println!();
    println!("Verifying...");
    println!("  Catalog size: {}", db.books().count().await?);
    let tariff = db.delivery_prices().get(16).await?;
    println!(
        "  Tariff for {}: {:?} centimes doorstep",
        wilaya_name(16).unwrap_or("?"),
        tariff.map(|t| t.doorstep_cents)
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single book with deterministic pseudo-random data.
fn generate_book(seed: usize) -> Book {
    let now = Utc::now();

    let (title, author) = TITLES[seed % TITLES.len()];
    let edition = seed / TITLES.len() + 1;
    let title = if edition > 1 {
        format!("{} ({}e édition)", title, edition)
    } else {
        title.to_string()
    };

    // Price 600.00 - 2'200.00 DA, cost at roughly 60% of price
    let price_cents = 60_000 + ((seed * 37) % 160) as i64 * 1_000;
    let cost_cents = price_cents * 6 / 10;

    Book {
        id: Uuid::new_v4().to_string(),
        title,
        author: Some(author.to_string()),
        publisher: Some(PUBLISHERS[seed % PUBLISHERS.len()].to_string()),
        price_cents,
        cost_cents,
        quantity_left: ((seed * 13) % 50) as i64,
        delivering_stock: 0,
        sold_stock: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Doorstep/stop-desk tariff for a wilaya, picked by a rough distance band.
fn tariff_for(wilaya_id: i64) -> (i64, i64) {
    let band = match wilaya_id {
        // Saharan wilayas (historic codes and the 2019 additions)
        1 | 8 | 11 | 30 | 32 | 33 | 37 | 39 | 45 | 47 | 49..=58 => 2,
        // High plateaus
        3 | 4 | 5 | 7 | 12 | 14 | 17 | 20 | 28 | 34 | 38 | 40 => 1,
        // Coastal north
        _ => 0,
    };
    TARIFF_BANDS[band]
}
