//! Catalog and demo-account seeding.
//!
//! Replaces manual catalog imports: inserts a starter set of English manga
//! volumes and one demo user. Idempotent; rows that already exist are left
//! alone.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use super::{CommandError, connect};

/// Demo account credentials.
const DEMO_EMAIL: &str = "demo@bookbuddy.example";
const DEMO_NAME: &str = "Demo Reader";
const DEMO_PASSWORD: &str = "buddy-reads-2025";

struct SeedBook {
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    cover_url: &'static str,
    summary: &'static str,
    quantity: i32,
}

const CATALOG: &[SeedBook] = &[
    SeedBook {
        title: "One Piece Vol. 1 (Romance Dawn)",
        author: "Eiichiro Oda",
        genre: "adventure",
        cover_url: "https://images.unsplash.com/photo-1526318472351-c75fcf070305?q=80&w=1200",
        summary: "Luffy's journey to become Pirate King begins.",
        quantity: 19,
    },
    SeedBook {
        title: "Naruto Vol. 1",
        author: "Masashi Kishimoto",
        genre: "ninja",
        cover_url: "https://images.unsplash.com/photo-1495446815901-a7297e633e8d?q=80&w=1200",
        summary: "A mischievous ninja-in-training with a powerful secret.",
        quantity: 18,
    },
    SeedBook {
        title: "Demon Slayer Vol. 1",
        author: "Koyoharu Gotouge",
        genre: "historical",
        cover_url: "https://images.unsplash.com/photo-1541963463532-d68292c34b19?q=80&w=1200",
        summary: "Tanjiro seeks a cure for his sister.",
        quantity: 17,
    },
    SeedBook {
        title: "Attack on Titan Vol. 1",
        author: "Hajime Isayama",
        genre: "apocalyptic",
        cover_url: "https://images.unsplash.com/photo-1507842217343-583bb7270b66?q=80&w=1200",
        summary: "Humanity fights the Titans.",
        quantity: 16,
    },
    SeedBook {
        title: "Jujutsu Kaisen Vol. 1",
        author: "Gege Akutami",
        genre: "supernatural",
        cover_url: "https://images.unsplash.com/photo-1519681393784-d120267933ba?q=80&w=1200",
        summary: "Curses, sorcerers, and a cursed finger.",
        quantity: 15,
    },
    SeedBook {
        title: "Chainsaw Man Vol. 1",
        author: "Tatsuki Fujimoto",
        genre: "dark",
        cover_url: "https://images.unsplash.com/photo-1495441070467-98905e72f1bf?q=80&w=1200",
        summary: "Denji fuses with his chainsaw devil.",
        quantity: 14,
    },
    SeedBook {
        title: "My Hero Academia Vol. 1",
        author: "Kohei Horikoshi",
        genre: "heroes",
        cover_url: "https://images.unsplash.com/photo-1473862170183-2f0f7e7bf1f3?q=80&w=1200",
        summary: "A power-less boy aims to be #1 hero.",
        quantity: 13,
    },
    SeedBook {
        title: "SPY x FAMILY Vol. 1",
        author: "Tatsuya Endo",
        genre: "comedy",
        cover_url: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?q=80&w=1200",
        summary: "A spy, an assassin, and a telepath family.",
        quantity: 12,
    },
];

/// Seed the catalog and demo account.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let inserted = seed_catalog(&pool).await?;
    tracing::info!("Seeded {inserted} catalog entries");

    if seed_demo_user(&pool).await? {
        tracing::info!("Created demo user {DEMO_EMAIL}");
    } else {
        tracing::info!("Demo user already present");
    }

    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<u64, CommandError> {
    let mut inserted = 0;

    for book in CATALOG {
        let result = sqlx::query(
            "INSERT INTO books (title, author, genre, cover_url, summary, language, quantity, source) \
             SELECT $1, $2, $3, $4, $5, 'en', $6, 'seed' \
             WHERE NOT EXISTS (SELECT 1 FROM books WHERE title = $1)",
        )
        .bind(book.title)
        .bind(book.author)
        .bind(book.genre)
        .bind(book.cover_url)
        .bind(book.summary)
        .bind(book.quantity)
        .execute(pool)
        .await?;

        inserted += result.rows_affected();
    }

    Ok(inserted)
}

async fn seed_demo_user(pool: &PgPool) -> Result<bool, CommandError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|e| CommandError::PasswordHash(e.to_string()))?
        .to_string();

    let result = sqlx::query(
        "INSERT INTO users (email, name, password_hash) \
         SELECT $1, $2, $3 \
         WHERE NOT EXISTS (SELECT 1 FROM users WHERE lower(email) = lower($1))",
    )
    .bind(DEMO_EMAIL)
    .bind(DEMO_NAME)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
