use std::{str::FromStr, sync::Arc};

use clap::Parser;
use fake::{
    faker::{
        address::en::{CityName, StreetName},
        internet::en::SafeEmail,
        job::en::Title,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
    Fake,
};
use roster::{
    domain::CreateMemberRequest,
    error::AppError,
    repository::SqliteMemberRepository,
    service::member_service::MemberService,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Populate the member registry with generated members.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// SQLite connection string
    #[arg(long, default_value = "sqlite://roster.db")]
    database_url: String,

    /// Number of members to create
    #[arg(long, short, default_value_t = 25)]
    count: usize,
}

fn fake_member() -> CreateMemberRequest {
    let street_number: u16 = (1..999).fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();

    CreateMemberRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: SafeEmail().fake(),
        phone: Some(PhoneNumber().fake()),
        address: Some(format!("{} {}, {}", street_number, street, city)),
        role: Some(Title().fake()),
        join_date: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let connect_options = SqliteConnectOptions::from_str(&args.database_url)?
        .create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let member_service = MemberService::new(Arc::new(SqliteMemberRepository::new(db_pool.clone())));

    println!("👥 Creating members...");

    let mut created = 0;
    let mut skipped = 0;
    for _ in 0..args.count {
        match member_service.create_member(fake_member()).await {
            Ok(_) => created += 1,
            // Generated emails occasionally repeat
            Err(AppError::Conflict(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    println!("  ✅ Created {} members ({} duplicate emails skipped)", created, skipped);
    println!("🎉 Seeding complete!");

    Ok(())
}
