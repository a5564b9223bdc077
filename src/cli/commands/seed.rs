//! Seed command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::{SAMPLE_MOVIES, seed_sample_movies};

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    println!("Seeding movies...");
    let created = seed_sample_movies(&store).await?;

    println!(
        "Movie seeding completed: {} created, {} already present",
        created,
        SAMPLE_MOVIES.len() - created
    );

    Ok(())
}
