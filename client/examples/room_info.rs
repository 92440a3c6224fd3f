use anyhow::{Context, Result};
use campfire_client::{Campfire, ConnectionOptions, RoomId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let room_id: RoomId = std::env::var("CAMPFIRE_ROOM")
        .context("Set CAMPFIRE_ROOM to a room id")?
        .parse()?;

    let campfire = Campfire::connect(&ConnectionOptions::from_env()?)?;
    let mut room = campfire.room(room_id);

    println!("Topic: {}", room.topic().await?.unwrap_or_default());
    println!("Name: {}", room.name().unwrap_or("?"));
    println!("Full: {}", room.full().await?);

    match room.guest_url().await? {
        Some(url) => println!("Guest URL: {}", url),
        None => println!("Guest access disabled"),
    }

    for user in room.users().await? {
        println!("  {} ({})", user.name, user.id);
    }

    let today = chrono::Local::now().date_naive();
    match room.transcript(today).await {
        Ok(entries) => {
            for entry in entries {
                println!(
                    "[{}] {}: {}",
                    entry.timestamp.format("%H:%M"),
                    entry.user_id.map(|id| id.to_string()).unwrap_or_default(),
                    entry.message.unwrap_or_default()
                );
            }
        }
        Err(e) => println!("No transcript for {}: {}", today, e),
    }

    Ok(())
}
