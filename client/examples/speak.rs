use anyhow::{Context, Result};
use campfire_client::{Campfire, ConnectionOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let room_name = std::env::var("CAMPFIRE_ROOM_NAME").context("Set CAMPFIRE_ROOM_NAME")?;
    let message = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if message.is_empty() {
        anyhow::bail!("Usage: speak <message>");
    }

    let campfire = Campfire::connect(&ConnectionOptions::from_env()?)?;
    let room = campfire
        .find_room_by_name(&room_name)
        .await?
        .with_context(|| format!("No room named {}", room_name))?;

    room.join().await?;
    if message.contains('\n') {
        room.paste(&message).await?;
    } else {
        room.speak(&message).await?;
    }
    room.leave().await?;

    println!("Posted to {}", room_name);
    Ok(())
}
