use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{
        address::en::CityName,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
    Fake,
};

use pacific_api::{
    config::Settings,
    domain::{Announcement, Event},
    repository::{AnnouncementRepository, EventRepository},
    store::{DocumentStore, MemoryStore, MongoStore},
};

/// Fill a development database with sample announcements and events.
#[derive(Debug, Parser)]
#[command(name = "seed", version)]
struct Args {
    /// Number of announcements to create
    #[arg(long, default_value_t = 10)]
    announcements: usize,

    /// Number of events to create
    #[arg(long, default_value_t = 10)]
    events: usize,

    /// Generate the records against an in-memory store and print them instead of writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let store: Arc<dyn DocumentStore> = if args.dry_run {
        println!("🧪 Dry run: using an in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let settings = Settings::new()?;
        let (url, name) = settings
            .database
            .target()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL and DATABASE_NAME must be set"))?;
        Arc::new(MongoStore::connect(url, name, &settings.database).await?)
    };

    let announcement_repo = AnnouncementRepository::new(store.clone());
    let event_repo = EventRepository::new(store.clone());

    println!("📣 Creating announcements...");
    let now = Utc::now();
    for i in 0..args.announcements {
        let announcement = Announcement {
            title: Sentence(3..7).fake(),
            body: Paragraph(2..4).fake(),
            // Spread publish times over the past weeks
            published_at: Some(now - Duration::days(i as i64 * 3)),
            author: Some(Name().fake()),
        };
        announcement_repo.create(announcement, now).await?;
    }
    println!("  ✅ Created {} announcements", args.announcements);

    println!("📅 Creating events...");
    let today = now.date_naive();
    for i in 0..args.events {
        let event = Event {
            title: Sentence(2..5).fake(),
            description: Some(Paragraph(1..3).fake()),
            event_date: today + Duration::days(7 * (i as i64 + 1)),
            location: Some(CityName().fake()),
        };
        event_repo.create(event).await?;
    }
    println!("  ✅ Created {} events", args.events);

    if args.dry_run {
        for announcement in announcement_repo.list(args.announcements as i64).await? {
            println!("{}", serde_json::to_string(&announcement)?);
        }
        for event in event_repo.list(args.events as i64).await? {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    println!("🎉 Seeding complete!");

    Ok(())
}
