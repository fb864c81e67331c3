use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

/// Banco usado quando a URI não informa um
const DEFAULT_DATABASE: &str = "test";

/// Process-wide MongoDB handle.
///
/// Built once at startup by [`connect`] and handed to the repository; never torn down.
#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Builds the client from the URI. The driver connects lazily, so this only fails
    /// when the URI itself is unusable.
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let client_options = ClientOptions::parse(uri).await?;

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        Ok(Self { db })
    }

    /// Single round trip to the server
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// One connection attempt, no retry.
///
/// A failed ping is logged and the handle is still returned; an unparsable target
/// yields `None`, leaving repository calls to fail when they are made.
pub async fn connect(uri: &str) -> Option<MongoDB> {
    log::info!("🔌 Connecting to MongoDB...");

    let db = match MongoDB::new(uri).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Error connecting to MongoDB: {}", e);
            return None;
        }
    };

    match db.ping().await {
        Ok(()) => log::info!("✅ Connected to MongoDB (database: {})", db.database().name()),
        Err(e) => log::error!("❌ Error connecting to MongoDB: {}", e),
    }

    Some(db)
}
