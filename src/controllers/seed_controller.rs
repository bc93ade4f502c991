use chrono::Utc;
use sqlx::PgPool;

use crate::repositories::seed_repository::SeedRepository;
use crate::services::seed_service::{demo_dataset, SeedSummary};
use crate::utils::errors::AppError;

pub struct SeedController {
    repository: SeedRepository,
}

impl SeedController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SeedRepository::new(pool),
        }
    }

    /// Reemplaza todos los datos por el dataset de demostración
    pub async fn seed(&self) -> Result<SeedSummary, AppError> {
        let data = demo_dataset(Utc::now());
        self.repository.replace_all(&data).await?;

        Ok(SeedSummary {
            message: "Database seeded successfully!".to_string(),
            counts: data.counts(),
        })
    }
}
