use serde::{Deserialize, Deserializer, Serialize};

// Respuesta para operaciones sin cuerpo (delete)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Campo anulable en un update parcial: ausente → `None` (sin cambios),
/// `null` → `Some(None)` (borrar), valor → `Some(Some(v))`.
/// Se usa junto con `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
