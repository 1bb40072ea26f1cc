pub mod source;
pub mod ticker;

use serde::{Deserialize, Serialize};

/// Body of the backend's `/health` probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
    #[serde(default)]
    pub env: String,
}
