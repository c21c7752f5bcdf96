use serde::{Deserialize, Serialize};

/// Health check payload. Status strings follow the gRPC health protocol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn serving() -> Self {
        Self { status: "SERVING".to_string() }
    }

    pub fn not_serving() -> Self {
        Self { status: "NOT_SERVING".to_string() }
    }

    pub fn is_serving(&self) -> bool {
        self.status == "SERVING"
    }
}
