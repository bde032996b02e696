use serde::Serialize;

/// Liveness payload served by `/health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
