use serde::Serialize;

#[derive(Serialize)]
pub struct SelectionCheckResponse {
    pub allowed: bool,
    pub reason: Option<String>,
}
