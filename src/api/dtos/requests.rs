use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub venue: String,
    pub club_name: String,
    pub slot: i32,
    pub capacity: i32,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub club: Option<String>,
}

#[derive(Deserialize)]
pub struct ReserveRequest {
    pub event_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct SelectionCheckRequest {
    pub candidate_id: String,
    pub selected_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct RedeemRequest {
    pub token: String,
    pub event_id: String,
}
