use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_events_per_day: usize,
    pub restricted_time_start: u32,
    pub restricted_time_end: u32,
    pub restricted_slot_start: i32,
    pub restricted_slot_end: i32,
    pub max_events_during_restriction: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            max_events_per_day: env::var("MAX_EVENTS_PER_DAY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .expect("MAX_EVENTS_PER_DAY must be a number"),
            restricted_time_start: env::var("RESTRICTED_TIME_START")
                .unwrap_or_else(|_| "9".to_string())
                .parse()
                .expect("RESTRICTED_TIME_START must be an hour (0-23)"),
            restricted_time_end: env::var("RESTRICTED_TIME_END")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("RESTRICTED_TIME_END must be an hour (0-23)"),
            restricted_slot_start: env::var("RESTRICTED_SLOT_START")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("RESTRICTED_SLOT_START must be a slot number"),
            restricted_slot_end: env::var("RESTRICTED_SLOT_END")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .expect("RESTRICTED_SLOT_END must be a slot number"),
            max_events_during_restriction: env::var("MAX_EVENTS_DURING_RESTRICTION")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .expect("MAX_EVENTS_DURING_RESTRICTION must be a number"),
        }
    }
}
