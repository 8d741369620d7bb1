pub mod attendance;
pub mod proof;
pub mod reservation;
pub mod selection;
