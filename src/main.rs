#[tokio::main]
async fn main() {
    club_booking_backend::run().await;
}
