/// Plain-text greeting.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> &'static str {
    "Hi, I am root"
}
