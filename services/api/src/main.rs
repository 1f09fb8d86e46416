use credit_ai_api::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    credit_ai_api::run().await
}
