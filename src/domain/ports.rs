use crate::domain::model::{AdviceRequest, AdviceResponse, Coordinate};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn advice_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn summary_filename(&self) -> &str;
}

/// One-shot device position request. No tracking, no retries.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate>;
}

#[async_trait]
pub trait AdviceService: Send + Sync {
    async fn request_advice(&self, request: &AdviceRequest) -> Result<AdviceResponse>;
}
