use std::time::Duration;

pub const DEFAULT_UPLOAD_URL: &str = "https://transfer.sh/";

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub upload_url: String,
    pub connect_timeout: Duration,
    /// Overall request limit. `None` lets large files take as long as they need.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            user_agent: concat!("file-uploader/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl UploaderConfig {
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }
}
