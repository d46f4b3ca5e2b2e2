use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub credentials_file: String,
}

fn default_base_url() -> String { "http://localhost:5000".to_string() }
fn default_credentials_file() -> String { "data/credentials.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    match std::env::var("CONFIG_PATH") {
        Ok(path) => load_from_file(&path),
        Err(_) => {
            if std::fs::metadata("config.toml").is_ok() {
                load_from_file("config.toml")
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 api（支持从环境变量填充 base_url）
        self.api.normalize_from_env();
        self.api.validate()?;
        // 归一化 storage
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 base_url，则尝试从环境变量填充
        if self.base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("API_BASE_URL") {
                self.base_url = url;
            }
        }
        if self.base_url.trim().is_empty() {
            self.base_url = default_base_url();
        }
        // 去掉结尾斜杠，便于与端点路径拼接
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url 必须以 http:// 或 https:// 开头"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供路径，则尝试从环境变量填充
        if self.credentials_file.trim().is_empty() {
            if let Ok(path) = std::env::var("CREDENTIALS_FILE") {
                self.credentials_file = path;
            }
        }
        if self.credentials_file.trim().is_empty() {
            self.credentials_file = default_credentials_file();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.credentials_file.trim().is_empty() {
            return Err(anyhow!("storage.credentials_file 为空；请在 config.toml 或环境变量 CREDENTIALS_FILE 中提供"));
        }
        Ok(())
    }
}
