use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gemini_api_hostname: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gemini_api_hostname = env::var("ODYSSEY_GEMINI_API_HOSTNAME")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let gemini_api_key =
            env::var("GEMINI_API_KEY").unwrap_or_else(|_| "thiswontworkforgemini".to_string());
        let gemini_model = env::var("ODYSSEY_GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string());

        Self {
            gemini_api_hostname,
            gemini_api_key,
            gemini_model,
        }
    }
}
