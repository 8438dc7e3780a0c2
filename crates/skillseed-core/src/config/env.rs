use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SKILLSEED_BASE_URL") {
            self.target.base_url = v;
        }
        if let Ok(v) = std::env::var("SKILLSEED_ENDPOINT_PATH") {
            self.target.path = v;
        }
        if let Ok(v) = std::env::var("SKILLSEED_CATALOG_PATH") {
            self.catalog.path = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = std::env::var("SKILLSEED_ASSIGN_ORDER") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.catalog.assign_order = enabled;
            } else {
                tracing::warn!("ignoring invalid SKILLSEED_ASSIGN_ORDER value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SKILLSEED_FAIL_ON_ERROR") {
            if let Ok(enabled) = v.parse::<bool>() {
                self.submit.fail_on_error = enabled;
            } else {
                tracing::warn!("ignoring invalid SKILLSEED_FAIL_ON_ERROR value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SKILLSEED_TIMEOUT_CONNECT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.timeouts.connect_seconds = secs;
        }
        if let Ok(v) = std::env::var("SKILLSEED_TIMEOUT_REQUEST")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.timeouts.request_seconds = secs;
        }
    }
}
