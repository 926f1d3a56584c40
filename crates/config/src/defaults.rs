pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    5000
}

pub fn default_max_connections() -> u32 {
    5
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_database_path() -> String {
    "${CLIMATE_DB_PATH}".to_string()
}

pub fn default_service_name() -> String {
    "climate-api".to_string()
}
