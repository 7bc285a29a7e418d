use grid_diagram::DiagramConfig;

fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // An optional JSON file with diagram limits can be passed as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => DiagramConfig::default(),
    };

    grid_diagram::run_app_with(config)
}

fn load_config(path: &str) -> DiagramConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to read config {path}: {e}; using defaults");
            return DiagramConfig::default();
        }
    };
    match DiagramConfig::from_json(&text) {
        Ok(config) => {
            if let Err(e) = config.validate() {
                log::warn!("Config {path} has out-of-range values ({e}); clamping");
            }
            log::info!("Loaded config from {path}");
            config.normalized()
        }
        Err(e) => {
            log::warn!("Failed to parse config {path}: {e}; using defaults");
            DiagramConfig::default()
        }
    }
}
