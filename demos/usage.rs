use param_hydrate::{process, Binding, Hydrate, MemoryStore};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default)]
struct AppConfig {
    name: String,
    request_timeout: Duration,
    sample_rates: Vec<f64>,
    database: DatabaseConfig,
    labels: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct DatabaseConfig {
    host: String,
    port: u16,
    tls: bool,
}

impl Hydrate for AppConfig {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::leaf("/name", &mut self.name),
            Binding::leaf("/request-timeout", &mut self.request_timeout),
            Binding::leaf("/sample-rates", &mut self.sample_rates),
            Binding::leaf("/labels", &mut self.labels),
            Binding::group("/database", &mut self.database),
        ]
    }
}

impl Hydrate for DatabaseConfig {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        vec![
            Binding::leaf("/host", &mut self.host),
            Binding::leaf("/port", &mut self.port),
            Binding::leaf("/tls", &mut self.tls),
        ]
    }
}

fn main() -> Result<(), param_hydrate::HydrateError> {
    // Stands in for a real remote parameter store client.
    let mut store = MemoryStore::new();
    store.insert("/prod/myapp/name", "myapp");
    store.insert("/prod/myapp/request-timeout", "1h30m");
    store.insert("/prod/myapp/sample-rates", "0.25,0.5,0.99");
    store.insert("/prod/myapp/labels", "team:platform,tier:backend");
    store.insert("/prod/myapp/database/host", "db.internal");
    store.insert("/prod/myapp/database/port", "5432");
    store.insert("/prod/myapp/database/tls", "true");

    let mut config = AppConfig::default();
    process(&store, "/prod/myapp", &mut config)?;

    println!("App: {} (timeout {:?})", config.name, config.request_timeout);
    println!(
        "Database: {}:{} (tls={})",
        config.database.host, config.database.port, config.database.tls
    );
    println!("Sample rates: {:?}", config.sample_rates);
    println!("Labels: {:?}", config.labels);

    Ok(())
}
