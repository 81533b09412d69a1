use std::sync::Arc;

use anyhow::Context;

use census_infra::{seed, CensusConfig, InMemoryPersonStore, PersonService, PersonServiceImpl, PersonStore};

fn main() -> anyhow::Result<()> {
    let config = CensusConfig::from_env();
    census_observability::init_with(config.log_format);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let store = Arc::new(InMemoryPersonStore::new());
    if config.seed_on_startup {
        seed::seed_if_empty(&store).context("failed to seed sample persons")?;
    }

    let service = PersonServiceImpl::new(Arc::clone(&store));
    let population = service
        .get_cities_population()
        .context("failed to aggregate population")?;

    tracing::info!(
        persons = store.count()?,
        cities = population.len(),
        "registry ready"
    );
    for city in &population {
        tracing::info!(
            city = %city.city,
            population = city.population,
            payload = %serde_json::to_string(city)?,
            "city population"
        );
    }

    Ok(())
}
