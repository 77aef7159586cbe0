use catalog::CatalogStore;
use std::env;
use std::time::Instant;

fn main() {
    let data_dir = env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let store = CatalogStore::new(&data_dir);

    println!("Loading catalog from {}...\n", data_dir);

    let start = Instant::now();
    let manifest = store.load_manifest().expect("Failed to load manifest");
    let keys: Vec<_> = manifest.entries.iter().map(|e| e.key()).collect();
    let seasons = store.load_seasons(&keys);
    let elapsed = start.elapsed();

    let loaded: Vec<_> = seasons.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    let records: usize = loaded.iter().map(|r| r.len()).sum();
    let rated: usize = loaded
        .iter()
        .map(|r| r.iter().filter(|rec| rec.is_rated()).count())
        .sum();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Seasons: {} ({} failed)", seasons.len(), seasons.len() - loaded.len());
    println!("Records: {}", records);
    println!("Rated: {}", rated);
}
