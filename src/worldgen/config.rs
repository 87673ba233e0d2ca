/// Configuration for world generation and game setup.
#[derive(Debug, Clone)]
pub struct WorldGenConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Number of regions to generate.
    pub num_regions: u32,
    /// Map width in abstract units.
    pub map_width: f64,
    /// Map height in abstract units.
    pub map_height: f64,
    /// K-nearest neighbors for adjacency graph.
    pub adjacency_k: u32,
    /// Smallest region area, in steradians.
    pub min_area: f64,
    /// Largest region area, in steradians.
    pub max_area: f64,
    /// Computer-controlled factions spawned at game start.
    pub num_ai_factions: u32,
    /// An AI only spawns on an unclaimed region with more output than this.
    pub min_ai_start_output: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_regions: 60,
            map_width: 1000.0,
            map_height: 600.0,
            adjacency_k: 4,
            min_area: 0.0005,
            max_area: 0.05,
            num_ai_factions: 10,
            min_ai_start_output: 500.0,
        }
    }
}
