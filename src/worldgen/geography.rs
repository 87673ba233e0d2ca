use std::collections::VecDeque;

use rand::Rng;
use rand::RngCore;

use super::config::WorldGenConfig;
use crate::model::RegionSeed;

/// Minimum distance between region centroids (fraction of map diagonal).
const MIN_DISTANCE_FRACTION: f64 = 0.04;

const NAME_PREFIXES: &[&str] = &[
    "Ast", "Bel", "Cor", "Dun", "Eld", "Far", "Gal", "Hel", "Ior", "Kar", "Lum", "Mor", "Nor",
    "Ost", "Pel", "Quar", "Ros", "Sar", "Tal", "Ul", "Val", "Wes", "Yr", "Zan",
];
const NAME_SUFFIXES: &[&str] = &[
    "ania", "aria", "avia", "eth", "ia", "ica", "istan", "land", "mark", "mere", "onia", "or",
    "reach", "sk", "heim", "via",
];

/// A synthetic static geography: region seeds plus adjacency edges indexing
/// into them.
#[derive(Debug, Clone)]
pub struct Geography {
    pub seeds: Vec<RegionSeed>,
    pub edges: Vec<(usize, usize)>,
}

/// Scatter region centroids, give each an area, and connect every region to
/// its k nearest neighbors. The graph is always connected.
pub fn generate_geography(config: &WorldGenConfig, rng: &mut dyn RngCore) -> Geography {
    let min_dist = MIN_DISTANCE_FRACTION
        * (config.map_width * config.map_width + config.map_height * config.map_height).sqrt();
    let points = scatter_points(
        config.num_regions as usize,
        config.map_width,
        config.map_height,
        min_dist,
        rng,
    );

    let seeds: Vec<RegionSeed> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            // Squaring skews toward small regions, like a real political map.
            let u: f64 = rng.random_range(0.0..1.0);
            let area = config.min_area + (config.max_area - config.min_area) * u * u;
            RegionSeed {
                name: generate_region_name(i, rng),
                area,
                x,
                y,
            }
        })
        .collect();

    let adjacency = nearest_neighbors(&points, config.adjacency_k as usize);
    let mut edges = Vec::new();
    for (i, neighbors) in adjacency.iter().enumerate() {
        for &j in neighbors {
            if i < j {
                edges.push((i, j));
            }
        }
    }

    Geography { seeds, edges }
}

/// K-nearest-neighbor adjacency, made symmetric and then connected.
fn nearest_neighbors(points: &[(f64, f64)], k: usize) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); points.len()];

    for i in 0..points.len() {
        let mut distances: Vec<(usize, f64)> = (0..points.len())
            .filter(|&j| j != i)
            .map(|j| (j, dist(points[i], points[j])))
            .collect();
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));

        for &(j, _) in distances.iter().take(k) {
            if !adjacency[i].contains(&j) {
                adjacency[i].push(j);
            }
            if !adjacency[j].contains(&i) {
                adjacency[j].push(i);
            }
        }
    }

    ensure_connected(points, &mut adjacency);
    adjacency
}

/// Scatter points with minimum distance rejection sampling.
fn scatter_points(
    count: usize,
    width: f64,
    height: f64,
    min_dist: f64,
    rng: &mut dyn RngCore,
) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(count);
    let max_attempts = count * 100;
    let mut attempts = 0;

    while points.len() < count && attempts < max_attempts {
        attempts += 1;
        let p = (rng.random_range(0.0..width), rng.random_range(0.0..height));
        if min_dist > 0.0 && points.iter().any(|&q| dist(q, p) < min_dist) {
            continue;
        }
        points.push(p);
    }

    // Crowded map: place the rest without the spacing rule
    while points.len() < count {
        points.push((rng.random_range(0.0..width), rng.random_range(0.0..height)));
    }

    points
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// BFS over the graph; join each component to the previous one through its
/// closest pair of points.
fn ensure_connected(points: &[(f64, f64)], adjacency: &mut [Vec<usize>]) {
    let n = points.len();
    let mut visited = vec![false; n];
    let mut components: Vec<Vec<usize>> = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for &neighbor in &adjacency[node] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    for pair in components.windows(2) {
        let mut best = (f64::MAX, 0, 0);
        for &a in &pair[0] {
            for &b in &pair[1] {
                let d = dist(points[a], points[b]);
                if d < best.0 {
                    best = (d, a, b);
                }
            }
        }
        let (_, a, b) = best;
        if !adjacency[a].contains(&b) {
            adjacency[a].push(b);
        }
        if !adjacency[b].contains(&a) {
            adjacency[b].push(a);
        }
    }
}

fn generate_region_name(index: usize, rng: &mut dyn RngCore) -> String {
    let prefix = NAME_PREFIXES[rng.random_range(0..NAME_PREFIXES.len())];
    let suffix = NAME_SUFFIXES[rng.random_range(0..NAME_SUFFIXES.len())];
    // Index keeps names unique on big maps.
    if index < NAME_PREFIXES.len() {
        format!("{prefix}{suffix}")
    } else {
        format!("{prefix}{suffix} {}", index / NAME_PREFIXES.len() + 1)
    }
}
