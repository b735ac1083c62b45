//! All three resolution strategies over one small author-mention batch.

use conflate::{Resolution, Resolver, Strategy};

fn main() {
    // Pretend embeddings for a handful of author-name mentions: spelling
    // variants of the same author point roughly the same way.
    let mentions: Vec<(String, Vec<f32>)> = vec![
        ("J. R. R. Tolkien".to_string(), vec![1.0, 0.0]),
        ("Tolkien, J.R.R.".to_string(), vec![0.995, 0.0999]),
        ("J.R.R. Tolkien".to_string(), vec![0.99, 0.12]),
        ("Ursula K. Le Guin".to_string(), vec![0.0, 1.0]),
        ("Le Guin, Ursula".to_string(), vec![0.0, 0.995]),
        ("mOJibake##".to_string(), vec![-0.7, -0.7]),
    ];

    // --- Greedy threshold (overlap-tolerant groups) ---
    let resolver = Resolver::new(Strategy::GreedyThreshold { threshold: 0.83 });
    println!("=== Greedy threshold (0.83) ===");
    match resolver.resolve(mentions.clone()).unwrap() {
        Resolution::Groups(groups) => {
            for (i, group) in groups.iter().enumerate() {
                println!("  group {i}: {group:?}");
            }
        }
        Resolution::Partition(_) => unreachable!(),
    }

    // --- Agglomerative (true partition) ---
    let resolver = Resolver::new(Strategy::Agglomerative {
        distance_cutoff: 0.3,
    });
    println!("\n=== Agglomerative (cutoff 0.3) ===");
    let resolution = resolver.resolve(mentions.clone()).unwrap();
    let partition = resolution.partition().unwrap();
    for (label, members) in partition.clusters() {
        println!("  cluster {label}: {members:?}");
    }

    // --- Density (partition plus noise) ---
    let resolver = Resolver::new(Strategy::Density {
        epsilon: 0.5,
        min_points: 2,
    });
    println!("\n=== DBSCAN (eps=0.5, min_points=2) ===");
    let resolution = resolver.resolve(mentions).unwrap();
    let partition = resolution.partition().unwrap();
    for (label, members) in partition.clusters() {
        println!("  cluster {label}: {members:?}");
    }
    for id in partition.noise() {
        println!("  NOISE: {id:?}");
    }
}
