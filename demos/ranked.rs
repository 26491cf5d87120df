//! Enumerates ranked assignment hypotheses for a random gated cost
//! matrix, the way a tracking filter consumes them.

use hypgen::{murty_with, pad_to_square, MurtyConfig, Sequential, FORBIDDEN};

const TRACKS: usize = 8;
const OBSERVATIONS: usize = 6;
const K: usize = 10;

fn main() {
    tracing_subscriber::fmt::init();

    // Random track/observation affinities, plus a miss column per
    // track so every hypothesis is complete.
    let affinity = nalgebra::DMatrix::<f64>::new_random(TRACKS, OBSERVATIONS);
    let mut costs = nalgebra::DMatrix::from_element(TRACKS, OBSERVATIONS + TRACKS, FORBIDDEN);
    for row in 0..TRACKS {
        for col in 0..OBSERVATIONS {
            costs[(row, col)] = affinity[(row, col)];
        }
        costs[(row, OBSERVATIONS + row)] = 2.0; // miss cost
    }
    let costs = pad_to_square(&costs, 0.0);

    let hypotheses = murty_with(&costs, K, &MurtyConfig::default(), &Sequential)
        .expect("feasible by construction");

    for (rank, hypothesis) in hypotheses.iter().enumerate() {
        let pairs: Vec<String> = hypothesis
            .pairs()
            .filter(|&(row, col)| row < TRACKS && col < OBSERVATIONS)
            .map(|(row, col)| format!("{row}->{col}"))
            .collect();
        println!(
            "#{rank}: cost {:.3}, detections [{}]",
            hypothesis.cost,
            pairs.join(", ")
        );
    }
}
