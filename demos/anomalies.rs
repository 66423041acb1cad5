use roadster_sim::{compute_position, true_to_mean_anomaly};
use roadster_sim::types::{AU_KM, KM_PER_UNIT};

fn main() {
    // Tesla Roadster heliocentric orbit (approximate, 2018)
    let (a, e, i, raan, argp) = (1.3254, 0.2560, 1.0777, 317.0, 177.5);

    println!("=== One revolution, 30 deg steps ===\n");
    println!(
        "{:>8}  {:>8}  {:>8}  {:>12}  {:>12}  {:>12}",
        "nu", "M", "r (AU)", "x (tkm)", "y (tkm)", "z (tkm)"
    );
    for step in 0..12 {
        let nu = step as f64 * 30.0;
        let p = compute_position(a, e, i, raan, argp, nu);
        println!(
            "{:>8.1}  {:>8.2}  {:>8.4}  {:>12.1}  {:>12.1}  {:>12.1}",
            nu,
            true_to_mean_anomaly(nu, e),
            p.norm() * KM_PER_UNIT / AU_KM,
            p.x,
            p.y,
            p.z,
        );
    }

    println!();
    println!("Perihelion: {:.4} AU   Aphelion: {:.4} AU", a * (1.0 - e), a * (1.0 + e));
}
