use sigil::observer::SegmentAdapter;
use sigil::prelude::*;
use tracing::info;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }
    if args.len() >= 2 && args[1] == "classical-demo" {
        run_classical_demo();
        return;
    }

    if args.len() >= 2 {
        eprintln!("Unknown command: {}", args[1]);
        print_help();
        std::process::exit(2);
    }

    // Minimal demo:
    // - one segment, six units on the spiral
    // - joint state bound at spawn time
    // - collapse runs collection, relabeling, amplification, composition

    let cfg = SegmentConfig::default()
        .with_seed(7)
        .with_tier(ExecutionTier::Parallel);

    let mut segment = match Segment::new(0, 0, cfg) {
        Ok(segment) => segment,
        Err(err) => {
            eprintln!("config rejected: {err}");
            std::process::exit(2);
        }
    };

    segment.spawn_units(6);

    match segment.collapse("demo-token") {
        Ok(seal) => {
            let snap = SegmentAdapter::new(&segment).snapshot();
            info!(
                units = snap.unit_count,
                outcomes = snap.retained_outcomes,
                dominant = snap.dominant_outcome.as_deref().unwrap_or("-"),
                "segment collapsed"
            );
            println!("{seal}");

            #[cfg(feature = "serde")]
            dump_readings(&segment);
        }
        Err(err) => {
            eprintln!("collapse failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Same pipeline with the simulator disabled: the seal carries the
/// classical marker instead of a quantum sign.
fn run_classical_demo() {
    let cfg = SegmentConfig::default().with_seed(7);

    let mut segment = match Segment::new(1, 6, cfg) {
        Ok(segment) => segment,
        Err(err) => {
            eprintln!("config rejected: {err}");
            std::process::exit(2);
        }
    };

    segment.set_entangler(Entangler::Disabled);
    segment.spawn_units(4);

    match segment.collapse("demo-token") {
        Ok(seal) => println!("{seal}"),
        Err(err) => {
            eprintln!("collapse failed: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "serde")]
fn dump_readings(segment: &Segment) {
    match serde_json::to_string_pretty(segment.last_readings()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("reading dump failed: {err}"),
    }
}

fn print_help() {
    println!("sigil (segment aggregation pipeline demo)");
    println!("usage:");
    println!("  cargo run");
    println!("  cargo run -- classical-demo");
    println!("  cargo run -- --help");
}
