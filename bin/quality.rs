use std::io;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mx3::quality::{avalanche, bit_balance, AvalancheReport};
use mx3::{Mx3Rng, Revision};

#[derive(Clone, Copy, ValueEnum, Debug)]
enum RevisionArg { V1, V2, V3 }
impl From<RevisionArg> for Revision {
    fn from(r: RevisionArg) -> Self { match r { RevisionArg::V1 => Revision::V1, RevisionArg::V2 => Revision::V2, RevisionArg::V3 => Revision::V3 } }
}

#[derive(Parser, Debug)]
#[command(name = "mx3-quality", about = "Avalanche and bit-balance report for the mx3 mixer, hash and generator")]
struct Args {
    #[arg(long, default_value_t = 10_000)] samples: usize,
    #[arg(long, default_value_t = 42)] seed: u64,
    #[arg(long, value_enum, default_value_t = RevisionArg::V3)] revision: RevisionArg,
    #[arg(long, default_value_t = 5.0)] z: f64,
    #[arg(long, default_value_t = false)] json: bool,
}

#[derive(Serialize)]
struct Row {
    target: &'static str,
    #[serde(flatten)]
    report: AvalancheReport,
}

#[derive(Serialize)]
struct Report {
    revision: Revision,
    seed: u64,
    avalanche: Vec<Row>,
    rng_max_bit_deviation: f64,
    rng_unbiased: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let revision: Revision = args.revision.into();
    let n = args.samples.max(1);

    let t0 = Instant::now();
    let rows = vec![
        Row { target: "mix", report: avalanche(n, args.seed, |x| revision.mix(x)) },
        Row { target: "hash(word)", report: avalanche(n, args.seed, |x| revision.hash(&x.to_le_bytes(), 0)) },
        Row { target: "hash(seed)", report: avalanche(n, args.seed, |s| revision.hash(b"mx3", s)) },
        Row {
            target: "rng(seed)",
            report: avalanche(n, args.seed, |s| Mx3Rng::with_revision(revision, s).next_u64()),
        },
    ];

    let mut rng = Mx3Rng::with_revision(revision, args.seed);
    let balance = bit_balance((0..n * 64).map(|_| rng.next_u64()));
    tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "measured");

    let report = Report {
        revision,
        seed: args.seed,
        avalanche: rows,
        rng_max_bit_deviation: balance.max_deviation(),
        rng_unbiased: balance.is_unbiased(args.z),
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("mx3-quality: {e}"),
        }
        return;
    }

    println!("revision {}  samples {}  seed {}", report.revision, n, report.seed);
    println!("{:<12} {:>10} {:>11}", "target", "mean_flips", "worst_bias");
    for r in &report.avalanche {
        println!("{:<12} {:>10.3} {:>11.4}", r.target, r.report.mean_flips, r.report.worst_bias);
    }
    println!(
        "rng bit balance over {} draws: max deviation {:.5} ({})",
        n * 64,
        report.rng_max_bit_deviation,
        if report.rng_unbiased { "ok" } else { "BIASED" }
    );
}
