use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mx3::{Mx3Rng, Revision};

#[derive(Clone, Copy, ValueEnum, Debug)]
enum RevisionArg { V1, V2, V3 }
impl From<RevisionArg> for Revision {
    fn from(r: RevisionArg) -> Self { match r { RevisionArg::V1 => Revision::V1, RevisionArg::V2 => Revision::V2, RevisionArg::V3 => Revision::V3 } }
}

/// Stream generator output, e.g. into a statistical test suite.
#[derive(Parser, Debug)]
#[command(name = "mx3rng", about = "Raw mx3 generator output (little-endian words) or hex, one word per line")]
struct Args {
    #[arg(long, default_value_t = 1)] seed: u64,
    #[arg(long, value_enum, default_value_t = RevisionArg::V3)] revision: RevisionArg,
    /// Stop after this many words; runs until stdout closes otherwise.
    #[arg(long)] count: Option<u64>,
    #[arg(long, default_value_t = false)] hex: bool,
}

fn run(args: &Args) -> io::Result<()> {
    let mut rng = Mx3Rng::with_revision(args.revision.into(), args.seed);
    tracing::debug!(seed = args.seed, revision = %rng.revision(), count = ?args.count, "streaming");

    let mut out = BufWriter::new(io::stdout().lock());
    let mut emitted = 0u64;
    while args.count.map_or(true, |c| emitted < c) {
        let x = rng.next_u64();
        if args.hex { writeln!(out, "{x:016x}")?; } else { out.write_all(&x.to_le_bytes())?; }
        emitted += 1;
    }
    out.flush()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        // the consumer hanging up is the normal way an unbounded stream ends
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mx3rng: {e}");
            ExitCode::FAILURE
        }
    }
}
