use std::fs;
use std::hash::Hasher;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mx3::par::hash_all_with;
use mx3::{Mx3Hasher, Revision};

#[derive(Clone, Copy, ValueEnum, Debug)]
enum RevisionArg { V1, V2, V3 }
impl From<RevisionArg> for Revision {
    fn from(r: RevisionArg) -> Self { match r { RevisionArg::V1 => Revision::V1, RevisionArg::V2 => Revision::V2, RevisionArg::V3 => Revision::V3 } }
}

/// Print the mx3 digest of each file (or of stdin).
#[derive(Parser, Debug)]
#[command(name = "mx3sum", about = "Seeded mx3 digests of files or stdin (not cryptographic)")]
struct Args {
    files: Vec<PathBuf>,
    #[arg(long, default_value_t = 0)] seed: u64,
    #[arg(long, value_enum, default_value_t = RevisionArg::V3)] revision: RevisionArg,
    /// One JSON record per line instead of `digest  path`.
    #[arg(long, default_value_t = false)] json: bool,
    /// Hash stdin incrementally; the digest then differs from the one-shot digest of the same bytes.
    #[arg(long, default_value_t = false)] stream: bool,
    #[arg(long, default_value_t = 1)] threads: usize,
}

#[derive(Serialize)]
struct DigestRecord<'a> {
    path: &'a str,
    length: u64,
    seed: u64,
    revision: Revision,
    digest: String,
}

fn stream_stdin(revision: Revision, seed: u64) -> io::Result<(u64, u64)> {
    let mut hasher = Mx3Hasher::with_revision(revision, seed);
    let mut buf = [0u8; 4096];
    let mut stdin = io::stdin().lock();
    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 { break; }
        hasher.write(&buf[..n]);
    }
    Ok((hasher.written(), hasher.finish()))
}

fn run(args: &Args) -> io::Result<()> {
    let revision: Revision = args.revision.into();

    let mut rows: Vec<(String, u64, u64)> = Vec::new();
    if args.files.is_empty() {
        let (len, digest) = if args.stream {
            stream_stdin(revision, args.seed)?
        } else {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            (data.len() as u64, revision.hash(&data, args.seed))
        };
        rows.push(("-".to_string(), len, digest));
    } else {
        let mut bufs: Vec<Vec<u8>> = Vec::with_capacity(args.files.len());
        for path in &args.files {
            let data = fs::read(path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
            tracing::debug!(path = %path.display(), bytes = data.len(), "read input");
            bufs.push(data);
        }
        let digests = hash_all_with(revision, &bufs, args.seed, args.threads);
        for ((path, buf), digest) in args.files.iter().zip(&bufs).zip(digests) {
            rows.push((path.display().to_string(), buf.len() as u64, digest));
        }
    }

    let mut out = io::stdout().lock();
    for (path, length, digest) in &rows {
        if args.json {
            let rec = DigestRecord { path, length: *length, seed: args.seed, revision, digest: format!("{digest:016x}") };
            let line = serde_json::to_string(&rec).map_err(io::Error::other)?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{digest:016x}  {path}")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mx3sum: {e}");
            ExitCode::FAILURE
        }
    }
}
