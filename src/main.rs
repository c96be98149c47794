use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use wavefront::generate::SequencePairOptions;
use wavefront::harness::{thread_ladder, Harness, HarnessConfig, Workload};
use wavefront::kernels::{Daxpy, HeatDiffusion, LennardJones, MatMul, Pi, Schedule, SmithWaterman};
use wavefront::r#const::DEFAULT_SEED;
use wavefront::{available_threads, Scoring, WavefrontAligner};

#[derive(Parser)]
#[command(name = "wavefront")]
#[command(version)]
#[command(about = "Parallel-loop speedup benchmarks and wavefront Smith-Waterman alignment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Smith-Waterman alignment of two generated DNA sequences
    Align(AlignArgs),

    /// Align two given sequences and print the local alignment
    AlignPair(AlignPairArgs),

    /// Vector scale-add x = a*x + y
    Daxpy(SizeArgs),

    /// Dense matrix multiply
    Matmul(MatmulArgs),

    /// Numerical integration of pi
    Pi(SizeArgs),

    /// Lennard-Jones pairwise forces
    Nbody(NbodyArgs),

    /// 2D heat diffusion stencil
    Heat(HeatArgs),
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Highest thread count, the ladder is 1, 2, 4, ... up to it
    #[arg(short = 't', long)]
    max_threads: Option<usize>,
    /// Timed runs per thread count, the fastest is reported
    #[arg(short, long, default_value_t = 1)]
    repetitions: usize,
}

#[derive(Args, Debug)]
struct ScoringArgs {
    #[arg(long = "match", default_value_t = wavefront::r#const::MATCH_SCORE, allow_negative_numbers = true)]
    match_score: i32,
    #[arg(long = "mismatch", default_value_t = wavefront::r#const::MISMATCH_PENALTY, allow_negative_numbers = true)]
    mismatch_penalty: i32,
    #[arg(long = "gap", default_value_t = wavefront::r#const::GAP_PENALTY, allow_negative_numbers = true)]
    gap_penalty: i32,
}

impl From<&ScoringArgs> for Scoring {
    fn from(args: &ScoringArgs) -> Self {
        Scoring::new(args.match_score, args.mismatch_penalty, args.gap_penalty)
    }
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Length of both sequences
    length: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    #[command(flatten)]
    scoring: ScoringArgs,
    #[command(flatten)]
    bench: BenchArgs,
}

#[derive(Args, Debug)]
struct AlignPairArgs {
    seq1: String,
    seq2: String,
    /// Worker threads used for the alignment
    #[arg(short = 't', long, default_value_t = 1)]
    threads: usize,
    #[command(flatten)]
    scoring: ScoringArgs,
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Problem size, the kernel's default when omitted
    size: Option<usize>,
    #[command(flatten)]
    bench: BenchArgs,
}

#[derive(Args, Debug)]
struct MatmulArgs {
    /// Matrix dimension
    #[arg(default_value_t = 1000)]
    n: usize,
    /// Transpose B before multiplying
    #[arg(long)]
    transposed: bool,
    #[command(flatten)]
    bench: BenchArgs,
}

#[derive(Args, Debug)]
struct NbodyArgs {
    /// Number of particles
    #[arg(default_value_t = 1000)]
    particles: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    #[command(flatten)]
    bench: BenchArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScheduleArg {
    Static,
    Dynamic,
    Guided,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Static => Schedule::Static,
            ScheduleArg::Dynamic => Schedule::Dynamic,
            ScheduleArg::Guided => Schedule::Guided,
        }
    }
}

#[derive(Args, Debug)]
struct HeatArgs {
    /// Grid dimension
    #[arg(default_value_t = 500)]
    n: usize,
    /// Row scheduling, every schedule is measured when omitted
    #[arg(long, value_enum)]
    schedule: Option<ScheduleArg>,
    #[command(flatten)]
    bench: BenchArgs,
}

fn harness(bench: &BenchArgs) -> Result<Harness> {
    let max_threads = match bench.max_threads {
        Some(0) => bail!("number of threads must be positive"),
        Some(threads) => threads,
        None => available_threads(),
    };

    let config = HarnessConfig {
        thread_counts: thread_ladder(max_threads),
        repetitions: bench.repetitions,
    };
    Harness::new(config).context("invalid benchmark configuration")
}

fn benchmark<W: Workload>(bench: &BenchArgs, workload: W) -> Result<()> {
    if workload.problem_size() == 0 {
        bail!("problem size must be positive");
    }
    let report = harness(bench)?
        .run(&workload)
        .with_context(|| format!("{} failed", workload.name()))?;
    println!("{report}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Align(args) => {
            let options = SequencePairOptions {
                seed: args.seed,
                length: args.length,
                ..Default::default()
            };
            let workload = SmithWaterman::generated(&options, (&args.scoring).into());
            benchmark(&args.bench, workload)?;
        }
        Commands::AlignPair(args) => {
            let scoring = Scoring::from(&args.scoring);
            let aligner = WavefrontAligner::new(scoring, args.threads)
                .context("failed to create aligner")?;
            let alignment = aligner.align_with_matrix(&args.seq1, &args.seq2)?;

            println!("Score: {}", alignment.score);
            match alignment
                .matrix
                .traceback(args.seq1.as_bytes(), args.seq2.as_bytes(), scoring)?
            {
                Some(local) => println!("{local}"),
                None => println!("No local alignment scores above zero"),
            }
        }
        Commands::Daxpy(args) => {
            let defaults = Daxpy::default();
            let workload = Daxpy {
                len: args.size.unwrap_or(defaults.len),
                ..defaults
            };
            benchmark(&args.bench, workload)?;
        }
        Commands::Matmul(args) => {
            let workload = MatMul {
                n: args.n,
                transposed: args.transposed,
            };
            benchmark(&args.bench, workload)?;
        }
        Commands::Pi(args) => {
            let num_steps = args.size.map_or(Pi::default().num_steps, |s| s as u64);
            let workload = Pi { num_steps };
            benchmark(&args.bench, workload)?;
        }
        Commands::Nbody(args) => {
            let workload = LennardJones {
                particles: args.particles,
                seed: args.seed,
            };
            benchmark(&args.bench, workload)?;
        }
        Commands::Heat(args) => {
            let schedules = match args.schedule {
                Some(schedule) => vec![schedule.into()],
                None => Schedule::ALL.to_vec(),
            };
            for schedule in schedules {
                let workload = HeatDiffusion {
                    n: args.n,
                    schedule,
                    ..Default::default()
                };
                benchmark(&args.bench, workload)?;
                println!();
            }
        }
    }
    Ok(())
}
