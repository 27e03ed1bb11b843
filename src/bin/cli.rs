//! coursereg CLI Client
//!
//! Command-line interface for the course-registration service.

use clap::{Parser, Subcommand};
use coursereg::config::{DEFAULT_HOST, DEFAULT_PORT};
use coursereg::{ClientError, Config, ProtocolClient, RegistrationForm};
use tracing_subscriber::{fmt, EnvFilter};

/// coursereg CLI
#[derive(Parser, Debug)]
#[command(name = "coursereg-cli")]
#[command(about = "List offered courses and register for one")]
#[command(version)]
struct Args {
    /// Service host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Service port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Connect/read/write timeout in milliseconds (0 waits forever)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the courses offered for a term
    Courses {
        /// Term (e.g. Hiver, Ete, Automne)
        term: String,
    },

    /// Register for a course offered in a term
    Register {
        /// Term the course is offered in
        #[arg(long)]
        term: String,

        /// Course code (e.g. IFT1015)
        #[arg(long)]
        course: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        student_id: String,
    },
}

fn main() {
    // Logs go to stderr; stdout carries the results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,coursereg=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .timeouts_ms(args.timeout_ms)
        .build();

    tracing::info!("coursereg CLI v{}", coursereg::VERSION);
    tracing::info!("Service address: {}", config.addr());

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> coursereg::Result<()> {
    let client = ProtocolClient::new(config)?;

    match command {
        Commands::Courses { term } => {
            for course in client.load_courses(&term)? {
                println!("{}", course);
            }
        }
        Commands::Register {
            term,
            course,
            first_name,
            last_name,
            email,
            student_id,
        } => {
            // The form must reference a course the service actually offers
            let offered = client.load_courses(&term)?;
            let selected = offered
                .into_iter()
                .find(|c| c.code == course)
                .ok_or_else(|| {
                    ClientError::InvalidForm(format!("{} is not offered in {}", course, term))
                })?;

            let form = RegistrationForm::new(first_name, last_name, email, student_id, selected)?;
            println!("{}", client.register(&form)?);
        }
    }

    Ok(())
}
