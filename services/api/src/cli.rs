use crate::demo::{run_demo, run_quiz_score, DemoArgs, QuizScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use stream_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Stream Advisor",
    about = "Recommend an academic stream from aptitude quiz answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score quiz answers offline without storing a result
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Run an end-to-end submission demo against in-memory storage
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Print scores, recommendation and guidance for an answers file
    Score(QuizScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz {
            command: QuizCommand::Score(args),
        } => run_quiz_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
