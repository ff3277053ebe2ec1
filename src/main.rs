use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mcq_quiz::{
    load_optional_text, load_text, parse_questions_with, Format, JsonFileStore, Mode,
    ParseOptions, Quiz, Submission, SubmissionStore,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const STORE_ENV: &str = "MCQ_QUIZ_STORE";
const DEFAULT_STORE: &str = mcq_quiz::store::DEFAULT_STORE_PATH;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file (the only log output while a quiz is running)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take a quiz in the terminal
    Run(RunArgs),
    /// Print parsed questions as JSON
    Parse(SourceArgs),
    /// List saved submissions
    History {
        #[arg(long, env = STORE_ENV, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Text file with the numbered questions
    #[arg(short, long)]
    questions: PathBuf,

    /// Text file with the answer list (separate format only)
    #[arg(short, long)]
    answers: Option<PathBuf>,

    /// How correct answers are marked in the text
    #[arg(short, long, env = "MCQ_QUIZ_FORMAT", default_value_t = Format::Inline)]
    format: Format,

    /// Fail when the answer list and questions differ in length
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Text file with the numbered questions
    #[arg(short, long, required_unless_present = "resume")]
    questions: Option<PathBuf>,

    /// Text file with the answer list (separate format only)
    #[arg(short, long)]
    answers: Option<PathBuf>,

    /// How correct answers are marked in the text
    #[arg(short, long, env = "MCQ_QUIZ_FORMAT", default_value_t = Format::Inline)]
    format: Format,

    /// Fail when the answer list and questions differ in length
    #[arg(long)]
    strict: bool,

    /// Re-run a previously saved submission by title
    #[arg(long, conflicts_with = "questions")]
    resume: Option<String>,

    /// Title shown on the welcome screen and used as the save key
    #[arg(short, long)]
    title: Option<String>,

    #[arg(short, long, value_enum, default_value_t = ModeArg::Test)]
    mode: ModeArg,

    /// Save the submission to the store before starting
    #[arg(long, requires = "title", conflicts_with = "resume")]
    save: bool,

    #[arg(long, env = STORE_ENV, default_value = DEFAULT_STORE)]
    store: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Test,
    Revision,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Test => Mode::Test,
            ModeArg::Revision => Mode::Revision,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // A running quiz owns the terminal, so stderr logging would corrupt it.
    let interactive = matches!(cli.command, Command::Run(_));
    init_logging(cli.verbose, cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Command::Run(args) => run(args),
        Command::Parse(source) => parse(source),
        Command::History { store } => history(&store),
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            let filter = if interactive { "off" } else { level };
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(filter))
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let quiz = prepare_quiz(&args)?;

    if let Some(scorecard) = quiz.run()? {
        println!(
            "Score: {}/{} ({:.0}%)",
            scorecard.correct,
            scorecard.total,
            scorecard.percentage()
        );
    }
    Ok(())
}

/// Load or resume the quiz, saving it first when asked. The store is only
/// opened for `--resume` and `--save`.
fn prepare_quiz(args: &RunArgs) -> Result<Quiz> {
    let options = ParseOptions {
        strict_alignment: args.strict,
    };

    let quiz = match (&args.resume, &args.questions) {
        (Some(title), _) => {
            let store = JsonFileStore::open(&args.store)?;
            let Some(submission) = store.get(title) else {
                bail!("no saved submission titled '{}' in {}", title, args.store.display());
            };
            info!(title, "resuming saved submission");
            Quiz::from_submission(submission, &options)?
        }
        (None, Some(questions)) => {
            let question_text = load_text(questions)?;
            let answer_text = load_optional_text(args.answers.as_ref())?;
            let quiz = Quiz::from_text_with(&question_text, &answer_text, args.format, &options)?;

            // Saved only after a successful parse.
            if args.save && let Some(title) = &args.title {
                let mut store = JsonFileStore::open(&args.store)?;
                store.save(Submission::new(
                    title.as_str(),
                    question_text,
                    answer_text,
                    args.format,
                ))?;
                info!(title, path = %store.path().display(), "saved submission");
            }
            quiz
        }
        (None, None) => bail!("either --questions or --resume is required"),
    };

    let quiz = match &args.title {
        Some(title) => quiz.with_title(title.as_str()),
        None => quiz,
    };
    Ok(quiz.with_mode(args.mode.into()))
}

fn parse(source: SourceArgs) -> Result<()> {
    let question_text = load_text(&source.questions)?;
    let answer_text = load_optional_text(source.answers.as_ref())?;

    if !source.format.uses_answer_list() && !answer_text.is_empty() {
        warn!(format = %source.format, "answers file is ignored for this format");
    }

    let questions = parse_questions_with(
        &question_text,
        &answer_text,
        source.format,
        &ParseOptions {
            strict_alignment: source.strict,
        },
    )?;
    info!(count = questions.len(), "parsed questions");

    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}

fn history(path: &Path) -> Result<()> {
    let store = JsonFileStore::open(path)?;
    let submissions = store.list();

    if submissions.is_empty() {
        println!("No saved submissions in {}", path.display());
        return Ok(());
    }

    for submission in submissions {
        println!(
            "{}  {:<9} {}",
            submission.saved_at.format("%Y-%m-%d %H:%M"),
            submission.format.as_str(),
            submission.title
        );
    }
    Ok(())
}
