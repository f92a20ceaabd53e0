use clap::Parser;
use course_search::api::client::HttpSearchClient;
use course_search::config::{DEFAULT_BASE_URL, SearchConfig};
use course_search::query::executor::{DEFAULT_CACHE_CAPACITY, suggest_subjects};
use course_search::query::types::QueryState;
use course_search::render::view::ResultsView;
use course_search::session::service::SearchSession;
use std::num::{NonZeroU32, NonZeroUsize};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Search courses as you type.
///
/// Every line read from stdin replaces the query text; results appear once typing settles.
/// Commands: /submit, /limit [N], /subject [CODE], /subjects [PREFIX], /clear, /quit.
#[derive(Parser, Debug)]
#[command(name = "course-search", version)]
struct Args {
    /// Base address of the search service.
    #[arg(long, env = "SEARCH_API_URL", default_value = DEFAULT_BASE_URL)]
    api: String,

    /// Quiet time before typed text is searched.
    #[arg(long, env = "SEARCH_DEBOUNCE_MS", default_value_t = 750)]
    debounce_ms: u64,

    #[arg(long, env = "SEARCH_LIMIT")]
    limit: Option<NonZeroU32>,

    #[arg(long, env = "SEARCH_SUBJECT")]
    subject: Option<String>,

    /// Settled searches kept in memory before the oldest is dropped.
    #[arg(long, env = "SEARCH_CACHE_SIZE", default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_size: NonZeroUsize,

    /// Per-request timeout; the transport default applies when unset.
    #[arg(long, env = "SEARCH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> SearchConfig {
        SearchConfig::new(&self.api)
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_limit(self.limit)
            .with_subject_filter(self.subject.clone())
            .with_request_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_cache_capacity(self.cache_size)
    }
}

/// One line of user input.
#[derive(Debug, PartialEq)]
enum Line {
    Query(String),
    Submit,
    Limit(Option<NonZeroU32>),
    Subject(Option<String>),
    Subjects(String),
    Clear,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Line {
    let Some(command) = line.strip_prefix('/') else {
        return Line::Query(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "submit" => Line::Submit,
        "limit" if arg.is_empty() => Line::Limit(None),
        "limit" => match arg.parse::<NonZeroU32>() {
            Ok(limit) => Line::Limit(Some(limit)),
            Err(_) => Line::Invalid(format!("limit must be a positive integer, got {:?}", arg)),
        },
        "subject" if arg.is_empty() => Line::Subject(None),
        "subject" => Line::Subject(Some(arg.to_string())),
        "subjects" => Line::Subjects(arg.to_string()),
        "clear" => Line::Clear,
        "quit" | "exit" => Line::Quit,
        other => Line::Invalid(format!("unknown command /{}", other)),
    }
}

fn print_subjects(session: &SearchSession, prefix: &str) -> anyhow::Result<()> {
    match session.view().subjects {
        QueryState::Success(subjects) => {
            let matches = suggest_subjects(&subjects, prefix);
            if matches.is_empty() {
                println!("No subjects match {:?}", prefix);
            } else {
                println!("{}", matches.join(" "));
            }
        }
        QueryState::Loading => println!("Subjects are still loading"),
        QueryState::Failure(message) => {
            println!("Could not load subjects: {}", message);
            session.load_subjects()?;
        }
        QueryState::Idle => session.load_subjects()?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.config();
    let client = Arc::new(HttpSearchClient::new(&config)?);
    tracing::info!("Using search service at {}", client.base_url());

    let session = SearchSession::spawn(client, &config);

    // Print the results area whenever it changes
    let mut updates = session.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last: Option<ResultsView> = None;
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().results_view();
            if last.as_ref() == Some(&view) {
                continue;
            }
            if view != ResultsView::Nothing {
                println!("{}\n", view);
            }
            last = Some(view);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Line::Query(raw) => session.input(raw)?,
            Line::Submit => session.submit()?,
            Line::Limit(limit) => session.set_limit(limit)?,
            Line::Subject(subject) => session.set_subject_filter(subject)?,
            Line::Subjects(prefix) => print_subjects(&session, &prefix)?,
            Line::Clear => session.input("")?,
            Line::Quit => break,
            Line::Invalid(message) => eprintln!("{}", message),
        }
    }

    session.shutdown().await;
    renderer.abort();

    Ok(())
}
