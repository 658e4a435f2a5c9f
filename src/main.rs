use anyhow::Context as _;
use clap::Parser;
use llm_interface::GroqClient;
use reddit_client::RedditClient;
use simulator_core::{AppConfig, Target};
use std::io::Write as _;
use std::path::PathBuf;
use synthesis::{ContextFetcher, PostSynthesizer, TextForm};
use tracing::info;

/// Generate satirical posts in the style of a subreddit or Reddit user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Subreddit or u/username to simulate (default: configured subreddit)
    target: Option<String>,

    /// Path to config file (default: simulator.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print free-form text instead of a parsed title/body post
    #[arg(long)]
    text: bool,

    /// With --text, use the short-form token budget
    #[arg(long, requires = "text")]
    short: bool,

    /// Submit the generated post to Reddit (requires auth credentials)
    #[arg(long)]
    post: bool,

    /// Target subreddit for posting
    #[arg(long, default_value = "circlejerkseattle")]
    subreddit: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Seattle Simulator");

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;

    let reddit = RedditClient::new(config.reddit.clone())?;
    let groq = GroqClient::new(config.completion.clone())?;
    let policy = config.simulator.on_error;

    let fetcher = ContextFetcher::new(&reddit, policy);
    let synthesizer = PostSynthesizer::new(groq, policy);

    let target = Target::parse(
        args.target.as_deref().unwrap_or(""),
        &config.simulator.default_subreddit,
    );

    println!("Fetching {target} activity...");
    let context = fetcher.fetch_context(&target).await?.into_inner();

    println!("Generating satirical post...");
    if args.text {
        let form = if args.short {
            TextForm::Short
        } else {
            TextForm::Long
        };
        let text = synthesizer
            .synthesize_text(&context, &target, form)
            .await?
            .into_inner();
        println!("\n{text}");
        return Ok(());
    }

    let post = synthesizer
        .synthesize_post(&context, &target)
        .await?
        .into_inner();

    let ruler = "=".repeat(60);
    println!("\n{ruler}");
    println!("TITLE: {}", post.title);
    println!("{ruler}");
    println!("{}", post.body);
    println!("{ruler}");

    if args.post {
        print!("\nPost to r/{}? (y/N): ", args.subreddit);
        std::io::stdout().flush()?;
        let mut confirm = String::new();
        std::io::stdin().read_line(&mut confirm)?;
        if confirm.trim().eq_ignore_ascii_case("y") {
            let url = reddit
                .submit_post(&args.subreddit, &post.title, &post.body)
                .await?;
            println!("Posted! {url}");
        } else {
            println!("Cancelled.");
        }
    }

    Ok(())
}
