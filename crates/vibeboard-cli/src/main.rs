use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibeboard_core::{InfluencerProfile, Post};
use vibeboard_profiler::{
    filter_posts, format_count, initials, ContentFilter, QualityBadge, RandomSource, RngSource,
};

#[derive(Debug, Parser)]
#[command(name = "vibeboard-cli")]
#[command(about = "Generate sample influencer dashboards from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a generated profile aggregate as JSON
    Generate {
        handle: String,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the profile header: avatar initials, name, and headline counts
    Profile {
        handle: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print derived analytics for a freshly generated profile as JSON
    Analytics {
        handle: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List generated posts, one per line
    Posts {
        handle: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Tag or vibe to keep; "all" keeps everything
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = vibeboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    for line in run(cli.command)? {
        println!("{line}");
    }
    Ok(())
}

fn run(command: Commands) -> anyhow::Result<Vec<String>> {
    match command {
        Commands::Generate { handle, seed } => {
            let aggregate = generate(&handle, seed)?;
            Ok(vec![serde_json::to_string_pretty(&aggregate)?])
        }
        Commands::Profile { handle, seed } => {
            let aggregate = generate(&handle, seed)?;
            Ok(profile_lines(&aggregate))
        }
        Commands::Analytics { handle, seed } => {
            let mut rng = random_source(seed);
            let aggregate = vibeboard_profiler::generate(&handle, rng.as_mut())?;
            let analytics = vibeboard_profiler::compute_analytics_with(&aggregate, rng.as_mut())?;
            Ok(vec![serde_json::to_string_pretty(&analytics)?])
        }
        Commands::Posts {
            handle,
            seed,
            filter,
        } => {
            let aggregate = generate(&handle, seed)?;
            let filter = ContentFilter::parse(filter.as_deref());
            let lines = filter_posts(&aggregate.posts, &filter)
                .into_iter()
                .map(post_line)
                .collect::<Vec<_>>();
            tracing::debug!(handle = %handle, shown = lines.len(), ?filter, "listing posts");
            Ok(lines)
        }
    }
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_entropy()),
    }
}

fn generate(handle: &str, seed: Option<u64>) -> anyhow::Result<InfluencerProfile> {
    let mut rng = random_source(seed);
    Ok(vibeboard_profiler::generate(handle, rng.as_mut())?)
}

fn profile_lines(aggregate: &InfluencerProfile) -> Vec<String> {
    let profile = &aggregate.profile;
    let verified = if profile.verified { " (verified)" } else { "" };
    vec![
        format!(
            "[{}] {} {}{verified}",
            initials(&profile.name),
            profile.name,
            profile.username
        ),
        format!(
            "{} followers  {} following  {} posts",
            format_count(profile.followers),
            format_count(profile.following),
            format_count(profile.posts_count),
        ),
        profile.bio.clone(),
    ]
}

fn post_line(post: &Post) -> String {
    let tags = post
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{:<8} {:<10} {:>6} likes {:>5} comments  {} ({})  {}",
        post.id,
        post.vibe,
        format_count(post.likes),
        format_count(post.comments),
        QualityBadge::for_score(post.quality_score),
        post.quality_score,
        tags,
    )
}
