// src/main.rs

use anyhow::Context;
use clap::Parser;
use futures::TryStreamExt;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::sync::Arc;
use wikicat::{
    deliver, ensure_delivered, render, Action, AppError, CommandLineInput, MembershipResolver,
    OutputPlan, OutputReport, Outcome, PageRef, PaginatedFetcher, ResolverConfig, WikiHttpClient,
    LOG_FILE_NAME,
};

/// Sets up logging configuration.
///
/// Log lines go to stderr so listings on stdout stay pipeable.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("cannot open log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )
        .context("invalid logging configuration")?;

    log4rs::init_config(config).context("logger already initialized")?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Answers one question about one category and writes the answer out.
struct CategoryReport<'a> {
    config: &'a ResolverConfig,
    resolver: MembershipResolver,
}

impl<'a> CategoryReport<'a> {
    fn new(config: &'a ResolverConfig) -> Result<Self, AppError> {
        let client = WikiHttpClient::new(
            config.api_url.clone(),
            &config.user_agent,
            config.timeout,
        )?
        .with_retry_policy(config.retry);
        let fetcher: Arc<dyn PaginatedFetcher> = Arc::new(client);
        let resolver =
            MembershipResolver::new(fetcher).with_hidden_marker(config.hidden_marker.clone());

        Ok(Self { config, resolver })
    }

    async fn resolve(&self) -> Result<Outcome, AppError> {
        let category = &self.config.category;
        let query = self.config.query.clone();
        log::info!(
            "{:?} of {} via {}",
            self.config.action,
            category,
            self.config.api_url
        );

        let outcome = match self.config.action {
            Action::Members => {
                Outcome::Listing(self.resolver.collect_members(category, query).await?)
            }
            Action::Articles => {
                Outcome::Listing(self.resolver.collect_articles(category, query).await?)
            }
            Action::Subcategories => {
                let pages: Vec<PageRef> = self
                    .resolver
                    .subcategories(category, query.recursion(), query.total_cap())
                    .map_ok(PageRef::from)
                    .try_collect()
                    .await?;
                Outcome::Listing(pages)
            }
            Action::Info => Outcome::Info(self.resolver.category_info(category).await?),
            Action::Empty => Outcome::Empty(self.resolver.is_empty_category(category).await?),
            Action::Hidden => Outcome::Hidden(self.resolver.is_hidden_category(category).await?),
        };

        if let Outcome::Listing(pages) = &outcome {
            log::info!("Resolved {} pages under {}", pages.len(), category);
        }
        Ok(outcome)
    }

    fn deliver(&self, outcome: &Outcome) -> Result<OutputReport, AppError> {
        let content = render(&self.config.category, outcome, self.config.format)?;
        let plan = OutputPlan::to_file_or_stdout(self.config.output_file.clone(), content);
        ensure_delivered(deliver(plan))
    }
}

async fn run(config: &ResolverConfig) -> Result<(), AppError> {
    let report = CategoryReport::new(config)?;
    let outcome = report.resolve().await?;
    let delivered = report.deliver(&outcome)?;

    if let Some(path) = &config.output_file {
        eprintln!(
            "✓ Wrote {} bytes to {}",
            delivered.bytes_written,
            path.display()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ResolverConfig::resolve(cli)?;
    let shapes_listing =
        config.query.total_cap().is_some() || config.query.recursion().can_descend();
    if !config.action.is_listing() && shapes_listing {
        log::warn!("--recurse and --total only apply to listings; ignoring them");
    }

    run(&config).await
}
