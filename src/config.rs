// src/config.rs
use crate::constants::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
    HIDDEN_CATEGORIES_MARKER, USER_AGENT_ENV,
};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::resolver::{MemberQuery, Recurse};
use crate::types::{ApiEndpoint, Category, Namespace, UserAgent};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// What to report about the category.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// List members in every allowed namespace
    #[default]
    Members,
    /// List subcategories only
    Subcategories,
    /// List non-category members only
    Articles,
    /// Show page, file and subcategory counts
    Info,
    /// Report whether the category has no members
    Empty,
    /// Report whether the category is hidden
    Hidden,
}

impl Action {
    pub fn is_listing(self) -> bool {
        matches!(
            self,
            Action::Members | Action::Subcategories | Action::Articles
        )
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One title per line
    #[default]
    Plain,
    Json,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Category title, with or without the "Category:" prefix
    pub category: String,

    #[arg(value_enum, default_value_t = Action::Members)]
    pub action: Action,

    /// Descend this many levels into subcategories (0 = direct members only)
    #[arg(short, long, allow_negative_numbers = true)]
    pub recurse: Option<i64>,

    /// Descend into subcategories without a depth limit
    #[arg(long, default_value_t = false)]
    pub recurse_all: bool,

    /// Only list members in this namespace id (repeatable)
    #[arg(short = 'n', long = "namespace")]
    pub namespaces: Vec<i32>,

    /// Stop after this many results
    #[arg(short, long, allow_negative_numbers = true)]
    pub total: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// MediaWiki api.php endpoint (falls back to WIKICAT_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// User-Agent sent with every request (falls back to WIKICAT_USER_AGENT)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Tracking category that hidden categories belong to
    #[arg(long, default_value = HIDDEN_CATEGORIES_MARKER)]
    pub hidden_marker: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Fail on the first transient API error instead of backing off
    #[arg(long, default_value_t = false)]
    pub no_retry: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved configuration, validated and ready to drive one run.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub category: Category,
    pub action: Action,
    pub query: MemberQuery,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub api_url: ApiEndpoint,
    pub user_agent: UserAgent,
    pub hidden_marker: Category,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub verbose: bool,
}

impl ResolverConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_url = cli
            .api_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let user_agent = cli
            .user_agent
            .or_else(|| std::env::var(USER_AGENT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let recurse = match (cli.recurse, cli.recurse_all) {
            (Some(_), true) => {
                return Err(AppError::InvalidArgument(
                    "--recurse and --recurse-all cannot be combined".to_string(),
                ))
            }
            (Some(depth), false) => Recurse::from_depth(depth)?,
            (None, all) => Recurse::from(all),
        };

        let mut query = MemberQuery::new().recurse(recurse);
        for id in cli.namespaces {
            query = query.namespace(Namespace::new(id));
        }
        if let Some(total) = cli.total {
            query = query.checked_total(total)?;
        }

        if cli.timeout_secs == 0 {
            return Err(AppError::InvalidArgument(
                "--timeout-secs must be at least 1".to_string(),
            ));
        }

        Ok(ResolverConfig {
            category: Category::new(&cli.category)?,
            action: cli.action,
            query,
            format: cli.format,
            output_file: cli.output.map(PathBuf::from),
            api_url: ApiEndpoint::parse(&api_url)?,
            user_agent: UserAgent::new(user_agent)?,
            hidden_marker: Category::new(&cli.hidden_marker)?,
            timeout: Duration::from_secs(cli.timeout_secs),
            retry: if cli.no_retry {
                RetryPolicy::none()
            } else {
                RetryPolicy::default()
            },
            verbose: cli.verbose,
        })
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            category: Category::new("Wikipedia categories")
                .expect("Default category title should be valid"),
            action: Action::default(),
            query: MemberQuery::default(),
            format: OutputFormat::default(),
            output_file: None,
            api_url: ApiEndpoint::parse(DEFAULT_API_URL)
                .expect("Default API URL should be valid"),
            user_agent: UserAgent::new(DEFAULT_USER_AGENT)
                .expect("Default user agent should be valid"),
            hidden_marker: Category::new(HIDDEN_CATEGORIES_MARKER)
                .expect("Default hidden marker should be valid"),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["wikicat"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    fn resolve(args: &[&str]) -> Result<ResolverConfig, AppError> {
        let mut cli = parse(args);
        // Keep tests independent of the caller's environment.
        cli.api_url.get_or_insert_with(|| DEFAULT_API_URL.to_string());
        cli.user_agent
            .get_or_insert_with(|| DEFAULT_USER_AGENT.to_string());
        ResolverConfig::resolve(cli)
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&["Wikipedia legal policies"]).unwrap();
        assert_eq!(config.category.title(), "Category:Wikipedia legal policies");
        assert_eq!(config.action, Action::Members);
        assert_eq!(config.query, MemberQuery::new());
        assert_eq!(config.format, OutputFormat::Plain);
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.hidden_marker.title(), HIDDEN_CATEGORIES_MARKER);
        assert_eq!(config.timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_listing_options() {
        let config = resolve(&[
            "Category:Foo",
            "articles",
            "-r",
            "2",
            "-n",
            "0",
            "-n",
            "4",
            "-t",
            "10",
            "--format",
            "json",
        ])
        .unwrap();
        let expected = MemberQuery::new()
            .recurse(Recurse::Depth(2))
            .namespace(Namespace::MAIN)
            .namespace(Namespace::PROJECT)
            .total(10);
        assert_eq!(config.action, Action::Articles);
        assert_eq!(config.query, expected);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_recurse_all() {
        let config = resolve(&["Foo", "subcategories", "--recurse-all"]).unwrap();
        assert_eq!(config.query.recursion(), Recurse::Unbounded);
    }

    #[test]
    fn test_rejects_negative_numbers() {
        assert!(matches!(
            resolve(&["Foo", "-r", "-1"]),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve(&["Foo", "-t", "-5"]),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_conflicting_recursion() {
        assert!(matches!(
            resolve(&["Foo", "-r", "1", "--recurse-all"]),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_non_category_titles() {
        assert!(matches!(
            resolve(&["Talk:Foo"]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve(&["Foo", "--hidden-marker", "Template:Hidden"]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(matches!(
            resolve(&["Foo", "--api-url", "ftp://example.org/api.php"]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_no_retry_makes_one_attempt() {
        let config = resolve(&["Foo", "--no-retry"]).unwrap();
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_action_kinds() {
        assert!(Action::Articles.is_listing());
        assert!(!Action::Info.is_listing());
    }
}
