//! CLI argument definitions using clap.

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Resolve database sections from layered JSON config files
#[derive(Parser, Debug)]
#[command(name = "dbsection")]
#[command(version)]
#[command(about = "Resolve database sections from layered JSON config files", long_about = None)]
pub struct Cli {
    /// Section files, later files overriding earlier ones
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Databases to resolve as `name[@environment]` (every cataloged section when omitted)
    #[arg(last = true, value_parser = parse_request)]
    pub requests: Vec<Request>,
}

/// One `name[@environment]` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub environment: Option<String>,
}

impl Request {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environment: None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.environment {
            Some(env) => write!(f, "{}@{}", self.name, env),
            None => f.write_str(&self.name),
        }
    }
}

fn parse_request(value: &str) -> Result<Request, String> {
    let (name, environment) = match value.split_once('@') {
        Some((_, env)) if env.trim().is_empty() => {
            return Err(format!("missing environment after '@' in '{}'", value))
        }
        Some((name, env)) => (name, Some(env.trim().to_string())),
        None => (value, None),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing database name in '{}'", value));
    }
    Ok(Request {
        name: name.to_string(),
        environment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_and_requests() {
        let cli = Cli::try_parse_from([
            "dbsection",
            "base.json",
            "local.json",
            "--",
            "frontend@prod",
            "db.purple",
        ])
        .unwrap();

        assert_eq!(
            cli.files,
            vec![PathBuf::from("base.json"), PathBuf::from("local.json")]
        );
        assert_eq!(
            cli.requests,
            vec![
                Request {
                    name: "frontend".to_string(),
                    environment: Some("prod".to_string()),
                },
                Request::new("db.purple"),
            ]
        );
    }

    #[test]
    fn test_requests_are_optional() {
        let cli = Cli::try_parse_from(["dbsection", "base.json"]).unwrap();
        assert!(cli.requests.is_empty());
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["dbsection"]).is_err());
        assert!(Cli::try_parse_from(["dbsection", "--", "frontend"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_file() {
        let err = Cli::try_parse_from(["dbsection", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(parse_request("frontend").unwrap(), Request::new("frontend"));
        assert_eq!(
            parse_request("frontend@dev").unwrap().environment.as_deref(),
            Some("dev")
        );
        assert!(parse_request("@prod").is_err());
        assert!(parse_request("frontend@").is_err());
        assert_eq!(parse_request("frontend@dev").unwrap().to_string(), "frontend@dev");
    }
}
