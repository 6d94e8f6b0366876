//! Fetch command - run a request through the pipeline.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use replaynet_core::{Endpoint, HttpMethod};
use replaynet_http::{ExecutionPipeline, TokenInterceptor, TransportMode, STATUS_HEADER};
use tracing::{debug, warn};

use super::{load_settings, open_store};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// URL to request.
    pub url: String,

    /// HTTP method.
    #[arg(long, short = 'X', value_enum, default_value = "get")]
    pub method: MethodArg,

    /// Extra request header as `name: value`. Repeatable.
    #[arg(long = "header", short = 'H', value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Request body.
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Record the outcome as a fixture.
    #[arg(long, conflicts_with = "replay")]
    pub record: bool,

    /// Answer from fixtures only.
    #[arg(long)]
    pub replay: bool,

    /// Status code the replayed fixture is keyed under.
    #[arg(long, allow_hyphen_values = true, requires = "replay")]
    pub status: Option<i32>,

    /// Send the stored token as a bearer authorization header.
    #[arg(long)]
    pub auth: bool,

    /// Override the configured retry count.
    #[arg(long)]
    pub retries: Option<u32>,
}

impl FetchArgs {
    fn mode(&self) -> Option<TransportMode> {
        if self.record {
            Some(TransportMode::Record)
        } else if self.replay {
            Some(TransportMode::Replay)
        } else {
            None
        }
    }
}

/// HTTP method argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Copy,
    Link,
}

impl From<MethodArg> for HttpMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
            MethodArg::Put => Self::Put,
            MethodArg::Patch => Self::Patch,
            MethodArg::Delete => Self::Delete,
            MethodArg::Head => Self::Head,
            MethodArg::Copy => Self::Copy,
            MethodArg::Link => Self::Link,
        }
    }
}

/// Splits a `name: value` header argument.
fn parse_header(raw: &str) -> Result<(&str, &str)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("Invalid header '{raw}', expected 'name: value'");
    };
    Ok((name.trim(), value.trim()))
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<ExitCode> {
    let mut settings = load_settings(cli).await;
    if let Some(retries) = args.retries {
        settings.max_retries = retries;
    }
    if let Some(mode) = args.mode() {
        settings.mode = mode;
    }

    let mut endpoint = Endpoint::parse(&args.url)?.method(args.method.into());
    if let Some(data) = &args.data {
        endpoint = endpoint.body(data.clone().into_bytes());
    }

    let mut request = endpoint.to_request();
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        request.try_set_header(name, value)?;
    }
    if let Some(status) = args.status {
        request.try_set_header(STATUS_HEADER, &status.to_string())?;
    }

    let pipeline =
        ExecutionPipeline::from_settings(&settings).context("Failed to build pipeline")?;

    // Held for the whole execution so token updates keep reaching the interceptor.
    let _store = if args.auth {
        let store = open_store().await?;
        pipeline.register(TokenInterceptor::new(&store));
        Some(store)
    } else {
        None
    };

    debug!(url = %request.url, mode = %settings.mode, "Starting fetch");

    let mut handle = pipeline.execute(request);
    let delivery = tokio::select! {
        delivery = &mut handle => delivery,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling request");
            handle.cancel();
            handle.await
        }
    };

    let exit = match &delivery {
        Some(Ok(_)) => ExitCode::Success,
        Some(Err(_)) => ExitCode::RequestFailed,
        None => ExitCode::Cancelled,
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            match &delivery {
                Some(Ok(body)) => println!("{}", formatter.format_body(body, cli.pretty)),
                Some(Err(error)) => eprintln!("{}", formatter.format_error(error)),
                None => eprintln!("Request cancelled"),
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_delivery(&args.url, delivery.as_ref())?);
        }
    }

    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("x-id: 7").unwrap(), ("x-id", "7"));
        assert_eq!(
            parse_header("authorization:Bearer a:b").unwrap(),
            ("authorization", "Bearer a:b")
        );
        assert!(parse_header("no-colon").is_err());
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(HttpMethod::from(MethodArg::Link), HttpMethod::Link);
        assert_eq!(HttpMethod::from(MethodArg::Post), HttpMethod::Post);
    }
}
