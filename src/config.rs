//! Node Configuration
//!
//! Built from defaults, then environment variables, then command-line flags
//! (flags win). Worker addresses are fixed here; there is no discovery.

use crate::corpus::types::Platform;
use crate::dispatch::dispatcher::DEFAULT_DISPATCH_TIMEOUT;

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_BIND: &str = "SENTIMENT_BIND";
pub const ENV_CORPUS: &str = "SENTIMENT_CORPUS";
pub const ENV_DISPATCH_TIMEOUT_SECS: &str = "SENTIMENT_DISPATCH_TIMEOUT_SECS";

pub const USAGE: &str = "\
Usage: sentiment_cluster [--role coordinator|worker] [--bind <addr:port>]
                         [--corpus <path>] [--lexicon <path>] [--timeout <secs>]
                         [--worker <platform>=<url>]... [--local <platform>]...
Example: sentiment_cluster --role worker --bind 0.0.0.0:5001
Example: sentiment_cluster --corpus comments.json --worker twitter=http://10.0.0.2:5001";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Owns the corpus, runs the pipeline and the job coordinator.
    Coordinator,
    /// Analyzes partitions sent by a coordinator.
    Worker,
}

impl FromStr for NodeRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "coordinator" => Ok(NodeRole::Coordinator),
            "worker" => Ok(NodeRole::Worker),
            other => Err(anyhow!("Unknown role: {} (expected coordinator or worker)", other)),
        }
    }
}

/// Where a platform's partition gets analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionTarget {
    Local,
    /// Base URL of a worker node, e.g. `http://10.0.0.2:5001`.
    Remote(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub platform: Platform,
    pub target: PartitionTarget,
}

impl WorkerAssignment {
    pub fn local(platform: Platform) -> Self {
        Self {
            platform,
            target: PartitionTarget::Local,
        }
    }

    pub fn remote(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            target: PartitionTarget::Remote(url.into().trim_end_matches('/').to_string()),
        }
    }
}

/// Base URLs of the remote workers among `assignments`, in assignment order.
pub fn worker_urls(assignments: &[WorkerAssignment]) -> Vec<String> {
    assignments
        .iter()
        .filter_map(|assignment| match &assignment.target {
            PartitionTarget::Remote(url) => Some(url.clone()),
            PartitionTarget::Local => None,
        })
        .collect()
}

/// The three-node layout: instagram stays on the coordinator, twitter and facebook
/// go to one worker each. The order here is the merge order.
pub fn default_assignments() -> Vec<WorkerAssignment> {
    vec![
        WorkerAssignment::local(Platform::Instagram),
        WorkerAssignment::remote(Platform::Twitter, "http://127.0.0.1:5001"),
        WorkerAssignment::remote(Platform::Facebook, "http://127.0.0.1:5002"),
    ]
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub role: NodeRole,
    pub bind_addr: SocketAddr,
    pub corpus_path: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub assignments: Vec<WorkerAssignment>,
    pub dispatch_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            role: NodeRole::Coordinator,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            corpus_path: PathBuf::from("comments.json"),
            lexicon_path: None,
            assignments: default_assignments(),
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }
}

impl NodeConfig {
    /// Defaults, overridden by the process environment, overridden by `args`.
    ///
    /// `args` is the full argument vector, program name included.
    pub fn load(args: &[String]) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_BIND, bind))?;
        }
        if let Some(corpus) = lookup(ENV_CORPUS) {
            self.corpus_path = PathBuf::from(corpus);
        }
        if let Some(secs) = lookup(ENV_DISPATCH_TIMEOUT_SECS) {
            self.dispatch_timeout = parse_timeout(&secs)
                .with_context(|| format!("Invalid {}", ENV_DISPATCH_TIMEOUT_SECS))?;
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .map(String::as_str)
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };

            match flag {
                "--bind" => {
                    self.bind_addr = value()?.parse().context("Invalid --bind address")?;
                }
                "--role" => {
                    self.role = value()?.parse()?;
                }
                "--corpus" => {
                    self.corpus_path = PathBuf::from(value()?);
                }
                "--lexicon" => {
                    self.lexicon_path = Some(PathBuf::from(value()?));
                }
                "--timeout" => {
                    self.dispatch_timeout = parse_timeout(value()?)?;
                }
                "--worker" => {
                    let pair = value()?;
                    let (platform, url) = pair
                        .split_once('=')
                        .ok_or_else(|| anyhow!("Expected <platform>=<url>, got {}", pair))?;
                    self.assign(WorkerAssignment::remote(platform.parse()?, url));
                }
                "--local" => {
                    self.assign(WorkerAssignment::local(value()?.parse()?));
                }
                _ => {
                    tracing::warn!("Ignoring unknown argument: {}", flag);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }
        Ok(())
    }

    /// Replaces the assignment for the platform in place, or appends a new one.
    fn assign(&mut self, assignment: WorkerAssignment) {
        match self
            .assignments
            .iter_mut()
            .find(|existing| existing.platform == assignment.platform)
        {
            Some(existing) => *existing = assignment,
            None => self.assignments.push(assignment),
        }
    }

}

fn parse_timeout(secs: &str) -> Result<Duration> {
    let secs: f64 = secs
        .parse()
        .with_context(|| format!("Invalid timeout: {}", secs))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(anyhow!("Timeout must be a positive number of seconds"));
    }
    Duration::try_from_secs_f64(secs).with_context(|| format!("Timeout out of range: {}", secs))
}
