use anyhow::{Context, Result};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: cheatkeys [--config <path>] [--check <sequence>]";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub check: Option<String>,
}

impl Args {
    /// Parse arguments without the program name.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(args.next().context(USAGE)?.into());
                }
                "--check" => {
                    parsed.check = Some(args.next().context(USAGE)?);
                }
                other => anyhow::bail!("Unknown argument {other}\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}
