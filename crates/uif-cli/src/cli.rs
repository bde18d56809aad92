use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "uif")]
#[command(about = "Resolve custom-tag components in HTML pages")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a page, instantiate its components and print the result
    Render {
        /// HTML page to load
        page: PathBuf,

        /// Directory holding component resources
        #[arg(long, short)]
        components: Option<PathBuf>,

        /// Base URL holding component resources
        #[arg(long, conflicts_with = "components")]
        url: Option<String>,

        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from(["uif", "render", "index.html", "-c", "parts", "--pretty"]).unwrap();
        let Command::Render {
            page,
            components,
            url,
            pretty,
        } = cli.command;
        assert_eq!(page, PathBuf::from("index.html"));
        assert_eq!(components, Some(PathBuf::from("parts")));
        assert_eq!(url, None);
        assert!(pretty);
    }

    #[test]
    fn test_url_conflicts_with_components() {
        let result = Cli::try_parse_from(["uif", "render", "a.html", "-c", "x", "--url", "http://h/"]);
        assert!(result.is_err());
    }
}
