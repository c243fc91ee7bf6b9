use anyhow::{Context, Result, bail};
use bionic_reader_config::Config;
use bionic_reader_engine::{
    BionicSettings, Markup, NodeId, ReaderSession, RenderTree, TextContainer,
    render::{NodeShape, markers},
};
use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize},
};
use std::{
    env,
    io::{self, Read, Write},
    path::PathBuf,
};

const USAGE: &str = "Usage: bionic-reader [--fixation N] [--saccade N] [--html] [FILE]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    fixation: Option<u8>,
    saccade: Option<u8>,
    html: bool,
    input: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fixation" => parsed.fixation = Some(number(&arg, args.next())?),
                "--saccade" => parsed.saccade = Some(number(&arg, args.next())?),
                "--html" => parsed.html = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
                path => {
                    if parsed.input.is_some() {
                        bail!("Only one input file is supported\n{USAGE}");
                    }
                    parsed.input = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }

    /// Config file values, overridden by whatever was given on the command line.
    fn settings(&self, config: &Config) -> Result<BionicSettings> {
        let fixation = self.fixation.unwrap_or(config.fixation);
        let saccade = self.saccade.unwrap_or(config.saccade);
        Ok(BionicSettings::new(fixation, saccade)?)
    }

    fn session(&self, config: &Config) -> Result<ReaderSession> {
        Ok(ReaderSession::new(self.settings(config)?).with_debounce(config.navigation.debounce_ms))
    }
}

fn number(flag: &str, value: Option<String>) -> Result<u8> {
    let value = value.with_context(|| format!("{flag} needs a value\n{USAGE}"))?;
    value
        .parse()
        .with_context(|| format!("{flag} expects a number between 0 and 255, got {value:?}"))
}

/// One block per non-empty line, shaped like the host's block markup.
fn build_page(text: &str) -> (RenderTree, Vec<NodeId>) {
    let mut tree = RenderTree::new();
    let root = tree.root();
    let blocks = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let block = Markup::span(
                "rm-block-text",
                [Markup::span("", [Markup::text(line)])],
            );
            tree.insert(root, &block)
        })
        .collect();
    (tree, blocks)
}

fn write_terminal(tree: &RenderTree, node: NodeId, bold: bool, out: &mut impl Write) -> Result<()> {
    match tree.shape(node) {
        Some(NodeShape::Text(text)) if bold => {
            queue!(out, PrintStyledContent(text.to_string().bold()))?
        }
        Some(NodeShape::Text(text)) => queue!(out, Print(text))?,
        Some(NodeShape::Element(el)) => {
            let bold = bold || el.tag == markers::BOLD_TAG;
            for child in tree.children(node) {
                write_terminal(tree, child, bold, out)?;
            }
        }
        None => {}
    }
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config_path = Config::config_path();
    let config = match Config::load()? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        None => {
            log::debug!("No config at {}, using defaults", config_path.display());
            Config::default()
        }
    };
    let mut session = args.session(&config)?;

    let text = read_input(args.input.as_ref())?;
    let (mut tree, blocks) = build_page(&text);
    session.toggle_bionic(&mut tree, &blocks);

    let mut out = io::stdout().lock();
    for &block in &blocks {
        if args.html {
            writeln!(out, "{}", tree.to_html(block))?;
        } else {
            write_terminal(&tree, block, false, &mut out)?;
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()?;
    Ok(())
}
