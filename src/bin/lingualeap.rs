//! lingualeap: command-line front end for the writing flows
//!
//! Usage:
//!   lingualeap grammar <text>                  Correct grammar and spelling
//!   lingualeap clarity <text>                  Feedback on clarity and coherence
//!   lingualeap enhance <text>                  Enhance each sentence
//!   lingualeap passage [LEVEL]                 Show the reading passage for a CEFR level
//!   lingualeap highlight <original> <corrected>  Mark corrected words

use anyhow::{bail, Context};
use lingualeap::flows::clarity::{analyze_clarity_and_coherence, ClarityFeedbackInput};
use lingualeap::flows::enhance::enhance_text;
use lingualeap::flows::grammar::{grammar_and_spelling_check, GrammarCheckInput};
use lingualeap::text::{has_corrections, highlight_changes, label};
use lingualeap::{reading, AiClient, CefrLevel, ClientConfig};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "grammar" => cmd_grammar(&args[2..]).await,
        "clarity" => cmd_clarity(&args[2..]).await,
        "enhance" => cmd_enhance(&args[2..]).await,
        "passage" => cmd_passage(&args[2..]),
        "highlight" => cmd_highlight(&args[2..]),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lingualeap=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    println!(
        r#"lingualeap: writing practice for English learners

USAGE:
    lingualeap <COMMAND> [ARGS]

COMMANDS:
    grammar <text>                  Correct grammar and spelling
    clarity <text>                  Feedback on clarity and coherence
    enhance <text>                  Enhance each sentence of the text
    passage [LEVEL]                 Show the reading passage for A1..C2 (default B2)
    highlight <original> <corrected>
                                    Mark words of the correction not in the original
    version                         Show version information
    help                            Show this help message

    Text arguments are joined with spaces; with none, text is read from stdin.

ENVIRONMENT:
    LINGUALEAP_CONFIG               YAML configuration file
    LINGUALEAP_PROVIDER             gemini | openai
    LINGUALEAP_MODEL                Model name
    LINGUALEAP_BASE_URL             Endpoint base URL
    LINGUALEAP_TIMEOUT_SECS         Request timeout in seconds
    LINGUALEAP_MAX_RETRIES          Retries on transient failures (default 0)
    LINGUALEAP_API_KEY              API key (or GEMINI_API_KEY / OPENAI_API_KEY)
    LINGUALEAP_PROXY_URL            Proxy for all requests
    RUST_LOG                        Log filter (default lingualeap=info)"#
    );
}

fn cmd_version() {
    println!("lingualeap {}", env!("CARGO_PKG_VERSION"));
}

fn client() -> anyhow::Result<AiClient> {
    let mut config = match std::env::var("LINGUALEAP_CONFIG") {
        Ok(path) if !path.trim().is_empty() => ClientConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        _ => ClientConfig::default(),
    };
    config.apply_env()?;
    Ok(AiClient::from_config(&config)?)
}

fn input_text(args: &[String]) -> anyhow::Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading text from stdin")?;
    Ok(buf.trim_end_matches(['\n', '\r']).to_string())
}

async fn cmd_grammar(args: &[String]) -> anyhow::Result<()> {
    let text = input_text(args)?;
    let client = client()?;
    let out = grammar_and_spelling_check(&client, &GrammarCheckInput { text: text.clone() }).await?;
    println!("{}", out.corrected_text);
    if has_corrections(&text, &out.corrected_text) {
        print_highlighted(&text, &out.corrected_text);
    }
    Ok(())
}

async fn cmd_clarity(args: &[String]) -> anyhow::Result<()> {
    let text = input_text(args)?;
    let client = client()?;
    let out = analyze_clarity_and_coherence(&client, &ClarityFeedbackInput { text }).await?;
    println!("{}", out.feedback);
    Ok(())
}

async fn cmd_enhance(args: &[String]) -> anyhow::Result<()> {
    let text = input_text(args)?;
    let client = client()?;
    let results = enhance_text(&client, &text).await?;
    if results.is_empty() {
        bail!("no sentences to enhance");
    }
    for (i, r) in results.iter().enumerate() {
        println!("{}: {}", label(i), r.enhanced_sentence);
        println!("    {}", r.explanation);
    }
    Ok(())
}

fn cmd_passage(args: &[String]) -> anyhow::Result<()> {
    let level = match args.first() {
        Some(raw) => raw.parse::<CefrLevel>()?,
        None => CefrLevel::default(),
    };
    let p = reading::passage(level);
    println!("Challenge Article ({}): {}", p.level, p.title);
    println!();
    println!("{}", p.excerpt);
    Ok(())
}

fn cmd_highlight(args: &[String]) -> anyhow::Result<()> {
    let (original, corrected) = match args {
        [original, corrected] => (original, corrected),
        _ => bail!("highlight takes exactly two arguments: <original> <corrected>"),
    };
    print_highlighted(original, corrected);
    Ok(())
}

fn print_highlighted(original: &str, corrected: &str) {
    let words: Vec<String> = highlight_changes(original, corrected)
        .into_iter()
        .map(|w| if w.changed { format!("[{}]", w.word) } else { w.word })
        .collect();
    println!("{}", words.join(" "));
}
