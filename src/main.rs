use std::io::Write;
use clap::Parser;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use pincode_lookup::cli::{Cli, Command};
use pincode_lookup::postal::{LookupService, PostalClient};
use pincode_lookup::screen::{Channel, LookupScreen, Notification, Outcome};
use pincode_lookup::screen::spinner::WithSpinner;
use pincode_lookup::screen::view::render_alert;

#[tokio::main]
async fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("cannot install error report hook: {:?}", e);
    }
    init_tracing();

    match run(Cli::parse()).await {
        Err(e) => {
            error!("Error: {:?}", e);
            std::process::exit(1);
        }
        Ok(false) => std::process::exit(1),
        _ => {}
    }
}

/// `RUST_LOG` controls verbosity, `warn` by default; `log` records are bridged in.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// returns whether the last lookup ended without a failure
async fn run(cli: Cli) -> color_eyre::Result<bool> {
    let columns = cli.columns();
    let client = PostalClient::new(&cli.api_url, cli.timeout())?;
    let service = WithSpinner::new(client);
    info!("using lookup service at [{}]", cli.api_url);

    match &cli.pincode {
        Some(pincode) => Ok(one_shot(&service, pincode, cli.filter.as_deref(), columns).await),
        None => {
            interactive(&service, columns).await?;
            Ok(true)
        }
    }
}

async fn one_shot<S: LookupService>(service: &S, raw: &str, filter: Option<&str>, columns: u16) -> bool {
    let mut screen = LookupScreen::new();
    screen.submit_lookup(service, raw).await;
    if let Some(filter) = filter {
        screen.update_filter(filter);
    }
    print!("{}", screen.view().render(columns));

    for notification in screen.take_notifications() {
        if notification.channel == Channel::Alert {
            eprint!("{}", render_alert(&notification.message, columns));
        }
    }
    !matches!(screen.outcome(), Outcome::Failure { .. })
}

async fn interactive<S: LookupService>(service: &S, columns: u16) -> color_eyre::Result<()> {
    let mut screen = LookupScreen::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{}", screen.view().render(columns));

    loop {
        prompt(&screen)?;
        // lines() strips the line terminator and nothing else
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Filter(text) => {
                screen.update_filter(text);
                print!("{}", screen.view().render(columns));
            }
            Command::Lookup(raw) => {
                screen.submit_lookup(service, raw).await;
                print!("{}", screen.view().render(columns));
                for notification in screen.take_notifications() {
                    if !alert(&notification, columns, &mut lines).await? {
                        return Ok(());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Show an alert and block until it is dismissed. Returns `false` on EOF.
async fn alert<R>(notification: &Notification, columns: u16, lines: &mut tokio::io::Lines<R>) -> color_eyre::Result<bool>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    // the inline channel is part of the rendered screen
    if notification.channel != Channel::Alert {
        return Ok(true);
    }
    eprint!("{}Press Enter to dismiss ", render_alert(&notification.message, columns));
    std::io::stderr().flush()?;
    Ok(lines.next_line().await?.is_some())
}

fn prompt(screen: &LookupScreen) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    match screen.outcome() {
        Outcome::Success { .. } => write!(stdout, "\npincode or /filter <text>> ")?,
        _ => write!(stdout, "\npincode> ")?,
    }
    stdout.flush()
}
