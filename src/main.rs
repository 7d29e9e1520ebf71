mod ai;
mod app;
mod config;
mod constants;
mod delivery;
mod error;
mod input;
mod ui;

use anyhow::Result;
use std::env;
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,missive=debug"));

    // The TUI owns stdout, so log to a file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .map(|dir| dir.join("missive.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"missive - Contact form for the terminal with AI polish

Usage: missive [command]

Commands:
    (none)      Open the contact form
    setup       Configure the AI, document store and mail relay keys
    config      Show which settings are present (keys redacted)
    help        Show this help message

Configuration file: ~/.config/missive/config.toml
Environment overrides: MISSIVE_AI_API_KEY, MISSIVE_AI_MODEL,
    MISSIVE_STORE_PROJECT_ID, MISSIVE_STORE_API_KEY,
    MISSIVE_RELAY_SERVICE_ID, MISSIVE_RELAY_TEMPLATE_ID, MISSIVE_RELAY_PUBLIC_KEY
"#
    );
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value = prompt(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("{} is required.", label);
    }
}

/// Read a key without echoing it. Empty input means "not set".
fn prompt_secret(label: &str) -> Result<Option<String>> {
    print!("{} (leave empty to skip): ", label);
    io::stdout().flush()?;
    let value = rpassword_read()?;
    println!();
    Ok(Some(value).filter(|v| !v.is_empty()))
}

fn run_setup() -> Result<()> {
    println!("Missive Setup");
    println!("=============\n");

    let config_path = Config::config_path()?;
    if config_path.exists() {
        print!("Configuration already exists. Overwrite? [y/N]: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let mut config = Config::default();

    println!("AI polish (Gemini)");
    config.ai.api_key = prompt_secret("  API key")?;

    println!("\nDocument store (Firestore)");
    config.store.project_id = prompt_required("  Project ID")?;
    config.store.api_key = prompt_secret("  Web API key")?;

    println!("\nMail relay (EmailJS)");
    config.relay.service_id = prompt_required("  Service ID")?;
    config.relay.template_id = prompt_required("  Template ID")?;
    config.relay.public_key = prompt_required("  Public key")?;

    config.ensure_dirs()?;
    config.save()?;
    println!("\nConfiguration saved to {}", config_path.display());
    if !config.ai.is_configured() {
        println!("No AI key given: the Polish button will report a missing key.");
    }

    println!("\nSetup complete! Run 'missive' to start.");
    Ok(())
}

fn rpassword_read() -> Result<String> {
    // Disable echo
    let _guard = DisableEcho::new()?;

    let mut secret = String::new();
    io::stdin().read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        // SAFETY: tcgetattr fully initializes `termios` when it returns 0
        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut silent = original;
            silent.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &silent) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        // SAFETY: restores the attributes read in `new`
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some("config") => {
            let config = Config::load()?;
            println!("{}", config.describe());
            println!("\nConfig file: {}", Config::config_path()?.display());
            Ok(())
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            if config.store.project_id.is_empty() || config.relay.service_id.is_empty() {
                tracing::warn!("Store or relay not configured; submissions will fail");
            }

            // Initialize theme from config
            crate::ui::theme::init_theme(config.ui.theme);

            let mut app = App::new(&config);
            app.run().await
        }
    }
}
