//! UI Notes entry point
//!
//! Native: command line runner over a file-backed store.
//! WASM: the `web` module in the library exports the browser entry points.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use clap::{Parser, Subcommand};

    use ui_notes::consts::{DATA_DIR_NAME, DEFAULT_NAMESPACE, FALLBACK_DATA_DIR};
    use ui_notes::storage::FileStore;
    use ui_notes::{AppContext, AppOptions, Router, Settings};

    #[derive(Parser)]
    #[command(name = "ui-notes")]
    #[command(about = "Runnable notes on UI framework concepts")]
    struct Cli {
        /// Directory holding persisted slots
        #[arg(long, env = "UI_NOTES_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Prefix for slot keys
        #[arg(long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,

        /// Fixed seed for generated tokens
        #[arg(long)]
        seed: Option<u64>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// List demos and their commands
        List,
        /// Run a demo command, e.g. `run todo add buy milk`
        Run {
            demo: String,
            #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
            args: Vec<String>,
        },
        /// Print a demo's current state
        Show { demo: String },
        /// Reset a demo and clear its persisted slot
        Reset { demo: String },
        /// Read commands from stdin, one per line
        Repl,
        /// Inspect or change settings
        Settings {
            #[command(subcommand)]
            action: SettingsAction,
        },
    }

    #[derive(Subcommand)]
    enum SettingsAction {
        Show,
        Set { field: String, value: String },
        Reset,
    }

    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
        let store = FileStore::open(&data_dir)
            .with_context(|| format!("opening data dir {}", data_dir.display()))?;
        let mut ctx = AppContext::init(
            Rc::new(store),
            AppOptions {
                namespace: cli.namespace,
                seed: cli.seed,
            },
        );
        let mut router = Router::with_defaults(&ctx);

        let result = execute(cli.command, &mut ctx, &mut router);

        router.teardown();
        ctx.teardown();
        result
    }

    fn execute(command: Command, ctx: &mut AppContext, router: &mut Router) -> Result<()> {
        match command {
            Command::List => println!("{}", router.describe()),
            Command::Run { demo, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                println!("{}", router.dispatch(ctx, &demo, &args)?);
            }
            Command::Show { demo } => println!("{}", router.render(&demo)?),
            Command::Reset { demo } => println!("{}", router.reset(ctx, &demo)?),
            Command::Repl => repl(ctx, router)?,
            Command::Settings { action } => settings(ctx, action)?,
        }
        Ok(())
    }

    fn repl(ctx: &mut AppContext, router: &mut Router) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        write!(stdout, "> ")?;
        stdout.flush()?;
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed == "quit" || trimmed == "exit" {
                break;
            }
            match router.dispatch_line(ctx, trimmed) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(stdout, "{}", text)?,
                Err(e) => writeln!(stdout, "error: {}", e)?,
            }
            router.flush_all();
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        writeln!(stdout)?;
        Ok(())
    }

    fn settings(ctx: &mut AppContext, action: SettingsAction) -> Result<()> {
        match action {
            SettingsAction::Show => println!("{}", ctx.settings().describe()),
            SettingsAction::Set { field, value } => {
                let mut next = ctx.settings().clone();
                next.set_field(&field, &value).map_err(|e| {
                    anyhow!("{} (fields: {})", e, Settings::FIELDS.join(", "))
                })?;
                ctx.settings_mut().set(next);
                println!("{}", ctx.settings().describe());
            }
            SettingsAction::Reset => {
                ctx.settings_mut().reset();
                println!("{}", ctx.settings().describe());
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
