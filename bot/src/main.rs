mod bot_config;
mod command;
mod console_surface;
mod session_manager;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use common::chat::Interaction;
use common::config::ConfigManager;
use common::games::tictactoe::{Mode, SurfaceTarget};
use common::{UserId, log, logger};
use bot_config::BotConfig;
use command::{ConsoleCommand, HELP, parse_command};
use console_surface::ConsoleSurface;
use session_manager::GameSessionManager;

#[derive(Parser)]
#[command(name = "tictactoe_bot")]
struct Args {
    /// YAML config file, created with defaults when missing.
    #[arg(long, default_value = "tictactoe_bot.yaml")]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// User the console acts as until changed with `as <user>`.
    #[arg(long, default_value = "player")]
    user: String,

    /// Overrides `default_mode` from the config (easy or impossible).
    #[arg(long)]
    mode: Option<String>,
}

struct Console {
    manager: GameSessionManager<ConsoleSurface>,
    surface: ConsoleSurface,
    acting_user: UserId,
    default_mode: Mode,
}

impl Console {
    fn handle(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Start(mode) => {
                let mode = mode.unwrap_or(self.default_mode);
                let started = self
                    .manager
                    .start_game(self.acting_user.clone(), mode, SurfaceTarget::New);
                println!("Started session {} for {}", started.session_id, self.acting_user);
            }
            ConsoleCommand::Click { surface, custom_id } => {
                let Some(surface) = surface.or_else(|| self.surface.last_surface()) else {
                    println!("No board on screen yet, start one with 'tictactoe'");
                    return;
                };
                let interaction = Interaction::new(self.acting_user.clone(), surface.clone(), custom_id);
                if !self.manager.dispatch(interaction) {
                    println!("No game is waiting on {}", surface);
                }
            }
            ConsoleCommand::SwitchUser(user) => {
                self.acting_user = user;
                println!("Now acting as {}", self.acting_user);
            }
            ConsoleCommand::Games => {
                let sessions = self.manager.active_sessions();
                if sessions.is_empty() {
                    println!("No running games");
                }
                for session in sessions {
                    println!("{}  {}  {}", session.session_id, session.player, session.mode);
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Bot".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, BotConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_or_init()?;
    let default_mode = match args.mode {
        Some(mode) => mode.parse::<Mode>()?,
        None => config.default_mode,
    };

    let surface = ConsoleSurface::new(config.human_icon.clone(), config.ai_icon.clone());
    let mut console = Console {
        manager: GameSessionManager::from_config(surface.clone(), &config),
        surface,
        acting_user: UserId::new(args.user),
        default_mode,
    };

    log!(
        "TicTacToe bot {} ready, acting as {}, default mode {}, idle timeout {}s",
        config.bot_user_id, console.acting_user, default_mode, config.idle_timeout_secs
    );
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => console.handle(command),
                    Err(message) => println!("{}", message),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log!("Shutdown signal received");
                break;
            }
        }
    }

    let remaining = console.manager.active_sessions().len();
    log!("Bot shut down, {} running game(s) dropped", remaining);

    Ok(())
}
