use common::games::tictactoe::Mode;
use common::{SurfaceId, UserId};

pub const HELP: &str = "\
Commands:
  tictactoe [easy|impossible]      start a game for the current user
  <row> <col>                      click a cell on the newest board
  click <surface> <row> <col>      click a cell on a specific board
  as <user>                        act as another user
  games                            list running games
  help                             show this message
  quit                             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start(Option<Mode>),
    Click {
        /// `None` targets the most recently created board.
        surface: Option<SurfaceId>,
        custom_id: String,
    },
    SwitchUser(UserId),
    Games,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Err("Empty command".to_string()),
        ["tictactoe" | "ttt"] => Ok(ConsoleCommand::Start(None)),
        ["tictactoe" | "ttt", mode] => Ok(ConsoleCommand::Start(Some(mode.parse()?))),
        ["click", surface, row, col] => Ok(ConsoleCommand::Click {
            surface: Some(SurfaceId::new(*surface)),
            custom_id: format!("{} {}", row, col),
        }),
        [row, col] if is_index(row) && is_index(col) => Ok(ConsoleCommand::Click {
            surface: None,
            custom_id: format!("{} {}", row, col),
        }),
        ["as", user] => Ok(ConsoleCommand::SwitchUser(UserId::new(*user))),
        ["games"] => Ok(ConsoleCommand::Games),
        ["help"] => Ok(ConsoleCommand::Help),
        ["quit" | "exit"] => Ok(ConsoleCommand::Quit),
        _ => Err(format!("Unknown command '{}', type 'help'", line.trim())),
    }
}

fn is_index(word: &str) -> bool {
    word.parse::<usize>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_with_and_without_mode() {
        assert_eq!(parse_command("tictactoe"), Ok(ConsoleCommand::Start(None)));
        assert_eq!(parse_command("  ttt   EASY "), Ok(ConsoleCommand::Start(Some(Mode::Easy))));
        assert_eq!(
            parse_command("tictactoe impossible"),
            Ok(ConsoleCommand::Start(Some(Mode::Impossible)))
        );
        assert!(parse_command("tictactoe medium").is_err());
    }

    #[test]
    fn test_short_click_targets_newest_board() {
        assert_eq!(
            parse_command("1 2"),
            Ok(ConsoleCommand::Click {
                surface: None,
                custom_id: "1 2".to_string(),
            })
        );
    }

    #[test]
    fn test_explicit_click_passes_coordinates_through() {
        assert_eq!(
            parse_command("click surface-3 9 x"),
            Ok(ConsoleCommand::Click {
                surface: Some(SurfaceId::new("surface-3")),
                custom_id: "9 x".to_string(),
            })
        );
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(parse_command("as bob"), Ok(ConsoleCommand::SwitchUser(UserId::new("bob"))));
        assert_eq!(parse_command("games"), Ok(ConsoleCommand::Games));
        assert_eq!(parse_command("help"), Ok(ConsoleCommand::Help));
        assert_eq!(parse_command("exit"), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn test_unknown_input_is_rejected() {
        assert!(parse_command("").is_err());
        assert!(parse_command("a b").is_err());
        assert!(parse_command("dance").is_err());
    }
}
