/// Command-line normalization and the fixed command tables.
///
/// Every screen compares commands after trimming and uppercasing.
/// Verbs that take an argument (`PLAY`, `MOVE`) must stand alone or be
/// followed by whitespace, so `PLAYER` is not `PLAY ER`.

/// Trim and uppercase a submitted line.
pub fn normalize(line: &str) -> String {
    line.trim().to_uppercase()
}

/// If `cmd` is `verb` or `verb <rest>`, return the argument with internal
/// whitespace collapsed. `cmd` must already be normalized.
pub fn strip_verb(cmd: &str, verb: &str) -> Option<String> {
    let rest = cmd.strip_prefix(verb)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Games the prompt knows how to launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Game {
    Chess,
    GlobalThermonuclearWar,
    TicTacToe,
}

impl Game {
    pub fn lookup(name: &str) -> Option<Game> {
        match name {
            "CHESS" => Some(Game::Chess),
            "GLOBAL THERMONUCLEAR WAR" => Some(Game::GlobalThermonuclearWar),
            "TIC-TAC-TOE" | "TICTACTOE" | "TIC TAC TOE" => Some(Game::TicTacToe),
            _ => None,
        }
    }
}

/// Titles listed by `GAMES`.
pub const GAME_LIST: &[&str] = &[
    "FALKEN'S MAZE",
    "BLACK JACK",
    "GIN RUMMY",
    "HEARTS",
    "CHESS",
    "POKER",
    "FIGHTER COMBAT",
    "GUERRILLA ENGAGEMENT",
    "DESERT WARFARE",
    "AIR-TO-GROUND ACTIONS",
    "THEATERWIDE TACTICAL WARFARE",
    "TIC-TAC-TOE",
    "GLOBAL THERMONUCLEAR WAR",
];

/// Parsed main-prompt command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptCommand {
    Empty,
    Help,
    Status,
    Games,
    Clear,
    Exit,
    Play(Game),
    /// `PLAY` with a name that is not in the table (possibly empty).
    PlayUnknown(String),
    Unknown(String),
}

impl PromptCommand {
    pub fn parse(line: &str) -> PromptCommand {
        let cmd = normalize(line);
        match cmd.as_str() {
            "" => PromptCommand::Empty,
            "HELP" => PromptCommand::Help,
            "STATUS" => PromptCommand::Status,
            "GAMES" => PromptCommand::Games,
            "CLEAR" => PromptCommand::Clear,
            "EXIT" => PromptCommand::Exit,
            _ => match strip_verb(&cmd, "PLAY") {
                Some(name) => match Game::lookup(&name) {
                    Some(game) => PromptCommand::Play(game),
                    None => PromptCommand::PlayUnknown(name),
                },
                None => PromptCommand::Unknown(cmd),
            },
        }
    }
}
