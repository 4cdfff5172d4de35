pub const PROMPT: &str = "› ";
pub const WELCOME_TITLE: &str = "Where should we begin?";
pub const LOADING_TEXT: &str = "Analyzing…";
pub const SUGGESTION_ICONS: [&str; 4] = ["📊", "💻", "📈", "🎯"];

pub const CMD_QUIT: &str = "/quit";
pub const CMD_EXIT: &str = "/exit";
pub const CMD_NEW: &str = "/new";
pub const CMD_HELP: &str = "/help";

pub const HELP_TEXT: &str = "Enter sends the message. /1../4 pre-fills a suggestion, \
/new starts a new chat, /help shows this text, /quit exits.";
