// File: autostylist-tui/src/commands/mod.rs

mod account;
mod recommend;
mod wardrobe;

use autostylist_core::Error;

use crate::TuiModule;

/// Runs one shell line. Returns `(quit_requested, output)`.
pub async fn dispatch(line: &str, tui: &TuiModule) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().unwrap_or(&"").to_lowercase();
    let args = parts.get(1..).unwrap_or(&[]);

    match cmd.as_str() {
        "" => (false, None),
        "help" => {
            let help = "\
Commands:
  help
  register <email> <password> <full name...>
  login    <email> <password>
  logout
  me
  upload   <path> <category> [style] [gender]
  wardrobe [all|<category>]
  stats
  delete   <item_id>
  recommend <occasion> [gender]
  context  <occasion>
  show     <best|medium|average>
  like | dislike | wear
  quit
";
            (false, Some(help.to_string()))
        }
        "register" | "login" | "logout" | "me" => {
            (false, Some(account::handle_account_command(&cmd, args, tui).await))
        }
        "upload" | "wardrobe" | "stats" | "delete" => {
            (false, Some(wardrobe::handle_wardrobe_command(&cmd, args, tui).await))
        }
        "recommend" | "context" | "show" | "like" | "dislike" | "wear" => {
            (false, Some(recommend::handle_recommend_command(&cmd, args, tui).await))
        }
        "quit" | "exit" => (true, Some("Goodbye.".to_string())),
        other => (false, Some(format!("Unknown command '{}'. Type 'help' for usage.", other))),
    }
}

pub(crate) fn describe_error(err: &Error) -> String {
    format!("Error: {}", err.body().error)
}

/// Link for an item image; blank paths get the placeholder.
pub(crate) fn image_link(tui: &TuiModule, path: &str) -> String {
    tui.client.image_source(path).as_url().to_string()
}
