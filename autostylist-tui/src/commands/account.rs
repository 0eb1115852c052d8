use autostylist_common::models::User;

use super::describe_error;
use crate::TuiModule;

/// Handle "register", "login", "logout" and "me".
pub async fn handle_account_command(cmd: &str, args: &[&str], tui: &TuiModule) -> String {
    match cmd {
        "register" => {
            if args.len() < 3 {
                return "Usage: register <email> <password> <full name...>".to_string();
            }
            let full_name = args[2..].join(" ");
            match tui.account.register_and_login(&full_name, args[0], args[1]).await {
                Ok(user) => format!("Welcome, {}! You are now logged in.", user.full_name),
                Err(e) => describe_error(&e),
            }
        }
        "login" => {
            if args.len() < 2 {
                return "Usage: login <email> <password>".to_string();
            }
            match tui.account.login(args[0], args[1]).await {
                Ok(user) => format!("Logged in as {}", show_user(&user)),
                Err(e) => describe_error(&e),
            }
        }
        "logout" => {
            tui.account.logout().await;
            "Logged out.".to_string()
        }
        "me" => match tui.account.current_user().await {
            Ok(Some(user)) => show_user(&user),
            Ok(None) => "Not logged in.".to_string(),
            Err(e) => describe_error(&e),
        },
        _ => format!("Unknown account command '{}'", cmd),
    }
}

fn show_user(user: &User) -> String {
    match &user.created_at {
        Some(ts) => format!("{} <{}> (member since {})", user.full_name, user.email, ts.date()),
        None => format!("{} <{}>", user.full_name, user.email),
    }
}
