//! Chat input parsing.
//!
//! Plain text is sent as a message. A leading `/` starts a command; `//`
//! escapes it so the rest is sent as-is.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ChatCommand {
    Empty,
    Send(String),
    /// Replace message `index` (1-based) with `text`. Blank text cancels.
    Edit { index: usize, text: String },
    Delete(usize),
    Reload,
    /// Stop the reply that is still streaming.
    Cancel,
    Logout,
    Quit,
    Help,
}

pub(super) const HELP: &str = "\
Type a message and press Enter to send it.
  /edit <n> <text>  replace your message number n
  /delete <n>       delete message number n
  /reload           fetch the conversation again
  /cancel           stop the reply in progress
  /logout           sign out
  /quit             exit
  //text            send text starting with '/'";

fn parse_index(arg: &str, usage: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(0) => Err("Message numbers start at 1.".into()),
        Ok(index) => Ok(index),
        Err(_) => Err(format!("usage: {usage}")),
    }
}

pub(super) fn parse(line: &str) -> Result<ChatCommand, String> {
    if line.trim().is_empty() {
        return Ok(ChatCommand::Empty);
    }
    if let Some(escaped) = line.strip_prefix("//") {
        return Ok(ChatCommand::Send(format!("/{escaped}")));
    }
    let Some(body) = line.trim().strip_prefix('/') else {
        return Ok(ChatCommand::Send(line.to_string()));
    };

    let (name, rest) = body
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((body, ""));

    match name {
        "edit" => {
            let (index, text) = rest
                .split_once(char::is_whitespace)
                .map(|(index, text)| (index, text.trim()))
                .unwrap_or((rest, ""));
            Ok(ChatCommand::Edit {
                index: parse_index(index, "/edit <n> <text>")?,
                text: text.to_string(),
            })
        }
        "delete" => Ok(ChatCommand::Delete(parse_index(rest, "/delete <n>")?)),
        "reload" => Ok(ChatCommand::Reload),
        "cancel" => Ok(ChatCommand::Cancel),
        "logout" => Ok(ChatCommand::Logout),
        "quit" | "exit" => Ok(ChatCommand::Quit),
        "help" | "?" => Ok(ChatCommand::Help),
        other => Err(format!("Unknown command /{other}. Type /help for a list.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_sent_verbatim() {
        assert_eq!(
            parse("What's the weather?"),
            Ok(ChatCommand::Send("What's the weather?".into()))
        );
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(parse(""), Ok(ChatCommand::Empty));
        assert_eq!(parse("   "), Ok(ChatCommand::Empty));
    }

    #[test]
    fn double_slash_escapes_commands() {
        assert_eq!(parse("//help"), Ok(ChatCommand::Send("/help".into())));
    }

    #[test]
    fn edit_takes_index_and_text() {
        assert_eq!(
            parse("/edit 3 a better question"),
            Ok(ChatCommand::Edit {
                index: 3,
                text: "a better question".into()
            })
        );
    }

    #[test]
    fn edit_without_text_is_blank() {
        assert_eq!(
            parse("/edit 2"),
            Ok(ChatCommand::Edit {
                index: 2,
                text: String::new()
            })
        );
    }

    #[test]
    fn bad_indexes_are_rejected() {
        assert!(parse("/delete").is_err());
        assert!(parse("/delete two").is_err());
        assert_eq!(parse("/delete 0"), Err("Message numbers start at 1.".into()));
        assert!(parse("/edit x hello").is_err());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("/delete 4"), Ok(ChatCommand::Delete(4)));
        assert_eq!(parse("/reload"), Ok(ChatCommand::Reload));
        assert_eq!(parse(" /cancel "), Ok(ChatCommand::Cancel));
        assert_eq!(parse("/logout"), Ok(ChatCommand::Logout));
        assert_eq!(parse("/exit"), Ok(ChatCommand::Quit));
        assert_eq!(parse("/?"), Ok(ChatCommand::Help));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse("/frobnicate").unwrap_err().contains("/frobnicate"));
    }
}
