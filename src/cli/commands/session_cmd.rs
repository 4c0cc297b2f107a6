//! cli::commands::session_cmd
//!
//! Line-oriented interactive session.
//!
//! # Design
//!
//! Each input line is one user action against a single
//! [`Session`](crate::session::Session). Everything after `generate ` is
//! the repository input, passed on as typed. `generate --ask-token`
//! prompts for the token without echo. While editing, lines are appended
//! to the edit buffer until `.save` or `.cancel`:
//!
//! ```text
//! > generate --ask-token octocat/hello-world
//! > edit
//! .clear
//! # Release notes
//! Everything is better now.
//! .save
//! > publish
//! > quit
//! ```

use std::io::{self, BufRead};

use anyhow::Result;
use tokio::runtime::Runtime;

use super::{build_session, today};
use crate::cli::Context;
use crate::session::Session;
use crate::source::Credential;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

const HELP: &str = "\
commands:
  generate [--ask-token] <owner/name>
                                  generate a changelog
  items                           show the entries as cards
  show                            show the document
  edit                            edit the document
  publish                         publish the document
  help                            list commands
  quit                            leave the session
while editing:
  .save    keep the buffer as the document
  .cancel  discard the buffer
  .clear   empty the buffer
  .show    print the buffer
  other lines are appended to the buffer";

/// Run the interactive session on stdin.
pub fn session(ctx: &Context) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    run(ctx, &mut reader).map(drop)
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the loop until `quit` or end of input, returning the final state.
fn run(ctx: &Context, reader: &mut impl BufRead) -> Result<Session> {
    let rt = Runtime::new()?;
    let mut session = build_session(ctx, ctx.verbosity);
    let prompt = if ctx.interactive { "> " } else { "" };

    output::print("Type 'help' for commands.", ctx.verbosity);

    loop {
        let editing = session.editor().is_some_and(|e| e.is_editing());
        let line = match prompts::read_line(if editing { "" } else { prompt }, reader, true) {
            Ok(line) => line,
            Err(PromptError::Cancelled) => break,
            Err(e) => return Err(e.into()),
        };

        let flow = if editing {
            edit_line(&mut session, &line, ctx.verbosity)
        } else {
            command_line(&rt, &mut session, &line, ctx)
        };
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(session)
}

/// Handle a line typed in viewing mode.
fn command_line(rt: &Runtime, session: &mut Session, line: &str, ctx: &Context) -> Flow {
    let verbosity = ctx.verbosity;
    let line = line.trim_start();
    if line.is_empty() {
        return Flow::Continue;
    }
    // The argument is the rest of the line after one separating space.
    let (command, argument) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };

    let result = match command {
        "generate" if argument.is_empty() => {
            output::warn("usage: generate [--ask-token] <owner/name>", verbosity);
            Ok(())
        }
        "generate" => {
            let (input, credential) = match argument.strip_prefix("--ask-token ") {
                Some(input) => {
                    match prompts::password("GitHub Personal Access Token: ", ctx.interactive) {
                        Ok(token) => (input, Some(Credential::new(token))),
                        Err(e) => {
                            output::error(format!("could not read access token: {}", e));
                            return Flow::Continue;
                        }
                    }
                }
                None => (argument, None),
            };
            rt.block_on(session.generate(input, credential, today()))
                .map(|()| show_document(session, verbosity))
        }
        "items" => {
            match session.changes() {
                Some(changes) => {
                    for entry in changes {
                        output::print(output::format_card(entry), verbosity);
                    }
                }
                None => output::warn("nothing generated yet", verbosity),
            }
            Ok(())
        }
        "show" => {
            show_document(session, verbosity);
            Ok(())
        }
        "edit" => session.begin_edit().map(|()| {
            output::print(
                "editing: type lines, then .save or .cancel (.clear empties the buffer)",
                verbosity,
            )
        }),
        "publish" => rt.block_on(session.publish()),
        "help" => {
            output::print(HELP, verbosity);
            Ok(())
        }
        "quit" | "exit" => return Flow::Quit,
        other => {
            output::warn(format!("unknown command '{}', try 'help'", other), verbosity);
            Ok(())
        }
    };

    // Failures have already been turned into notifications.
    if let Err(e) = result {
        output::debug(e, verbosity);
    }
    Flow::Continue
}

/// Handle a line typed in editing mode.
fn edit_line(session: &mut Session, line: &str, verbosity: Verbosity) -> Flow {
    let result = match line {
        ".save" => session.save(),
        ".cancel" => session.cancel().map(|()| output::print("edit cancelled", verbosity)),
        ".clear" => session.buffer_mut().map(String::clear),
        ".show" => session.buffer_mut().map(|buffer| output::print(&*buffer, verbosity)),
        text => session.buffer_mut().map(|buffer| {
            buffer.push_str(text);
            buffer.push('\n');
        }),
    };

    if let Err(e) = result {
        output::error(e);
    }
    Flow::Continue
}

fn show_document(session: &Session, verbosity: Verbosity) {
    match session.document() {
        Some(document) => output::print(document.as_str().trim_end(), verbosity),
        None => output::warn("nothing generated yet", verbosity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, FileConfig, GeneratorConfig};
    use crate::core::types::ValidationError;
    use std::io::Cursor;

    fn ctx() -> Context {
        Context {
            verbosity: Verbosity::Quiet,
            interactive: false,
            config: Config::from_file(FileConfig {
                generator: Some(GeneratorConfig {
                    delay_ms: Some(0),
                    timeout_secs: None,
                }),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn full_cycle_runs_to_eof() {
        let script = "generate octocat/hello-world\nitems\nedit\n.clear\n# Mine\n.save\nshow\npublish\n";
        let session = run(&ctx(), &mut Cursor::new(script)).unwrap();

        assert_eq!(session.repo().unwrap().to_string(), "octocat/hello-world");
        assert_eq!(session.changes().unwrap().len(), 5);
        assert_eq!(session.document().unwrap().as_str(), "# Mine\n");
        assert!(!session.editor().unwrap().is_editing());
    }

    #[test]
    fn quit_stops_before_remaining_lines() {
        let script = "quit\ngenerate octocat/hello-world\n";
        let session = run(&ctx(), &mut Cursor::new(script)).unwrap();

        assert!(session.repo().is_none());
        assert!(session.document().is_none());
    }

    #[test]
    fn eof_while_editing_keeps_saved_document() {
        let script = "generate a/b\nedit\n.clear\nunsaved\n";
        let session = run(&ctx(), &mut Cursor::new(script)).unwrap();

        let document = session.document().unwrap().as_str();
        assert!(document.starts_with("# Changelog for a/b"));
        assert!(session.editor().unwrap().is_editing());
    }

    #[test]
    fn repository_input_is_passed_verbatim() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate my org/my repo", &ctx());

        let repo = session.repo().unwrap();
        assert_eq!(repo.owner(), "my org");
        assert_eq!(repo.name(), "my repo");
        assert!(session.field_error().is_none());
    }

    #[test]
    fn field_error_reports_whole_input() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate not a repo", &ctx());

        assert_eq!(
            session.field_error(),
            Some(&ValidationError::InvalidRepository("not a repo".into()))
        );
    }

    #[test]
    fn ask_token_needs_a_terminal() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        let flow = command_line(&rt, &mut session, "generate --ask-token a/b", &ctx());

        assert_eq!(flow, Flow::Continue);
        assert!(session.repo().is_none());
        assert!(!session.is_generating());
    }

    #[test]
    fn generate_without_argument_does_nothing() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate", &ctx());

        assert!(session.field_error().is_none());
        assert!(session.repo().is_none());
    }

    #[test]
    fn edit_lines_append_to_buffer() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate a/b", &ctx());
        command_line(&rt, &mut session, "edit", &ctx());
        edit_line(&mut session, ".clear", Verbosity::Quiet);
        edit_line(&mut session, "line one", Verbosity::Quiet);
        edit_line(&mut session, "line two", Verbosity::Quiet);
        edit_line(&mut session, ".save", Verbosity::Quiet);

        assert_eq!(session.document().unwrap().as_str(), "line one\nline two\n");
    }

    #[test]
    fn cancel_keeps_generated_document() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate a/b", &ctx());
        let before = session.document().cloned();
        command_line(&rt, &mut session, "edit", &ctx());
        edit_line(&mut session, ".clear", Verbosity::Quiet);
        edit_line(&mut session, ".cancel", Verbosity::Quiet);

        assert_eq!(session.document().cloned(), before);
    }

    #[test]
    fn invalid_repo_leaves_session_empty() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        command_line(&rt, &mut session, "generate invalid-input", &ctx());

        assert!(session.document().is_none());
        assert!(session.field_error().is_some());
        assert!(!session.is_generating());
    }

    #[test]
    fn quit_and_exit_end_the_loop() {
        let rt = Runtime::new().unwrap();
        let mut session = build_session(&ctx(), Verbosity::Quiet);

        assert_eq!(command_line(&rt, &mut session, "quit", &ctx()), Flow::Quit);
        assert_eq!(command_line(&rt, &mut session, "exit", &ctx()), Flow::Quit);
        assert_eq!(command_line(&rt, &mut session, "", &ctx()), Flow::Continue);
    }
}
