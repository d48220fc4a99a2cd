//! Command handler chain for title menu selection.
//!
//! The host's title scene knows how to handle its built-in commands. Plugins
//! extend that behavior by wrapping the previous handler rather than
//! replacing it: each layer asks the handler it wraps first and only acts on
//! what that handler left unhandled.
//!
//! - [`BuiltinHandler`]: the base layer; handles reserved symbols
//! - [`ScriptOverride`]: hands script payloads to a [`ScriptHost`]
//! - [`Override`]: a named closure layer for anything else
//!
//! # Example
//!
//! ```rust
//! use titlekit::commands::{commands_from_param, ReservedSymbol};
//! use titlekit::hooks::{select, BuiltinHandler, CommandHandler, HandlerOutcome, ScriptHost};
//! use titlekit::params::ConfigParser;
//!
//! struct NoopHost;
//! impl ScriptHost for NoopHost {
//!     fn run(&self, _symbol: &str, _script: &str) -> titlekit::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let raw = serde_json::to_string(&vec![
//!     r#"{"Symbol":"newGame"}"#,
//!     r#"{"Symbol":"gallery","Script":"openGallery();"}"#,
//! ])
//! .unwrap();
//! let registry = commands_from_param(&ConfigParser::new(), &raw);
//! let handler = BuiltinHandler.with_scripts(NoopHost);
//!
//! assert_eq!(
//!     select(&handler, &registry, "newGame"),
//!     HandlerOutcome::Builtin(ReservedSymbol::NewGame)
//! );
//! assert_eq!(select(&handler, &registry, "gallery"), HandlerOutcome::ScriptRan);
//! assert_eq!(select(&handler, &registry, "missing"), HandlerOutcome::Unhandled);
//! ```

use tracing::{debug, warn};

use crate::commands::{CommandEntry, CommandRegistry, Dispatch, ReservedSymbol};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a handler chain did with a selected command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The host should run its built-in behavior.
    Builtin(ReservedSymbol),
    /// The command's script was handed to the host and accepted.
    ScriptRan,
    /// The host rejected the command's script.
    ScriptFailed(String),
    /// No layer handled the command.
    Unhandled,
}

impl HandlerOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, HandlerOutcome::Unhandled)
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Executes opaque script payloads on behalf of the menu.
///
/// The payload is never inspected here.
#[cfg_attr(test, mockall::automock)]
pub trait ScriptHost {
    /// Run `script`, attached to the command `symbol`.
    fn run(&self, symbol: &str, script: &str) -> Result<()>;
}

/// One layer of the selection chain.
pub trait CommandHandler {
    /// Handle a selected command.
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome;

    /// Wrap this handler with a script layer.
    fn with_scripts<S: ScriptHost>(self, host: S) -> ScriptOverride<Self, S>
    where
        Self: Sized,
    {
        ScriptOverride::new(self, host)
    }

    /// Wrap this handler with a named closure layer.
    fn with_override<F>(self, name: &'static str, f: F) -> Override<Self, F>
    where
        Self: Sized,
        F: Fn(&Self, &CommandEntry) -> HandlerOutcome,
    {
        Override::new(name, self, f)
    }
}

impl<H: CommandHandler + ?Sized> CommandHandler for &H {
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome {
        (**self).handle(entry)
    }
}

impl<H: CommandHandler + ?Sized> CommandHandler for Box<H> {
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome {
        (**self).handle(entry)
    }
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Base behavior: reserved symbols map to the host's built-ins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHandler;

impl CommandHandler for BuiltinHandler {
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome {
        match entry.reserved() {
            Some(reserved) => HandlerOutcome::Builtin(reserved),
            None => HandlerOutcome::Unhandled,
        }
    }
}

/// Runs script payloads the wrapped handler did not handle.
///
/// Because the wrapped handler goes first, a reserved symbol keeps its
/// built-in meaning even when the entry also carries a script.
pub struct ScriptOverride<H, S> {
    previous: H,
    host: S,
}

impl<H, S> ScriptOverride<H, S> {
    pub fn new(previous: H, host: S) -> Self {
        Self { previous, host }
    }

    /// The wrapped handler.
    pub fn previous(&self) -> &H {
        &self.previous
    }
}

impl<H: CommandHandler, S: ScriptHost> CommandHandler for ScriptOverride<H, S> {
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome {
        let outcome = self.previous.handle(entry);
        if outcome.is_handled() {
            return outcome;
        }

        let Dispatch::Script(script) = entry.dispatch() else {
            return HandlerOutcome::Unhandled;
        };

        match self.host.run(&entry.symbol, script) {
            Ok(()) => {
                debug!(symbol = %entry.symbol, "Command script handed to host");
                HandlerOutcome::ScriptRan
            }
            Err(e) => {
                warn!(symbol = %entry.symbol, error = %e, "Command script failed");
                HandlerOutcome::ScriptFailed(e.to_string())
            }
        }
    }
}

/// A named layer whose behavior is a closure receiving the previous handler.
///
/// The closure decides whether and when to call through.
pub struct Override<H, F> {
    name: &'static str,
    previous: H,
    f: F,
}

impl<H, F> Override<H, F> {
    pub fn new(name: &'static str, previous: H, f: F) -> Self {
        Self { name, previous, f }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H, F> CommandHandler for Override<H, F>
where
    H: CommandHandler,
    F: Fn(&H, &CommandEntry) -> HandlerOutcome,
{
    fn handle(&self, entry: &CommandEntry) -> HandlerOutcome {
        let outcome = (self.f)(&self.previous, entry);
        debug!(layer = self.name, symbol = %entry.symbol, outcome = ?outcome, "Override handled command");
        outcome
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Run the chain for the command registered under `symbol`.
///
/// Unknown symbols are [`HandlerOutcome::Unhandled`]. With duplicate
/// symbols this resolves to the later entry, like the registry lookup.
pub fn select<H: CommandHandler>(
    handler: &H,
    registry: &CommandRegistry,
    symbol: &str,
) -> HandlerOutcome {
    match registry.get(symbol) {
        Some(entry) => handler.handle(entry),
        None => {
            debug!(symbol = %symbol, "Selected symbol is not registered");
            HandlerOutcome::Unhandled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{build_commands, BackgroundOffset};
    use crate::error::TitleKitError;
    use crate::params::ConfigParser;
    use mockall::predicate::eq;

    fn entry(symbol: &str, script: &str) -> CommandEntry {
        CommandEntry {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            icon: 0,
            background_image: String::new(),
            background_offset: BackgroundOffset::default(),
            script: script.to_string(),
            hidden: false,
            generated_symbol: false,
        }
    }

    // ---- BuiltinHandler ----

    #[test]
    fn test_builtin_handles_reserved_symbols() {
        for reserved in ReservedSymbol::ALL {
            let outcome = BuiltinHandler.handle(&entry(reserved.as_str(), ""));
            assert_eq!(outcome, HandlerOutcome::Builtin(reserved));
        }
    }

    #[test]
    fn test_builtin_leaves_custom_unhandled() {
        let outcome = BuiltinHandler.handle(&entry("gallery", "open();"));
        assert_eq!(outcome, HandlerOutcome::Unhandled);
        assert!(!outcome.is_handled());
    }

    // ---- ScriptOverride ----

    #[test]
    fn test_script_override_runs_script() {
        let mut host = MockScriptHost::new();
        host.expect_run()
            .with(eq("gallery"), eq("open();"))
            .times(1)
            .returning(|_, _| Ok(()));

        let handler = BuiltinHandler.with_scripts(host);
        assert_eq!(
            handler.handle(&entry("gallery", "open();")),
            HandlerOutcome::ScriptRan
        );
    }

    #[test]
    fn test_script_override_reserved_symbol_wins() {
        let mut host = MockScriptHost::new();
        host.expect_run().times(0);

        let handler = BuiltinHandler.with_scripts(host);
        assert_eq!(
            handler.handle(&entry("options", "somethingElse();")),
            HandlerOutcome::Builtin(ReservedSymbol::Options)
        );
    }

    #[test]
    fn test_script_override_no_script_is_unhandled() {
        let mut host = MockScriptHost::new();
        host.expect_run().times(0);

        let handler = BuiltinHandler.with_scripts(host);
        assert_eq!(handler.handle(&entry("inert", "")), HandlerOutcome::Unhandled);
    }

    #[test]
    fn test_script_override_reports_host_failure() {
        let mut host = MockScriptHost::new();
        host.expect_run()
            .times(1)
            .returning(|_, _| Err(TitleKitError::Script("syntax error".to_string())));

        let handler = BuiltinHandler.with_scripts(host);
        let outcome = handler.handle(&entry("broken", "((("));
        assert_eq!(
            outcome,
            HandlerOutcome::ScriptFailed("Script error: syntax error".to_string())
        );
    }

    // ---- Override ----

    #[test]
    fn test_override_can_preempt_previous() {
        let handler = BuiltinHandler.with_override("block_new_game", |previous, entry| {
            if entry.symbol == "newGame" {
                HandlerOutcome::Unhandled
            } else {
                previous.handle(entry)
            }
        });

        assert_eq!(handler.name(), "block_new_game");
        assert_eq!(handler.handle(&entry("newGame", "")), HandlerOutcome::Unhandled);
        assert_eq!(
            handler.handle(&entry("continue", "")),
            HandlerOutcome::Builtin(ReservedSymbol::Continue)
        );
    }

    #[test]
    fn test_layers_compose_in_order() {
        let mut host = MockScriptHost::new();
        host.expect_run().times(1).returning(|_, _| Ok(()));

        let handler = BuiltinHandler
            .with_scripts(host)
            .with_override("fallback_to_options", |previous, entry| {
                match previous.handle(entry) {
                    HandlerOutcome::Unhandled => HandlerOutcome::Builtin(ReservedSymbol::Options),
                    outcome => outcome,
                }
            });

        assert_eq!(handler.handle(&entry("a", "run();")), HandlerOutcome::ScriptRan);
        assert_eq!(
            handler.handle(&entry("b", "")),
            HandlerOutcome::Builtin(ReservedSymbol::Options)
        );
    }

    #[test]
    fn test_boxed_and_borrowed_handlers() {
        let boxed: Box<dyn CommandHandler> = Box::new(BuiltinHandler);
        assert!(boxed.handle(&entry("newGame", "")).is_handled());

        let borrowed = &BuiltinHandler;
        assert!(borrowed.handle(&entry("continue", "")).is_handled());
    }

    // ---- select ----

    #[test]
    fn test_select_uses_registry_lookup() {
        let parser = ConfigParser::new();
        let registry = build_commands(
            &parser,
            &[
                r#"{"Symbol":"x","Script":"first();"}"#.to_string(),
                r#"{"Symbol":"x","Script":"second();"}"#.to_string(),
            ],
        );

        let mut host = MockScriptHost::new();
        host.expect_run()
            .with(eq("x"), eq("second();"))
            .times(1)
            .returning(|_, _| Ok(()));
        let handler = BuiltinHandler.with_scripts(host);

        assert_eq!(select(&handler, &registry, "x"), HandlerOutcome::ScriptRan);
        assert_eq!(select(&handler, &registry, "y"), HandlerOutcome::Unhandled);
    }
}
