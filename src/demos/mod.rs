//! Demo variants and the routing table that selects them
//!
//! Each demo implements [`Demo`] and is registered in a [`Router`] under its
//! key. Commands are whitespace separated words: `<demo> <command> [args]`.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use crate::app::AppContext;

pub mod counter;
pub mod debounce;
pub mod dropdown;
pub mod login;
pub mod memo;
pub mod todo;

pub use counter::CounterDemo;
pub use debounce::DebounceDemo;
pub use dropdown::{DropdownDemo, DropdownMenu};
pub use login::{LoginDemo, Session};
pub use memo::MemoDemo;
pub use todo::{Todo, TodoAction, TodoDemo, TodoList};

/// Rejected demo command. Persistence problems never show up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DemoError {
    #[error("unknown demo: {0}")]
    UnknownDemo(String),

    #[error("{demo}: unknown command {command:?}")]
    UnknownCommand { demo: &'static str, command: String },

    #[error("{demo}: missing argument <{name}>")]
    MissingArgument { demo: &'static str, name: &'static str },

    #[error("{demo}: invalid {name}: {value:?}")]
    InvalidArgument {
        demo: &'static str,
        name: &'static str,
        value: String,
    },

    #[error("{demo}: {reason}")]
    Rejected { demo: &'static str, reason: String },
}

/// One runnable example
pub trait Demo {
    /// Routing key
    fn key(&self) -> &'static str;

    /// One-line description
    fn summary(&self) -> &'static str;

    /// Accepted commands
    fn usage(&self) -> &'static str;

    /// Run one command
    fn dispatch(&mut self, ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError>;

    /// Plain-text view of the current state
    fn render(&self) -> String;

    /// Push pending writes to the store; returns writes attempted
    fn flush(&mut self) -> usize {
        0
    }

    /// Back to the initial state, clearing anything persisted
    fn reset(&mut self, ctx: &AppContext);
}

/// Required positional argument
pub(crate) fn arg<'a>(
    demo: &'static str,
    args: &[&'a str],
    idx: usize,
    name: &'static str,
) -> Result<&'a str, DemoError> {
    args.get(idx)
        .copied()
        .ok_or(DemoError::MissingArgument { demo, name })
}

/// Required positional argument parsed with `FromStr`
pub(crate) fn parse_arg<T: FromStr>(
    demo: &'static str,
    args: &[&str],
    idx: usize,
    name: &'static str,
) -> Result<T, DemoError> {
    let raw = arg(demo, args, idx, name)?;
    raw.parse().map_err(|_| DemoError::InvalidArgument {
        demo,
        name,
        value: raw.to_string(),
    })
}

/// Optional positional argument parsed with `FromStr`
pub(crate) fn parse_opt<T: FromStr>(
    demo: &'static str,
    args: &[&str],
    idx: usize,
    name: &'static str,
    default: T,
) -> Result<T, DemoError> {
    if args.len() > idx {
        parse_arg(demo, args, idx, name)
    } else {
        Ok(default)
    }
}

/// Remaining arguments joined as free text
pub(crate) fn rest_text(
    demo: &'static str,
    args: &[&str],
    from: usize,
    name: &'static str,
) -> Result<String, DemoError> {
    let text = args.get(from..).unwrap_or_default().join(" ");
    if text.trim().is_empty() {
        return Err(DemoError::MissingArgument { demo, name });
    }
    Ok(text)
}

pub(crate) fn unknown(demo: &'static str, command: Option<&str>) -> DemoError {
    match command {
        Some(command) => DemoError::UnknownCommand {
            demo,
            command: command.to_string(),
        },
        None => DemoError::MissingArgument {
            demo,
            name: "command",
        },
    }
}

/// Routing table: demo key to variant
#[derive(Default)]
pub struct Router {
    routes: BTreeMap<&'static str, Box<dyn Demo>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with every built-in demo
    pub fn with_defaults(ctx: &AppContext) -> Self {
        let mut router = Self::new();
        router.register(Box::new(CounterDemo::new(ctx)));
        router.register(Box::new(TodoDemo::new(ctx)));
        router.register(Box::new(LoginDemo::new(ctx)));
        router.register(Box::new(DebounceDemo::new(ctx)));
        router.register(Box::new(MemoDemo::new()));
        router.register(Box::new(DropdownDemo::new(ctx)));
        router
    }

    pub fn register(&mut self, demo: Box<dyn Demo>) {
        let key = demo.key();
        if self.routes.insert(key, demo).is_some() {
            log::warn!("Demo {} registered twice, keeping the latest", key);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    pub fn get(&self, key: &str) -> Option<&dyn Demo> {
        self.routes.get(key).map(|demo| demo.as_ref())
    }

    fn route(&mut self, key: &str) -> Result<&mut Box<dyn Demo>, DemoError> {
        self.routes
            .get_mut(key)
            .ok_or_else(|| DemoError::UnknownDemo(key.to_string()))
    }

    /// Run a command on a demo and return its new rendering
    pub fn dispatch(
        &mut self,
        ctx: &mut AppContext,
        key: &str,
        args: &[&str],
    ) -> Result<String, DemoError> {
        let demo = self.route(key)?;
        log::debug!("{} <- {:?}", key, args);
        demo.dispatch(ctx, args)?;
        Ok(demo.render())
    }

    pub fn render(&self, key: &str) -> Result<String, DemoError> {
        self.get(key)
            .map(|demo| demo.render())
            .ok_or_else(|| DemoError::UnknownDemo(key.to_string()))
    }

    pub fn reset(&mut self, ctx: &AppContext, key: &str) -> Result<String, DemoError> {
        let demo = self.route(key)?;
        demo.reset(ctx);
        log::info!("Demo {} reset", key);
        Ok(demo.render())
    }

    /// One `key  summary` line per demo
    pub fn describe(&self) -> String {
        self.routes
            .values()
            .map(|demo| format!("{:<10} {}\n{:<10} usage: {}", demo.key(), demo.summary(), "", demo.usage()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run a single line: `<demo> [args]`, `show <demo>`, `reset <demo>`
    /// or `list`.
    pub fn dispatch_line(&mut self, ctx: &mut AppContext, line: &str) -> Result<String, DemoError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Ok(String::new()),
            ["list"] => Ok(self.describe()),
            ["show", key] => self.render(key),
            ["reset", key] => self.reset(ctx, key),
            [key, args @ ..] => self.dispatch(ctx, key, args),
        }
    }

    /// Flush every demo; returns the number of writes attempted
    pub fn flush_all(&mut self) -> usize {
        self.routes.values_mut().map(|demo| demo.flush()).sum()
    }

    pub fn teardown(mut self) -> usize {
        let writes = self.flush_all();
        log::info!("Router closed ({} write(s) flushed)", writes);
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn setup() -> (Rc<MemoryStore>, AppContext, Router) {
        let store = Rc::new(MemoryStore::new());
        let ctx = AppContext::init(
            store.clone(),
            AppOptions {
                seed: Some(7),
                ..Default::default()
            },
        );
        let router = Router::with_defaults(&ctx);
        (store, ctx, router)
    }

    #[test]
    fn test_default_routes() {
        let (_, _, router) = setup();
        let keys: Vec<_> = router.keys().collect();
        assert_eq!(keys, vec!["counter", "debounce", "dropdown", "login", "memo", "todo"]);
    }

    #[test]
    fn test_unknown_demo() {
        let (_, mut ctx, mut router) = setup();
        assert_eq!(
            router.dispatch(&mut ctx, "clock", &["tick"]),
            Err(DemoError::UnknownDemo("clock".to_string()))
        );
        assert!(router.render("clock").is_err());
    }

    #[test]
    fn test_dispatch_line_routes_and_renders() {
        let (store, mut ctx, mut router) = setup();
        let out = router.dispatch_line(&mut ctx, "counter inc 3").unwrap();
        assert_eq!(out, "count: 3");
        assert_eq!(router.dispatch_line(&mut ctx, "show counter").unwrap(), "count: 3");
        assert_eq!(router.flush_all(), 1);
        assert_eq!(store.raw_get("ui_notes:counter").as_deref(), Some("3"));

        assert_eq!(router.dispatch_line(&mut ctx, "reset counter").unwrap(), "count: 0");
        assert!(!store.contains("ui_notes:counter"));
        assert_eq!(router.dispatch_line(&mut ctx, "   ").unwrap(), "");
    }

    #[test]
    fn test_teardown_flushes_and_state_survives() {
        let (store, mut ctx, mut router) = setup();
        router.dispatch_line(&mut ctx, "todo add write notes").unwrap();
        router.teardown();

        let mut ctx = AppContext::init(store.clone(), AppOptions::default());
        let mut router = Router::with_defaults(&ctx);
        let out = router.dispatch_line(&mut ctx, "show todo").unwrap();
        assert!(out.contains("write notes"));
    }

    #[test]
    fn test_describe_lists_every_demo() {
        let (_, _, router) = setup();
        let text = router.describe();
        for key in router.keys() {
            assert!(text.contains(key));
        }
    }

    #[test]
    fn test_arg_helpers() {
        assert_eq!(parse_opt::<i64>("t", &["inc"], 1, "n", 1), Ok(1));
        assert_eq!(
            parse_arg::<i64>("t", &["inc", "x"], 1, "n"),
            Err(DemoError::InvalidArgument {
                demo: "t",
                name: "n",
                value: "x".to_string()
            })
        );
        assert_eq!(rest_text("t", &["add", "a", "b"], 1, "text"), Ok("a b".to_string()));
        assert!(rest_text("t", &["add"], 1, "text").is_err());
        assert_eq!(unknown("t", None), DemoError::MissingArgument { demo: "t", name: "command" });
    }
}
