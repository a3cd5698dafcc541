//! Persisted counter

use super::{Demo, DemoError, parse_arg, parse_opt, unknown};
use crate::app::AppContext;
use crate::persisted::Persisted;

const KEY: &str = "counter";

pub struct CounterDemo {
    count: Persisted<i64>,
}

impl CounterDemo {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            count: ctx.persisted(KEY, 0),
        }
    }

    pub fn count(&self) -> i64 {
        *self.count.get()
    }
}

impl Demo for CounterDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "counter that survives restarts"
    }

    fn usage(&self) -> &'static str {
        "inc [n] | dec [n] | set <n> | reset"
    }

    fn dispatch(&mut self, _ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        match args.first().copied() {
            Some("inc") => {
                let n: i64 = parse_opt(KEY, args, 1, "n", 1)?;
                self.count.update(|c| c.saturating_add(n));
            }
            Some("dec") => {
                let n: i64 = parse_opt(KEY, args, 1, "n", 1)?;
                self.count.update(|c| c.saturating_sub(n));
            }
            Some("set") => {
                let n: i64 = parse_arg(KEY, args, 1, "n")?;
                self.count.set(n);
            }
            Some("reset") => self.count.reset(),
            other => return Err(unknown(KEY, other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        format!("count: {}", self.count.get())
    }

    fn flush(&mut self) -> usize {
        self.count.flush()
    }

    fn reset(&mut self, _ctx: &AppContext) {
        self.count.reset();
    }
}
