//! Debounced search box

use super::{Demo, DemoError, parse_arg, unknown};
use crate::app::AppContext;
use crate::hooks::Debounce;

const KEY: &str = "debounce";

pub struct DebounceDemo {
    input: Debounce<String>,
    settled: Option<String>,
    emitted: u32,
    now_ms: u64,
}

impl DebounceDemo {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            input: Debounce::new(ctx.settings().debounce_ms),
            settled: None,
            emitted: 0,
            now_ms: 0,
        }
    }

    pub fn settled(&self) -> Option<&str> {
        self.settled.as_deref()
    }

    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    fn advance(&mut self, at_ms: u64) -> Result<(), DemoError> {
        if at_ms < self.now_ms {
            return Err(DemoError::Rejected {
                demo: KEY,
                reason: format!("time went backwards ({} < {})", at_ms, self.now_ms),
            });
        }
        self.now_ms = at_ms;
        if let Some(value) = self.input.poll(at_ms) {
            log::debug!("Debounced value settled at {}ms", at_ms);
            self.settled = Some(value);
            self.emitted += 1;
        }
        Ok(())
    }
}

impl Demo for DebounceDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "debounce hook: input settles after a quiet period"
    }

    fn usage(&self) -> &'static str {
        "type <text> <at_ms> | tick <at_ms> | cancel"
    }

    fn dispatch(&mut self, _ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        match args.first().copied() {
            Some("type") => {
                // Last word is the timestamp, everything between is the text
                if args.len() < 3 {
                    let name = if args.len() < 2 { "text" } else { "at_ms" };
                    return Err(DemoError::MissingArgument { demo: KEY, name });
                }
                let at_ms: u64 = parse_arg(KEY, args, args.len() - 1, "at_ms")?;
                self.advance(at_ms)?;
                let text = args[1..args.len() - 1].join(" ");
                self.input.push(text, at_ms);
            }
            Some("tick") => {
                let at_ms: u64 = parse_arg(KEY, args, 1, "at_ms")?;
                self.advance(at_ms)?;
            }
            Some("cancel") => {
                self.input.cancel();
            }
            other => return Err(unknown(KEY, other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        let pending = match (self.input.pending(), self.input.due_at()) {
            (Some(text), Some(due)) => format!("{:?} (due at {}ms)", text, due),
            _ => "none".to_string(),
        };
        format!(
            "now: {}ms, delay: {}ms\npending: {}\nsettled: {} ({} emitted)",
            self.now_ms,
            self.input.delay_ms(),
            pending,
            self.settled.as_deref().unwrap_or("none"),
            self.emitted
        )
    }

    fn reset(&mut self, ctx: &AppContext) {
        *self = Self::new(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::settings::Settings;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn setup(delay: u64) -> (AppContext, DebounceDemo) {
        let mut ctx = AppContext::init(Rc::new(MemoryStore::new()), AppOptions::default());
        ctx.settings_mut().update(|prev| Settings {
            debounce_ms: delay,
            ..prev.clone()
        });
        let demo = DebounceDemo::new(&ctx);
        (ctx, demo)
    }

    #[test]
    fn test_typing_burst_settles_once() {
        let (mut ctx, mut demo) = setup(100);
        demo.dispatch(&mut ctx, &["type", "r", "0"]).unwrap();
        demo.dispatch(&mut ctx, &["type", "ru", "50"]).unwrap();
        demo.dispatch(&mut ctx, &["type", "rust", "lang", "90"]).unwrap();
        demo.dispatch(&mut ctx, &["tick", "150"]).unwrap();
        assert_eq!(demo.settled(), None);
        demo.dispatch(&mut ctx, &["tick", "190"]).unwrap();
        assert_eq!(demo.settled(), Some("rust lang"));
        assert_eq!(demo.emitted(), 1);
    }

    #[test]
    fn test_new_input_settles_previous_when_due() {
        let (mut ctx, mut demo) = setup(10);
        demo.dispatch(&mut ctx, &["type", "a", "0"]).unwrap();
        demo.dispatch(&mut ctx, &["type", "b", "20"]).unwrap();
        assert_eq!(demo.settled(), Some("a"));
        assert!(demo.render().contains("pending: \"b\" (due at 30ms)"));
    }

    #[test]
    fn test_cancel_and_time_order() {
        let (mut ctx, mut demo) = setup(10);
        demo.dispatch(&mut ctx, &["type", "a", "5"]).unwrap();
        demo.dispatch(&mut ctx, &["cancel"]).unwrap();
        demo.dispatch(&mut ctx, &["tick", "100"]).unwrap();
        assert_eq!(demo.settled(), None);
        assert!(matches!(
            demo.dispatch(&mut ctx, &["tick", "50"]),
            Err(DemoError::Rejected { .. })
        ));
        assert!(matches!(
            demo.dispatch(&mut ctx, &["type", "a"]),
            Err(DemoError::MissingArgument { name: "at_ms", .. })
        ));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let (mut ctx, mut demo) = setup(10);
        demo.dispatch(&mut ctx, &["type", "a", "0"]).unwrap();
        demo.dispatch(&mut ctx, &["tick", "10"]).unwrap();
        demo.reset(&ctx);
        assert_eq!(demo.settled(), None);
        assert_eq!(demo.emitted(), 0);
    }
}
