//! Memoized Fibonacci

use super::{Demo, DemoError, parse_arg, unknown};
use crate::app::AppContext;
use crate::hooks::Memo;

const KEY: &str = "memo";

/// Largest n whose Fibonacci number fits in a u64
pub const MAX_FIB_INPUT: u32 = 93;

pub fn fibonacci(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        // b runs one step ahead and overflows on the last step for n = 93
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    a
}

#[derive(Default)]
pub struct MemoDemo {
    memo: Memo<u32, u64>,
    last: Option<(u32, u64, bool)>,
}

impl MemoDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

impl Demo for MemoDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "memoization: recompute only when inputs change"
    }

    fn usage(&self) -> &'static str {
        "fib <n> | invalidate"
    }

    fn dispatch(&mut self, _ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        match args.first().copied() {
            Some("fib") => {
                let n: u32 = parse_arg(KEY, args, 1, "n")?;
                if n > MAX_FIB_INPUT {
                    return Err(DemoError::InvalidArgument {
                        demo: KEY,
                        name: "n",
                        value: n.to_string(),
                    });
                }
                let (value, computed) = self.memo.get_or_compute(n, |n| fibonacci(*n));
                self.last = Some((n, value, computed));
            }
            Some("invalidate") => self.memo.invalidate(),
            other => return Err(unknown(KEY, other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        let last = match self.last {
            Some((n, value, true)) => format!("fib({}) = {} (computed)", n, value),
            Some((n, value, false)) => format!("fib({}) = {} (cached)", n, value),
            None => "nothing computed yet".to_string(),
        };
        format!("{}\nrecomputations: {}", last, self.memo.recomputations())
    }

    fn reset(&mut self, _ctx: &AppContext) {
        *self = Self::new();
    }
}
