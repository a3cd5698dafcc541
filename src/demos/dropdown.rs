//! Dropdown menu state machine

use super::{Demo, DemoError, rest_text, unknown};
use crate::app::AppContext;

const KEY: &str = "dropdown";

/// Menu open/closed state with a highlighted entry and a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownMenu {
    items: Vec<String>,
    open: bool,
    highlighted: usize,
    selected: Option<usize>,
}

impl DropdownMenu {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            open: false,
            highlighted: 0,
            selected: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.items.get(self.highlighted).map(String::as_str)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Opening highlights the current selection
    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = self.selected.unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Move the highlight down, wrapping; opens a closed menu instead
    pub fn next(&mut self) {
        if !self.open {
            self.open();
        } else if !self.items.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.items.len();
        }
    }

    /// Move the highlight up, wrapping; opens a closed menu instead
    pub fn prev(&mut self) {
        if !self.open {
            self.open();
        } else if !self.items.is_empty() {
            self.highlighted = (self.highlighted + self.items.len() - 1) % self.items.len();
        }
    }

    /// Select the highlighted entry and close. `None` when closed or empty.
    pub fn select(&mut self) -> Option<&str> {
        if !self.open || self.items.is_empty() {
            return None;
        }
        self.selected = Some(self.highlighted);
        self.open = false;
        self.selected()
    }

    /// Select an entry by label (case-insensitive) and close
    pub fn choose(&mut self, label: &str) -> Option<&str> {
        let idx = self
            .items
            .iter()
            .position(|item| item.eq_ignore_ascii_case(label))?;
        self.selected = Some(idx);
        self.highlighted = idx;
        self.open = false;
        self.selected()
    }
}

pub struct DropdownDemo {
    menu: DropdownMenu,
}

impl DropdownDemo {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            menu: DropdownMenu::new(ctx.settings().menu_items.clone()),
        }
    }

    pub fn menu(&self) -> &DropdownMenu {
        &self.menu
    }
}

impl Demo for DropdownDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "dropdown menu with keyboard-style navigation"
    }

    fn usage(&self) -> &'static str {
        "open | close | toggle | next | prev | select | choose <label>"
    }

    fn dispatch(&mut self, _ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        match args.first().copied() {
            Some("open") => self.menu.open(),
            Some("close") => self.menu.close(),
            Some("toggle") => self.menu.toggle(),
            Some("next") => self.menu.next(),
            Some("prev") => self.menu.prev(),
            Some("select") => {
                if self.menu.select().is_none() {
                    return Err(DemoError::Rejected {
                        demo: KEY,
                        reason: "menu is closed or empty".to_string(),
                    });
                }
            }
            Some("choose") => {
                let label = rest_text(KEY, args, 1, "label")?;
                if self.menu.choose(&label).is_none() {
                    return Err(DemoError::InvalidArgument {
                        demo: KEY,
                        name: "label",
                        value: label,
                    });
                }
            }
            other => return Err(unknown(KEY, other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        let mut lines = vec![format!(
            "menu: {}",
            if self.menu.open { "open" } else { "closed" }
        )];
        if self.menu.open {
            if self.menu.items.is_empty() {
                lines.push("  (empty)".to_string());
            }
            for (i, item) in self.menu.items.iter().enumerate() {
                let marker = if i == self.menu.highlighted { ">" } else { " " };
                lines.push(format!("{} {}", marker, item));
            }
        }
        lines.push(format!("selected: {}", self.menu.selected().unwrap_or("none")));
        lines.join("\n")
    }

    fn reset(&mut self, ctx: &AppContext) {
        *self = Self::new(ctx);
    }
}
