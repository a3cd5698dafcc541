//! Reducer-driven to-do list backed by a persisted slot

use serde::{Deserialize, Serialize};

use super::{Demo, DemoError, parse_arg, rest_text, unknown};
use crate::app::AppContext;
use crate::hooks::{Reducer, reduce_persisted};
use crate::persisted::Persisted;

const KEY: &str = "todo";

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub text: String,
    pub done: bool,
}

/// To-do list state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Id handed to the next added item (ids are never reused)
    pub next_id: u32,
    pub items: Vec<Todo>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    Add(String),
    Toggle(u32),
    Edit(u32, String),
    Remove(u32),
    ClearCompleted,
}

impl TodoList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|t| t.done).count()
    }

    pub fn find(&self, id: u32) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }
}

impl Reducer for TodoList {
    type Action = TodoAction;

    /// Unknown ids leave the list unchanged
    fn reduce(&self, action: TodoAction) -> Self {
        let mut next = self.clone();
        match action {
            TodoAction::Add(text) => {
                next.items.push(Todo {
                    id: next.next_id,
                    text,
                    done: false,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            TodoAction::Toggle(id) => {
                if let Some(todo) = next.items.iter_mut().find(|t| t.id == id) {
                    todo.done = !todo.done;
                }
            }
            TodoAction::Edit(id, text) => {
                if let Some(todo) = next.items.iter_mut().find(|t| t.id == id) {
                    todo.text = text;
                }
            }
            TodoAction::Remove(id) => next.items.retain(|t| t.id != id),
            TodoAction::ClearCompleted => next.items.retain(|t| !t.done),
        }
        next
    }
}

pub struct TodoDemo {
    list: Persisted<TodoList>,
}

impl TodoDemo {
    pub fn new(ctx: &AppContext) -> Self {
        let list = ctx.persisted(KEY, TodoList::default());
        log::debug!("To-do list hydrated with {} item(s)", list.get().len());
        Self { list }
    }

    pub fn list(&self) -> &TodoList {
        self.list.get()
    }

    fn id_arg(&self, args: &[&str]) -> Result<u32, DemoError> {
        let id: u32 = parse_arg(KEY, args, 1, "id")?;
        if self.list.get().find(id).is_none() {
            log::debug!("No to-do with id {}", id);
        }
        Ok(id)
    }
}

impl Demo for TodoDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "to-do list reducer with local persistence"
    }

    fn usage(&self) -> &'static str {
        "add <text> | toggle <id> | edit <id> <text> | remove <id> | clear-completed | reset"
    }

    fn dispatch(&mut self, ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        let action = match args.first().copied() {
            Some("add") => {
                let text = rest_text(KEY, args, 1, "text")?;
                let limit = ctx.settings().max_todos;
                if self.list.get().len() >= limit {
                    return Err(DemoError::Rejected {
                        demo: KEY,
                        reason: format!("list is full ({} items)", limit),
                    });
                }
                TodoAction::Add(text)
            }
            Some("toggle") => TodoAction::Toggle(self.id_arg(args)?),
            Some("edit") => {
                let id = self.id_arg(args)?;
                TodoAction::Edit(id, rest_text(KEY, args, 2, "text")?)
            }
            Some("remove") => TodoAction::Remove(self.id_arg(args)?),
            Some("clear-completed") => TodoAction::ClearCompleted,
            Some("reset") => {
                self.list.reset();
                return Ok(());
            }
            other => return Err(unknown(KEY, other)),
        };
        reduce_persisted(&mut self.list, action);
        Ok(())
    }

    fn render(&self) -> String {
        let list = self.list.get();
        let mut lines: Vec<String> = list
            .items
            .iter()
            .map(|t| format!("[{}] {} {}", if t.done { "x" } else { " " }, t.id, t.text))
            .collect();
        lines.push(format!("{} item(s), {} done", list.len(), list.completed()));
        lines.join("\n")
    }

    fn flush(&mut self) -> usize {
        self.list.flush()
    }

    fn reset(&mut self, _ctx: &AppContext) {
        self.list.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::settings::Settings;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_reducer() {
        let list = TodoList::default()
            .reduce(TodoAction::Add("a".to_string()))
            .reduce(TodoAction::Add("b".to_string()))
            .reduce(TodoAction::Toggle(1))
            .reduce(TodoAction::Edit(2, "bee".to_string()));
        assert_eq!(list.len(), 2);
        assert!(list.find(1).unwrap().done);
        assert_eq!(list.find(2).unwrap().text, "bee");

        let cleared = list.reduce(TodoAction::ClearCompleted);
        assert_eq!(cleared.len(), 1);
        assert_eq!(cleared.next_id, 3);

        // Removed ids are not reused
        let list = cleared
            .reduce(TodoAction::Remove(2))
            .reduce(TodoAction::Add("c".to_string()));
        assert_eq!(list.items[0].id, 3);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let list = TodoList::default().reduce(TodoAction::Add("a".to_string()));
        assert_eq!(list.reduce(TodoAction::Toggle(99)), list);
        assert_eq!(list.reduce(TodoAction::Remove(99)), list);
    }

    #[test]
    fn test_demo_persists_across_instances() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = AppContext::init(store.clone(), AppOptions::default());
        let mut demo = TodoDemo::new(&ctx);
        demo.dispatch(&mut ctx, &["add", "buy", "milk"]).unwrap();
        demo.dispatch(&mut ctx, &["add", "walk", "dog"]).unwrap();
        demo.dispatch(&mut ctx, &["toggle", "2"]).unwrap();
        assert_eq!(
            demo.render(),
            "[ ] 1 buy milk\n[x] 2 walk dog\n2 item(s), 1 done"
        );
        assert_eq!(demo.flush(), 3);

        let reloaded = TodoDemo::new(&ctx);
        assert_eq!(reloaded.list(), demo.list());
    }

    #[test]
    fn test_demo_respects_max_todos() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = AppContext::init(store, AppOptions::default());
        ctx.settings_mut().update(|prev| Settings {
            max_todos: 1,
            ..prev.clone()
        });
        let mut demo = TodoDemo::new(&ctx);
        demo.dispatch(&mut ctx, &["add", "one"]).unwrap();
        assert!(matches!(
            demo.dispatch(&mut ctx, &["add", "two"]),
            Err(DemoError::Rejected { .. })
        ));
        assert_eq!(demo.list().len(), 1);
    }

    #[test]
    fn test_demo_rejects_blank_text() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = AppContext::init(store, AppOptions::default());
        let mut demo = TodoDemo::new(&ctx);
        assert!(matches!(
            demo.dispatch(&mut ctx, &["add"]),
            Err(DemoError::MissingArgument { name: "text", .. })
        ));
        assert!(demo.list().is_empty());
    }

    #[test]
    fn test_corrupt_slot_starts_empty() {
        let store = Rc::new(MemoryStore::new());
        store.raw_set("ui_notes:todo", "[1, 2");
        let ctx = AppContext::init(store, AppOptions::default());
        let demo = TodoDemo::new(&ctx);
        assert!(demo.list().is_empty());
        assert_eq!(demo.render(), "0 item(s), 0 done");
    }
}
