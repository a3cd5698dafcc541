//! Login token kept in a persisted slot
//!
//! Signing in stores a session with a random token; signing out resets the
//! slot, so the next start comes up signed out.

use serde::{Deserialize, Serialize};

use super::{Demo, DemoError, arg, unknown};
use crate::app::AppContext;
use crate::persisted::Persisted;

const KEY: &str = "login";

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub token: String,
}

pub struct LoginDemo {
    session: Persisted<Option<Session>>,
}

impl LoginDemo {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            session: ctx.persisted(KEY, None),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.get().as_ref()
    }
}

impl Demo for LoginDemo {
    fn key(&self) -> &'static str {
        KEY
    }

    fn summary(&self) -> &'static str {
        "login token persisted between runs"
    }

    fn usage(&self) -> &'static str {
        "login <user> <password> | logout | whoami"
    }

    fn dispatch(&mut self, ctx: &mut AppContext, args: &[&str]) -> Result<(), DemoError> {
        match args.first().copied() {
            Some("login") => {
                if let Some(session) = self.session() {
                    return Err(DemoError::Rejected {
                        demo: KEY,
                        reason: format!("already signed in as {}", session.user),
                    });
                }
                let user = arg(KEY, args, 1, "user")?.to_string();
                arg(KEY, args, 2, "password")?;
                let bytes = ctx.settings().effective_token_bytes();
                let token = ctx.random_hex(bytes);
                log::info!("Signed in as {}", user);
                self.session.set(Some(Session { user, token }));
            }
            Some("logout") => {
                if self.session().is_some() {
                    log::info!("Signed out");
                }
                self.session.reset();
            }
            Some("whoami") => {}
            other => return Err(unknown(KEY, other)),
        }
        Ok(())
    }

    fn render(&self) -> String {
        match self.session() {
            Some(session) => format!("signed in as {} (token {})", session.user, session.token),
            None => "signed out".to_string(),
        }
    }

    fn flush(&mut self) -> usize {
        self.session.flush()
    }

    fn reset(&mut self, _ctx: &AppContext) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn ctx(store: Rc<MemoryStore>) -> AppContext {
        AppContext::init(
            store,
            AppOptions {
                seed: Some(3),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_login_survives_restart() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = ctx(store.clone());
        let mut demo = LoginDemo::new(&ctx);
        demo.dispatch(&mut ctx, &["login", "ada", "hunter2"]).unwrap();
        let token = demo.session().unwrap().token.clone();
        assert_eq!(token.len(), 32);
        demo.flush();

        let reloaded = LoginDemo::new(&ctx);
        assert_eq!(reloaded.session().unwrap().token, token);
        assert!(reloaded.render().starts_with("signed in as ada"));
    }

    #[test]
    fn test_logout_clears_slot() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = ctx(store.clone());
        let mut demo = LoginDemo::new(&ctx);
        demo.dispatch(&mut ctx, &["login", "ada", "pw"]).unwrap();
        demo.flush();
        demo.dispatch(&mut ctx, &["logout"]).unwrap();
        assert_eq!(demo.render(), "signed out");
        assert!(!store.contains("ui_notes:login"));
        // Logging out twice is harmless
        demo.dispatch(&mut ctx, &["logout"]).unwrap();
    }

    #[test]
    fn test_login_requires_password_and_single_session() {
        let store = Rc::new(MemoryStore::new());
        let mut ctx = ctx(store);
        let mut demo = LoginDemo::new(&ctx);
        assert!(matches!(
            demo.dispatch(&mut ctx, &["login", "ada"]),
            Err(DemoError::MissingArgument { name: "password", .. })
        ));
        assert!(demo.session().is_none());

        demo.dispatch(&mut ctx, &["login", "ada", "pw"]).unwrap();
        assert!(matches!(
            demo.dispatch(&mut ctx, &["login", "bob", "pw"]),
            Err(DemoError::Rejected { .. })
        ));
        assert_eq!(demo.session().unwrap().user, "ada");
    }
}
